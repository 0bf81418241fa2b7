//! Frozen interpreter declarations
//!
//! Copyright (c) 2025 Halterp Team
//! Licensed under the Apache-2.0 license

use crate::extractor::Extractor;
use serde_json::Value;
use std::collections::HashMap;

/// The immutable result of a declaration
///
/// Holds the ordered extractor list, the name of the bound item class and
/// any declaration context. Coercions receive it by reference.
#[derive(Debug, Clone)]
pub struct Definition {
    item_class: String,
    extractors: Vec<Extractor>,
    context: HashMap<String, Value>,
}

impl Definition {
    pub(crate) fn new(
        item_class: String,
        extractors: Vec<Extractor>,
        context: HashMap<String, Value>,
    ) -> Self {
        Self {
            item_class,
            extractors,
            context,
        }
    }

    /// Name of the model type this definition builds
    pub fn item_class(&self) -> &str {
        &self.item_class
    }

    /// Extractors in declaration order
    pub fn extractors(&self) -> &[Extractor] {
        &self.extractors
    }

    /// The extractor that determines `attribute` (the last one declared)
    pub fn extractor(&self, attribute: &str) -> Option<&Extractor> {
        self.extractors
            .iter()
            .rev()
            .find(|extractor| extractor.attribute() == attribute)
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.extractors.iter().map(Extractor::attribute).collect()
    }

    /// Declaration context value
    pub fn context(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}
