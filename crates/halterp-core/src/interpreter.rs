//! Evaluation of declared interpreters against documents
//!
//! Copyright (c) 2025 Halterp Team
//! Licensed under the Apache-2.0 license

use crate::definition::Definition;
use crate::dsl::InterpreterBuilder;
use crate::pointer;
use crate::representation::{HalRepresentation, Representation};
use crate::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Extracted attribute values keyed by attribute name
pub type Attributes = Map<String, Value>;

/// Constructor turning extracted attributes into an item
pub type Instantiate<T> = Arc<dyn Fn(Attributes) -> Result<T> + Send + Sync>;

/// Relation under which collection documents embed their members
pub const ITEM_REL: &str = "item";

/// A frozen interpreter for items of type `T`
///
/// Cloning is cheap and clones share the same declaration, so one
/// interpreter can serve many documents concurrently.
pub struct Interpreter<T> {
    definition: Arc<Definition>,
    instantiate: Instantiate<T>,
}

impl<T> Interpreter<T> {
    /// Start declaring an interpreter
    pub fn builder() -> InterpreterBuilder<T> {
        InterpreterBuilder::new()
    }

    pub(crate) fn new(definition: Definition, instantiate: Instantiate<T>) -> Self {
        Self {
            definition: Arc::new(definition),
            instantiate,
        }
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    /// Run every extractor in declaration order
    ///
    /// Stops at the first failing attribute.
    pub fn extract_attributes(&self, representation: &dyn Representation) -> Result<Attributes> {
        let mut attributes = Attributes::new();
        for extractor in self.definition.extractors() {
            let value = extractor.extract(representation, &self.definition)?;
            attributes.insert(extractor.attribute().to_string(), value);
        }
        Ok(attributes)
    }

    /// Interpret one document into an item
    pub fn evaluate(&self, representation: &dyn Representation) -> Result<T> {
        let start = Instant::now();
        tracing::debug!(
            item_class = %self.definition.item_class(),
            attributes = self.definition.len(),
            "Interpreting document"
        );

        let attributes = self.extract_attributes(representation)?;
        let item = (self.instantiate)(attributes)?;

        tracing::debug!(
            item_class = %self.definition.item_class(),
            duration_us = start.elapsed().as_micros() as u64,
            "Document interpreted"
        );
        Ok(item)
    }

    /// Interpret a collection document, or a single item document
    ///
    /// When the document embeds an `item` relation each member is an item,
    /// even if there are none. Otherwise the document itself is the only item.
    pub fn evaluate_items(&self, representation: &HalRepresentation) -> Result<Vec<T>> {
        let collection = representation.resolve(&pointer::embedded_path(ITEM_REL))?;
        if collection.is_none() {
            return Ok(vec![self.evaluate(representation)?]);
        }

        let members = representation.embedded(ITEM_REL);
        tracing::debug!(members = members.len(), "Interpreting collection");
        members
            .iter()
            .map(|member| self.evaluate(member))
            .collect()
    }

    /// Evaluate every extractor and report all failures instead of the first
    ///
    /// When every attribute extracts, the item is also built so that sink
    /// failures are reported too. An empty list means `evaluate` succeeds.
    pub fn problems(&self, representation: &dyn Representation) -> Vec<Problem> {
        let mut attributes = Attributes::new();
        let mut problems = Vec::new();

        for extractor in self.definition.extractors() {
            match extractor.extract(representation, &self.definition) {
                Ok(value) => {
                    attributes.insert(extractor.attribute().to_string(), value);
                }
                Err(err) => problems.push(Problem {
                    attribute: Some(extractor.attribute().to_string()),
                    location: extractor.location().to_string(),
                    message: err.to_string(),
                }),
            }
        }

        if problems.is_empty() {
            if let Err(err) = (self.instantiate)(attributes) {
                problems.push(Problem {
                    attribute: None,
                    location: String::new(),
                    message: err.to_string(),
                });
            }
        }

        if !problems.is_empty() {
            tracing::debug!(
                item_class = %self.definition.item_class(),
                problems = problems.len(),
                "Document has interpretation problems"
            );
        }
        problems
    }
}

impl<T> Clone for Interpreter<T> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            instantiate: Arc::clone(&self.instantiate),
        }
    }
}

impl<T> fmt::Debug for Interpreter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// One attribute that could not be interpreted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    /// Failing attribute; `None` when the item itself could not be built
    pub attribute: Option<String>,
    /// JSON Pointer of the failing attribute (empty for the whole document)
    pub location: String,
    pub message: String,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some(attribute) => write!(f, "{} ({}): {}", attribute, self.location, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
