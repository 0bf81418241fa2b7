//! Attribute extractors
//!
//! An [`Extractor`] is one declared attribute: where its raw value comes
//! from and how that value is coerced before it reaches the model. Kinds are
//! a closed set of tagged variants evaluated by a single function, so a
//! frozen extractor list can be shared across threads and documents.
//!
//! Copyright (c) 2025 Halterp Team
//! Licensed under the Apache-2.0 license

use crate::definition::Definition;
use crate::links;
use crate::representation::Representation;
use crate::Result;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Transform applied to a raw value before it is stored
///
/// The owning [`Definition`] is passed explicitly so a coercion can read
/// declaration context or peer extractors.
pub type Coercion = Arc<dyn Fn(Value, &Definition) -> Result<Value> + Send + Sync>;

/// Custom raw-value lookup replacing the default pointer resolution
pub type ValueGetter = Arc<dyn Fn(&dyn Representation) -> Result<Value> + Send + Sync>;

/// How an extractor obtains its raw value
#[derive(Clone)]
pub enum ExtractorKind {
    /// Value at the extractor's location, or whatever the getter returns
    Plain { value_getter: Option<ValueGetter> },
    /// Exactly one target of a relation
    Link { rel: String },
    /// All targets of a relation, possibly none
    Links { rel: String },
}

impl fmt::Debug for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractorKind::Plain { value_getter } => f
                .debug_struct("Plain")
                .field("value_getter", &value_getter.as_ref().map(|_| "<fn>"))
                .finish(),
            ExtractorKind::Link { rel } => f.debug_struct("Link").field("rel", rel).finish(),
            ExtractorKind::Links { rel } => f.debug_struct("Links").field("rel", rel).finish(),
        }
    }
}

/// A single declared attribute
#[derive(Clone)]
pub struct Extractor {
    attribute: String,
    location: String,
    kind: ExtractorKind,
    coercion: Option<Coercion>,
}

impl Extractor {
    pub(crate) fn new(
        attribute: String,
        location: String,
        kind: ExtractorKind,
        coercion: Option<Coercion>,
    ) -> Self {
        Self {
            attribute,
            location,
            kind,
            coercion,
        }
    }

    /// Name of the model attribute this extractor populates
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// JSON Pointer the value is read from
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn kind(&self) -> &ExtractorKind {
        &self.kind
    }

    /// Relation name for link extractors
    pub fn rel(&self) -> Option<&str> {
        match &self.kind {
            ExtractorKind::Link { rel } | ExtractorKind::Links { rel } => Some(rel.as_str()),
            ExtractorKind::Plain { .. } => None,
        }
    }

    pub fn has_coercion(&self) -> bool {
        self.coercion.is_some()
    }

    /// Evaluate this extractor against one document
    ///
    /// Errors from value getters and coercions are returned as they were
    /// raised. A missing plain location is `Value::Null`, not an error.
    pub fn extract(&self, representation: &dyn Representation, definition: &Definition) -> Result<Value> {
        tracing::trace!(attribute = %self.attribute, location = %self.location, "Extracting attribute");

        let raw = match &self.kind {
            ExtractorKind::Plain { value_getter: Some(getter) } => getter(representation)?,
            ExtractorKind::Plain { value_getter: None } => representation
                .resolve(&self.location)?
                .unwrap_or(Value::Null),
            ExtractorKind::Links { rel } => {
                Value::from(links::related_hrefs(representation, rel))
            }
            ExtractorKind::Link { rel } => {
                let hrefs = links::related_hrefs(representation, rel);
                Value::String(links::expect_exactly_one(&self.attribute, rel, hrefs)?)
            }
        };

        self.coerce(raw, definition)
    }

    fn coerce(&self, raw: Value, definition: &Definition) -> Result<Value> {
        match &self.coercion {
            Some(coercion) => coercion(raw, definition),
            None => Ok(raw),
        }
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("attribute", &self.attribute)
            .field("location", &self.location)
            .field("kind", &self.kind)
            .field("coercion", &self.coercion.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
