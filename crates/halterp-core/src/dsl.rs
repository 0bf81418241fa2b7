//! Declaration surface for interpreters
//!
//! An interpreter is declared once per model type with a fluent builder:
//! bind the item class, then list the attributes to extract. `build()`
//! freezes the declaration into an [`Interpreter`].
//!
//! ```
//! use halterp_core::{AttributeDecl, Interpreter, LinkDecl, HalRepresentation};
//! use halterp_core::coercions;
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct Post {
//!     title: String,
//!     parent: i64,
//! }
//!
//! let interpreter = Interpreter::<Post>::builder()
//!     .bind_item_class()
//!     .extract(AttributeDecl::named("title"))
//!     .extract_link(LinkDecl::named("parent").rel("up").coerce_with(coercions::id_from_url()))
//!     .build()
//!     .unwrap();
//!
//! let doc = HalRepresentation::new(json!({
//!     "title": "Hello",
//!     "_links": { "up": { "href": "/blogs/42" } }
//! }));
//! let post = interpreter.evaluate(&doc).unwrap();
//! assert_eq!(post.parent, 42);
//! ```
//!
//! Copyright (c) 2025 Halterp Team
//! Licensed under the Apache-2.0 license

use crate::definition::Definition;
use crate::extractor::{Coercion, Extractor, ExtractorKind, ValueGetter};
use crate::interpreter::{Attributes, Instantiate, Interpreter};
use crate::pointer;
use crate::representation::Representation;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Declaration of a plain attribute
pub struct AttributeDecl {
    name: String,
    from: Option<String>,
    value_getter: Option<ValueGetter>,
    coercion: Option<Coercion>,
}

impl AttributeDecl {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: None,
            value_getter: None,
            coercion: None,
        }
    }

    /// Read the value from this JSON Pointer instead of `/<name>`
    pub fn from(mut self, location: impl Into<String>) -> Self {
        self.from = Some(location.into());
        self
    }

    /// Obtain the raw value with a custom getter
    pub fn with<F>(mut self, getter: F) -> Self
    where
        F: Fn(&dyn Representation) -> Result<Value> + Send + Sync + 'static,
    {
        self.value_getter = Some(Arc::new(getter));
        self
    }

    /// Transform the raw value before it is stored
    pub fn coercion<F>(self, coercion: F) -> Self
    where
        F: Fn(Value, &Definition) -> Result<Value> + Send + Sync + 'static,
    {
        self.coerce_with(Arc::new(coercion))
    }

    /// Use an already shared coercion, such as a built-in one
    pub fn coerce_with(mut self, coercion: Coercion) -> Self {
        self.coercion = Some(coercion);
        self
    }
}

/// Declaration of a link attribute (single or multi-valued)
pub struct LinkDecl {
    name: String,
    rel: Option<String>,
    coercion: Option<Coercion>,
}

impl LinkDecl {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rel: None,
            coercion: None,
        }
    }

    /// Relation to follow; defaults to the attribute name
    pub fn rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    /// Transform the href (single) or href list (multi) before it is stored
    pub fn coercion<F>(self, coercion: F) -> Self
    where
        F: Fn(Value, &Definition) -> Result<Value> + Send + Sync + 'static,
    {
        self.coerce_with(Arc::new(coercion))
    }

    pub fn coerce_with(mut self, coercion: Coercion) -> Self {
        self.coercion = Some(coercion);
        self
    }

    fn into_extractor(self, single: bool) -> Extractor {
        let rel = self.rel.unwrap_or_else(|| self.name.clone());
        let location = pointer::links_path(&rel);
        let kind = if single {
            ExtractorKind::Link { rel }
        } else {
            ExtractorKind::Links { rel }
        };
        Extractor::new(self.name, location, kind, self.coercion)
    }
}

/// Builder accumulating the declaration of one interpreter
pub struct InterpreterBuilder<T> {
    item_class: Option<(String, Instantiate<T>)>,
    bindings: usize,
    extractors: Vec<Extractor>,
    context: HashMap<String, Value>,
}

impl<T> InterpreterBuilder<T> {
    pub fn new() -> Self {
        Self {
            item_class: None,
            bindings: 0,
            extractors: Vec::new(),
            context: HashMap::new(),
        }
    }

    /// Build items by deserializing the extracted attributes into `T`
    pub fn bind_item_class(self) -> Self
    where
        T: DeserializeOwned,
    {
        let item_class = short_type_name::<T>();
        let name = item_class.clone();
        self.bind_item_class_with(item_class, move |attributes| {
            serde_json::from_value(Value::Object(attributes)).map_err(|e| Error::Instantiation {
                item_class: name.clone(),
                message: e.to_string(),
                source: Some(e.into()),
            })
        })
    }

    /// Build items with a custom constructor
    pub fn bind_item_class_with<F>(mut self, item_class: impl Into<String>, instantiate: F) -> Self
    where
        F: Fn(Attributes) -> Result<T> + Send + Sync + 'static,
    {
        self.bindings += 1;
        self.item_class = Some((item_class.into(), Arc::new(instantiate)));
        self
    }

    /// Declare a plain attribute
    pub fn extract(mut self, decl: AttributeDecl) -> Self {
        let location = decl
            .from
            .unwrap_or_else(|| pointer::attribute_path(&decl.name));
        let kind = ExtractorKind::Plain {
            value_getter: decl.value_getter,
        };
        self.extractors
            .push(Extractor::new(decl.name, location, kind, decl.coercion));
        self
    }

    /// Declare an attribute taken from a relation that must have exactly one target
    pub fn extract_link(mut self, decl: LinkDecl) -> Self {
        self.extractors.push(decl.into_extractor(true));
        self
    }

    /// Declare an attribute taken from all targets of a relation
    pub fn extract_links(mut self, decl: LinkDecl) -> Self {
        self.extractors.push(decl.into_extractor(false));
        self
    }

    /// Attach read-only context visible to coercions
    pub fn context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Freeze the declaration
    pub fn build(self) -> Result<Interpreter<T>> {
        if self.bindings > 1 {
            return Err(Error::declaration(format!(
                "item class bound {} times, expected at most once",
                self.bindings
            )));
        }
        let (item_class, instantiate) = self
            .item_class
            .ok_or_else(|| Error::declaration("no item class bound"))?;

        tracing::debug!(
            item_class = %item_class,
            attributes = self.extractors.len(),
            "Declared interpreter"
        );

        let definition = Definition::new(item_class, self.extractors, self.context);
        Ok(Interpreter::new(definition, instantiate))
    }
}

impl<T> Default for InterpreterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
