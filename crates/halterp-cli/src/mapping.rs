//! Mapping files: interpreter declarations written as data
//!
//! A mapping lists attributes in order. Each attribute is a plain value
//! (`from`), a single link (`link`) or a list of links (`links`), with an
//! optional built-in coercion applied to the extracted value. For `links`
//! the coercion applies to every href.
//!
//! ```yaml
//! item_class: Post
//! context:
//!   base_url: https://blog.example.com/
//! attributes:
//!   - name: title
//!   - name: body
//!     from: /content/body
//!   - name: parent
//!     link: up
//!     coercion: id_from_url
//!   - name: authors
//!     links: author
//!     coercion: absolute_url
//! ```

use crate::config::FileFormat;
use crate::error::{Error, Result};
use halterp_core::{coercions, AttributeDecl, Coercion, Interpreter, InterpreterBuilder, LinkDecl};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Item class used when a mapping does not name one
pub const DEFAULT_ITEM_CLASS: &str = "Item";

/// A parsed mapping file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mapping {
    /// Name reported for the interpreted items
    #[serde(default)]
    pub item_class: Option<String>,

    /// Declaration context handed to coercions
    #[serde(default)]
    pub context: BTreeMap<String, Value>,

    /// Attributes in declaration order
    pub attributes: Vec<AttributeMapping>,

    #[serde(skip)]
    source: PathBuf,
}

/// One declared attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeMapping {
    pub name: String,

    /// JSON Pointer of a plain attribute
    #[serde(default)]
    pub from: Option<String>,

    /// Relation of a single-valued link
    #[serde(default)]
    pub link: Option<String>,

    /// Relation of a multi-valued link
    #[serde(default)]
    pub links: Option<String>,

    /// Name of a built-in coercion
    #[serde(default)]
    pub coercion: Option<String>,
}

impl Mapping {
    /// Load a mapping, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let mut mapping: Mapping = FileFormat::from_path(path)
            .parse(&content)
            .map_err(|e| Error::mapping(path, e.to_string()))?;
        mapping.source = path.to_path_buf();

        tracing::debug!(
            path = %path.display(),
            attributes = mapping.attributes.len(),
            "Loaded mapping"
        );
        Ok(mapping)
    }

    /// Parse a mapping from a string
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        let source = PathBuf::from("<inline>");
        let mut mapping: Mapping = format
            .parse(content)
            .map_err(|e| Error::mapping(&source, e.to_string()))?;
        mapping.source = source;
        Ok(mapping)
    }

    /// Where this mapping was loaded from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Set a context entry unless the mapping already defines it
    pub fn default_context(&mut self, key: &str, value: impl Into<Value>) {
        self.context.entry(key.to_string()).or_insert_with(|| value.into());
    }

    /// Set a context entry, replacing what the mapping defines
    pub fn override_context(&mut self, key: &str, value: impl Into<Value>) {
        self.context.insert(key.to_string(), value.into());
    }

    /// Declare an interpreter producing plain JSON objects
    pub fn into_interpreter(self) -> Result<Interpreter<Value>> {
        let item_class = self
            .item_class
            .clone()
            .unwrap_or_else(|| DEFAULT_ITEM_CLASS.to_string());

        let mut builder = Interpreter::<Value>::builder()
            .bind_item_class_with(item_class, |attributes| Ok(Value::Object(attributes)));

        for (key, value) in &self.context {
            builder = builder.context(key.clone(), value.clone());
        }

        for attribute in &self.attributes {
            builder = self.declare(builder, attribute)?;
        }

        Ok(builder.build()?)
    }

    fn declare(
        &self,
        builder: InterpreterBuilder<Value>,
        attribute: &AttributeMapping,
    ) -> Result<InterpreterBuilder<Value>> {
        let coercion = self.coercion(attribute)?;

        let builder = match (&attribute.from, &attribute.link, &attribute.links) {
            (_, None, None) => {
                let mut decl = AttributeDecl::named(&attribute.name);
                if let Some(from) = &attribute.from {
                    decl = decl.from(from);
                }
                if let Some(coercion) = coercion {
                    decl = decl.coerce_with(coercion);
                }
                builder.extract(decl)
            }
            (None, Some(rel), None) => {
                let mut decl = LinkDecl::named(&attribute.name).rel(rel);
                if let Some(coercion) = coercion {
                    decl = decl.coerce_with(coercion);
                }
                builder.extract_link(decl)
            }
            (None, None, Some(rel)) => {
                let mut decl = LinkDecl::named(&attribute.name).rel(rel);
                if let Some(coercion) = coercion {
                    decl = decl.coerce_with(coercions::each(coercion));
                }
                builder.extract_links(decl)
            }
            _ => {
                return Err(Error::mapping(
                    &self.source,
                    format!(
                        "attribute '{}' may use only one of 'from', 'link' and 'links'",
                        attribute.name
                    ),
                ))
            }
        };

        Ok(builder)
    }

    fn coercion(&self, attribute: &AttributeMapping) -> Result<Option<Coercion>> {
        match &attribute.coercion {
            None => Ok(None),
            Some(name) => coercions::by_name(name).map(Some).ok_or_else(|| {
                Error::mapping(
                    &self.source,
                    format!(
                        "unknown coercion '{}' for attribute '{}' (known: {})",
                        name,
                        attribute.name,
                        coercions::NAMES.join(", ")
                    ),
                )
            }),
        }
    }
}
