//! Halterp Core - declarative interpretation of HAL documents
//!
//! This crate turns HAL documents (JSON with `_links` and `_embedded`
//! relations alongside plain attributes) into typed models. A model type is
//! declared once with an [`InterpreterBuilder`]; the resulting
//! [`Interpreter`] evaluates that declaration against any document.
//!
//! # Main Components
//!
//! - **Pointer**: JSON Pointer escaping and resolution
//! - **Representation**: document access, including the HAL implementation
//! - **Extractor**: one declared attribute and its evaluation
//! - **Links**: href normalization and single-link cardinality checks
//! - **DSL**: the declaration builder
//! - **Interpreter**: evaluation of frozen declarations
//! - **Coercions**: built-in value conversions
//!
//! # Example
//!
//! ```
//! use halterp_core::{AttributeDecl, HalRepresentation, Interpreter, LinkDecl, Result};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct Post {
//!     title: String,
//!     authors: Vec<String>,
//! }
//!
//! fn example() -> Result<()> {
//!     let interpreter = Interpreter::<Post>::builder()
//!         .bind_item_class()
//!         .extract(AttributeDecl::named("title"))
//!         .extract_links(LinkDecl::named("authors").rel("author"))
//!         .build()?;
//!
//!     let doc = HalRepresentation::new(json!({
//!         "title": "Hello",
//!         "_links": { "author": [{ "href": "/users/1" }, { "href": "/users/2" }] }
//!     }));
//!     let post = interpreter.evaluate(&doc)?;
//!     assert_eq!(post.authors, vec!["/users/1", "/users/2"]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod coercions;
pub mod definition;
pub mod dsl;
pub mod error;
pub mod extractor;
pub mod interpreter;
pub mod links;
pub mod pointer;
pub mod representation;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use definition::Definition;
pub use dsl::{AttributeDecl, InterpreterBuilder, LinkDecl};
pub use error::{Error, Result};
pub use extractor::{Coercion, Extractor, ExtractorKind, ValueGetter};
pub use interpreter::{Attributes, Interpreter, Problem};
pub use representation::{HalRepresentation, Href, Representation, UriTemplate};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
