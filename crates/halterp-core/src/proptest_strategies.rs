//! Property-based testing strategies for generating HAL documents
//!
//! This module provides proptest strategies for relation names, link
//! objects and documents, plus the properties that depend on them.

#![cfg(test)]

use crate::dsl::LinkDecl;
use crate::interpreter::Interpreter;
use crate::representation::{HalRepresentation, Representation};
use proptest::collection::vec;
use proptest::prelude::*;
use serde_json::{json, Value};

/// Strategy for relation names, including the characters that need escaping
pub fn rel_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,12}",
        "[a-z~/]{1,16}",
        "https?://[a-z]{1,8}\\.com/[a-z/~]{0,12}",
    ]
}

/// Strategy for concrete hrefs
pub fn href_strategy() -> impl Strategy<Value = String> {
    "/[a-z]{1,8}/[0-9]{1,4}"
}

/// Strategy for a link object, templated or not
pub fn link_strategy() -> impl Strategy<Value = (String, bool)> {
    (
        prop_oneof![href_strategy(), "/[a-z]{1,8}\\{\\?q\\}"],
        any::<bool>(),
    )
}

/// Build a document holding `links` under `rel`
pub fn document_with_links(rel: &str, links: &[(String, bool)]) -> HalRepresentation {
    let objects: Vec<Value> = links
        .iter()
        .map(|(href, templated)| json!({ "href": href, "templated": templated }))
        .collect();

    let mut section = serde_json::Map::new();
    section.insert(rel.to_string(), Value::Array(objects));
    HalRepresentation::new(json!({ "_links": Value::Object(section) }))
}

proptest! {
    /// Every link object comes back, in document order, as its href text
    #[test]
    fn prop_related_hrefs_preserve_order(
        rel in "[a-z]{1,12}",
        links in vec(link_strategy(), 0..6)
    ) {
        prop_assume!(rel != "curies");
        let doc = document_with_links(&rel, &links);
        let hrefs: Vec<String> = doc
            .related_hrefs(&rel)
            .iter()
            .map(|href| href.to_href_string())
            .collect();
        let expected: Vec<String> = links.iter().map(|(href, _)| href.clone()).collect();
        prop_assert_eq!(hrefs, expected);
    }

    /// Single-link extraction succeeds exactly when one target exists
    #[test]
    fn prop_single_link_cardinality(
        rel in rel_strategy(),
        links in vec(link_strategy(), 0..5)
    ) {
        prop_assume!(rel != "curies");
        let interpreter = Interpreter::<Value>::builder()
            .bind_item_class()
            .extract_link(LinkDecl::named("target").rel(rel.clone()))
            .build()
            .unwrap();

        let doc = document_with_links(&rel, &links);
        match interpreter.extract_attributes(&doc) {
            Ok(attributes) => {
                prop_assert_eq!(links.len(), 1);
                prop_assert_eq!(&attributes["target"], &Value::String(links[0].0.clone()));
            }
            Err(err) => {
                prop_assert_ne!(links.len(), 1);
                prop_assert_eq!(err.cardinality_counts(), Some((1, links.len())));
            }
        }
    }

    /// Multi-link extraction never fails and yields one string per target
    #[test]
    fn prop_multi_link_counts(
        rel in rel_strategy(),
        links in vec(link_strategy(), 0..8)
    ) {
        prop_assume!(rel != "curies");
        let interpreter = Interpreter::<Value>::builder()
            .bind_item_class()
            .extract_links(LinkDecl::named("targets").rel(rel.clone()))
            .build()
            .unwrap();

        let doc = document_with_links(&rel, &links);
        let attributes = interpreter.extract_attributes(&doc).unwrap();
        prop_assert_eq!(attributes["targets"].as_array().map(Vec::len), Some(links.len()));
    }
}
