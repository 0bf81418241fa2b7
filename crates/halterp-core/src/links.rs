//! Link resolution and cardinality enforcement
//!
//! Copyright (c) 2025 Halterp Team
//! Licensed under the Apache-2.0 license

use crate::representation::{Href, Representation};
use crate::{Error, Result};

/// Normalize relation targets to plain strings
///
/// Templated targets contribute their pattern, plain ones pass through.
pub fn stringify_hrefs(hrefs: &[Href]) -> Vec<String> {
    hrefs.iter().map(Href::to_href_string).collect()
}

/// All targets of `rel` as strings; empty when the relation is absent
pub fn related_hrefs(representation: &dyn Representation, rel: &str) -> Vec<String> {
    stringify_hrefs(&representation.related_hrefs(rel))
}

/// The sole href of a single-valued relation
///
/// Zero matches fail the same way as several: presence is mandatory.
pub fn expect_exactly_one(attribute: &str, rel: &str, mut hrefs: Vec<String>) -> Result<String> {
    if hrefs.len() != 1 {
        return Err(Error::Cardinality {
            attribute: attribute.to_string(),
            rel: rel.to_string(),
            expected: 1,
            actual: hrefs.len(),
        });
    }
    Ok(hrefs.remove(0))
}
