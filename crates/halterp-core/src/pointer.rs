//! JSON Pointer helpers (RFC 6901)
//!
//! Relation names are embedded in pointer paths as single segments, so a
//! literal `~` becomes `~0` and a literal `/` becomes `~1`. The order of the
//! two substitutions matters in both directions.
//!
//! Copyright (c) 2025 Halterp Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use serde_json::Value;

/// Escape a string for use as one JSON Pointer segment
pub fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Reverse of [`escape_segment`]
pub fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Default location of a plain attribute
pub fn attribute_path(attribute: &str) -> String {
    format!("/{}", attribute)
}

/// Location of a link relation inside a HAL document
pub fn links_path(rel: &str) -> String {
    format!("/_links/{}", escape_segment(rel))
}

/// Location of an embedded relation inside a HAL document
pub fn embedded_path(rel: &str) -> String {
    format!("/_embedded/{}", escape_segment(rel))
}

/// Split a pointer into its decoded segments
pub fn segments(pointer: &str) -> Result<Vec<String>> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    check(pointer)?;

    Ok(pointer
        .split('/')
        .skip(1) // leading empty segment
        .map(unescape_segment)
        .collect())
}

/// Resolve a pointer against a document
///
/// A missing location yields `Ok(None)`. Only a malformed pointer is an
/// error.
pub fn resolve<'a>(document: &'a Value, pointer: &str) -> Result<Option<&'a Value>> {
    if pointer.is_empty() {
        return Ok(Some(document));
    }
    check(pointer)?;

    Ok(document.pointer(pointer))
}

fn check(pointer: &str) -> Result<()> {
    if !pointer.starts_with('/') {
        return Err(Error::InvalidPointer {
            pointer: pointer.to_string(),
            message: "must be empty or start with '/'".to_string(),
        });
    }
    Ok(())
}
