//! Built-in coercions for common conversions
//!
//! Each function returns a shared [`Coercion`] ready for
//! `AttributeDecl::coerce_with` or `LinkDecl::coerce_with`. Absent values
//! (`null`) pass through the scalar conversions untouched.
//!
//! Copyright (c) 2025 Halterp Team
//! Licensed under the Apache-2.0 license

use crate::definition::Definition;
use crate::extractor::Coercion;
use crate::{Error, Result};
use serde_json::{Number, Value};
use std::sync::Arc;
use url::Url;

/// Context key consulted by [`absolute_url`]
pub const BASE_URL: &str = "base_url";

/// Names accepted by [`by_name`]
pub const NAMES: &[&str] = &[
    "identity",
    "string",
    "integer",
    "number",
    "boolean",
    "id_from_url",
    "absolute_url",
];

/// Look up a built-in coercion by name
pub fn by_name(name: &str) -> Option<Coercion> {
    let coercion = match name {
        "identity" => identity(),
        "string" => as_string(),
        "integer" => as_integer(),
        "number" => as_number(),
        "boolean" => as_boolean(),
        "id_from_url" => id_from_url(),
        "absolute_url" => absolute_url(),
        _ => return None,
    };
    Some(coercion)
}

/// Share a closure as a [`Coercion`]
pub fn shared<F>(coercion: F) -> Coercion
where
    F: Fn(Value, &Definition) -> Result<Value> + Send + Sync + 'static,
{
    Arc::new(coercion)
}

/// Return the value unchanged
pub fn identity() -> Coercion {
    shared(|value, _| Ok(value))
}

/// Render scalars as strings
pub fn as_string() -> Coercion {
    shared(|value, _| match value {
        Value::Null | Value::String(_) => Ok(value),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(Error::coercion("cannot convert to string", &other)),
    })
}

/// Convert numbers and numeric strings to integers
pub fn as_integer() -> Coercion {
    shared(|value, _| match &value {
        Value::Null => Ok(Value::Null),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        Value::Number(n) => match n.as_f64() {
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Ok(Value::from(f as i64))
            }
            Some(f) if f.fract() == 0.0 => Err(Error::coercion("integer out of range", &value)),
            _ => Err(Error::coercion("not an integer", &value)),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| Error::coercion("not an integer", &value)),
        _ => Err(Error::coercion("not an integer", &value)),
    })
}

/// Convert numeric strings to numbers
pub fn as_number() -> Coercion {
    shared(|value, _| match &value {
        Value::Null | Value::Number(_) => Ok(value.clone()),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| Error::coercion("not a number", &value)),
        _ => Err(Error::coercion("not a number", &value)),
    })
}

/// Convert common boolean spellings
pub fn as_boolean() -> Coercion {
    shared(|value, _| match &value {
        Value::Null | Value::Bool(_) => Ok(value.clone()),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "0" => Ok(Value::Bool(false)),
            _ => Err(Error::coercion("not a boolean", &value)),
        },
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(Value::Bool(false)),
            Some(1) => Ok(Value::Bool(true)),
            _ => Err(Error::coercion("not a boolean", &value)),
        },
        _ => Err(Error::coercion("not a boolean", &value)),
    })
}

/// Last path segment of a URL, as an integer when numeric
///
/// `/blogs/42` becomes `42`, `/users/alice/` becomes `"alice"`.
pub fn id_from_url() -> Coercion {
    shared(|value, _| match &value {
        Value::Null => Ok(Value::Null),
        Value::String(href) => id_segment(href)
            .map(|id| match id.parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => Value::String(id),
            })
            .ok_or_else(|| Error::coercion("URL has no path segment", &value)),
        _ => Err(Error::coercion("not a URL", &value)),
    })
}

/// Resolve hrefs against the `base_url` declaration context
///
/// Absolute hrefs are returned normalized. A relative href without a
/// `base_url` in context is an error.
pub fn absolute_url() -> Coercion {
    shared(|value, definition| {
        let href = match &value {
            Value::Null => return Ok(Value::Null),
            Value::String(href) => href,
            _ => return Err(Error::coercion("not a URL", &value)),
        };

        if let Ok(url) = Url::parse(href) {
            return Ok(Value::String(url.to_string()));
        }

        let base = definition
            .context(BASE_URL)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::coercion("relative URL and no base_url in context", &value))?;
        let base = Url::parse(base).map_err(|e| Error::coercion(format!("invalid base_url: {}", e), &value))?;
        let joined = base
            .join(href)
            .map_err(|e| Error::coercion(format!("cannot resolve URL: {}", e), &value))?;
        Ok(Value::String(joined.to_string()))
    })
}

/// Apply a coercion to every element of an array
///
/// Non-array values are handed to the inner coercion as they are.
pub fn each(inner: Coercion) -> Coercion {
    shared(move |value, definition| match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| inner(item, definition))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => inner(other, definition),
    })
}

/// Skip the inner coercion for absent values
pub fn optional(inner: Coercion) -> Coercion {
    shared(move |value, definition| {
        if value.is_null() {
            Ok(value)
        } else {
            inner(value, definition)
        }
    })
}

fn id_segment(href: &str) -> Option<String> {
    if let Ok(url) = Url::parse(href) {
        // A host-only URL has no id, and neither has `mailto:` and friends
        return url
            .path_segments()?
            .filter(|segment| !segment.is_empty())
            .last()
            .map(str::to_string);
    }

    // Relative hrefs, or absolute ones that do not parse
    let path = href.split(['?', '#']).next().unwrap_or(href);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.ends_with(':'))
        .map(str::to_string)
}
