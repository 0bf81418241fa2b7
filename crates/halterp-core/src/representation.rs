//! Document access for interpretation
//!
//! Extractors never touch JSON directly. They go through [`Representation`],
//! which answers two questions: what value lives at a pointer, and which
//! targets does a relation point at. [`HalRepresentation`] answers them for
//! an in-memory HAL document.
//!
//! Copyright (c) 2025 Halterp Team
//! Licensed under the Apache-2.0 license

use crate::pointer;
use crate::Result;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

static TEMPLATE_EXPRESSION: OnceLock<Regex> = OnceLock::new();

/// Document accessor consumed by extractors
pub trait Representation {
    /// Value at a JSON Pointer, `None` when the location is absent
    fn resolve(&self, pointer: &str) -> Result<Option<Value>>;

    /// Targets of a relation, empty when the relation is absent
    fn related_hrefs(&self, rel: &str) -> Vec<Href>;
}

/// A URI Template (RFC 6570) appearing as a link target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    pattern: String,
}

impl UriTemplate {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// The unexpanded template text
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Variable names referenced by the template, in order of appearance
    pub fn variables(&self) -> Vec<String> {
        let regex = TEMPLATE_EXPRESSION
            .get_or_init(|| Regex::new(r"\{([^}]*)\}").expect("template expression pattern"));

        let mut names = Vec::new();
        for captures in regex.captures_iter(&self.pattern) {
            let expression = captures[1].trim_start_matches(['+', '#', '.', '/', ';', '?', '&']);
            for spec in expression.split(',') {
                let name = spec
                    .split(':')
                    .next()
                    .unwrap_or_default()
                    .trim_end_matches('*');
                if !name.is_empty() && !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// A relation target: either a concrete href or a URI Template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Href {
    Plain(String),
    Template(UriTemplate),
}

impl Href {
    /// Normalize to a plain string; templates yield their pattern
    pub fn to_href_string(&self) -> String {
        match self {
            Href::Plain(href) => href.clone(),
            Href::Template(template) => template.pattern().to_string(),
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Href::Template(_))
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Href::Plain(href) => write!(f, "{}", href),
            Href::Template(template) => write!(f, "{}", template),
        }
    }
}

/// An in-memory HAL document
#[derive(Debug, Clone, PartialEq)]
pub struct HalRepresentation {
    document: Value,
}

impl HalRepresentation {
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// Parse a HAL document from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn into_document(self) -> Value {
        self.document
    }

    /// The `self` link of this document, if any
    pub fn href(&self) -> Option<String> {
        self.document
            .pointer("/_links/self/href")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Embedded members of a relation
    pub fn embedded(&self, rel: &str) -> Vec<HalRepresentation> {
        self.matching_entries("_embedded", rel)
            .into_iter()
            .flat_map(as_members)
            .filter(|member| member.is_object())
            .map(|member| HalRepresentation::new(member.clone()))
            .collect()
    }

    /// Whether the relation appears under `_links` or `_embedded`
    pub fn has_related(&self, rel: &str) -> bool {
        !self.matching_entries("_embedded", rel).is_empty()
            || !self.matching_entries("_links", rel).is_empty()
    }

    /// Every relation name used by this document, sorted and de-duplicated
    pub fn rels(&self) -> Vec<String> {
        let mut rels: Vec<String> = ["_links", "_embedded"]
            .iter()
            .filter_map(|section| self.document.get(*section).and_then(Value::as_object))
            .flat_map(|section| section.keys())
            .filter(|key| key.as_str() != "curies")
            .cloned()
            .collect();
        rels.sort();
        rels.dedup();
        rels
    }

    fn link_hrefs(&self, rel: &str) -> Vec<Href> {
        self.matching_entries("_links", rel)
            .into_iter()
            .flat_map(as_members)
            .filter_map(|link| {
                let href = link.get("href").and_then(Value::as_str);
                match href {
                    Some(href) if is_templated(link) => Some(Href::Template(UriTemplate::new(href))),
                    Some(href) => Some(Href::Plain(href.to_string())),
                    None => {
                        tracing::warn!(rel = %rel, link = %link, "Skipping link without href");
                        None
                    }
                }
            })
            .collect()
    }

    fn embedded_hrefs(&self, rel: &str) -> Vec<Href> {
        self.embedded(rel)
            .into_iter()
            .filter_map(|member| match member.href() {
                Some(href) => Some(Href::Plain(href)),
                None => {
                    tracing::debug!(rel = %rel, "Skipping embedded member without self link");
                    None
                }
            })
            .collect()
    }

    /// Entries of a section whose key matches `rel`, literally or through a CURIE
    fn matching_entries(&self, section: &str, rel: &str) -> Vec<&Value> {
        let Some(entries) = self.document.get(section).and_then(Value::as_object) else {
            return Vec::new();
        };
        let wanted = self.fully_qualified(rel);

        entries
            .iter()
            .filter(|(key, _)| key.as_str() != "curies" || section != "_links")
            .filter(|(key, _)| key.as_str() == rel || self.fully_qualified(key) == wanted)
            .map(|(_, value)| value)
            .collect()
    }

    /// Expand a compact relation (`prefix:name`) using the document's curies
    fn fully_qualified(&self, rel: &str) -> String {
        let Some((prefix, reference)) = rel.split_once(':') else {
            return rel.to_string();
        };

        self.document
            .pointer("/_links/curies")
            .map(as_members)
            .unwrap_or_default()
            .into_iter()
            .find(|curie| curie.get("name").and_then(Value::as_str) == Some(prefix))
            .and_then(|curie| curie.get("href").and_then(Value::as_str))
            .map(|template| template.replace("{rel}", reference))
            .unwrap_or_else(|| rel.to_string())
    }
}

impl Representation for HalRepresentation {
    fn resolve(&self, pointer: &str) -> Result<Option<Value>> {
        Ok(pointer::resolve(&self.document, pointer)?.cloned())
    }

    fn related_hrefs(&self, rel: &str) -> Vec<Href> {
        let mut hrefs = self.embedded_hrefs(rel);
        hrefs.extend(self.link_hrefs(rel));
        hrefs
    }
}

impl From<Value> for HalRepresentation {
    fn from(document: Value) -> Self {
        Self::new(document)
    }
}

/// A relation entry is either a single object or an array of them
fn as_members(entry: &Value) -> Vec<&Value> {
    match entry {
        Value::Array(members) => members.iter().collect(),
        other => vec![other],
    }
}

fn is_templated(link: &Value) -> bool {
    link.get("templated").and_then(Value::as_bool).unwrap_or(false)
}
