//! Links command handler

use super::utils::read_document;
use crate::cli::LinksArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use halterp_core::{HalRepresentation, Href, Representation};
use serde::Serialize;
use tracing::{info, instrument};

/// One relation and the hrefs it resolves to
#[derive(Debug, Clone, Serialize)]
pub struct RelationLinks {
    pub rel: String,
    pub links: Vec<LinkEntry>,
}

/// A single href, embedded members included
#[derive(Debug, Clone, Serialize)]
pub struct LinkEntry {
    pub href: String,
    pub templated: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<String>,
}

impl From<&Href> for LinkEntry {
    fn from(href: &Href) -> Self {
        match href {
            Href::Plain(href) => Self {
                href: href.clone(),
                templated: false,
                variables: Vec::new(),
            },
            Href::Template(template) => Self {
                href: template.pattern().to_string(),
                templated: true,
                variables: template.variables(),
            },
        }
    }
}

/// Collect the relations of a document, or just the requested one
pub fn collect_relations(document: &HalRepresentation, rel: Option<&str>) -> Vec<RelationLinks> {
    let rels = match rel {
        Some(rel) => vec![rel.to_string()],
        None => document.rels(),
    };

    rels.into_iter()
        .map(|rel| RelationLinks {
            links: document.related_hrefs(&rel).iter().map(LinkEntry::from).collect(),
            rel,
        })
        .collect()
}

/// Handle the links command
#[instrument(skip(output), fields(document = %args.document.display()))]
pub fn handle_links(args: LinksArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("links_command");

    let document = read_document(&args.document)?;
    let relations = collect_relations(&document, args.rel.as_deref());
    info!(relations = relations.len(), "Listed document relations");

    output.links(&relations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> HalRepresentation {
        HalRepresentation::new(json!({
            "_links": {
                "self": { "href": "/posts/7" },
                "search": { "href": "/posts{?q,page}", "templated": true }
            },
            "_embedded": {
                "author": [{ "_links": { "self": { "href": "/users/alice" } } }]
            }
        }))
    }

    #[test]
    fn test_collect_all_relations() {
        let relations = collect_relations(&document(), None);
        let rels: Vec<&str> = relations.iter().map(|r| r.rel.as_str()).collect();
        assert_eq!(rels, vec!["author", "search", "self"]);

        let search = &relations[1];
        assert!(search.links[0].templated);
        assert_eq!(search.links[0].variables, vec!["q", "page"]);
        assert_eq!(relations[0].links[0].href, "/users/alice");
    }

    #[test]
    fn test_collect_single_relation() {
        let relations = collect_relations(&document(), Some("missing"));
        assert_eq!(relations.len(), 1);
        assert!(relations[0].links.is_empty());
    }
}
