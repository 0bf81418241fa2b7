// Tests for output formatting
//
// Output is written into a shared in-memory buffer so that what the
// writer produced can be inspected afterwards.

use super::*;
use crate::handlers::links::LinkEntry;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

fn writer(format: OutputFormat) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, false, Box::new(buffer.clone()));
    (writer, buffer)
}

fn cardinality_problem() -> Problem {
    Problem {
        attribute: Some("parent".to_string()),
        location: "/_links/up".to_string(),
        message: "Cardinality error for 'parent' (rel 'up'): expected 1, found 2".to_string(),
    }
}

#[test]
fn test_attributes_human() {
    let formatted = format_attributes_human(&json!({
        "id": 42,
        "title": "Declarative HAL",
        "body": null,
        "authors": ["/users/alice"]
    }));

    assert!(formatted.contains("id       42"));
    assert!(formatted.contains("title    Declarative HAL"));
    assert!(formatted.contains("body     -"));
    assert!(formatted.contains(r#"authors  ["/users/alice"]"#));
    assert_eq!(format_attributes_human(&json!({})), "(no attributes)");
}

#[test]
fn test_attributes_json() {
    let (mut output, buffer) = writer(OutputFormat::Json);
    output.attributes(&json!({ "parent": 42 })).unwrap();
    assert_eq!(buffer.contents(), "{\"parent\":42}\n");
}

#[test]
fn test_attributes_yaml() {
    let (mut output, buffer) = writer(OutputFormat::Yaml);
    output.attributes(&json!({ "parent": 42 })).unwrap();
    assert_eq!(buffer.contents(), "parent: 42\n");
}

#[test]
fn test_problems_human() {
    let formatted = format_problems_human(&[cardinality_problem()]);
    assert!(formatted.starts_with("1 problem(s):"));
    assert!(formatted.contains("✗ parent (/_links/up): Cardinality error"));
    assert_eq!(format_problems_human(&[]), "No problems found");
}

#[test]
fn test_problems_json() {
    let (mut output, buffer) = writer(OutputFormat::Json);
    output.problems(&[cardinality_problem()]).unwrap();

    let parsed: Value = serde_json::from_str(buffer.contents().trim()).unwrap();
    assert_eq!(parsed[0]["attribute"], "parent");
    assert_eq!(parsed[0]["location"], "/_links/up");
}

#[test]
fn test_links_human() {
    let relations = vec![
        RelationLinks {
            rel: "author".to_string(),
            links: vec![],
        },
        RelationLinks {
            rel: "search".to_string(),
            links: vec![LinkEntry {
                href: "/posts{?q}".to_string(),
                templated: true,
                variables: vec!["q".to_string()],
            }],
        },
    ];

    assert_eq!(
        format_links_human(&relations),
        "author\n  (none)\nsearch\n  /posts{?q} (templated: q)"
    );
    assert_eq!(format_links_human(&[]), "No relations found");
}

#[test]
fn test_messages_suppressed_outside_human_format() {
    let (mut output, buffer) = writer(OutputFormat::Json);
    output.info("loading").unwrap();
    output.success("done").unwrap();
    output.section("Item 1").unwrap();
    assert!(buffer.contents().is_empty());

    let (mut output, buffer) = writer(OutputFormat::Human);
    output.success("done").unwrap();
    output.error("failed").unwrap();
    assert_eq!(buffer.contents(), "done\nERROR: failed\n");
}

#[test]
fn test_quiet_keeps_data_and_errors() {
    let buffer = SharedBuffer::default();
    let mut output =
        OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));

    output.info("loading").unwrap();
    output.attributes(&json!({ "id": 1 })).unwrap();
    output.error("failed").unwrap();
    assert_eq!(buffer.contents(), "id  1\nERROR: failed\n");
}
