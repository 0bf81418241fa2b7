//! End-to-end tests for declaring and evaluating interpreters


use halterp_core::{
    coercions, AttributeDecl, Error, HalRepresentation, Interpreter, LinkDecl, Representation,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use test_support::{post_document, post_document_with_up, post_interpreter, Blog};

#[test]
fn test_post_interpretation() {
    let post = post_interpreter().evaluate(&post_document()).unwrap();

    assert_eq!(post.title, "Declarative HAL");
    assert_eq!(post.body.as_deref(), Some("links all the way down"));
    assert_eq!(post.word_count, Some(5));
    assert_eq!(
        post.parent,
        Blog {
            id: 42,
            name: "Hypermedia Weekly".to_string()
        }
    );
    assert_eq!(post.authors, vec!["/users/alice"]);
    assert_eq!(post.search, vec!["/posts{?q}"]);
}

#[test]
fn test_parent_id_from_up_link() {
    let interpreter = Interpreter::<Value>::builder()
        .bind_item_class()
        .extract_link(
            LinkDecl::named("parent")
                .rel("up")
                .coerce_with(coercions::id_from_url()),
        )
        .build()
        .unwrap();

    let doc = HalRepresentation::new(json!({ "_links": { "up": { "href": "/blogs/42" } } }));
    let item = interpreter.evaluate(&doc).unwrap();
    assert_eq!(item, json!({ "parent": 42 }));
}

#[test]
fn test_two_authors_violate_single_link() {
    let interpreter = Interpreter::<Value>::builder()
        .bind_item_class()
        .extract_link(LinkDecl::named("author").coercion(|href, _| Ok(href)))
        .build()
        .unwrap();

    let doc = HalRepresentation::new(json!({
        "_links": { "author": [{ "href": "a" }, { "href": "b" }] }
    }));
    let err = interpreter.evaluate(&doc).unwrap_err();
    assert!(err.to_string().contains("expected 1, found 2"), "{}", err);
}

#[test]
fn test_missing_up_link_is_an_error() {
    let mut document = post_document().into_document();
    document["_links"]
        .as_object_mut()
        .unwrap()
        .remove("up");

    let err = post_interpreter()
        .evaluate(&HalRepresentation::new(document))
        .unwrap_err();
    assert_eq!(err.cardinality_counts(), Some((1, 0)));
}

#[test]
fn test_lookup_failure_propagates_unchanged() {
    let doc = post_document_with_up(json!({ "href": "/blogs/7" }));
    let err = post_interpreter().evaluate(&doc).unwrap_err();
    assert!(matches!(err, Error::Lookup { ref message, .. } if message == "blog 7 not found"));
}

#[test]
fn test_embedded_parent_counts_as_link_target() {
    let mut document = post_document().into_document();
    document["_links"].as_object_mut().unwrap().remove("up");
    document["_embedded"] = json!({
        "up": { "name": "Hypermedia Weekly", "_links": { "self": { "href": "/blogs/42" } } }
    });

    let post = post_interpreter()
        .evaluate(&HalRepresentation::new(document))
        .unwrap();
    assert_eq!(post.parent.id, 42);
}

#[test]
fn test_absent_relation_gives_empty_list() {
    let interpreter = Interpreter::<Value>::builder()
        .bind_item_class()
        .extract_links(LinkDecl::named("tags"))
        .extract_links(LinkDecl::named("tag_count").rel("tag").coercion(|hrefs, _| {
            Ok(json!(hrefs.as_array().map(Vec::len).unwrap_or_default()))
        }))
        .build()
        .unwrap();

    let attributes = interpreter
        .extract_attributes(&HalRepresentation::new(json!({})))
        .unwrap();
    assert_eq!(attributes["tags"], json!([]));
    assert_eq!(attributes["tag_count"], json!(0));
}

#[test]
fn test_optional_single_link_built_on_multi_link() {
    let interpreter = Interpreter::<Value>::builder()
        .bind_item_class()
        .extract_links(LinkDecl::named("next").coercion(|hrefs, _| {
            match hrefs.as_array().map(Vec::as_slice) {
                Some([only]) => Ok(only.clone()),
                Some([]) => Ok(Value::Null),
                _ => Err(Error::lookup("ambiguous next link")),
            }
        }))
        .build()
        .unwrap();

    let last_page = HalRepresentation::new(json!({ "_links": {} }));
    assert_eq!(interpreter.evaluate(&last_page).unwrap(), json!({ "next": null }));

    let middle_page = HalRepresentation::new(json!({ "_links": { "next": { "href": "?page=3" } } }));
    assert_eq!(interpreter.evaluate(&middle_page).unwrap(), json!({ "next": "?page=3" }));
}

#[test]
fn test_coercion_sees_declaration_context() {
    let interpreter = Interpreter::<Value>::builder()
        .bind_item_class()
        .context(coercions::BASE_URL, "https://blog.example.com/")
        .extract_links(
            LinkDecl::named("authors")
                .rel("author")
                .coerce_with(coercions::each(coercions::absolute_url())),
        )
        .build()
        .unwrap();

    let item = interpreter.evaluate(&post_document()).unwrap();
    assert_eq!(
        item,
        json!({ "authors": ["https://blog.example.com/users/alice"] })
    );
}

#[test]
fn test_coercion_can_inspect_peer_declarations() {
    let interpreter = Interpreter::<Value>::builder()
        .bind_item_class()
        .extract(AttributeDecl::named("title"))
        .extract(AttributeDecl::named("declared").with(|_| Ok(Value::Null)).coercion(
            |_, definition| {
                let peers: Vec<&str> = definition
                    .extractors()
                    .iter()
                    .map(|extractor| extractor.location())
                    .collect();
                Ok(json!(peers))
            },
        ))
        .build()
        .unwrap();

    let item = interpreter.evaluate(&post_document()).unwrap();
    assert_eq!(item["declared"], json!(["/title", "/declared"]));
}

#[test]
fn test_coercions_run_in_declaration_order() {
    let counter = Arc::new(AtomicUsize::new(0));
    let first = Arc::clone(&counter);
    let second = Arc::clone(&counter);

    let interpreter = Interpreter::<Value>::builder()
        .bind_item_class()
        .extract(AttributeDecl::named("a").coercion(move |_, _| {
            Ok(json!(first.fetch_add(1, Ordering::SeqCst)))
        }))
        .extract(AttributeDecl::named("b").coercion(move |_, _| {
            Ok(json!(second.fetch_add(1, Ordering::SeqCst)))
        }))
        .build()
        .unwrap();

    let item = interpreter.evaluate(&HalRepresentation::new(json!({}))).unwrap();
    assert_eq!(item, json!({ "a": 0, "b": 1 }));
}

#[test]
fn test_later_declaration_wins() {
    let interpreter = Interpreter::<Value>::builder()
        .bind_item_class()
        .extract(AttributeDecl::named("title"))
        .extract(AttributeDecl::named("title").from("/headline"))
        .build()
        .unwrap();

    let doc = HalRepresentation::new(json!({ "title": "old", "headline": "new" }));
    assert_eq!(interpreter.evaluate(&doc).unwrap(), json!({ "title": "new" }));
    assert_eq!(
        interpreter.definition().extractor("title").map(|e| e.location()),
        Some("/headline")
    );
}

#[test]
fn test_malformed_location_fails_at_evaluation() {
    let interpreter = Interpreter::<Value>::builder()
        .bind_item_class()
        .extract(AttributeDecl::named("title").from("title"))
        .build()
        .expect("declaration does not validate locations");

    let err = interpreter
        .evaluate(&HalRepresentation::new(json!({ "title": "x" })))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPointer { .. }));
}

#[test]
fn test_custom_representation() {
    struct Fixed;

    impl Representation for Fixed {
        fn resolve(&self, pointer: &str) -> halterp_core::Result<Option<Value>> {
            Ok(Some(json!(pointer)))
        }

        fn related_hrefs(&self, rel: &str) -> Vec<halterp_core::Href> {
            vec![halterp_core::Href::Plain(format!("/{}/1", rel))]
        }
    }

    let interpreter = Interpreter::<Value>::builder()
        .bind_item_class()
        .extract(AttributeDecl::named("echo"))
        .extract_link(LinkDecl::named("owner"))
        .build()
        .unwrap();

    let item = interpreter.evaluate(&Fixed).unwrap();
    assert_eq!(item, json!({ "echo": "/echo", "owner": "/owner/1" }));
}

#[test]
fn test_concurrent_evaluation_shares_one_declaration() {
    let interpreter = post_interpreter();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let interpreter = interpreter.clone();
            thread::spawn(move || interpreter.evaluate(&post_document()).map(|post| post.parent.id))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 42);
    }
}

#[test]
fn test_collection_document() {
    let collection = HalRepresentation::new(json!({
        "_links": { "self": { "href": "/posts" } },
        "_embedded": {
            "item": [
                post_document().into_document(),
                post_document_with_up(json!({ "href": "/blogs/42" })).into_document()
            ]
        }
    }));

    let posts = post_interpreter().evaluate_items(&collection).unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|post| post.parent.id == 42));
}

#[test]
fn test_problem_report() {
    let doc = post_document_with_up(json!([{ "href": "/blogs/1" }, { "href": "/blogs/2" }]));
    let problems = post_interpreter().problems(&doc);

    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].attribute.as_deref(), Some("parent"));
    assert_eq!(problems[0].location, "/_links/up");
    assert!(problems[0].message.contains("expected 1, found 2"));

    assert!(post_interpreter().problems(&post_document()).is_empty());
}
