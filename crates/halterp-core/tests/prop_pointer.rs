//! Property-based tests for JSON Pointer handling

use halterp_core::pointer::{escape_segment, links_path, resolve, segments, unescape_segment};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Keys biased towards the characters the pointer grammar reserves
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{0,10}",
        "[a-z~/01]{1,12}",
        "https?://[a-z]{1,8}\\.org/rels/[a-z~]{1,8}",
    ]
}

proptest! {
    #[test]
    fn prop_escape_roundtrip(key in key_strategy()) {
        let escaped = escape_segment(&key);
        prop_assert!(!escaped.contains('/'));
        prop_assert_eq!(unescape_segment(&escaped), key);
    }

    #[test]
    fn prop_escaped_pointer_is_one_segment(key in key_strategy()) {
        let pointer = format!("/{}", escape_segment(&key));
        let parsed = segments(&pointer).unwrap();
        prop_assert_eq!(parsed, vec![key]);
    }

    #[test]
    fn prop_links_path_reaches_the_relation(
        rel in key_strategy(),
        href in "/[a-z]{1,8}/[0-9]{1,4}"
    ) {
        let mut links = Map::new();
        links.insert(rel.clone(), json!({ "href": href }));
        let document = json!({ "_links": Value::Object(links) });

        let found = resolve(&document, &links_path(&rel)).unwrap();
        prop_assert_eq!(found, Some(&json!({ "href": href })));
    }

    #[test]
    fn prop_missing_key_is_absent(key in "[a-z]{1,8}") {
        let document = json!({ "present": 1 });
        prop_assume!(key != "present");
        let pointer = format!("/{}", escape_segment(&key));
        prop_assert_eq!(resolve(&document, &pointer).unwrap(), None);
    }
}
