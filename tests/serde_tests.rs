//! Tests for the serde boundary: derived structs and enums moving through
//! NestedText text in both directions.

use serde::{Deserialize, Serialize};
use serde_nestedtext::{from_str, from_value, nt, to_string, to_value, Error};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Server {
    host: String,
    port: u16,
    enabled: bool,
    motd: Option<String>,
}

#[test]
fn struct_to_and_from_text() {
    let server = Server {
        host: "example.com".to_string(),
        port: 8080,
        enabled: true,
        motd: None,
    };
    let text = to_string(&server).unwrap();
    assert_eq!(
        text,
        "host: example.com\nport: 8080\nenabled: true\nmotd:\n",
    );
    assert_eq!(from_str::<Server>(&text).unwrap(), server);
}

#[test]
fn option_some_round_trips() {
    let server = Server {
        host: "h".to_string(),
        port: 1,
        enabled: false,
        motd: Some("welcome".to_string()),
    };
    let text = to_string(&server).unwrap();
    assert!(text.contains("motd: welcome\n"));
    assert_eq!(from_str::<Server>(&text).unwrap(), server);
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Nested {
    name: String,
    servers: Vec<Server>,
}

#[test]
fn nested_struct_round_trip() {
    let value = Nested {
        name: "cluster".to_string(),
        servers: vec![
            Server {
                host: "a".to_string(),
                port: 1,
                enabled: true,
                motd: None,
            },
            Server {
                host: "b".to_string(),
                port: 2,
                enabled: false,
                motd: Some("hi".to_string()),
            },
        ],
    };
    let text = to_string(&value).unwrap();
    assert_eq!(from_str::<Nested>(&text).unwrap(), value);
}

#[test]
fn multiline_field_becomes_text_block() {
    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Note {
        body: String,
    }
    let note = Note {
        body: "line one\nline two".to_string(),
    };
    let text = to_string(&note).unwrap();
    assert_eq!(text, "body:\n  > line one\n  > line two\n");
    assert_eq!(from_str::<Note>(&text).unwrap(), note);
}

#[test]
fn map_with_string_keys() {
    let mut map = BTreeMap::new();
    map.insert("one".to_string(), 1u32);
    map.insert("two".to_string(), 2u32);
    let text = to_string(&map).unwrap();
    assert_eq!(text, "one: 1\ntwo: 2\n");
    assert_eq!(from_str::<BTreeMap<String, u32>>(&text).unwrap(), map);
}

#[test]
fn map_with_integer_keys_stringifies() {
    let mut map = BTreeMap::new();
    map.insert(1u8, "one".to_string());
    let text = to_string(&map).unwrap();
    assert_eq!(text, "1: one\n");
    assert_eq!(from_str::<BTreeMap<u8, String>>(&text).unwrap(), map);
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
enum Job {
    Idle,
    Run(String),
    Pair(u32, u32),
    Batch { name: String, count: u32 },
}

#[test]
fn unit_variant_is_a_bare_string() {
    let text = to_string(&vec![Job::Idle]).unwrap();
    assert_eq!(text, "- Idle\n");
    assert_eq!(from_str::<Vec<Job>>(&text).unwrap(), vec![Job::Idle]);
}

#[test]
fn newtype_variant_is_a_single_entry_dictionary() {
    let job = Job::Run("build".to_string());
    let text = to_string(&job).unwrap();
    assert_eq!(text, "Run: build\n");
    assert_eq!(from_str::<Job>(&text).unwrap(), job);
}

#[test]
fn tuple_variant_round_trips() {
    let job = Job::Pair(3, 4);
    let text = to_string(&job).unwrap();
    assert_eq!(text, "Pair:\n  - 3\n  - 4\n");
    assert_eq!(from_str::<Job>(&text).unwrap(), job);
}

#[test]
fn struct_variant_round_trips() {
    let job = Job::Batch {
        name: "nightly".to_string(),
        count: 5,
    };
    let text = to_string(&job).unwrap();
    assert_eq!(text, "Batch:\n  name: nightly\n  count: 5\n");
    assert_eq!(from_str::<Job>(&text).unwrap(), job);
}

#[test]
fn tuples_are_lists() {
    let text = to_string(&("a", 1, true)).unwrap();
    assert_eq!(text, "- a\n- 1\n- true\n");
    let back: (String, u32, bool) = from_str(&text).unwrap();
    assert_eq!(back, ("a".to_string(), 1, true));
}

#[test]
fn empty_collections_inside_a_struct() {
    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Holder {
        items: Vec<String>,
        table: BTreeMap<String, String>,
    }
    let holder = Holder {
        items: Vec::new(),
        table: BTreeMap::new(),
    };
    let text = to_string(&holder).unwrap();
    assert_eq!(text, "items:\ntable:\n");
    assert_eq!(from_str::<Holder>(&text).unwrap(), holder);
}

#[test]
fn leaf_parsing_failures_are_type_mismatches() {
    let err = from_str::<u16>("> not a number\n").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));

    #[derive(Deserialize, Debug)]
    struct Typed {
        #[allow(dead_code)]
        port: u16,
    }
    let err = from_str::<Typed>("port: http\n").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn leaves_are_parsed_with_surrounding_whitespace_trimmed() {
    #[derive(Deserialize)]
    struct Typed {
        port: u16,
    }
    // Inline values keep their leading space; numeric parsing tolerates it.
    let typed: Typed = from_str("port:  8080").unwrap();
    assert_eq!(typed.port, 8080);
}

#[test]
fn to_value_and_from_value_compose() {
    let server = Server {
        host: "h".to_string(),
        port: 9,
        enabled: true,
        motd: None,
    };
    let tree = to_value(&server).unwrap();
    assert_eq!(tree.get("port").and_then(|v| v.as_str()), Some("9"));
    assert_eq!(from_value::<Server>(tree).unwrap(), server);
}

#[test]
fn macro_trees_deserialize() {
    let tree = nt!({
        "host": "alpha",
        "port": 443,
        "enabled": "true",
        "motd": ""
    });
    let server: Server = from_value(tree).unwrap();
    assert_eq!(server.host, "alpha");
    assert_eq!(server.port, 443);
    assert!(server.enabled);
    assert_eq!(server.motd, None);
}

#[test]
fn value_survives_its_own_serde() {
    // Value serializes as plain data and deserializes back structurally.
    let tree = nt!({"k": ["a", "b"], "t": "x\ny"});
    let clone: serde_nestedtext::Value = from_value(tree.clone()).unwrap();
    assert_eq!(clone, tree);
}
