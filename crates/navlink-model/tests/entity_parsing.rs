//! Parsing tests for entity kinds and store types.

use navlink_model::{EntityReference, EntityType, StoreType};
use proptest::prelude::*;

proptest! {
    #[test]
    fn wire_names_parse_case_insensitively(index in 0usize..EntityType::ALL.len(), upper in any::<bool>()) {
        let kind = EntityType::ALL[index];
        let name = if upper {
            kind.as_str().to_ascii_uppercase()
        } else {
            kind.as_str().to_ascii_lowercase()
        };
        prop_assert_eq!(name.parse::<EntityType>().unwrap(), kind);
    }

    #[test]
    fn arbitrary_store_types_are_never_definite(raw in "[a-z]{0,12}") {
        // Wire values are upper case; anything lower case is unrecognized.
        prop_assert_eq!(StoreType::from_wire(Some(&raw)), StoreType::Unspecified);
    }
}

#[test]
fn entity_type_serializes_with_wire_name() {
    let json = serde_json::to_string(&EntityType::EnvironmentGroup).unwrap();
    assert_eq!(json, "\"EnvironmentGroup\"");

    let parsed: EntityType = serde_json::from_str("\"Gadget\"").unwrap();
    assert_eq!(parsed, EntityType::Unknown);
}

#[test]
fn invalid_reference_json_is_rejected() {
    let cases = [
        // empty identifier
        r#"{"type":"Connectors","identifier":"","scope":{"accountId":"a","orgId":"o","projectId":"p"}}"#,
        // empty account
        r#"{"type":"Pipelines","identifier":"p1","scope":{"accountId":""}}"#,
        // project without its org
        r#"{"type":"Pipelines","identifier":"p1","scope":{"accountId":"a","projectId":"p"}}"#,
        // everything wrong at once
        r#"{"type":"Pipelines","identifier":"","scope":{"accountId":"","projectId":"p"}}"#,
    ];
    for json in cases {
        assert!(
            serde_json::from_str::<EntityReference>(json).is_err(),
            "accepted {json}"
        );
    }
}

#[test]
fn valid_reference_json_roundtrips() {
    let json = r#"{"type":"Triggers","identifier":"t1","scope":{"accountId":"a","orgId":"o"},"parentIdentifier":"p1"}"#;
    let reference: EntityReference = serde_json::from_str(json).unwrap();
    let back: EntityReference =
        serde_json::from_str(&serde_json::to_string(&reference).unwrap()).unwrap();
    assert_eq!(back, reference);
}
