//! Tests for the operation catalog.

use std::collections::HashSet;

use serde_json::{Value, json};

use super::catalog::{CATALOG, ParamKind, lookup, tools};
use super::validate::Args;

/// Arguments satisfying every required parameter of an operation.
fn complete_args(op: &super::catalog::Operation) -> Args {
    op.params
        .iter()
        .filter(|p| p.required)
        .map(|p| {
            let value = match p.kind {
                ParamKind::String => json!("x"),
                ParamKind::Number => json!(1),
                ParamKind::StringArray => json!(["x"]),
                ParamKind::Url => json!("https://example.com/x.png"),
            };
            (p.name.to_string(), value)
        })
        .collect()
}

#[test]
fn test_catalog_has_every_tool_once() {
    let names: HashSet<&str> = CATALOG.iter().map(|op| op.name).collect();

    assert_eq!(CATALOG.len(), 26);
    assert_eq!(names.len(), CATALOG.len(), "tool names must be unique");
}

#[test]
fn test_lookup_finds_known_tools_only() {
    assert_eq!(lookup("add_card_to_list").unwrap().name, "add_card_to_list");
    assert!(lookup("add_card").is_none());
    assert!(lookup("").is_none());
}

#[test]
fn test_complete_arguments_validate() {
    for op in CATALOG {
        let args = complete_args(op);
        assert!(
            (op.validate)(&args).is_ok(),
            "{} rejected its required arguments",
            op.name
        );
    }
}

#[test]
fn test_each_missing_required_parameter_is_rejected() {
    for op in CATALOG {
        for param in op.params.iter().filter(|p| p.required) {
            let mut args = complete_args(op);
            args.remove(param.name);

            let err = (op.validate)(&args).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Invalid params: {} is required", param.name),
                "{} accepted a call without {}",
                op.name,
                param.name
            );
        }
    }
}

#[test]
fn test_each_null_required_parameter_is_rejected() {
    for op in CATALOG {
        for param in op.params.iter().filter(|p| p.required) {
            let mut args = complete_args(op);
            args.insert(param.name.to_string(), Value::Null);

            let err = (op.validate)(&args).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Invalid params: {} is required", param.name),
                "{} accepted null for {}",
                op.name,
                param.name
            );
        }
    }
}

#[test]
fn test_each_mistyped_required_parameter_is_rejected() {
    for op in CATALOG {
        for param in op.params.iter().filter(|p| p.required) {
            let mut args = complete_args(op);
            args.insert(param.name.to_string(), json!(42));

            let expected = match param.kind {
                ParamKind::StringArray => format!("{} must be an array of strings", param.name),
                ParamKind::Number => format!("{} must be a number", param.name),
                ParamKind::String | ParamKind::Url => format!("{} must be a string", param.name),
            };
            let err = (op.validate)(&args).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Invalid params: {expected}"),
                "{} accepted a number for {}",
                op.name,
                param.name
            );
        }
    }
}

#[test]
fn test_schema_lists_required_parameters() {
    let op = lookup("move_card").unwrap();

    let schema = op.input_schema();

    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], json!(["cardId", "listId"]));
    let properties = schema["properties"].as_object().unwrap();
    assert!(properties.contains_key("boardId"));
    assert_eq!(properties["cardId"]["type"], "string");
}

#[test]
fn test_array_and_url_parameter_schemas() {
    let labels = lookup("add_labels_to_card").unwrap().input_schema();
    assert_eq!(
        labels["properties"]["label_ids"]["items"],
        json!({"type": "string"})
    );

    let attach = lookup("attach_image_to_card").unwrap().input_schema();
    assert_eq!(attach["properties"]["imageUrl"]["format"], "uri");
}

#[test]
fn test_tools_listing_matches_catalog() {
    let listed = tools();

    assert_eq!(listed.len(), CATALOG.len());
    for (tool, op) in listed.iter().zip(CATALOG) {
        assert_eq!(tool.name, op.name);
        assert_eq!(
            tool.description.as_deref(),
            Some(op.description),
            "{} description differs",
            op.name
        );
        assert_eq!(
            tool.input_schema.get("type"),
            Some(&Value::from("object"))
        );
    }
}
