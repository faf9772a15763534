mod common;

use common::{edge_detect, strings, vocabularies};
use plugin_maker::descriptor::{PluginRequest, PortSpec, TargetKind, DEFAULT_VERSION};
use plugin_maker::error::Error;

#[test]
fn test_valid_request() {
    let descriptor = edge_detect(TargetKind::External).into_descriptor().unwrap();
    assert_eq!(descriptor.raw_name, "edge_detect");
    assert_eq!(descriptor.author, "Jane Doe");
    assert_eq!(descriptor.version, DEFAULT_VERSION);
    assert_eq!(descriptor.category_index, 4);
    assert_eq!(
        descriptor.inputs,
        vec![PortSpec {
            name: "frame".to_string(),
            type_index: 1
        }]
    );
    assert_eq!(descriptor.names().class_name, "EdgeDetect");
    assert!(descriptor.validate_against(&vocabularies()).is_ok());
}

#[test]
fn test_missing_name_author_or_category() {
    for request in [
        PluginRequest {
            name: None,
            ..edge_detect(TargetKind::External)
        },
        PluginRequest {
            author: Some("  ".to_string()),
            ..edge_detect(TargetKind::External)
        },
        PluginRequest {
            category: None,
            ..edge_detect(TargetKind::External)
        },
    ] {
        assert!(matches!(request.into_descriptor(), Err(Error::MissingParameter(_))));
    }
}

#[test]
fn test_no_ports() {
    let request = PluginRequest {
        inputs: Vec::new(),
        input_types: Vec::new(),
        outputs: Vec::new(),
        output_types: Vec::new(),
        ..edge_detect(TargetKind::Internal)
    };
    match request.into_descriptor() {
        Err(Error::MissingParameter(msg)) => assert!(msg.contains("at least 1 input or 1 output")),
        other => panic!("Expected MissingParameter, got {other:?}"),
    }
}

#[test]
fn test_ports_without_types() {
    let request = PluginRequest {
        input_types: Vec::new(),
        ..edge_detect(TargetKind::External)
    };
    assert!(matches!(request.into_descriptor(), Err(Error::MissingParameter(_))));
}

#[test]
fn test_type_count_mismatch() {
    let request = PluginRequest {
        outputs: strings(&["edges", "mask"]),
        output_types: vec![1],
        ..edge_detect(TargetKind::External)
    };
    assert!(matches!(request.into_descriptor(), Err(Error::MissingParameter(_))));
}

#[test]
fn test_outputs_only() {
    let request = PluginRequest {
        inputs: Vec::new(),
        input_types: Vec::new(),
        ..edge_detect(TargetKind::Internal)
    };
    let descriptor = request.into_descriptor().unwrap();
    assert!(descriptor.inputs.is_empty());
    assert_eq!(descriptor.outputs.len(), 1);
}

#[test]
fn test_out_of_range_indices() {
    let vocab = vocabularies();

    let mut descriptor = edge_detect(TargetKind::External).into_descriptor().unwrap();
    descriptor.category_index = 14;
    assert!(matches!(
        descriptor.validate_against(&vocab),
        Err(Error::IndexOutOfRange { .. })
    ));

    let mut descriptor = edge_detect(TargetKind::External).into_descriptor().unwrap();
    descriptor.outputs[0].type_index = 99;
    match descriptor.validate_against(&vocab) {
        Err(Error::IndexOutOfRange { index, .. }) => assert_eq!(index, 99),
        other => panic!("Expected IndexOutOfRange, got {other:?}"),
    }
}
