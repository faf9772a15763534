mod common;

use common::{fixture, vocabularies};
use plugin_maker::config::ProjectConfig;
use plugin_maker::error::Error;
use plugin_maker::vocabulary::{extract, parse, VocabularyKind, VocabularySpec};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_io_types_in_declaration_order() {
    let vocab = vocabularies().io_types;
    let names: Vec<String> = vocab.entries().into_iter().map(|e| e.name).collect();
    assert_eq!(
        names,
        vec![
            "Unspecified",
            "CvMat",
            "Bool",
            "Int",
            "Float",
            "String",
            "JSON",
            "Bool_Array",
            "Int_Array",
            "Float_Array",
            "String_Array"
        ]
    );
    assert_eq!(vocab.enum_name(), "IoType");
    assert_eq!(vocab.prefix(), "Io_Type_");
}

#[test]
fn test_categories_keep_inner_underscores() {
    let vocab = vocabularies().categories;
    assert_eq!(vocab.len(), 14);
    assert_eq!(vocab.name(0).unwrap(), "Source");
    assert_eq!(vocab.name(4).unwrap(), "Filter");
    assert_eq!(vocab.name(8).unwrap(), "Feature_Detection");
    assert_eq!(vocab.name(13).unwrap(), "Experimental");
    assert_eq!(vocab.enum_name(), "Category");
    assert_eq!(vocab.prefix(), "Category_");
}

#[test]
fn test_indices_are_contiguous() {
    let vocab = vocabularies().categories;
    for (position, entry) in vocab.entries().iter().enumerate() {
        assert_eq!(entry.index, position);
    }
}

#[test]
fn test_extraction_is_repeatable() {
    assert_eq!(vocabularies().io_types, vocabularies().io_types);
    assert_eq!(vocabularies().categories, vocabularies().categories);
}

#[test]
fn test_token_round_trip() {
    let vocab = vocabularies().io_types;
    for entry in vocab.entries() {
        let token = vocab.token(entry.index).unwrap();
        assert_eq!(token, format!("IoType::Io_Type_{}", entry.name));
        assert_eq!(vocab.decode_token(&token), Some(entry));
    }
    assert_eq!(vocab.decode_token("IoType::Io_Type_Nope"), None);
    assert_eq!(vocab.decode_token("Io_Type_CvMat").map(|e| e.index), Some(1));
}

#[test]
fn test_index_out_of_range() {
    let vocab = vocabularies().io_types;
    match vocab.name(11) {
        Err(Error::IndexOutOfRange { index, len, .. }) => {
            assert_eq!(index, 11);
            assert_eq!(len, 11);
        }
        other => panic!("Expected IndexOutOfRange, got {other:?}"),
    }
    assert!(vocab.token(42).is_err());
}

#[test]
fn test_marker_not_found() {
    let spec = VocabularySpec::new("enum class Missing", 1);
    let err = extract(fixture("ComponentTypes.hpp"), VocabularyKind::Category, &spec).unwrap_err();
    assert!(matches!(err, Error::VocabularyNotFound { .. }));
}

#[test]
fn test_missing_definition_file() {
    let temp_dir = TempDir::new().unwrap();
    let spec = ProjectConfig::default().vocabularies.categories;
    let err = extract(temp_dir.path().join("none.hpp"), VocabularyKind::Category, &spec).unwrap_err();
    assert!(matches!(err, Error::MissingSharedFile(_)));
}

#[test]
fn test_malformed_entry_reports_line() {
    let source = "enum class Category\n{\n    Category_Source,\n    Category_Output = 4,\n};\n";
    let spec = VocabularySpec::new("enum class Category", 1);
    match parse(source, Path::new("types.hpp"), VocabularyKind::Category, &spec) {
        Err(Error::MalformedEntry { line, content, .. }) => {
            assert_eq!(line, 4);
            assert_eq!(content, "    Category_Output = 4,");
        }
        other => panic!("Expected MalformedEntry, got {other:?}"),
    }
}

#[test]
fn test_entry_without_name_after_prefix() {
    let source = "enum class IoType\n{\n    Io_Type\n};\n";
    let spec = VocabularySpec::new("enum class IoType", 2);
    let err = parse(source, Path::new("types.hpp"), VocabularyKind::IoType, &spec).unwrap_err();
    assert!(matches!(err, Error::MalformedEntry { line: 3, .. }));
}

#[test]
fn test_last_entry_without_comma() {
    let source = "enum class IoType\n{\n    Io_Type_A,\n    Io_Type_B\n};\n";
    let spec = VocabularySpec::new("enum class IoType", 2);
    let vocab = parse(source, Path::new("types.hpp"), VocabularyKind::IoType, &spec).unwrap();
    assert_eq!(vocab.name(1).unwrap(), "B");
}

#[test]
fn test_listing() {
    let listing = vocabularies().listing();
    assert!(listing.starts_with("Categories:\n"));
    assert!(listing.contains("   4 = Filter\n"));
    assert!(listing.contains("I/O Types:\n"));
    assert!(listing.contains("   1 = CvMat\n"));
    assert!(listing.find("Categories:") < listing.find("I/O Types:"));
}

#[test]
fn test_json_listing() {
    let json = vocabularies().to_json();
    assert_eq!(json["categories"][4]["name"], "Filter");
    assert_eq!(json["categories"][4]["index"], 4);
    assert_eq!(json["io_types"][1]["name"], "CvMat");
}
