//! Derivation of the naming forms used across generated outputs.

use serde::Serialize;

/// Naming forms derived from a raw component name such as `edge_detect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedNames {
    /// PascalCase type name, e.g. `EdgeDetect`
    pub class_name: String,
    /// Capitalized words joined with underscores, e.g. `Edge_Detect`
    pub display_name: String,
    /// The raw name, used for generated file names
    pub file_base_name: String,
}

/// Splits `raw_name` on `_` and `-` and derives every naming form.
///
/// Each word keeps its first character upper-cased and the remainder
/// lower-cased. Empty input yields empty outputs; callers reject empty
/// names before getting here.
pub fn derive(raw_name: &str) -> DerivedNames {
    let words: Vec<String> = raw_name
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();

    DerivedNames {
        class_name: words.concat(),
        display_name: words.join("_"),
        file_base_name: raw_name.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
