//! Extraction of the enumerated vocabularies (I/O types and categories)
//! from the framework's component type definition file.
//!
//! This is a narrow adapter over one known textual layout:
//!
//! ```text
//! enum class IoType
//! {
//!     Io_Type_Unspecified,
//!     Io_Type_CvMat,
//!     ...
//! };
//! ```
//!
//! Entry indices are positional and end up as wire values in generated code,
//! so the extracted order always matches declaration order. Nothing outside
//! this module looks at the file's lines.

use crate::error::{Error, Result};
use indexmap::IndexSet;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const ENTRY_PATTERN: &str = r"^\s*([A-Za-z0-9]+(?:_[A-Za-z0-9]+)*)\s*,?\s*$";
const ENUM_NAME_PATTERN: &str = r"enum\s+(?:class\s+|struct\s+)?([A-Za-z_][A-Za-z0-9_]*)";

/// The two vocabularies found in the definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyKind {
    IoType,
    Category,
}

impl fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocabularyKind::IoType => write!(f, "I/O types"),
            VocabularyKind::Category => write!(f, "categories"),
        }
    }
}

/// Where a vocabulary block starts and how its entries are named.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VocabularySpec {
    /// Substring identifying the line that opens the block
    pub marker: String,
    /// Lines between the marker line and the first entry
    #[serde(default = "default_header_lines")]
    pub header_lines: usize,
    /// Leading underscore-separated segments shared by every entry
    pub strip_segments: usize,
}

fn default_header_lines() -> usize {
    1
}

impl VocabularySpec {
    pub fn new<S: Into<String>>(marker: S, strip_segments: usize) -> Self {
        Self {
            marker: marker.into(),
            header_lines: default_header_lines(),
            strip_segments,
        }
    }
}

/// One enumeration entry: its positional index and normalized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub index: usize,
    pub name: String,
}

/// An ordered enumeration recovered from the definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    kind: VocabularyKind,
    enum_name: String,
    prefix: String,
    names: IndexSet<String>,
}

impl Vocabulary {
    pub fn kind(&self) -> VocabularyKind {
        self.kind
    }

    /// Name of the enum type in the definition file, e.g. `IoType`.
    pub fn enum_name(&self) -> &str {
        &self.enum_name
    }

    /// Prefix shared by every enumerator, e.g. `Io_Type_`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| Entry {
                index,
                name: name.clone(),
            })
            .collect()
    }

    /// Returns the entry name at `index`.
    ///
    /// # Errors
    /// * `Error::IndexOutOfRange` if `index` addresses no entry
    pub fn name(&self, index: usize) -> Result<&str> {
        self.names
            .get_index(index)
            .map(String::as_str)
            .ok_or_else(|| Error::IndexOutOfRange {
                vocabulary: self.kind.to_string(),
                index,
                len: self.names.len(),
            })
    }

    /// Renders the qualified enumerator for `index`, e.g. `IoType::Io_Type_CvMat`.
    pub fn token(&self, index: usize) -> Result<String> {
        let name = self.name(index)?;
        Ok(format!("{}::{}{}", self.enum_name, self.prefix, name))
    }

    /// Recovers the entry a token produced by [`Vocabulary::token`] refers to.
    pub fn decode_token(&self, token: &str) -> Option<Entry> {
        let enumerator = token
            .strip_prefix(self.enum_name.as_str())
            .and_then(|rest| rest.strip_prefix("::"))
            .unwrap_or(token);
        let name = enumerator.strip_prefix(self.prefix.as_str())?;
        self.names.get_full(name).map(|(index, name)| Entry {
            index,
            name: name.clone(),
        })
    }
}

/// Reads the definition file at `path` and extracts one vocabulary.
///
/// # Errors
/// * `Error::MissingSharedFile` if the definition file does not exist
/// * `Error::VocabularyNotFound` if the marker never occurs
/// * `Error::MalformedEntry` if a line inside the block is not an enumerator
pub fn extract<P: AsRef<Path>>(
    path: P,
    kind: VocabularyKind,
    spec: &VocabularySpec,
) -> Result<Vocabulary> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::MissingSharedFile(path.to_path_buf()));
    }
    debug!("Extracting {} from {}", kind, path.display());
    let source = std::fs::read_to_string(path)?;
    parse(&source, path, kind, spec)
}

/// Extracts one vocabulary from already loaded definition text.
///
/// `path` is only used in error messages.
pub fn parse(
    source: &str,
    path: &Path,
    kind: VocabularyKind,
    spec: &VocabularySpec,
) -> Result<Vocabulary> {
    let entry_re = Regex::new(ENTRY_PATTERN).map_err(|e| Error::ConfigError(e.to_string()))?;
    let enum_re = Regex::new(ENUM_NAME_PATTERN).map_err(|e| Error::ConfigError(e.to_string()))?;

    let lines: Vec<&str> = source.lines().collect();
    let start = lines
        .iter()
        .position(|line| line.contains(spec.marker.as_str()))
        .ok_or_else(|| Error::VocabularyNotFound {
            marker: spec.marker.clone(),
            path: path.to_path_buf(),
        })?;

    let enum_name = enum_re
        .captures(lines[start])
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .or_else(|| spec.marker.split_whitespace().last().map(str::to_string))
        .unwrap_or_default();

    let malformed = |line: usize, content: &str| Error::MalformedEntry {
        path: path.to_path_buf(),
        line: line + 1,
        content: content.to_string(),
    };

    let mut names = IndexSet::new();
    let mut prefix: Option<String> = None;
    let mut cursor = start + 1 + spec.header_lines;

    loop {
        let Some(&line) = lines.get(cursor) else {
            return Err(malformed(cursor, "<end of file before closing brace>"));
        };
        if line.trim_start().starts_with('}') {
            break;
        }

        let ident = entry_re
            .captures(line)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| malformed(cursor, line))?
            .as_str();

        let segments: Vec<&str> = ident.split('_').collect();
        if segments.len() <= spec.strip_segments {
            return Err(malformed(cursor, line));
        }
        let entry_prefix: String = segments[..spec.strip_segments]
            .iter()
            .map(|segment| format!("{segment}_"))
            .collect();
        match &prefix {
            Some(shared) if *shared != entry_prefix => return Err(malformed(cursor, line)),
            Some(_) => {}
            None => prefix = Some(entry_prefix),
        }

        let name = segments[spec.strip_segments..].join("_");
        if !names.insert(name) {
            return Err(malformed(cursor, line));
        }
        cursor += 1;
    }

    debug!("Found {} {} in '{}'", names.len(), kind, enum_name);

    Ok(Vocabulary {
        kind,
        enum_name,
        prefix: prefix.unwrap_or_default(),
        names,
    })
}

/// Both vocabularies a generation run needs.
#[derive(Debug, Clone)]
pub struct Vocabularies {
    pub io_types: Vocabulary,
    pub categories: Vocabulary,
}

impl Vocabularies {
    /// Extracts both vocabularies from the same definition file.
    pub fn load<P: AsRef<Path>>(
        path: P,
        io_types: &VocabularySpec,
        categories: &VocabularySpec,
    ) -> Result<Self> {
        let path = path.as_ref();
        Ok(Self {
            io_types: extract(path, VocabularyKind::IoType, io_types)?,
            categories: extract(path, VocabularyKind::Category, categories)?,
        })
    }

    /// Human-readable listing: `Categories:` then `I/O Types:`, one `index = name` per line.
    pub fn listing(&self) -> String {
        let mut out = String::from("Categories:\n");
        for entry in self.categories.entries() {
            out.push_str(&format!("  {:>2} = {}\n", entry.index, entry.name));
        }
        out.push_str("\nI/O Types:\n");
        for entry in self.io_types.entries() {
            out.push_str(&format!("  {:>2} = {}\n", entry.index, entry.name));
        }
        out
    }

    /// JSON listing with `categories` and `io_types` arrays of `{index, name}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "categories": self.categories.entries(),
            "io_types": self.io_types.entries(),
        })
    }
}
