//! Plugin descriptor: the validated parameter set of one generation run.

use crate::error::{Error, Result};
use crate::naming::{derive, DerivedNames};
use crate::vocabulary::Vocabularies;
use std::fmt;

/// Default version written into generated components.
pub const DEFAULT_VERSION: &str = "0.1.0";

/// Generation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Built into the host and listed in the registry header
    Internal,
    /// Standalone plugin module with its own build file
    External,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Internal => write!(f, "internal node"),
            TargetKind::External => write!(f, "external plugin"),
        }
    }
}

/// A named port and the I/O type index it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub name: String,
    pub type_index: usize,
}

/// Raw parameters as collected by the command line or a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRequest {
    pub name: Option<String>,
    pub author: Option<String>,
    pub version: String,
    pub category: Option<usize>,
    pub inputs: Vec<String>,
    pub input_types: Vec<usize>,
    pub outputs: Vec<String>,
    pub output_types: Vec<usize>,
    pub target: TargetKind,
    pub add_to_manifest: bool,
}

impl Default for PluginRequest {
    fn default() -> Self {
        Self {
            name: None,
            author: None,
            version: DEFAULT_VERSION.to_string(),
            category: None,
            inputs: Vec::new(),
            input_types: Vec::new(),
            outputs: Vec::new(),
            output_types: Vec::new(),
            target: TargetKind::External,
            add_to_manifest: true,
        }
    }
}

impl PluginRequest {
    /// Checks that every required parameter is present and that port names
    /// and type indices pair up.
    ///
    /// # Errors
    /// * `Error::MissingParameter` describing the first problem found
    pub fn into_descriptor(self) -> Result<PluginDescriptor> {
        let name = non_empty(self.name);
        let author = non_empty(self.author);
        let (Some(name), Some(author), Some(category_index)) = (name, author, self.category)
        else {
            return Err(Error::MissingParameter(
                "name, author and category are required".to_string(),
            ));
        };

        let inputs = strip_empty(self.inputs);
        let outputs = strip_empty(self.outputs);
        if inputs.is_empty() && outputs.is_empty() {
            return Err(Error::MissingParameter(
                "specify at least 1 input or 1 output".to_string(),
            ));
        }

        let inputs = pair_ports("input", inputs, self.input_types)?;
        let outputs = pair_ports("output", outputs, self.output_types)?;

        Ok(PluginDescriptor {
            raw_name: name,
            author,
            version: self.version,
            category_index,
            target: self.target,
            add_to_manifest: self.add_to_manifest,
            inputs,
            outputs,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn strip_empty(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn pair_ports(direction: &str, names: Vec<String>, types: Vec<usize>) -> Result<Vec<PortSpec>> {
    if names.len() != types.len() {
        return Err(Error::MissingParameter(format!(
            "{} {direction} type(s) given for {} {direction}(s); each {direction} needs exactly one type",
            types.len(),
            names.len(),
        )));
    }
    Ok(names
        .into_iter()
        .zip(types)
        .map(|(name, type_index)| PortSpec { name, type_index })
        .collect())
}

/// The immutable description of the component being generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub raw_name: String,
    pub author: String,
    pub version: String,
    pub category_index: usize,
    pub target: TargetKind,
    pub add_to_manifest: bool,
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
}

impl PluginDescriptor {
    pub fn names(&self) -> DerivedNames {
        derive(&self.raw_name)
    }

    /// Confirms the category and every port type address an extracted entry.
    ///
    /// # Errors
    /// * `Error::IndexOutOfRange` for the first index outside its vocabulary
    pub fn validate_against(&self, vocabularies: &Vocabularies) -> Result<()> {
        vocabularies.categories.name(self.category_index)?;
        for port in self.inputs.iter().chain(&self.outputs) {
            vocabularies.io_types.name(port.type_index)?;
        }
        Ok(())
    }
}
