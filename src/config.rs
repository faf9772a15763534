//! Project layout configuration.
//!
//! The generator never assumes the process working directory: every path it
//! touches is resolved against an explicit project root. Settings come from
//! an optional `plugin_maker.json` / `plugin_maker.yml` / `plugin_maker.yaml`
//! at that root; any omitted key falls back to the FlowCV layout.

use crate::descriptor::TargetKind;
use crate::error::{Error, Result};
use crate::vocabulary::VocabularySpec;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Supported configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["plugin_maker.json", "plugin_maker.yml", "plugin_maker.yaml"];

/// Template suffix stripped from generated file names
pub const TEMPLATE_SUFFIX: &str = "j2";

/// Markers and strip counts for both vocabulary blocks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct VocabularyConfig {
    pub io_types: VocabularySpec,
    pub categories: VocabularySpec,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            io_types: VocabularySpec::new("enum class IoType", 2),
            categories: VocabularySpec::new("enum class Category", 1),
        }
    }
}

/// Where one target kind reads its templates and writes its output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetLayout {
    /// Directory under the templates root holding this kind's templates
    pub template_dir: PathBuf,
    /// Base name of the header and implementation templates
    pub template_base: String,
    /// Directory under the project root receiving `<ClassName>/` folders
    pub output_root: PathBuf,
}

/// Project layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProjectConfig {
    pub definition_file: PathBuf,
    pub templates_root: PathBuf,
    pub vocabularies: VocabularyConfig,
    pub internal: TargetLayout,
    pub external: TargetLayout,
    pub registry_header: PathBuf,
    pub build_manifest: PathBuf,
    pub manifest_section: String,
    /// File name of the per-plugin build file template and output
    pub plugin_build_file: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            definition_file: PathBuf::from(
                "FlowCV_SDK/third-party/dspatch/include/dspatch/ComponentTypes.hpp",
            ),
            templates_root: PathBuf::from("Templates"),
            vocabularies: VocabularyConfig::default(),
            internal: TargetLayout {
                template_dir: PathBuf::from("Internal_Node"),
                template_base: "internal_template".to_string(),
                output_root: PathBuf::from("Internal_Nodes"),
            },
            external: TargetLayout {
                template_dir: PathBuf::from("Plugin"),
                template_base: "plugin_template".to_string(),
                output_root: PathBuf::from("Plugins"),
            },
            registry_header: PathBuf::from("Internal_Nodes/internal_nodes.hpp"),
            build_manifest: PathBuf::from("CMakeLists.txt"),
            manifest_section: "# FlowCV Plugin Modules".to_string(),
            plugin_build_file: "CMakeLists.txt".to_string(),
        }
    }
}

impl ProjectConfig {
    pub fn layout(&self, target: TargetKind) -> &TargetLayout {
        match target {
            TargetKind::Internal => &self.internal,
            TargetKind::External => &self.external,
        }
    }
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
///   for [`ProjectConfig`]
pub fn parse_config(content: &str) -> Result<ProjectConfig> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads the configuration for `project_root`.
///
/// `explicit` names a configuration file directly; otherwise the files in
/// [`CONFIG_FILES`] are tried in order and defaults are used when none exists.
///
/// # Errors
/// * `Error::ConfigError` if `explicit` is given but absent, or parsing fails
pub fn load_config<P: AsRef<Path>>(project_root: P, explicit: Option<&Path>) -> Result<Project> {
    let project_root = project_root.as_ref();
    if !project_root.is_dir() {
        return Err(Error::ConfigError(format!(
            "project root '{}' is not a directory",
            project_root.display()
        )));
    }

    let config = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(Error::ConfigError(format!(
                    "configuration file '{}' not found",
                    path.display()
                )));
            }
            debug!("Loading configuration from {}", path.display());
            parse_config(&std::fs::read_to_string(path)?)?
        }
        None => match CONFIG_FILES
            .iter()
            .map(|file| project_root.join(file))
            .find(|path| path.is_file())
        {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                parse_config(&std::fs::read_to_string(&path)?)?
            }
            None => {
                debug!("No configuration file in {}, using defaults", project_root.display());
                ProjectConfig::default()
            }
        },
    };

    Ok(Project::new(project_root, config))
}

/// A configuration bound to a project root, resolving every path against it.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: ProjectConfig,
}

impl Project {
    pub fn new<P: Into<PathBuf>>(root: P, config: ProjectConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn definition_file(&self) -> PathBuf {
        self.root.join(&self.config.definition_file)
    }

    pub fn registry_header(&self) -> PathBuf {
        self.root.join(&self.config.registry_header)
    }

    pub fn build_manifest(&self) -> PathBuf {
        self.root.join(&self.config.build_manifest)
    }

    fn template_dir(&self, target: TargetKind) -> PathBuf {
        self.root
            .join(&self.config.templates_root)
            .join(&self.config.layout(target).template_dir)
    }

    /// Header template, e.g. `Templates/Plugin/plugin_template.hpp.j2`.
    pub fn header_template(&self, target: TargetKind) -> PathBuf {
        let base = &self.config.layout(target).template_base;
        self.template_dir(target).join(format!("{base}.hpp.{TEMPLATE_SUFFIX}"))
    }

    /// Implementation template, e.g. `Templates/Plugin/plugin_template.cpp.j2`.
    pub fn implementation_template(&self, target: TargetKind) -> PathBuf {
        let base = &self.config.layout(target).template_base;
        self.template_dir(target).join(format!("{base}.cpp.{TEMPLATE_SUFFIX}"))
    }

    /// Per-plugin build file template, e.g. `Templates/Plugin/CMakeLists.txt.j2`.
    pub fn build_file_template(&self) -> PathBuf {
        self.template_dir(TargetKind::External).join(format!(
            "{}.{TEMPLATE_SUFFIX}",
            self.config.plugin_build_file
        ))
    }

    /// Output directory root for `target`, e.g. `<root>/Plugins`.
    pub fn output_root(&self, target: TargetKind) -> PathBuf {
        self.root.join(&self.config.layout(target).output_root)
    }
}
