#![allow(dead_code)]

use plugin_maker::config::{Project, ProjectConfig};
use plugin_maker::descriptor::{PluginRequest, TargetKind};
use plugin_maker::vocabulary::Vocabularies;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn templates_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// A scratch FlowCV tree with the definition file, registry header and
/// build manifest in their default locations, rendering the shipped templates.
pub fn scratch_project() -> (TempDir, Project) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let config = ProjectConfig {
        templates_root: templates_root(),
        ..ProjectConfig::default()
    };

    let definition = root.join(&config.definition_file);
    fs::create_dir_all(definition.parent().unwrap()).unwrap();
    fs::copy(fixture("ComponentTypes.hpp"), &definition).unwrap();

    let registry = root.join(&config.registry_header);
    fs::create_dir_all(registry.parent().unwrap()).unwrap();
    fs::copy(fixture("internal_nodes.hpp"), &registry).unwrap();

    fs::copy(fixture("CMakeLists.txt"), root.join(&config.build_manifest)).unwrap();

    let project = Project::new(root, config);
    (temp_dir, project)
}

pub fn vocabularies() -> Vocabularies {
    let config = ProjectConfig::default();
    Vocabularies::load(
        fixture("ComponentTypes.hpp"),
        &config.vocabularies.io_types,
        &config.vocabularies.categories,
    )
    .unwrap()
}

pub fn read_lines<P: AsRef<Path>>(path: P) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `edge_detect` by Jane Doe: a Filter with one image input and one image output.
pub fn edge_detect(target: TargetKind) -> PluginRequest {
    PluginRequest {
        name: Some("edge_detect".to_string()),
        author: Some("Jane Doe".to_string()),
        category: Some(4),
        inputs: strings(&["frame"]),
        input_types: vec![1],
        outputs: strings(&["edges"]),
        output_types: vec![1],
        target,
        ..PluginRequest::default()
    }
}
