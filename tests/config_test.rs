use plugin_maker::config::{load_config, parse_config, ProjectConfig, CONFIG_FILES};
use plugin_maker::descriptor::TargetKind;
use plugin_maker::error::Error;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_defaults_match_flowcv_layout() {
    let temp_dir = TempDir::new().unwrap();
    let project = load_config(temp_dir.path(), None).unwrap();
    let root = temp_dir.path();

    assert_eq!(
        project.definition_file(),
        root.join("FlowCV_SDK/third-party/dspatch/include/dspatch/ComponentTypes.hpp")
    );
    assert_eq!(project.registry_header(), root.join("Internal_Nodes/internal_nodes.hpp"));
    assert_eq!(project.build_manifest(), root.join("CMakeLists.txt"));
    assert_eq!(
        project.header_template(TargetKind::External),
        root.join("Templates/Plugin/plugin_template.hpp.j2")
    );
    assert_eq!(
        project.implementation_template(TargetKind::Internal),
        root.join("Templates/Internal_Node/internal_template.cpp.j2")
    );
    assert_eq!(
        project.build_file_template(),
        root.join("Templates/Plugin/CMakeLists.txt.j2")
    );
    assert_eq!(project.output_root(TargetKind::External), root.join("Plugins"));
    assert_eq!(project.output_root(TargetKind::Internal), root.join("Internal_Nodes"));
    assert_eq!(project.config().manifest_section, "# FlowCV Plugin Modules");
}

#[test]
fn test_json_config_overrides_some_keys() {
    let content = r#"{"templates_root": "tools/templates", "build_manifest": "build/CMakeLists.txt"}"#;
    let config = parse_config(content).unwrap();
    assert_eq!(config.templates_root, PathBuf::from("tools/templates"));
    assert_eq!(config.build_manifest, PathBuf::from("build/CMakeLists.txt"));
    assert_eq!(config.registry_header, ProjectConfig::default().registry_header);
}

#[test]
fn test_yaml_config() {
    let content = r##"
manifest_section: "# Plugins"
vocabularies:
  io_types:
    marker: "enum IoKind"
    strip_segments: 1
external:
  template_dir: ext
  template_base: ext_template
  output_root: Modules
"##;
    let config = parse_config(content).unwrap();
    assert_eq!(config.manifest_section, "# Plugins");
    assert_eq!(config.vocabularies.io_types.marker, "enum IoKind");
    assert_eq!(config.vocabularies.io_types.strip_segments, 1);
    assert_eq!(config.vocabularies.io_types.header_lines, 1);
    assert_eq!(
        config.vocabularies.categories,
        ProjectConfig::default().vocabularies.categories
    );
    assert_eq!(config.external.output_root, PathBuf::from("Modules"));
    assert_eq!(config.internal, ProjectConfig::default().internal);
}

#[test]
fn test_unknown_key_is_rejected() {
    let err = parse_config("template_root: oops\n").unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn test_config_file_discovery() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILES[1]), "build_manifest: Root.cmake\n").unwrap();
    let project = load_config(temp_dir.path(), None).unwrap();
    assert_eq!(project.build_manifest(), temp_dir.path().join("Root.cmake"));
}

#[test]
fn test_explicit_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.json");
    fs::write(&path, r#"{"registry_header": "nodes.hpp"}"#).unwrap();
    let project = load_config(temp_dir.path(), Some(path.as_path())).unwrap();
    assert_eq!(project.registry_header(), temp_dir.path().join("nodes.hpp"));

    let missing = temp_dir.path().join("missing.json");
    assert!(matches!(
        load_config(temp_dir.path(), Some(missing.as_path())),
        Err(Error::ConfigError(_))
    ));
}

#[test]
fn test_project_root_must_exist() {
    let temp_dir = TempDir::new().unwrap();
    assert!(matches!(
        load_config(temp_dir.path().join("nope"), None),
        Err(Error::ConfigError(_))
    ));
}
