//! plugin-maker generates the source scaffolding of new FlowCV plugin
//! components from templates and registers them with the host project.

/// Command-line interface module for the plugin-maker application
pub mod cli;

/// Project layout configuration (plugin_maker.json, plugin_maker.yml, plugin_maker.yaml)
pub mod config;

/// Validated generation parameters
pub mod descriptor;

/// Error types and handling for the plugin-maker application
pub mod error;

/// Orchestration of a generation run
pub mod generator;

/// Logger setup for the binary
pub mod logger;

/// Naming forms derived from the raw plugin name
pub mod naming;

/// Interactive completion of missing parameters
pub mod prompt;

/// Named-slot template rendering
pub mod renderer;

/// I/O type and category extraction from the definition file
pub mod vocabulary;

/// Staged writes of generated files and shared-file edits
pub mod writer;
