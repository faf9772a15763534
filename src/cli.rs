//! Command-line interface implementation for plugin-maker.
//! Provides argument parsing and help text formatting using clap.

use crate::descriptor::{PluginRequest, TargetKind, DEFAULT_VERSION};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for plugin-maker.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "plugin-maker: create new FlowCV plugins, both internal and external",
    long_about = None
)]
pub struct Args {
    /// New plugin name, e.g. edge_detect
    #[arg(short, long)]
    pub name: Option<String>,

    /// Plugin author
    #[arg(short, long)]
    pub author: Option<String>,

    /// Plugin version
    #[arg(short = 'v', long = "ver", default_value = DEFAULT_VERSION)]
    pub plugin_version: String,

    /// Plugin category index (use --list for the list)
    #[arg(short, long)]
    pub category: Option<usize>,

    /// Input names as CSV: in,in,in
    #[arg(short, long, value_delimiter = ',')]
    pub inputs: Vec<String>,

    /// Output names as CSV: out,color,depth
    #[arg(short, long, value_delimiter = ',')]
    pub outputs: Vec<String>,

    /// Input type indices, one per input (use --list for the list): 1,2,4
    #[arg(short = 'p', long = "intype", value_delimiter = ',')]
    pub input_types: Vec<usize>,

    /// Output type indices, one per output (use --list for the list): 1,2,4
    #[arg(short = 't', long = "outtype", value_delimiter = ',')]
    pub output_types: Vec<usize>,

    /// Create an external plugin (true/1) or an internal node (false/0)
    #[arg(
        short = 'e',
        long = "ext",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub external: bool,

    /// Add an external plugin to the main build manifest (true/1, false/0)
    #[arg(
        short = 'd',
        long = "add",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub add_to_manifest: bool,

    /// Print the known categories and I/O types, then exit
    #[arg(short, long)]
    pub list: bool,

    /// Print the --list output as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Prompt for a missing name, author or category
    #[arg(long)]
    pub interactive: bool,

    /// Root of the FlowCV source tree
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_root: PathBuf,

    /// Configuration file overriding plugin_maker.{json,yml,yaml} discovery
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    /// Collects the generation parameters; validation happens later.
    pub fn request(&self) -> PluginRequest {
        PluginRequest {
            name: self.name.clone(),
            author: self.author.clone(),
            version: self.plugin_version.clone(),
            category: self.category,
            inputs: self.inputs.clone(),
            input_types: self.input_types.clone(),
            outputs: self.outputs.clone(),
            output_types: self.output_types.clone(),
            target: if self.external {
                TargetKind::External
            } else {
                TargetKind::Internal
            },
            add_to_manifest: self.add_to_manifest,
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for malformed arguments
pub fn get_args() -> Args {
    Args::parse()
}
