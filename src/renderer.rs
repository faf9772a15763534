//! Template rendering for generated component sources.
//!
//! Templates expose a fixed set of named slots (`{{ class_name }}`,
//! `{{ input_count_call }}`, ...). Every slot value is computed here from the
//! plugin descriptor and the extracted vocabularies; templates carry no
//! logic of their own. A template that references a slot outside
//! [`SLOT_NAMES`] is rejected before rendering.
use crate::descriptor::{PluginDescriptor, PortSpec};
use crate::error::{Error, Result};
use crate::vocabulary::{Vocabularies, Vocabulary};
use log::debug;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::path::Path;

/// Every slot a template may reference.
pub const SLOT_NAMES: [&str; 13] = [
    "class_name",
    "display_name",
    "file_base_name",
    "include_guard",
    "category",
    "author",
    "version",
    "input_count",
    "output_count",
    "input_count_call",
    "output_count_call",
    "input_handler",
    "output_handler",
];

/// Spelling of the image type in generated code.
const IMAGE_IO_TYPE: &str = "CvMat";
const IMAGE_NATIVE_TYPE: &str = "cv::Mat";

/// A template file's content, read once and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
    name: String,
    source: String,
}

impl TemplateDocument {
    pub fn new<N: Into<String>, S: Into<String>>(name: N, source: S) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Loads a template from disk.
    ///
    /// # Errors
    /// * `Error::MissingTemplate` if `path` does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingTemplate(path.to_path_buf()));
        }
        debug!("Loading template {}", path.display());
        let source = std::fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), source))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.source.lines()
    }
}

/// Slot values for one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slots {
    pub class_name: String,
    pub display_name: String,
    pub file_base_name: String,
    pub include_guard: String,
    pub category: String,
    pub author: String,
    pub version: String,
    pub input_count: usize,
    pub output_count: usize,
    pub input_count_call: String,
    pub output_count_call: String,
    pub input_handler: String,
    pub output_handler: String,
}

impl Slots {
    /// Computes every slot value.
    ///
    /// # Errors
    /// * `Error::IndexOutOfRange` if the category or a port type is not in its vocabulary
    pub fn new(descriptor: &PluginDescriptor, vocabularies: &Vocabularies) -> Result<Self> {
        let names = descriptor.names();
        let io_types = &vocabularies.io_types;

        Ok(Self {
            class_name: names.class_name,
            display_name: names.display_name,
            file_base_name: names.file_base_name,
            include_guard: descriptor.raw_name.to_uppercase(),
            category: vocabularies
                .categories
                .name(descriptor.category_index)?
                .to_string(),
            author: descriptor.author.clone(),
            version: descriptor.version.clone(),
            input_count: descriptor.inputs.len(),
            output_count: descriptor.outputs.len(),
            input_count_call: count_call("SetInputCount_", &descriptor.inputs, io_types)?,
            output_count_call: count_call("SetOutputCount_", &descriptor.outputs, io_types)?,
            input_handler: input_handler(&descriptor.inputs, &descriptor.outputs, io_types)?,
            output_handler: output_handler(&descriptor.inputs, &descriptor.outputs),
        })
    }
}

/// Builds a port declaration call such as
/// `SetInputCount_( 2, {"a", "b"}, {IoType::Io_Type_CvMat, IoType::Io_Type_Int} );`.
///
/// An empty port list yields `SetInputCount_(0);`.
pub fn count_call(setter: &str, ports: &[PortSpec], io_types: &Vocabulary) -> Result<String> {
    if ports.is_empty() {
        return Ok(format!("{setter}(0);"));
    }
    let names: Vec<String> = ports.iter().map(|port| format!("\"{}\"", port.name)).collect();
    let types = ports
        .iter()
        .map(|port| io_types.token(port.type_index))
        .collect::<Result<Vec<_>>>()?;

    Ok(format!(
        "{setter}( {}, {{{}}}, {{{}}} );",
        ports.len(),
        names.join(", "),
        types.join(", ")
    ))
}

/// Maps an I/O type name to the type used to read it from the signal bus.
pub fn native_type_name(io_type: &str) -> String {
    if io_type == IMAGE_IO_TYPE {
        IMAGE_NATIVE_TYPE.to_string()
    } else {
        io_type.to_lowercase()
    }
}

/// Boilerplate reading input 0. Empty when there are no inputs.
///
/// With no outputs the block forwards the result to output 0 and closes
/// its own scope; otherwise the scope is closed by [`output_handler`].
pub fn input_handler(
    inputs: &[PortSpec],
    outputs: &[PortSpec],
    io_types: &Vocabulary,
) -> Result<String> {
    let Some(first) = inputs.first() else {
        return Ok(String::new());
    };
    let native = native_type_name(io_types.name(first.type_index)?);

    let mut block = String::new();
    block.push_str("    // Input 1 Handler\n");
    block.push_str(&format!("    auto in1 = inputs.GetValue<{native}>( 0 );\n"));
    block.push_str("    if ( !in1 ) {\n");
    block.push_str("        return;\n");
    block.push_str("    }\n");
    block.push('\n');
    block.push_str("    // Do Something with Input\n");
    block.push_str("    // For Example\n");
    block.push_str("    if (!in1->empty()) {\n");
    block.push_str("        if (IsEnabled()) {\n");
    block.push_str("            // Process Image\n");
    block.push('\n');
    block.push_str("        } else {\n");
    block.push_str("            // Copy Original to Output (pass thru)\n");
    block.push_str("            in1->copyTo(frame_);\n");
    block.push_str("        }\n");
    if outputs.is_empty() {
        block.push_str("        outputs.SetValue(0, frame_);\n");
        block.push_str("    }\n");
    }
    Ok(block)
}

/// Boilerplate assigning output 0. Empty when there are no outputs.
pub fn output_handler(inputs: &[PortSpec], outputs: &[PortSpec]) -> String {
    if outputs.is_empty() {
        return String::new();
    }
    let indent = if inputs.is_empty() { "    " } else { "        " };

    let mut block = String::from("\n");
    block.push_str(&format!("{indent}// Do Something with Output\n"));
    block.push_str(&format!("{indent}outputs.SetValue(0, frame_);\n"));
    if !inputs.is_empty() {
        block.push_str("    }\n");
    }
    block
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders `document` with `slots`, returning the output lines.
    fn render(&self, document: &TemplateDocument, slots: &Slots) -> Result<Vec<String>>;
}

/// MiniJinja-based renderer restricted to the fixed slot table.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// # Errors
    /// * `Error::UnknownSlot` if the template references a slot outside [`SLOT_NAMES`]
    /// * `Error::MinijinjaError` if the template does not parse
    fn render(&self, document: &TemplateDocument, slots: &Slots) -> Result<Vec<String>> {
        let mut env = self.env.clone();
        env.add_template_owned(document.name.clone(), document.source.clone())?;
        let tmpl = env.get_template(&document.name)?;

        let mut unknown: Vec<String> = tmpl
            .undeclared_variables(false)
            .into_iter()
            .filter(|slot| !SLOT_NAMES.contains(&slot.as_str()))
            .collect();
        if !unknown.is_empty() {
            unknown.sort();
            return Err(Error::UnknownSlot {
                template: document.name.clone(),
                slots: unknown,
            });
        }

        debug!("Rendering {}", document.name);
        let rendered = tmpl.render(slots)?;
        Ok(rendered.lines().map(str::to_string).collect())
    }
}
