//! Orchestration of a single generation run.

use crate::config::Project;
use crate::descriptor::{PluginDescriptor, TargetKind};
use crate::error::Result;
use crate::renderer::{Slots, TemplateDocument, TemplateRenderer};
use crate::vocabulary::Vocabularies;
use crate::writer::{manifest_directive, registry_include, EditOutcome, ProjectWriter};
use log::{debug, info};
use std::path::PathBuf;

/// What a generation run changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// `<output root>/<ClassName>`
    pub component_dir: PathBuf,
    /// Every file written, shared files included
    pub written: Vec<PathBuf>,
    /// Registry header edit, for internal nodes
    pub registry: Option<EditOutcome>,
    /// Build manifest edit, for external plugins added to the project
    pub manifest: Option<EditOutcome>,
}

/// Generates components into one project.
pub struct Generator<'a> {
    project: &'a Project,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> Generator<'a> {
    pub fn new(project: &'a Project, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { project, renderer }
    }

    /// Extracts the I/O type and category vocabularies from the definition file.
    pub fn load_vocabularies(&self) -> Result<Vocabularies> {
        let vocabularies = &self.project.config().vocabularies;
        Vocabularies::load(
            self.project.definition_file(),
            &vocabularies.io_types,
            &vocabularies.categories,
        )
    }

    /// Renders and writes the component described by `descriptor`.
    ///
    /// Every index, template and shared file is checked before the first
    /// write, so any error leaves the project untouched.
    ///
    /// # Errors
    /// * `Error::IndexOutOfRange` if the category or a port type is unknown
    /// * `Error::MissingTemplate` if a template for the target is absent
    /// * `Error::MissingSharedFile` if the registry header or manifest is absent
    /// * `Error::ManifestSectionNotFound` if the manifest lacks the plugin section
    /// * `Error::UnknownSlot` / `Error::MinijinjaError` for template problems
    pub fn generate(
        &self,
        descriptor: &PluginDescriptor,
        vocabularies: &Vocabularies,
    ) -> Result<GenerationReport> {
        descriptor.validate_against(vocabularies)?;
        let slots = Slots::new(descriptor, vocabularies)?;
        let target = descriptor.target;
        info!("Generating {} {}", target, slots.class_name);

        let header = self.render(self.project.header_template(target), &slots)?;
        let implementation = self.render(self.project.implementation_template(target), &slots)?;
        let build_file = match target {
            TargetKind::External => Some(self.render(self.project.build_file_template(), &slots)?),
            TargetKind::Internal => None,
        };

        let mut writer = ProjectWriter::new();
        let config = self.project.config();

        let registry = match target {
            TargetKind::Internal => {
                let include = registry_include(&slots.class_name, &slots.file_base_name);
                Some(writer.edit_registry_header(self.project.registry_header(), &include)?)
            }
            TargetKind::External => None,
        };

        let manifest = match target {
            TargetKind::External if descriptor.add_to_manifest => {
                let directive = manifest_directive(&config.external.output_root, &slots.class_name);
                Some(writer.edit_build_manifest(
                    self.project.build_manifest(),
                    &config.manifest_section,
                    &slots.class_name,
                    &directive,
                )?)
            }
            _ => None,
        };

        let component_dir = writer.write_component(
            self.project.output_root(target),
            &slots.class_name,
            &slots.file_base_name,
            &header,
            &implementation,
            build_file
                .as_deref()
                .map(|lines| (config.plugin_build_file.as_str(), lines)),
        )?;

        debug!("Committing {} staged files", writer.pending().len());
        let written = writer.commit()?;

        Ok(GenerationReport {
            component_dir,
            written,
            registry,
            manifest,
        })
    }

    fn render(&self, template: PathBuf, slots: &Slots) -> Result<Vec<String>> {
        let document = TemplateDocument::load(template)?;
        self.renderer.render(&document, slots)
    }
}
