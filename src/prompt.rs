//! Interactive completion of missing generation parameters.

use crate::descriptor::PluginRequest;
use crate::error::{Error, Result};
use crate::vocabulary::Vocabularies;
use dialoguer::{Input, Select};

/// Source of answers for parameters the command line left out.
pub trait Prompter {
    /// Asks for free text.
    fn text(&self, prompt: &str) -> Result<String>;

    /// Asks to pick one of `items`; returns the chosen index.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn text(&self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .default(default)
            .items(items)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Asks for the name, author and category when the request lacks them.
///
/// The category is chosen from the extracted category names, so the
/// resulting index is always valid.
pub fn complete_request(
    prompter: &dyn Prompter,
    mut request: PluginRequest,
    vocabularies: &Vocabularies,
) -> Result<PluginRequest> {
    if request.name.as_deref().map_or(true, |name| name.trim().is_empty()) {
        request.name = Some(prompter.text("Plugin name (e.g. edge_detect)")?);
    }
    if request.author.as_deref().map_or(true, |author| author.trim().is_empty()) {
        request.author = Some(prompter.text("Author")?);
    }
    if request.category.is_none() {
        let names: Vec<String> = vocabularies
            .categories
            .entries()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        if !names.is_empty() {
            request.category = Some(prompter.select("Category", &names, 0)?);
        }
    }
    Ok(request)
}
