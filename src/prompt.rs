//! Interactive input for parameters missing from the command line.

use dialoguer::Input;

use crate::error::{Error, Result};

/// Source of answers for parameters that were not passed as flags.
pub trait Prompter {
    /// Asks for a non-empty name.
    fn ask_name(&self, prompt: &str) -> Result<String>;
}

/// Prompts on the terminal using dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask_name(&self, prompt: &str) -> Result<String> {
        let input: String = Input::new()
            .with_prompt(prompt)
            .validate_with(|value: &String| -> std::result::Result<(), &'static str> {
                if value.trim().is_empty() {
                    Err("the name must not be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))?;

        Ok(input.trim().to_string())
    }
}

/// Returns `value` when given, otherwise asks the prompter.
pub fn value_or_prompt(
    prompter: &dyn Prompter,
    value: Option<String>,
    prompt: &str,
) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        Some(_) => Err(Error::ValidationError(format!("{prompt}: value must not be empty"))),
        None => prompter.ask_name(prompt),
    }
}
