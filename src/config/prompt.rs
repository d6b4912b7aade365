use crate::domain::ports::Prompter;
use crate::utils::error::{PresserError, Result};
use dialoguer::{Input, Password};

/// Prompts on the controlling terminal via `dialoguer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map(|value| value.trim().to_string())
            .map_err(|e| PresserError::PromptError {
                message: e.to_string(),
            })
    }

    fn password(&self, prompt: &str) -> Result<String> {
        // `Password` hides input in the terminal.
        Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| PresserError::PromptError {
                message: e.to_string(),
            })
    }
}
