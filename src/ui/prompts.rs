// Interactive prompts for values not given on the command line

use anyhow::{Context, Result};
use dialoguer::{Input, Password};

/// Return `given` or ask for it
pub fn prompt_text(label: &str, given: Option<&String>) -> Result<String> {
    if let Some(value) = given {
        return Ok(value.clone());
    }
    Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .with_context(|| format!("Failed to read {}", label))
}

/// Return `given` or ask for it without echo
pub fn prompt_password(label: &str, given: Option<&String>, confirm: bool) -> Result<String> {
    if let Some(value) = given {
        return Ok(value.clone());
    }
    let mut prompt = Password::new().with_prompt(label);
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt
        .interact()
        .with_context(|| format!("Failed to read {}", label))
}
