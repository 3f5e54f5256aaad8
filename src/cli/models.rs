//! Model listing from the terminal.
//!
//! Prints the same model names the page's selector would show, which makes
//! it a quick way to check the runner configuration without a browser.

use std::error::Error;

use crate::llm::ModelRunner;

pub async fn run(runner: &dyn ModelRunner) -> Result<(), Box<dyn Error>> {
    let models = runner.list_models().await;

    if models.is_empty() {
        println!("No models found. Install one with `ollama pull <name>`.");
        return Ok(());
    }

    println!("Found {} models:", models.len());
    println!();
    for model in &models {
        println!("  • {model}");
    }

    Ok(())
}
