//! Model-runner capability and its interchangeable backends.
//!
//! Implementations normalize the differences between driving the `ollama`
//! binary over pipes and talking to the Ollama HTTP API, so the chat flow
//! and the `models` subcommand stay backend-agnostic.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::config::{Config, RunnerKind};

pub mod cli;
pub mod http;

/// Failure to get an answer out of a model. Carries a human-readable
/// description; the chat flow turns it into transcript text rather than
/// propagating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerError(String);

impl RunnerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for RunnerError {}

/// Runner contract required by the chat flow and the `models` subcommand.
#[async_trait]
pub trait ModelRunner: Send + Sync {
    /// Names of the locally installed models. Failures are logged and
    /// reported as an empty list so the page can degrade to a warning.
    async fn list_models(&self) -> Vec<String>;

    /// Send one question to the named model and wait for the full reply.
    /// No retries, no streaming; one question, one answer.
    async fn ask(&self, model: &str, question: &str) -> Result<String, RunnerError>;
}

/// Build the backend selected by configuration.
pub fn runner_from_config(config: &Config) -> Arc<dyn ModelRunner> {
    match config.runner {
        RunnerKind::Cli => Arc::new(cli::CliRunner::new(config)),
        RunnerKind::Http => Arc::new(http::HttpRunner::new(config)),
    }
}
