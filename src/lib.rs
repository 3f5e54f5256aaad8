//! BuildBuddy is a single-page chat web application for getting
//! project-scaffolding advice out of locally installed LLMs.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns configuration, the login identities, per-session chat
//!   state, and the send flow that appends to the transcript.
//! - [`llm`] defines the model-runner capability and its two interchangeable
//!   backends (the `ollama` binary driven over pipes, and the Ollama HTTP
//!   API).
//! - [`server`] renders the page and maps each user action (login, send,
//!   logout) to a request handler that mutates the session and redraws.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which parses arguments and either starts
//! the web server or runs a one-shot subcommand.

pub mod cli;
pub mod core;
pub mod llm;
pub mod server;
