//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments, initializes logging and
//! configuration, and dispatches into the web server or a one-shot command.

pub mod models;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::core::credentials::Credentials;
use crate::llm;
use crate::server;
use crate::server::state::AppState;

#[derive(Parser)]
#[command(name = "buildbuddy")]
#[command(about = "A single-page chat web app for project advice from local LLMs")]
#[command(
    long_about = "BuildBuddy serves a small chat page backed by locally installed LLMs. \
Log in, pick a model, and ask for project-scaffolding advice.\n\n\
Environment Variables:\n\
  ADMIN_USER_NAME   Admin login name (default: admin)\n\
  ADMIN_PASSWORD    Admin password (default: admin)\n\
  GUEST_USER_NAME   Guest login name (default: guest)\n\
  GUEST_PASSWORD    Guest password (default: guest)\n\
  SKIP_LOGIN        \"true\" logs every new session in as the guest\n\
  RUST_LOG          Log filter (default: info)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Address to bind the web server to (overrides the config file)
    #[arg(short, long, global = true, value_name = "ADDR")]
    pub bind: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    Serve,
    /// List the models the configured runner can see
    Models,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let runner = llm::runner_from_config(&config);

    match args.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let credentials = Credentials::from_env();
            for name in &credentials.missing {
                tracing::warn!(%name, "environment variable not set; using built-in default");
            }
            let state = AppState::new(credentials, runner)?;
            server::serve(&config, state).await
        }
        Commands::Models => models::run(runner.as_ref()).await,
    }
}
