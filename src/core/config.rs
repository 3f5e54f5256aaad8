use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Which model-runner backend answers questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerKind {
    /// Spawn the `ollama` binary and talk to it over pipes.
    Cli,
    /// Talk to the Ollama HTTP API.
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the web server binds to.
    pub bind: String,
    /// Backend used to list models and answer questions.
    pub runner: RunnerKind,
    /// Binary invoked by the CLI runner.
    pub ollama_bin: String,
    /// Base URL used by the HTTP runner.
    pub ollama_base_url: String,
    /// How long a single question may take before it is abandoned.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: "127.0.0.1:8080".to_string(),
            runner: RunnerKind::Cli,
            ollama_bin: "ollama".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load the configuration from `path`, or from the default location
    /// when no path is given. A missing file yields the defaults; a file
    /// that exists but does not parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load_from_path(&Self::default_config_path()),
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn default_config_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "buildbuddy", "buildbuddy")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_path(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.bind, "127.0.0.1:8080");
        assert_eq!(config.runner, RunnerKind::Cli);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn file_overrides_selected_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "bind = \"0.0.0.0:9000\"\nrunner = \"http\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.runner, RunnerKind::Http);
        // Untouched fields keep their defaults.
        assert_eq!(config.ollama_bin, "ollama");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "runner = \"carrier-pigeon\"\n").unwrap();

        assert!(Config::load_from_path(&path).is_err());
    }
}
