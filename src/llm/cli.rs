//! Runner backend that drives the `ollama` binary over pipes.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::warn;

use super::{ModelRunner, RunnerError};
use crate::core::config::Config;

pub struct CliRunner {
    bin: String,
    timeout: Duration,
}

impl CliRunner {
    pub fn new(config: &Config) -> Self {
        Self {
            bin: config.ollama_bin.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

#[async_trait]
impl ModelRunner for CliRunner {
    async fn list_models(&self) -> Vec<String> {
        let output = match Command::new(&self.bin).arg("ls").output().await {
            Ok(output) => output,
            Err(err) => {
                warn!(bin = %self.bin, error = %err, "could not run model listing");
                return Vec::new();
            }
        };
        if !output.status.success() {
            warn!(bin = %self.bin, status = %output.status, "model listing exited unsuccessfully");
            return Vec::new();
        }
        parse_model_table(&String::from_utf8_lossy(&output.stdout))
    }

    async fn ask(&self, model: &str, question: &str) -> Result<String, RunnerError> {
        let mut child = Command::new(&self.bin)
            .arg("run")
            .arg(model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| RunnerError::new(format!("could not start {}: {err}", self.bin)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RunnerError::new("unable to retrieve stdin"))?;
        stdin
            .write_all(question.as_bytes())
            .await
            .map_err(|err| RunnerError::new(format!("could not write the question: {err}")))?;
        // Close the pipe so the runner knows input is complete.
        drop(stdin);

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
            }
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(RunnerError::new(format!(
                    "{} run exited with {}: {}",
                    self.bin,
                    output.status,
                    stderr.trim()
                )))
            }
            Ok(Err(err)) => Err(RunnerError::new(format!(
                "failed waiting for {}: {err}",
                self.bin
            ))),
            // Dropping the wait future reaps the child via kill_on_drop.
            Err(_) => Err(RunnerError::new(format!(
                "no reply from {model} within {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}

/// Extract model names from `ollama ls` output: one row per model after a
/// header line, first whitespace-delimited token is the name.
fn parse_model_table(output: &str) -> Vec<String> {
    output
        .trim()
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_from_the_table_body() {
        let output = "NAME            ID      SIZE    MODIFIED\n\
                      modelA:latest   abc123  1.2GB   2 days ago\n\
                      modelB          def456  3GB     5 weeks ago\n";
        assert_eq!(parse_model_table(output), vec!["modelA:latest", "modelB"]);
    }

    #[test]
    fn header_only_and_empty_output_yield_nothing() {
        assert_eq!(parse_model_table("NAME ID SIZE MODIFIED\n"), Vec::<String>::new());
        assert_eq!(parse_model_table(""), Vec::<String>::new());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let output = "NAME ID\nmodelA abc\n\nmodelB def\n";
        assert_eq!(parse_model_table(output), vec!["modelA", "modelB"]);
    }

    fn runner(bin: &str, timeout: Duration) -> CliRunner {
        CliRunner {
            bin: bin.to_string(),
            timeout,
        }
    }

    #[tokio::test]
    async fn missing_binary_lists_nothing() {
        let runner = runner("buildbuddy-no-such-binary", Duration::from_secs(5));
        assert!(runner.list_models().await.is_empty());
    }

    #[tokio::test]
    async fn missing_binary_is_an_ask_error() {
        let runner = runner("buildbuddy-no-such-binary", Duration::from_secs(5));
        let err = runner.ask("modelA", "2+2?").await.unwrap_err();
        assert!(err.to_string().contains("could not start"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_runner_times_out_with_an_error_indicator() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow-runner");
        std::fs::write(&script, "#!/bin/sh\nsleep 30\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let runner = runner(script.to_str().unwrap(), Duration::from_millis(100));
        let err = runner.ask("modelA", "2+2?").await.unwrap_err();
        assert!(err.to_string().contains("no reply from modelA"));
    }
}
