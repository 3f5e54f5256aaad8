//! Runner backend that talks to the Ollama HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ModelRunner, RunnerError};
use crate::core::config::Config;

/// Fixed instruction framing every exchange.
const SYSTEM_PROMPT: &str = "You are BuildBuddy, a friendly assistant that helps people plan \
and scaffold software projects. Give concrete, actionable advice about project structure, \
tooling, and first steps.";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<TagInfo>,
}

#[derive(Deserialize)]
struct TagInfo {
    name: String,
}

pub struct HttpRunner {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpRunner {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.ollama_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

#[async_trait]
impl ModelRunner for HttpRunner {
    async fn list_models(&self) -> Vec<String> {
        let url = format!("{}/api/tags", self.base_url);
        let response = match self.client.get(&url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(url = %url, error = %err, "could not fetch the model list");
                return Vec::new();
            }
        };
        if !response.status().is_success() {
            warn!(url = %url, status = %response.status(), "model list request failed");
            return Vec::new();
        }
        match response.json::<TagsResponse>().await {
            Ok(tags) => tags.models.into_iter().map(|tag| tag.name).collect(),
            Err(err) => {
                warn!(url = %url, error = %err, "malformed model list response");
                Vec::new()
            }
        }
    }

    async fn ask(&self, model: &str, question: &str) -> Result<String, RunnerError> {
        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: question,
                },
            ],
            stream: false,
        };

        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| RunnerError::new(format!("chat request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RunnerError::new(format!(
                "chat request failed with status {status}: {body}"
            )));
        }

        let reply = response
            .json::<ChatResponse>()
            .await
            .map_err(|err| RunnerError::new(format!("malformed chat response: {err}")))?;
        Ok(reply.message.content.trim().to_string())
    }
}
