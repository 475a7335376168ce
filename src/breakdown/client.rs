use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::error::TaskdownError;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Thin client for an OpenAI-compatible chat-completions endpoint. One
/// prompt in, one free-text reply out; no retries, no caching. Every
/// failure in here collapses into a single breakdown failure for the
/// caller.
pub struct ModelClient {
    api_base: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: String,
}

impl ModelClient {
    /// `OPENAI_API_KEY` is required; `TASKDOWN_API_BASE` and
    /// `TASKDOWN_MODEL` override the endpoint and model.
    pub fn from_env() -> Result<Self, TaskdownError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| TaskdownError::breakdown_failed("OPENAI_API_KEY is not set"))?;
        Ok(Self {
            api_base: env::var("TASKDOWN_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into()),
            api_key,
            model: env::var("TASKDOWN_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
        })
    }

    /// Send the prompt as a single user turn and return the raw reply text.
    pub fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building HTTP client")?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .context("model request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(anyhow!("model returned status {status}: {body}"));
        }

        let reply: ChatResponse = response.json().context("malformed model response")?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow!("model response contained no choices"))?;
        Ok(content)
    }
}
