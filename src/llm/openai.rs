//! OpenAI backend implementation.
//!
//! Uses the chat-completions endpoint. Requests carry no timeout and are
//! never retried.

use super::Dispatcher;
use crate::config::Config;
use crate::conversation::{ChatMessage, Conversation};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Dispatcher for the OpenAI chat-completions API.
pub struct OpenAIDispatcher {
    base_url: String,
    api_key: Option<String>,
    temperature: Option<f32>,
    client: Client,
}

impl OpenAIDispatcher {
    /// Create a new OpenAI dispatcher.
    pub fn new(base_url: String, api_key: Option<String>, temperature: Option<f32>) -> Self {
        Self {
            base_url,
            api_key,
            temperature,
            client: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.temperature,
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Get the API key, failing only once a request is actually made.
    fn get_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            Error::Remote(
                "OpenAI API key not found. Set OPENAI_API_KEY environment variable \
                 or add api_key to ~/.h-data/config.toml."
                    .to_string(),
            )
        })
    }
}

#[async_trait]
impl Dispatcher for OpenAIDispatcher {
    async fn ask(
        &self,
        prompt: &str,
        model: &str,
        conversation: Option<&Conversation>,
    ) -> Result<String> {
        let api_key = self.get_api_key()?;

        let mut messages: Vec<ChatMessage> = conversation
            .map(|c| c.messages.clone())
            .unwrap_or_default();
        messages.push(ChatMessage::user(prompt));

        let request = OpenAIRequest {
            model,
            messages: &messages,
            temperature: self.temperature,
        };

        debug!("Sending {} messages to {}", messages.len(), model);
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Remote(format!("Failed to connect to OpenAI API: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body: std::result::Result<OpenAIError, _> = response.json().await;
            let message = body
                .map(|e| e.error.message)
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Remote(format!(
                "OpenAI API request failed with status {}: {}",
                status, message
            )));
        }

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| Error::Remote(format!("Failed to parse OpenAI response: {}", e)))?;

        openai_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| Error::Remote("Empty response from OpenAI".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessageResponse,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessageResponse {
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    error: OpenAIErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorDetail {
    message: String,
}
