use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use super::plan_error::PlanError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatReplyMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReplyMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletion {
    /// Text of the first choice, if the provider sent any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            choices: vec![ChatChoice {
                message: Some(ChatReplyMessage {
                    content: Some(content.into()),
                }),
            }],
        }
    }
}

/// A chat-completion backend.
///
/// Implementations must stop work promptly once `cancel` fires, dropping any
/// in-flight exchange, and report [`PlanError::Timeout`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(
        &self,
        request: &ChatRequest,
        api_key: &str,
        cancel: &CancellationToken,
    ) -> Result<ChatCompletion, PlanError>;
}

/// OpenAI chat completions client
pub struct OpenAiClient {
    client: Client,
    base_url: String,
}

impl OpenAiClient {
    /// No client-level timeout: the caller's deadline governs the call.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn exchange(&self, request: &ChatRequest, api_key: &str) -> Result<ChatCompletion, PlanError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("OpenAI request failed: {}", e);
                PlanError::ProviderTransport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenAI chat completion failed: {} - {}", status, error_text);
            return Err(PlanError::ProviderStatus(status.as_u16()));
        }

        response.json::<ChatCompletion>().await.map_err(|e| {
            error!("Failed to parse OpenAI completion body: {}", e);
            PlanError::ProviderTransport(e.to_string())
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    async fn complete(
        &self,
        request: &ChatRequest,
        api_key: &str,
        cancel: &CancellationToken,
    ) -> Result<ChatCompletion, PlanError> {
        debug!(model = %request.model, "Sending chat completion request");

        // Dropping the exchange future aborts the request and its connection.
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                warn!("Chat completion cancelled before the provider replied");
                Err(PlanError::Timeout)
            }
            result = self.exchange(request, api_key) => result,
        }
    }
}
