use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::NarrativeConfig;

const SYSTEM_PROMPT: &str =
    "You are a helpful AI tutor providing feedback on quiz performance.";

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Something that turns a summary into free-form feedback.
#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    async fn narrate(&self, summary: &str) -> Result<String, NarrativeError>;
}

/// Asks the provider for feedback; failures come back as displayable text.
pub async fn request_narrative<P: NarrativeProvider + ?Sized>(provider: &P, summary: &str) -> String {
    match provider.narrate(summary).await {
        Ok(text) => {
            tracing::info!(chars = text.len(), "narrative received");
            text
        }
        Err(err) => {
            tracing::warn!(error = %err, "narrative request failed");
            format!("Error generating feedback: {err}")
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-style chat completions endpoint.
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    config: NarrativeConfig,
}

impl ChatCompletionsClient {
    pub fn new(config: NarrativeConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn build_request(&self, summary: &str) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!(
                        "Analyze the student's quiz performance and suggest strengths and weaknesses. Input: {summary}"
                    ),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl NarrativeProvider for ChatCompletionsClient {
    async fn narrate(&self, summary: &str) -> Result<String, NarrativeError> {
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .header("content-type", "application/json")
            .json(&self.build_request(summary));

        // Without a key the provider rejects the call, which surfaces as a Status error.
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        tracing::debug!(endpoint = %self.config.endpoint, model = %self.config.model, "requesting narrative");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Status { status, body });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|err| NarrativeError::MalformedResponse(err.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| NarrativeError::MalformedResponse("no completion content".to_string()))
    }
}
