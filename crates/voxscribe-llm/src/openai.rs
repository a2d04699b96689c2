//! OpenAI chat completions provider for title suggestions

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::LlmError;
use crate::prompts::{build_title_prompt, parse_titles, TITLE_SYSTEM_PROMPT};
use crate::provider::TitleOracle;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Hosted title-suggestion provider
pub struct OpenAiTitleProvider {
    client: Client,
    api_key: SecretString,
    model: String,
}

impl OpenAiTitleProvider {
    /// Create a new provider with the default model
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create with a custom model
    pub fn with_model(api_key: SecretString, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.to_string(),
        }
    }

    async fn send_chat(&self, user_prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: TITLE_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };

        debug!(model = %self.model, "Sending chat completion request");

        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(LlmError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Chat API error: {} - {}", status, error_text);
            return Err(LlmError::RequestFailed(format!("{}: {}", status, error_text)));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Empty response".to_string()))
    }
}

impl TitleOracle for OpenAiTitleProvider {
    async fn suggest_titles(&self, content: &str) -> Result<Vec<String>, LlmError> {
        info!(model = %self.model, chars = content.len(), "Generating title suggestions");

        let prompt = build_title_prompt(content);
        let reply = self.send_chat(&prompt).await?;
        let titles = parse_titles(&reply);

        if titles.is_empty() {
            return Err(LlmError::ParseError(
                "Model returned no usable titles".to_string(),
            ));
        }

        info!(count = titles.len(), "Title suggestions generated");
        Ok(titles)
    }

    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
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
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: String,
}
