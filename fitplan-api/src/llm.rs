use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("text generation service unreachable")]
    CommunicationError,
    #[error("text generation service rejected the request with status {0}")]
    StatusError(u16),
    #[error("incorrect text generation response")]
    ResponseError,
}

#[mockall::automock]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

/// Talks to any OpenAI-compatible chat completions endpoint.
pub struct ChatCompletionsGenerator {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl ChatCompletionsGenerator {
    pub fn new(endpoint: String, model: String, api_key: String) -> Self {
        Self {
            endpoint,
            model,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        info!("Sending prompt to {}", self.model);
        debug!("Prompt: {}", prompt);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response: ChatResponse = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|_| GenerationError::CommunicationError)
            .and_then(|resp| {
                if resp.status().is_success() {
                    Ok(resp)
                } else {
                    Err(GenerationError::StatusError(resp.status().as_u16()))
                }
            })?
            .json()
            .await
            .map_err(|_| GenerationError::ResponseError)?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(GenerationError::ResponseError)
    }
}

/// Parses the outermost `{...}` span of generated text, ignoring any prose
/// or code fences around it.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Option<T> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

pub fn extract_json_or<T: DeserializeOwned>(text: &str, fallback: T) -> T {
    extract_json(text).unwrap_or_else(|| {
        warn!("Could not parse generated text, using fallback");
        debug!("Unparseable text: {}", text);
        fallback
    })
}
