//! Wire formats for the supported LLM provider kinds
//!
//! Each kind maps one [`GenerationRequest`] onto its own request envelope
//! (headers + body) and pulls the generated text out of its own response
//! shape.

use super::GenerationRequest;
use crate::config::ProviderConfig;
use serde::{Deserialize, Serialize};

/// API version header value sent to Anthropic-style endpoints
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Wire protocol spoken by a provider endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// OpenAI-style chat completions (OpenAI, Groq, vLLM, ...)
    #[serde(rename = "openai")]
    OpenAiCompatible,
    /// Anthropic messages API
    #[serde(rename = "anthropic")]
    Anthropic,
    /// Ollama local generate API
    #[serde(rename = "ollama")]
    Ollama,
}

impl ProviderKind {
    /// Local inference runs without credentials
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Ollama)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAiCompatible => "openai",
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
        }
    }

    /// Build the provider-specific HTTP request
    pub(crate) fn build_request(
        &self,
        http: &reqwest::Client,
        config: &ProviderConfig,
        request: &GenerationRequest,
    ) -> reqwest::RequestBuilder {
        match self {
            Self::OpenAiCompatible => {
                let body = ChatCompletionRequest {
                    model: &config.model,
                    messages: vec![UserMessage::new(&request.prompt)],
                    temperature: request.temperature,
                    max_tokens: request.max_tokens,
                };
                let mut builder = http.post(&config.endpoint).json(&body);
                if let Some(ref api_key) = config.api_key {
                    builder = builder.header("Authorization", format!("Bearer {}", api_key));
                }
                builder
            }
            Self::Anthropic => {
                let body = MessagesRequest {
                    model: &config.model,
                    max_tokens: request.max_tokens,
                    messages: vec![UserMessage::new(&request.prompt)],
                    temperature: request.temperature,
                };
                let mut builder = http
                    .post(&config.endpoint)
                    .header("anthropic-version", ANTHROPIC_VERSION)
                    .json(&body);
                if let Some(ref api_key) = config.api_key {
                    builder = builder.header("x-api-key", api_key);
                }
                builder
            }
            Self::Ollama => {
                let body = OllamaGenerateRequest {
                    model: &config.model,
                    prompt: &request.prompt,
                    stream: false,
                    options: OllamaOptions {
                        temperature: request.temperature,
                    },
                };
                http.post(&config.endpoint).json(&body)
            }
        }
    }

    /// Extract the generated text from a successful response body
    pub(crate) fn parse_response(&self, body: &str) -> std::result::Result<String, String> {
        let text = match self {
            Self::OpenAiCompatible => {
                let response: ChatCompletionResponse =
                    serde_json::from_str(body).map_err(|e| format!("Invalid response: {}", e))?;
                response
                    .choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content)
                    .ok_or("Response contained no choices")?
            }
            Self::Anthropic => {
                let response: MessagesResponse =
                    serde_json::from_str(body).map_err(|e| format!("Invalid response: {}", e))?;
                response
                    .content
                    .into_iter()
                    .next()
                    .map(|block| block.text)
                    .ok_or("Response contained no content blocks")?
            }
            Self::Ollama => {
                let response: OllamaGenerateResponse =
                    serde_json::from_str(body).map_err(|e| format!("Invalid response: {}", e))?;
                response.response
            }
        };
        Ok(text)
    }

    /// Decorate an upstream failure message with kind-specific hints
    pub(crate) fn describe_failure(&self, message: String) -> String {
        match self {
            Self::Ollama => format!("{} (make sure Ollama is running)", message),
            Self::OpenAiCompatible | Self::Anthropic => message,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> UserMessage<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<UserMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<UserMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}
