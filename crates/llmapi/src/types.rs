use anyhow::Result;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum LLMMessageType {
    TEXT(String),
    IMAGE { data_b64: String, mime_type: String },
}
impl LLMMessageType {
    pub fn text(text: impl Into<String>) -> Self {
        LLMMessageType::TEXT(text.into())
    }
    pub fn image_b64(data_b64: impl Into<String>, mime_type: impl Into<String>) -> Self {
        LLMMessageType::IMAGE {
            data_b64: data_b64.into(),
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LLMUserType {
    Human,
    AI,
    System,
}
impl LLMUserType {
    pub fn from_str(role_str: &str) -> Option<Self> {
        match role_str.trim().to_lowercase().as_str() {
            "user" | "human" => Some(LLMUserType::Human),
            "model" | "ai" | "assistant" => Some(LLMUserType::AI),
            "system" => Some(LLMUserType::System),
            _ => None,
        }
    }

    pub fn as_openai_role(&self) -> &'static str {
        match self {
            LLMUserType::Human => "user",
            LLMUserType::AI => "assistant",
            LLMUserType::System => "system",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LLMMessage {
    pub role: LLMUserType,
    pub content: Vec<LLMMessageType>,
}

impl LLMMessage {
    pub fn new(role: &str, content: Vec<LLMMessageType>) -> Self {
        Self {
            role: LLMUserType::from_str(role).unwrap_or(LLMUserType::Human),
            content,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: LLMUserType::System,
            content: vec![LLMMessageType::text(text)],
        }
    }
}

/// A single chat-completion call: model, conversation and sampling settings.
///
/// `temperature` and `seed` are always sent so that repeated calls with the
/// same inputs produce the same request body.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<LLMMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub seed: i64,
}

#[derive(Clone)]
pub struct LLMClient {
    pub(crate) api_key: Option<String>,
    pub(crate) endpoint: String,
}

impl LLMClient {
    pub fn new(api_key: Option<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            endpoint: endpoint.into(),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for LLMClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

pub type ChatFuture = Pin<Box<dyn Future<Output = Result<Value>> + Send + 'static>>;

/// Sends a prepared JSON request body and resolves to the decoded JSON reply.
pub type RawChatFn = Arc<dyn Fn(Value) -> ChatFuture + Send + Sync>;
