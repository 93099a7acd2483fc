use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<ChatContent>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ChatContent {
    Text(String),
    Parts(Vec<ChatContentPart>),
}

#[derive(Debug, Deserialize)]
pub struct ChatContentPart {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
}

impl ChatCompletionResponse {
    /// Best-effort view over a raw reply; `None` when it does not look like a
    /// chat completion (for example an API error body).
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    pub fn first_text(&self) -> Option<String> {
        let message = &self.choices.first()?.message;
        match message.content.as_ref()? {
            ChatContent::Text(text) => Some(text.clone()),
            ChatContent::Parts(parts) => {
                let joined: Vec<&str> = parts
                    .iter()
                    .filter(|part| matches!(part.kind.as_str(), "text" | "output_text"))
                    .filter_map(|part| part.text.as_deref())
                    .collect();
                (!joined.is_empty()).then(|| joined.join("\n"))
            }
        }
    }
}
