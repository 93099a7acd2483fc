pub mod providers;
pub mod types;
pub mod utils;

pub use providers::{build_chat_payload, get_llm_chat};
pub use types::{ChatFuture, ChatRequest, LLMClient, LLMMessage, LLMMessageType, LLMUserType, RawChatFn};
