pub mod openai;

use crate::types::{LLMClient, RawChatFn};

pub use openai::{build_chat_payload, chat as openai_chat};

pub fn get_llm_chat(client: LLMClient) -> RawChatFn {
    openai_chat(client)
}
