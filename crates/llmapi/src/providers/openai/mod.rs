mod api;
pub mod models;

pub use api::{build_chat_payload, chat};
pub use models::ChatCompletionResponse;
