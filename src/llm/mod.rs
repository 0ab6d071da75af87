mod client;
mod openai;
#[cfg(test)]
pub mod scripted;

pub use client::{
    ChatMessage, Completion, CompletionRequest, ModelClient, ModelError, ResponseSchema, Role,
    ToolCall, ToolDeclaration, complete_json,
};
pub use openai::OpenAiClient;
