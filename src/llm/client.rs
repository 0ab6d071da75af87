use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while talking to the remote model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Unknown tool requested by the model: {0}")]
    UnknownTool(String),
}

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// A single role-tagged message, optionally carrying image bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub image: Option<Vec<u8>>,
    pub tool_calls: Vec<ToolCall>,
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// A tool result answering the call with the given id.
    pub fn tool_result(call_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(call_id.into()),
            ..Self::new(Role::Tool, text)
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }

    #[must_use]
    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            image: None,
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }
}

/// JSON schema the response must conform to.
#[derive(Debug, Clone)]
pub struct ResponseSchema {
    pub name: &'static str,
    pub schema: Value,
}

/// A function the model may ask the client to execute.
#[derive(Debug, Clone)]
pub struct ToolDeclaration {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub schema: Option<ResponseSchema>,
    pub tools: Vec<ToolDeclaration>,
}

/// What the model answered: text, tool calls, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub text: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

/// The remote generative model.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Runs one chat completion.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ModelError>;

    /// Edits `image` according to `prompt` and returns the new image bytes.
    async fn edit_image(&self, image: &[u8], prompt: &str) -> Result<Vec<u8>, ModelError>;
}

/// Runs a schema-constrained completion and deserializes the answer.
pub async fn complete_json<T: DeserializeOwned>(
    client: &dyn ModelClient,
    request: &CompletionRequest,
) -> Result<T, ModelError> {
    let completion = client.complete(request).await?;
    let text = completion
        .text
        .ok_or_else(|| ModelError::InvalidResponse("response has no content".to_string()))?;
    Ok(serde_json::from_str(strip_code_fence(&text))?)
}

/// Some models wrap JSON in a markdown fence even when asked for a schema.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
