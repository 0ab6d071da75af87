use async_trait::async_trait;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::borrow::Cow;

use super::client::{
    ChatMessage, Completion, CompletionRequest, ModelClient, ModelError, Role, ToolCall,
};
use crate::input::image_mime;

/// Client for OpenAI-compatible chat-completion and image-edit endpoints.
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    image_model: String,
}

impl OpenAiClient {
    pub fn new(endpoint: String, api_key: Option<String>, model: String, image_model: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            model,
            image_model,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.endpoint.trim_end_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(api_key) => request.header("Authorization", format!("Bearer {api_key}")),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ModelError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ModelError> {
        let body = build_chat_request(&self.model, request);
        tracing::debug!(
            model = %self.model,
            messages = body.messages.len(),
            "sending chat completion"
        );

        let response = self
            .send(self.client.post(self.url("chat/completions")).json(&body))
            .await?;

        parse_chat_response(&response)
    }

    async fn edit_image(&self, image: &[u8], prompt: &str) -> Result<Vec<u8>, ModelError> {
        let mime = image_mime(image).unwrap_or("image/jpeg");
        let file_name = if mime == "image/png" {
            "image.png"
        } else {
            "image.jpg"
        };

        let part = Part::bytes(image.to_vec())
            .file_name(file_name)
            .mime_str(mime)?;
        let form = Form::new()
            .text("model", self.image_model.clone())
            .text("prompt", prompt.to_string())
            .part("image", part);

        tracing::debug!(model = %self.image_model, "sending image edit");

        let response = self
            .send(self.client.post(self.url("images/edits")).multipart(form))
            .await?;

        parse_image_response(&response)
    }
}

// Borrow from the request where possible; only image payloads are encoded.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: Option<WireContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WireContent<'a> {
    Text(Cow<'a, str>),
    Parts(Vec<Value>),
}

fn build_chat_request<'a>(model: &'a str, request: &'a CompletionRequest) -> ChatCompletionRequest<'a> {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);

    if let Some(system) = &request.system {
        messages.push(WireMessage {
            role: Role::System.as_str(),
            content: Some(WireContent::Text(Cow::Borrowed(system))),
            tool_calls: Vec::new(),
            tool_call_id: None,
        });
    }

    messages.extend(request.messages.iter().map(to_wire_message));

    let response_format = request.schema.as_ref().map(|schema| {
        json!({
            "type": "json_schema",
            "json_schema": {
                "name": schema.name,
                "schema": schema.schema,
                "strict": true,
            }
        })
    });

    let tools = request
        .tools
        .iter()
        .map(|tool| {
            json!({
                "type": "function",
                "function": {
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                }
            })
        })
        .collect();

    ChatCompletionRequest {
        model,
        messages,
        response_format,
        tools,
    }
}

fn to_wire_message(message: &ChatMessage) -> WireMessage<'_> {
    // Only user turns may carry images on the wire.
    let content = match (&message.image, message.role) {
        (Some(image), Role::User) => {
            let url = format!(
                "data:{};base64,{}",
                image_mime(image).unwrap_or("image/jpeg"),
                BASE64_STANDARD.encode(image)
            );
            let mut parts = Vec::with_capacity(2);
            if !message.text.is_empty() {
                parts.push(json!({ "type": "text", "text": message.text }));
            }
            parts.push(json!({ "type": "image_url", "image_url": { "url": url } }));
            Some(WireContent::Parts(parts))
        }
        _ if message.text.is_empty() && !message.tool_calls.is_empty() => None,
        _ => Some(WireContent::Text(Cow::Borrowed(&message.text))),
    };

    let tool_calls = message
        .tool_calls
        .iter()
        .map(|call| {
            json!({
                "id": call.id,
                "type": "function",
                "function": {
                    "name": call.name,
                    "arguments": call.arguments.to_string(),
                }
            })
        })
        .collect();

    WireMessage {
        role: message.role.as_str(),
        content,
        tool_calls,
        tool_call_id: message.tool_call_id.as_deref(),
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunction,
}

#[derive(Debug, Deserialize)]
struct WireFunction {
    name: String,
    arguments: String,
}

fn parse_chat_response(body: &str) -> Result<Completion, ModelError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)?;
    let message = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ModelError::InvalidResponse("response has no choices".to_string()))?
        .message;

    let tool_calls = message
        .tool_calls
        .into_iter()
        .map(|call| {
            let arguments = if call.function.arguments.trim().is_empty() {
                Value::Object(serde_json::Map::new())
            } else {
                serde_json::from_str(&call.function.arguments)?
            };
            Ok(ToolCall {
                id: call.id,
                name: call.function.name,
                arguments,
            })
        })
        .collect::<Result<Vec<_>, ModelError>>()?;

    Ok(Completion {
        text: message.content.filter(|c| !c.is_empty()),
        tool_calls,
    })
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    b64_json: Option<String>,
}

fn parse_image_response(body: &str) -> Result<Vec<u8>, ModelError> {
    let response: ImageResponse = serde_json::from_str(body)?;
    let encoded = response
        .data
        .into_iter()
        .find_map(|d| d.b64_json)
        .ok_or_else(|| ModelError::InvalidResponse("response has no image data".to_string()))?;

    BASE64_STANDARD
        .decode(encoded.trim())
        .map_err(|e| ModelError::InvalidResponse(format!("image is not valid base64: {e}")))
}
