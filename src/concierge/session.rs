use std::fmt::Write as _;
use std::sync::Arc;

use super::tools::{EDIT_IMAGE, EditImageArgs, ToolOutcome, edit_image_declaration};
use crate::llm::{ChatMessage, Completion, CompletionRequest, ModelClient, ModelError, ToolCall};
use crate::store::CATALOG;

/// Reply shown whenever a turn cannot be completed.
pub const APOLOGY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again in a moment.";

/// The concierge's answer to one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ConciergeReply {
    pub text: String,
    pub image: Option<Vec<u8>>,
}

/// A linear conversation with the concierge.
pub struct ConciergeSession {
    client: Arc<dyn ModelClient>,
    system: String,
    history: Vec<ChatMessage>,
}

impl ConciergeSession {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            system: system_instruction(),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Sends one user turn, optionally with an image, and returns the
    /// concierge's reply. Failures become [`APOLOGY`].
    pub async fn send(&mut self, text: &str, image: Option<Vec<u8>>) -> ConciergeReply {
        let mut message = ChatMessage::user(text);
        if let Some(image) = image {
            message = message.with_image(image);
        }
        self.history.push(message);

        match self.run_turn().await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("concierge turn failed: {e}");
                self.history.push(ChatMessage::assistant(APOLOGY));
                ConciergeReply {
                    text: APOLOGY.to_string(),
                    image: None,
                }
            }
        }
    }

    async fn run_turn(&mut self) -> Result<ConciergeReply, ModelError> {
        let completion = self.client.complete(&self.request()).await?;

        if completion.tool_calls.is_empty() {
            let text = reply_text(completion)?;
            self.history.push(ChatMessage::assistant(text.clone()));
            return Ok(ConciergeReply { text, image: None });
        }

        let calls = completion.tool_calls;
        self.history.push(
            ChatMessage::assistant(completion.text.unwrap_or_default()).with_tool_calls(calls.clone()),
        );

        // Every call gets a tool result, failed or not.
        let mut generated = None;
        for call in &calls {
            let (outcome, image) = self.run_tool(call).await;
            self.history
                .push(ChatMessage::tool_result(call.id.clone(), outcome.to_json()));
            if image.is_some() {
                generated = image;
            }
        }

        let followup = self.client.complete(&self.request()).await?;
        let text = reply_text(followup)?;

        let mut message = ChatMessage::assistant(text.clone());
        if let Some(image) = &generated {
            message = message.with_image(image.clone());
        }
        self.history.push(message);

        Ok(ConciergeReply {
            text,
            image: generated,
        })
    }

    async fn run_tool(&self, call: &ToolCall) -> (ToolOutcome, Option<Vec<u8>>) {
        if call.name != EDIT_IMAGE {
            let e = ModelError::UnknownTool(call.name.clone());
            tracing::warn!("{e}");
            return (ToolOutcome::failure(e.to_string()), None);
        }

        let args: EditImageArgs = match serde_json::from_value(call.arguments.clone()) {
            Ok(args) => args,
            Err(e) => {
                tracing::warn!("invalid edit_image arguments: {e}");
                return (
                    ToolOutcome::failure(format!("Invalid edit_image arguments: {e}")),
                    None,
                );
            }
        };

        let Some(source) = self.latest_image() else {
            return (
                ToolOutcome::failure("There is no image in the conversation to edit."),
                None,
            );
        };

        tracing::debug!(prompt = %args.prompt, "running edit_image");
        match self.client.edit_image(source, &args.prompt).await {
            Ok(image) => (
                ToolOutcome::success("The image was edited successfully."),
                Some(image),
            ),
            Err(e) => {
                tracing::warn!("image edit failed: {e}");
                (ToolOutcome::failure(format!("Image editing failed: {e}")), None)
            }
        }
    }

    fn latest_image(&self) -> Option<&[u8]> {
        self.history.iter().rev().find_map(|m| m.image.as_deref())
    }

    fn request(&self) -> CompletionRequest {
        CompletionRequest {
            system: Some(self.system.clone()),
            messages: self.history.clone(),
            schema: None,
            tools: vec![edit_image_declaration()],
        }
    }
}

fn reply_text(completion: Completion) -> Result<String, ModelError> {
    completion
        .text
        .ok_or_else(|| ModelError::InvalidResponse("reply has no text".to_string()))
}

fn system_instruction() -> String {
    let mut instruction = String::from(
        "You are the Aura concierge, a calm and knowledgeable guide to Aura's lifestyle-tech \
         products. Keep answers short and friendly. Recommend only products from the catalog \
         below. When the shopper shares a photo and wants to see a product in it, or asks to \
         change the photo, call the edit_image tool.\n\nCatalog:\n",
    );
    for product in CATALOG {
        let _ = writeln!(
            instruction,
            "- {} ({}, {:.2} USD): {}",
            product.name, product.category, product.price_usd, product.description
        );
    }
    instruction
}
