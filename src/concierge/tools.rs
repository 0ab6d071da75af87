use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::llm::ToolDeclaration;

/// Name of the only tool the concierge can run.
pub const EDIT_IMAGE: &str = "edit_image";

pub fn edit_image_declaration() -> ToolDeclaration {
    ToolDeclaration {
        name: EDIT_IMAGE,
        description: "Edit the most recent image in the conversation, for example to place an \
                      Aura product in the shopper's room. Describe the edit in the prompt.",
        parameters: json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "What to change in the image"
                }
            },
            "required": ["prompt"],
            "additionalProperties": false
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct EditImageArgs {
    pub prompt: String,
}

/// Result reported back to the model after running a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutcome {
    pub success: bool,
    pub message: String,
}

impl ToolOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        json!({ "success": self.success, "message": self.message }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_json() {
        assert_eq!(
            ToolOutcome::failure("no image").to_json(),
            r#"{"message":"no image","success":false}"#
        );
    }

    #[test]
    fn test_declaration_requires_prompt() {
        let declaration = edit_image_declaration();
        assert_eq!(declaration.name, "edit_image");
        assert_eq!(declaration.parameters["required"][0], "prompt");
    }
}
