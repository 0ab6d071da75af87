use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::prompt::build_system_prompt;
use crate::llm::{
    ChatMessage, CompletionRequest, ModelClient, ModelError, ResponseSchema, complete_json,
};

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    translations: Vec<String>,
}

/// Sends batched translation requests to the model.
#[derive(Clone)]
pub struct Translator {
    client: Arc<dyn ModelClient>,
}

impl Translator {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Translates `texts` in one request. The result is index-aligned with
    /// the input.
    pub async fn translate_batch(
        &self,
        texts: &[String],
        language: &str,
    ) -> Result<Vec<String>, ModelError> {
        let request = build_request(texts, language)?;
        let response: TranslationResponse = complete_json(self.client.as_ref(), &request).await?;

        if response.translations.len() != texts.len() {
            return Err(ModelError::InvalidResponse(format!(
                "expected {} translations, got {}",
                texts.len(),
                response.translations.len()
            )));
        }

        Ok(response.translations)
    }
}

fn build_request(texts: &[String], language: &str) -> Result<CompletionRequest, ModelError> {
    Ok(CompletionRequest {
        system: Some(build_system_prompt(language)),
        messages: vec![ChatMessage::user(serde_json::to_string(texts)?)],
        schema: Some(ResponseSchema {
            name: "translations",
            schema: json!({
                "type": "object",
                "properties": {
                    "translations": {
                        "type": "array",
                        "items": { "type": "string" }
                    }
                },
                "required": ["translations"],
                "additionalProperties": false
            }),
        }),
        tools: Vec::new(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::llm::scripted::ScriptedClient;

    fn texts(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_translate_batch() {
        let client = Arc::new(ScriptedClient::new());
        client.push_text(r#"{"translations": ["Boutique", "À propos"]}"#);
        let translator = Translator::new(client.clone());

        let result = translator
            .translate_batch(&texts(&["Shop", "About"]), "French")
            .await
            .unwrap();

        assert_eq!(result, texts(&["Boutique", "À propos"]));

        let request = &client.requests()[0];
        assert!(request.system.as_ref().unwrap().contains("French"));
        assert_eq!(request.messages[0].text, r#"["Shop","About"]"#);
        assert_eq!(request.schema.as_ref().unwrap().name, "translations");
    }

    #[tokio::test]
    async fn test_translate_batch_length_mismatch() {
        let client = Arc::new(ScriptedClient::new());
        client.push_text(r#"{"translations": ["Boutique"]}"#);
        let translator = Translator::new(client);

        let result = translator
            .translate_batch(&texts(&["Shop", "About"]), "French")
            .await;

        assert!(matches!(result, Err(ModelError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_translate_batch_not_json() {
        let client = Arc::new(ScriptedClient::new());
        client.push_text("Boutique, À propos");
        let translator = Translator::new(client);

        let result = translator.translate_batch(&texts(&["Shop"]), "French").await;

        assert!(matches!(result, Err(ModelError::Json(_))));
    }
}
