use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::debounce::Debouncer;
use crate::llm::{
    ChatMessage, CompletionRequest, ModelClient, ModelError, ResponseSchema, complete_json,
};

/// Shortest input that triggers a lookup.
pub const MIN_QUERY_LEN: usize = 3;

/// Most candidates ever shown.
pub const MAX_CANDIDATES: usize = 5;

pub const DEFAULT_ZIP_DEBOUNCE: Duration = Duration::from_millis(500);

const SYSTEM_PROMPT: &str = "You are a global postal-code directory. \
     Given a full or partial postal code, list up to 5 real places anywhere in the world \
     whose postal code starts with or equals it. Prefer the most populous matches. \
     Use ISO 3166-1 alpha-2 country codes.";

/// A place matching a postal-code query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Location {
    pub postal_code: String,
    pub place: String,
    pub region: String,
    pub country: String,
    pub country_code: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.postal_code, self.place)?;
        if !self.region.is_empty() && self.region != self.place {
            write!(f, ", {}", self.region)?;
        }
        write!(f, ", {}", self.country)
    }
}

#[derive(Debug, Deserialize)]
struct LocationResponse {
    locations: Vec<Location>,
}

/// Asks the model for places matching `code`, keeping at most
/// [`MAX_CANDIDATES`].
pub async fn lookup_locations(
    client: &dyn ModelClient,
    code: &str,
) -> Result<Vec<Location>, ModelError> {
    let request = CompletionRequest {
        system: Some(SYSTEM_PROMPT.to_string()),
        messages: vec![ChatMessage::user(format!("Postal code: {code}"))],
        schema: Some(ResponseSchema {
            name: "locations",
            schema: json!({
                "type": "object",
                "properties": {
                    "locations": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "postal_code": { "type": "string" },
                                "place": { "type": "string" },
                                "region": { "type": "string" },
                                "country": { "type": "string" },
                                "country_code": { "type": "string" }
                            },
                            "required": ["postal_code", "place", "region", "country", "country_code"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["locations"],
                "additionalProperties": false
            }),
        }),
        tools: Vec::new(),
    };

    let response: LocationResponse = complete_json(client, &request).await?;
    let mut locations = response.locations;
    locations.truncate(MAX_CANDIDATES);
    Ok(locations)
}

/// Debounced postal-code autocomplete.
///
/// Each keystroke goes through [`ZipLookup::on_input`]; the latest
/// suggestions are published on a watch channel. Responses are applied in
/// arrival order, so a slow response to an older query can overwrite a
/// newer one.
#[derive(Clone)]
pub struct ZipLookup {
    inner: Arc<Inner>,
}

struct Inner {
    client: Arc<dyn ModelClient>,
    debouncer: Debouncer,
    suggestions: watch::Sender<Vec<Location>>,
}

impl ZipLookup {
    pub fn new(client: Arc<dyn ModelClient>, debounce: Duration) -> Self {
        let (suggestions, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                client,
                debouncer: Debouncer::new(debounce),
                suggestions,
            }),
        }
    }

    /// Handles new input: short input clears the suggestions, anything
    /// else schedules a lookup.
    pub fn on_input(&self, input: &str) {
        let code = input.trim().to_string();
        if code.chars().count() < MIN_QUERY_LEN {
            self.inner.debouncer.cancel();
            self.inner.suggestions.send_replace(Vec::new());
            return;
        }

        let lookup = self.clone();
        self.inner.debouncer.schedule(async move {
            let locations = lookup.lookup(&code).await;
            lookup.inner.suggestions.send_replace(locations);
        });
    }

    /// Looks `code` up now. Failures yield an empty list.
    pub async fn lookup(&self, code: &str) -> Vec<Location> {
        match lookup_locations(self.inner.client.as_ref(), code).await {
            Ok(locations) => locations,
            Err(e) => {
                tracing::warn!(code, "postal code lookup failed: {e}");
                Vec::new()
            }
        }
    }

    pub fn suggestions(&self) -> Vec<Location> {
        self.inner.suggestions.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Location>> {
        self.inner.suggestions.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::llm::scripted::ScriptedClient;

    const DEBOUNCE: Duration = Duration::from_millis(100);

    fn location_json(code: &str, place: &str) -> String {
        format!(
            r#"{{"postal_code":"{code}","place":"{place}","region":"","country":"Germany","country_code":"DE"}}"#
        )
    }

    fn response(count: usize) -> String {
        let items: Vec<String> = (0..count)
            .map(|i| location_json(&format!("1011{i}"), &format!("Place {i}")))
            .collect();
        format!(r#"{{"locations":[{}]}}"#, items.join(","))
    }

    #[tokio::test]
    async fn test_lookup_truncates_to_five() {
        let client = ScriptedClient::new();
        client.push_text(&response(8));

        let locations = lookup_locations(&client, "1011").await.unwrap();

        assert_eq!(locations.len(), MAX_CANDIDATES);
        assert_eq!(locations[0].place, "Place 0");
        assert!(client.requests()[0].messages[0].text.contains("1011"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_never_requests() {
        let client = Arc::new(ScriptedClient::new());
        let lookup = ZipLookup::new(client.clone(), DEBOUNCE);

        lookup.on_input("1");
        lookup.on_input(" 10 ");
        tokio::time::sleep(DEBOUNCE * 3).await;

        assert_eq!(client.request_count(), 0);
        assert!(lookup.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystrokes_debounced_to_last_input() {
        let client = Arc::new(ScriptedClient::new());
        client.push_text(&response(2));
        let lookup = ZipLookup::new(client.clone(), DEBOUNCE);

        lookup.on_input("101");
        lookup.on_input("1011");
        lookup.on_input("10115");
        tokio::time::sleep(DEBOUNCE * 3).await;

        assert_eq!(client.request_count(), 1);
        assert!(client.requests()[0].messages[0].text.ends_with("10115"));
        assert_eq!(lookup.suggestions().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_yields_empty_suggestions() {
        let client = Arc::new(ScriptedClient::new());
        client.push(Err(ModelError::InvalidResponse("down".to_string())));
        let lookup = ZipLookup::new(client.clone(), DEBOUNCE);

        lookup.on_input("10115");
        tokio::time::sleep(DEBOUNCE * 3).await;

        assert_eq!(client.request_count(), 1);
        assert!(lookup.suggestions().is_empty());
    }

    #[test]
    fn test_location_display() {
        let location = Location {
            postal_code: "10115".to_string(),
            place: "Berlin".to_string(),
            region: "Berlin".to_string(),
            country: "Germany".to_string(),
            country_code: "DE".to_string(),
        };
        assert_eq!(location.to_string(), "10115 Berlin, Germany");
    }
}
