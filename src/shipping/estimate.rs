use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::watch;

use super::zip::Location;
use crate::llm::{
    ChatMessage, CompletionRequest, ModelClient, ModelError, ResponseSchema, complete_json,
};

/// Shipping cost shown when the estimate cannot be obtained.
pub const FALLBACK_SHIPPING_COST: f64 = 15.0;
pub const FALLBACK_CURRENCY: &str = "USD";

const ORIGIN: &str = "Copenhagen, Denmark";
const FLAT_FEE_USD: f64 = 5.0;
const PER_KM_USD: f64 = 0.01;
const CUSTOMS_FEE_USD: f64 = 20.0;

/// Cost breakdown for delivering to one location. Amounts are in USD;
/// `exchange_rate` converts them to `currency` for display.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShippingQuote {
    pub flat_fee: f64,
    pub distance_fee: f64,
    pub customs_fee: f64,
    pub total: f64,
    pub distance_km: f64,
    pub currency: String,
    pub exchange_rate: f64,
    #[serde(skip)]
    pub fallback: bool,
}

impl ShippingQuote {
    pub fn fallback() -> Self {
        Self {
            flat_fee: FALLBACK_SHIPPING_COST,
            distance_fee: 0.0,
            customs_fee: 0.0,
            total: FALLBACK_SHIPPING_COST,
            distance_km: 0.0,
            currency: FALLBACK_CURRENCY.to_string(),
            exchange_rate: 1.0,
            fallback: true,
        }
    }

    /// Formats a USD amount in the quote's display currency.
    pub fn display(&self, amount_usd: f64) -> String {
        format_money(amount_usd, &self.currency, self.exchange_rate)
    }
}

/// Renders `amount_usd` converted with `rate`, e.g. `"102.50 EUR"`.
pub fn format_money(amount_usd: f64, currency: &str, rate: f64) -> String {
    format!("{:.2} {currency}", amount_usd * rate)
}

/// Progress of the most recent estimate.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateState {
    Idle,
    Estimating,
    Complete(ShippingQuote),
}

/// Requests shipping quotes for a chosen location.
pub struct ShippingEstimator {
    client: Arc<dyn ModelClient>,
    state: watch::Sender<EstimateState>,
}

impl ShippingEstimator {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        let (state, _) = watch::channel(EstimateState::Idle);
        Self { client, state }
    }

    /// Estimates shipping to `destination`. Never fails: any error yields
    /// [`ShippingQuote::fallback`].
    pub async fn estimate(&self, destination: &Location) -> ShippingQuote {
        self.state.send_replace(EstimateState::Estimating);

        let quote = match request_quote(self.client.as_ref(), destination).await {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!(destination = %destination, "shipping estimate failed: {e}");
                ShippingQuote::fallback()
            }
        };

        self.state
            .send_replace(EstimateState::Complete(quote.clone()));
        quote
    }

    pub fn state(&self) -> EstimateState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<EstimateState> {
        self.state.subscribe()
    }
}

fn system_prompt() -> String {
    format!(
        "You are the shipping calculator of the Aura storefront. \
         Orders ship from {ORIGIN}. Compute the great-circle distance in km to the destination. \
         The cost is a flat fee of {FLAT_FEE_USD:.2} USD plus {PER_KM_USD:.2} USD per km, \
         plus a customs surcharge of {CUSTOMS_FEE_USD:.2} USD when the destination is outside the European Union \
         (otherwise 0). All fees are in USD and total is their sum. \
         Also give the ISO 4217 currency of the destination country and the current \
         exchange rate from 1 USD to that currency."
    )
}

async fn request_quote(
    client: &dyn ModelClient,
    destination: &Location,
) -> Result<ShippingQuote, ModelError> {
    let request = CompletionRequest {
        system: Some(system_prompt()),
        messages: vec![ChatMessage::user(format!(
            "Destination: {destination} ({})",
            destination.country_code
        ))],
        schema: Some(ResponseSchema {
            name: "shipping_quote",
            schema: json!({
                "type": "object",
                "properties": {
                    "flat_fee": { "type": "number" },
                    "distance_fee": { "type": "number" },
                    "customs_fee": { "type": "number" },
                    "total": { "type": "number" },
                    "distance_km": { "type": "number" },
                    "currency": { "type": "string" },
                    "exchange_rate": { "type": "number" }
                },
                "required": [
                    "flat_fee", "distance_fee", "customs_fee", "total",
                    "distance_km", "currency", "exchange_rate"
                ],
                "additionalProperties": false
            }),
        }),
        tools: Vec::new(),
    };

    complete_json(client, &request).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::llm::scripted::ScriptedClient;

    fn berlin() -> Location {
        Location {
            postal_code: "10115".to_string(),
            place: "Berlin".to_string(),
            region: "Berlin".to_string(),
            country: "Germany".to_string(),
            country_code: "DE".to_string(),
        }
    }

    #[tokio::test]
    async fn test_estimate_parses_breakdown() {
        let client = Arc::new(ScriptedClient::new());
        client.push_text(
            r#"{"flat_fee":5.0,"distance_fee":3.55,"customs_fee":0.0,"total":8.55,
                "distance_km":355.0,"currency":"EUR","exchange_rate":0.92}"#,
        );
        let estimator = ShippingEstimator::new(client.clone());

        let quote = estimator.estimate(&berlin()).await;

        assert!(!quote.fallback);
        assert_eq!(quote.currency, "EUR");
        assert!((quote.total - 8.55).abs() < 1e-9);
        assert_eq!(estimator.state(), EstimateState::Complete(quote));
        assert!(client.requests()[0].messages[0].text.contains("Berlin"));
    }

    #[tokio::test]
    async fn test_network_failure_falls_back() {
        let client = Arc::new(ScriptedClient::new());
        client.push(Err(ModelError::Status {
            status: 503,
            body: "unavailable".to_string(),
        }));
        let estimator = ShippingEstimator::new(client);

        let quote = estimator.estimate(&berlin()).await;

        assert!(quote.fallback);
        assert!((quote.total - FALLBACK_SHIPPING_COST).abs() < f64::EPSILON);
        assert_eq!(quote.currency, FALLBACK_CURRENCY);
        assert!(matches!(estimator.state(), EstimateState::Complete(_)));
    }

    #[tokio::test]
    async fn test_malformed_quote_falls_back() {
        let client = Arc::new(ScriptedClient::new());
        client.push_text(r#"{"total":"cheap"}"#);
        let estimator = ShippingEstimator::new(client);

        assert!(estimator.estimate(&berlin()).await.fallback);
    }

    #[test]
    fn test_initial_state_idle() {
        let estimator = ShippingEstimator::new(Arc::new(ScriptedClient::new()));
        assert_eq!(estimator.state(), EstimateState::Idle);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(10.0, "EUR", 0.92), "9.20 EUR");
        assert_eq!(format_money(15.0, "USD", 1.0), "15.00 USD");
        assert_eq!(ShippingQuote::fallback().display(15.0), "15.00 USD");
    }
}
