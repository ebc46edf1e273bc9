//! Booking Backend Client
//!
//! Catalog and order collaborators used by the wizard, plus an HTTP
//! implementation of both on top of reqwest.

use crate::catalog::{Accommodation, Activity, Catalog, CatalogId, Destination, TransportOption};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::pricing::PricingBreakdown;
use crate::selection::PackageSelection;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Body of the order-creation request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub selection: PackageSelection,
    pub pricing: PricingBreakdown,
    pub currency: String,
}

/// Opaque booking confirmation returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingConfirmation {
    /// Booking reference, when the backend supplies one
    pub booking_id: Option<String>,

    /// The confirmation body as received
    pub raw: serde_json::Value,
}

impl BookingConfirmation {
    /// Wrap a confirmation body, pulling out `bookingId` or `id` if present
    pub fn from_value(raw: serde_json::Value) -> Self {
        let booking_id = ["bookingId", "booking_id", "id"]
            .iter()
            .find_map(|key| raw.get(*key))
            .and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            });

        Self { booking_id, raw }
    }

    pub fn reference(&self) -> &str {
        self.booking_id.as_deref().unwrap_or("(no reference)")
    }
}

/// Error payload the backend sends with non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: String,
}

/// Source of catalog lists
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn destinations(&self) -> Result<Vec<Destination>, ApiError>;

    async fn accommodations(
        &self,
        destination: Option<&CatalogId>,
    ) -> Result<Vec<Accommodation>, ApiError>;

    async fn transport_options(&self) -> Result<Vec<TransportOption>, ApiError>;

    async fn activities(&self, destination: Option<&CatalogId>) -> Result<Vec<Activity>, ApiError>;

    /// Fetch every list, one request after another
    async fn load_catalog(&self, destination: Option<&CatalogId>) -> Result<Catalog, ApiError> {
        let destinations = self.destinations().await?;
        let accommodations = self.accommodations(destination).await?;
        let transport_options = self.transport_options().await?;
        let activities = self.activities(destination).await?;

        Ok(Catalog {
            destinations,
            accommodations,
            transport_options,
            activities,
        })
    }
}

/// Order-creation collaborator
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn create_order(&self, order: &OrderRequest) -> Result<BookingConfirmation, ApiError>;
}

/// reqwest-backed client for the booking REST API
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("tripwise/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        destination: Option<&CatalogId>,
    ) -> Result<Vec<T>, ApiError> {
        let mut request = self.http.get(self.url(path));
        if let Some(id) = destination {
            request = request.query(&[("destinationId", id.as_str())]);
        }

        debug!("GET {}", path);
        let response = request.send().await?;
        let body = read_success_body(response).await?;
        parse_json(&body)
    }
}

#[async_trait]
impl CatalogService for HttpBackend {
    async fn destinations(&self) -> Result<Vec<Destination>, ApiError> {
        self.get_list("destinations", None).await
    }

    async fn accommodations(
        &self,
        destination: Option<&CatalogId>,
    ) -> Result<Vec<Accommodation>, ApiError> {
        self.get_list("accommodations", destination).await
    }

    async fn transport_options(&self) -> Result<Vec<TransportOption>, ApiError> {
        self.get_list("transport-options", None).await
    }

    async fn activities(&self, destination: Option<&CatalogId>) -> Result<Vec<Activity>, ApiError> {
        self.get_list("activities", destination).await
    }
}

#[async_trait]
impl OrderService for HttpBackend {
    async fn create_order(&self, order: &OrderRequest) -> Result<BookingConfirmation, ApiError> {
        info!("Submitting order: total {} {}", order.pricing.total, order.currency);

        let response = self.http.post(self.url("orders")).json(order).send().await?;
        let body = read_success_body(response).await?;
        parse_confirmation(&body)
    }
}

/// Read a response body, turning non-success statuses into `Rejected`
async fn read_success_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(rejection(status.as_u16(), &body))
    }
}

/// Build a rejection from an error payload, falling back to the raw body
fn rejection(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorPayload>(body)
        .map(|p| p.message)
        .unwrap_or_else(|_| body.chars().take(200).collect());

    ApiError::Rejected { status, message }
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

/// A confirmation must be a JSON object
fn parse_confirmation(body: &str) -> Result<BookingConfirmation, ApiError> {
    let value: serde_json::Value = parse_json(body)?;
    if !value.is_object() {
        return Err(ApiError::MalformedResponse(format!(
            "expected a confirmation object, got: {}",
            body.chars().take(200).collect::<String>()
        )));
    }
    Ok(BookingConfirmation::from_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_reference() {
        let confirmation = parse_confirmation(r#"{"bookingId": "TW-2041", "status": "ok"}"#).unwrap();
        assert_eq!(confirmation.reference(), "TW-2041");

        let confirmation = parse_confirmation(r#"{"id": 77}"#).unwrap();
        assert_eq!(confirmation.booking_id.as_deref(), Some("77"));

        let confirmation = parse_confirmation(r#"{"ok": true}"#).unwrap();
        assert_eq!(confirmation.reference(), "(no reference)");
    }

    #[test]
    fn test_malformed_confirmation() {
        assert!(matches!(
            parse_confirmation("<html>oops</html>"),
            Err(ApiError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_confirmation("[1, 2]"),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_rejection_uses_error_payload() {
        match rejection(422, r#"{"message": "Flight sold out"}"#) {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Flight sold out");
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }

        match rejection(502, "Bad Gateway") {
            ApiError::Rejected { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_url_joining() {
        let backend = HttpBackend::new(&ApiConfig {
            base_url: "http://localhost:3000/api/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(backend.url("orders"), "http://localhost:3000/api/orders");
    }
}
