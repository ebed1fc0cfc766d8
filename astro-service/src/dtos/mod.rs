//! Request and response bodies of the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::models::{ContentSource, Order, ServiceType};

/// Accept ids sent either as JSON strings or numbers (chat platforms use numeric user ids).
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    #[validate(length(max = 128, message = "user_id is too long"))]
    pub user_id: Option<String>,
    #[validate(length(max = 64, message = "service_type is too long"))]
    pub service_type: Option<String>,
    #[serde(default)]
    pub service_data: Value,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
    pub success: bool,
    pub order_id: Uuid,
    pub invoice_link: String,
    pub amount: u32,
}

#[derive(Debug, Deserialize)]
pub struct HoroscopeRequest {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<String>,
    pub zodiac_sign: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompatibilityRequest {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<String>,
    pub first_sign: Option<String>,
    pub second_sign: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TarotRequest {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<String>,
    pub spread_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NatalChartRequest {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<String>,
    pub birth_data: Option<BirthDataBody>,
}

#[derive(Debug, Deserialize)]
pub struct BirthDataBody {
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub success: bool,
    pub content: String,
    pub source: ContentSource,
}

#[derive(Debug, Serialize)]
pub struct ServiceResultResponse {
    pub success: bool,
    pub order_id: Uuid,
    pub service_type: ServiceType,
    pub service_data: Value,
    pub content: String,
    pub source: ContentSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentWebhookRequest {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub order_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct UserOrdersResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub services: Vec<ServiceType>,
    pub generator: &'static str,
    pub bot_configured: bool,
    pub orders: usize,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub endpoints: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_user_ids_are_accepted() {
        let request: CreateInvoiceRequest =
            serde_json::from_value(json!({ "user_id": 123456789, "service_type": "tarot" }))
                .unwrap();
        assert_eq!(request.user_id.as_deref(), Some("123456789"));
        assert_eq!(request.service_data, Value::Null);
    }

    #[test]
    fn missing_fields_deserialize_to_none() {
        let request: CompatibilityRequest =
            serde_json::from_value(json!({ "first_sign": "Leo" })).unwrap();
        assert_eq!(request.first_sign.as_deref(), Some("Leo"));
        assert!(request.second_sign.is_none());
        assert!(request.user_id.is_none());
    }

    #[test]
    fn oversized_user_id_fails_validation() {
        let request: CreateInvoiceRequest = serde_json::from_value(json!({
            "user_id": "u".repeat(200),
            "service_type": "tarot"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }
}
