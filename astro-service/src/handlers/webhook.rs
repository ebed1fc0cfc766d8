//! Payment webhook.
//!
//! The caller is trusted and always told `success: true`; unknown or
//! malformed order ids are logged and ignored.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use uuid::Uuid;

use crate::dtos::{PaymentWebhookRequest, SuccessResponse};
use crate::startup::AppState;

pub async fn payment_webhook(
    State(state): State<AppState>,
    payload: Result<Json<PaymentWebhookRequest>, JsonRejection>,
) -> Json<SuccessResponse> {
    let order_id = match payload {
        Ok(Json(body)) => body.order_id,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Ignoring malformed payment webhook");
            None
        }
    };

    match order_id.as_deref().map(Uuid::parse_str) {
        Some(Ok(id)) => {
            if state.orders.mark_paid(id).await {
                tracing::info!(order_id = %id, "Order marked as paid");
            } else {
                tracing::warn!(order_id = %id, "Payment webhook for unknown or already paid order");
            }
        }
        Some(Err(_)) => {
            tracing::warn!(order_id = ?order_id, "Payment webhook with malformed order id");
        }
        None => {
            tracing::warn!("Payment webhook without order id");
        }
    }

    Json(SuccessResponse { success: true })
}
