//! Order endpoints: invoice creation, lookups and the paid result.

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::dtos::{
    CreateInvoiceRequest, CreateInvoiceResponse, OrderResponse, ServiceResultResponse,
    UserOrdersResponse,
};
use crate::error::AstroError;
use crate::models::{ContentRequest, ServiceType};
use crate::startup::AppState;

/// Malformed ids cannot name an order, so they are reported as not found.
fn parse_order_id(raw: &str) -> Result<Uuid, AstroError> {
    Uuid::parse_str(raw).map_err(|_| AstroError::OrderNotFound)
}

pub async fn create_invoice(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateInvoiceRequest>, AppError>,
) -> Result<Json<CreateInvoiceResponse>, AppError> {
    payload.validate()?;

    let (user_id, service_type) = match (
        payload.user_id.filter(|id| !id.trim().is_empty()),
        payload.service_type.filter(|s| !s.trim().is_empty()),
    ) {
        (Some(user_id), Some(service_type)) => (user_id, service_type),
        _ => return Err(AstroError::missing("Missing required parameters").into()),
    };

    let service_type: ServiceType = service_type.parse()?;
    if service_type.price().is_none() {
        return Err(AstroError::UnknownServiceType(service_type.to_string()).into());
    }
    let request = ContentRequest::from_service_data(service_type, &payload.service_data)?;

    let order = state
        .orders
        .create(user_id, request, payload.service_data)
        .await?;

    tracing::info!(
        order_id = %order.id,
        user_id = %order.user_id,
        service_type = %order.service_type,
        amount = order.amount,
        "Invoice created"
    );

    Ok(Json(CreateInvoiceResponse {
        success: true,
        order_id: order.id,
        invoice_link: state.bot.invoice_link(order.id),
        amount: order.amount,
    }))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state.orders.get(parse_order_id(&order_id)?).await?;
    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

pub async fn user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<UserOrdersResponse> {
    let orders = state.orders.list_by_user(&user_id).await;
    Json(UserOrdersResponse {
        success: true,
        orders,
    })
}

/// Return the reading for a paid order, generating it on first access.
pub async fn service_result(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<ServiceResultResponse>, AppError> {
    let order = state.orders.get(parse_order_id(&order_id)?).await?;

    if !order.status.is_paid() {
        tracing::info!(order_id = %order.id, status = %order.status, "Result requested for unpaid order");
        return Err(AstroError::PaymentRequired(order.id).into());
    }

    let order = if order.content().is_some() {
        order
    } else {
        let content = state.generator.generate(&order.request).await;
        state.orders.attach_content(order.id, content).await?
    };

    let content = order.content().ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!("order {} has no content after generation", order.id))
    })?;

    tracing::info!(
        order_id = %order.id,
        source = content.source.as_str(),
        "Service result delivered"
    );

    Ok(Json(ServiceResultResponse {
        success: true,
        order_id: order.id,
        service_type: order.service_type,
        service_data: order.service_data,
        content: content.text,
        source: content.source,
        paid_at: order.paid_at,
        completed_at: order.completed_at,
    }))
}
