use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use super::service::{ContentRequest, ServiceType};
use crate::error::AstroError;

/// Order lifecycle: `pending -> paid -> completed`, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Completed,
}

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Paid) | (OrderStatus::Paid, OrderStatus::Completed)
        )
    }

    /// Result access is gated on payment.
    pub fn is_paid(self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Paid => write!(f, "paid"),
            OrderStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Where a piece of content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Generated,
    Fallback,
}

impl ContentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentSource::Generated => "generated",
            ContentSource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedContent {
    pub text: String,
    pub source: ContentSource,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: String,
    pub service_type: ServiceType,
    pub service_data: Value,
    pub amount: u32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_source: Option<ContentSource>,
    #[serde(skip)]
    pub request: ContentRequest,
}

impl Order {
    /// Open a pending order. Fails for services without a price.
    pub fn new(
        user_id: String,
        request: ContentRequest,
        service_data: Value,
    ) -> Result<Self, AstroError> {
        let service_type = request.service_type();
        let amount = service_type
            .price()
            .ok_or_else(|| AstroError::UnknownServiceType(service_type.to_string()))?;

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            service_type,
            service_data,
            amount,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            paid_at: None,
            completed_at: None,
            service_content: None,
            content_source: None,
            request,
        })
    }

    /// Returns false when the order was not pending.
    pub fn mark_paid(&mut self, at: DateTime<Utc>) -> bool {
        if !self.status.can_transition_to(OrderStatus::Paid) {
            return false;
        }
        self.status = OrderStatus::Paid;
        self.paid_at = Some(at);
        true
    }

    /// Store generated content unless some is already stored; the stored
    /// content is returned either way.
    pub fn attach_content(&mut self, content: GeneratedContent, at: DateTime<Utc>) -> GeneratedContent {
        if let (Some(text), Some(source)) = (&self.service_content, self.content_source) {
            return GeneratedContent {
                text: text.clone(),
                source,
            };
        }

        self.service_content = Some(content.text.clone());
        self.content_source = Some(content.source);
        if self.status.can_transition_to(OrderStatus::Completed) {
            self.status = OrderStatus::Completed;
            self.completed_at = Some(at);
        }
        content
    }

    pub fn content(&self) -> Option<GeneratedContent> {
        match (&self.service_content, self.content_source) {
            (Some(text), Some(source)) => Some(GeneratedContent {
                text: text.clone(),
                source,
            }),
            _ => None,
        }
    }
}
