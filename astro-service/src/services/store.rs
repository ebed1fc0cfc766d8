//! Order storage.
//!
//! Orders live for the lifetime of the process. Each mutation happens under
//! the map's per-entry lock, so a status change or content attachment is
//! never torn; two concurrent result fetches may still both run the
//! generator, but only the first result is stored.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;
use std::cmp::Reverse;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AstroError;
use crate::models::{ContentRequest, GeneratedContent, Order};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Open a pending order priced from the service table.
    async fn create(
        &self,
        user_id: String,
        request: ContentRequest,
        service_data: Value,
    ) -> Result<Order, AstroError>;

    async fn get(&self, id: Uuid) -> Result<Order, AstroError>;

    /// Move a pending order to paid. Unknown ids and non-pending orders are
    /// left alone and yield `false`.
    async fn mark_paid(&self, id: Uuid) -> bool;

    /// Orders of one user, newest first.
    async fn list_by_user(&self, user_id: &str) -> Vec<Order>;

    /// Attach content to an order; the first attachment wins.
    async fn attach_content(
        &self,
        id: Uuid,
        content: GeneratedContent,
    ) -> Result<Order, AstroError>;

    async fn count(&self) -> usize;
}

#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<DashMap<Uuid, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(
        &self,
        user_id: String,
        request: ContentRequest,
        service_data: Value,
    ) -> Result<Order, AstroError> {
        let order = Order::new(user_id, request, service_data)?;
        self.orders.insert(order.id, order.clone());

        tracing::debug!(
            order_id = %order.id,
            user_id = %order.user_id,
            service_type = %order.service_type,
            "Order stored"
        );
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> Result<Order, AstroError> {
        self.orders
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(AstroError::OrderNotFound)
    }

    async fn mark_paid(&self, id: Uuid) -> bool {
        match self.orders.get_mut(&id) {
            Some(mut entry) => entry.mark_paid(Utc::now()),
            None => false,
        }
    }

    async fn list_by_user(&self, user_id: &str) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        orders.sort_by_key(|order| Reverse(order.created_at));
        orders
    }

    async fn attach_content(
        &self,
        id: Uuid,
        content: GeneratedContent,
    ) -> Result<Order, AstroError> {
        let mut entry = self.orders.get_mut(&id).ok_or(AstroError::OrderNotFound)?;
        entry.attach_content(content, Utc::now());
        Ok(entry.value().clone())
    }

    async fn count(&self) -> usize {
        self.orders.len()
    }
}
