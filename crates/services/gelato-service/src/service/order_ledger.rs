//! Order ledger - placing, browsing and removing orders.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::validation::{require_non_empty_string, require_non_empty_strings, require_non_negative};
use domain::{
    Confirmation, DomainError, Input, NewOrder, Order, FIELD_FLAVORS, FIELD_ID, FIELD_SIZE,
    FIELD_TOTAL_PRICE, FIELD_TYPE, MSG_ORDER_DELETED,
};

use super::gate::AuthorizationGate;
use crate::repository::Repository;

/// Order ledger trait for dependency injection.
#[async_trait]
pub trait OrderLedger: Send + Sync {
    /// Place an order for the caller
    async fn add_order(
        &self,
        token: &Input,
        flavors: &Input,
        size: &Input,
        order_type: &Input,
        total_price: &Input,
    ) -> AppResult<Order>;

    /// The caller's orders, oldest first
    async fn list_by_user(&self, token: &Input) -> AppResult<Vec<Order>>;

    /// A single order by id, wrapped in a one-element list
    async fn retrieve_one(&self, order_id: &Input) -> AppResult<Vec<Order>>;

    /// Delete an order the caller owns
    async fn remove_one(&self, token: &Input, order_id: &Input) -> AppResult<Confirmation>;

    /// Every order in the system; elevated callers only
    async fn list_all(&self, token: &Input) -> AppResult<Vec<Order>>;
}

/// Concrete implementation of OrderLedger using repository.
pub struct OrderBook {
    repo: Arc<dyn Repository>,
    gate: Arc<AuthorizationGate>,
}

impl OrderBook {
    pub fn new(repo: Arc<dyn Repository>, gate: Arc<AuthorizationGate>) -> Self {
        Self { repo, gate }
    }

    /// Look an order up by its raw id; anything unparsable is simply unknown.
    async fn find_order(&self, raw_id: &str) -> AppResult<Order> {
        let not_found = || DomainError::not_found("order", raw_id);

        let id = Uuid::parse_str(raw_id).map_err(|_| not_found())?;
        self.repo
            .find_order_by_id(id)
            .await?
            .ok_or_else(|| not_found().into())
    }
}

#[async_trait]
impl OrderLedger for OrderBook {
    async fn add_order(
        &self,
        token: &Input,
        flavors: &Input,
        size: &Input,
        order_type: &Input,
        total_price: &Input,
    ) -> AppResult<Order> {
        AuthorizationGate::token_shape(token)?;
        let flavors = require_non_empty_strings(FIELD_FLAVORS, flavors)?;
        let size = require_non_empty_string(FIELD_SIZE, size)?;
        let order_type = require_non_empty_string(FIELD_TYPE, order_type)?;
        let total_price = require_non_negative(FIELD_TOTAL_PRICE, total_price)?;

        let identity = self.gate.resolve_identity(token).await?;

        let order = self
            .repo
            .insert_order(NewOrder {
                owner_id: identity.user_id,
                order_type: order_type.to_string(),
                size: size.to_string(),
                flavors,
                total_price,
            })
            .await?;

        tracing::info!(order_id = %order.id, user_id = %identity.user_id, "Order placed");
        Ok(order)
    }

    async fn list_by_user(&self, token: &Input) -> AppResult<Vec<Order>> {
        let identity = self.gate.resolve_identity(token).await?;
        let orders = self.repo.find_orders_by_owner(identity.user_id).await?;

        tracing::debug!(user_id = %identity.user_id, count = orders.len(), "Orders listed");
        Ok(orders)
    }

    async fn retrieve_one(&self, order_id: &Input) -> AppResult<Vec<Order>> {
        let raw_id = require_non_empty_string(FIELD_ID, order_id)?;
        let order = self.find_order(raw_id).await?;

        tracing::debug!(order_id = %order.id, "Order retrieved");
        Ok(vec![order])
    }

    async fn remove_one(&self, token: &Input, order_id: &Input) -> AppResult<Confirmation> {
        AuthorizationGate::token_shape(token)?;
        let raw_id = require_non_empty_string(FIELD_ID, order_id)?;

        let identity = self.gate.resolve_identity(token).await?;
        let order = self.find_order(raw_id).await?;
        AuthorizationGate::authorize_ownership(&identity, order.owner_id)?;

        self.repo.delete_order(order.id).await?;

        tracing::info!(order_id = %order.id, user_id = %identity.user_id, "Order deleted");
        Ok(Confirmation::new(MSG_ORDER_DELETED))
    }

    async fn list_all(&self, token: &Input) -> AppResult<Vec<Order>> {
        let identity = self.gate.resolve_identity(token).await?;
        AuthorizationGate::authorize_elevated(&identity)?;

        self.repo.find_all_orders().await
    }
}
