//! Native client trait for inter-module communication
//!
//! Exposes the order workflow to in-process callers (back-office jobs,
//! other modules) without going through HTTP.

use super::{
    error::ShopError,
    model::{AuthContext, CartEntry, Order, OrderDetail, PromoValidation},
};
use async_trait::async_trait;

/// Order workflow API for inter-module communication
#[async_trait]
pub trait OrderWorkflowApi: Send + Sync {
    /// Check whether a promo code can still be used
    async fn validate_promo_code(
        &self,
        ctx: &AuthContext,
        promo_code_id: i64,
    ) -> Result<PromoValidation, ShopError>;

    /// Link a promo code to an order, consuming it
    async fn redeem_promo_code(
        &self,
        ctx: &AuthContext,
        promo_code_id: i64,
        order_id: i64,
    ) -> Result<(), ShopError>;

    /// Turn the selected cart entries into one order per customer
    async fn convert_carts_to_orders(
        &self,
        ctx: &AuthContext,
        entry_ids: &[i64],
    ) -> Result<usize, ShopError>;

    /// Cart entries of the calling customer
    async fn my_cart(&self, ctx: &AuthContext) -> Result<Vec<CartEntry>, ShopError>;

    /// Orders of the calling customer
    async fn my_orders(&self, ctx: &AuthContext) -> Result<Vec<Order>, ShopError>;

    /// Full order view with lines and adjustments
    async fn order_detail(&self, ctx: &AuthContext, order_id: i64)
        -> Result<OrderDetail, ShopError>;
}
