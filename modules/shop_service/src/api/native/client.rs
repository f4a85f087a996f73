//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    AuthContext, CartEntry, Order, OrderDetail, OrderWorkflowApi, Page, PageRequest,
    PromoValidation, ShopError,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Native client that calls the domain service directly
///
/// Used by back-office jobs and other modules that run in the same process.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }

    /// Walk every page of a paginated listing
    async fn collect_all<T, F, Fut>(&self, mut fetch: F) -> Result<Vec<T>, ShopError>
    where
        F: FnMut(PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<T>, ShopError>>,
    {
        let page_size = self.service.config().max_page_size;
        let mut items = Vec::new();
        let mut page_number = 1;
        loop {
            let page = fetch(PageRequest::new(page_number, page_size)).await?;
            let total = page.total;
            let fetched = page.items.len();
            items.extend(page.items);
            if fetched == 0 || items.len() as u64 >= total {
                return Ok(items);
            }
            page_number += 1;
        }
    }
}

#[async_trait]
impl OrderWorkflowApi for NativeClient {
    async fn validate_promo_code(
        &self,
        ctx: &AuthContext,
        promo_code_id: i64,
    ) -> Result<PromoValidation, ShopError> {
        self.service.validate_promo_code(ctx, promo_code_id).await
    }

    async fn redeem_promo_code(
        &self,
        ctx: &AuthContext,
        promo_code_id: i64,
        order_id: i64,
    ) -> Result<(), ShopError> {
        self.service
            .redeem_promo_code(ctx, promo_code_id, order_id)
            .await
    }

    async fn convert_carts_to_orders(
        &self,
        ctx: &AuthContext,
        entry_ids: &[i64],
    ) -> Result<usize, ShopError> {
        self.service.convert_carts_to_orders(ctx, entry_ids).await
    }

    async fn my_cart(&self, ctx: &AuthContext) -> Result<Vec<CartEntry>, ShopError> {
        let service = &self.service;
        self.collect_all(move |page| service.my_cart(ctx, page))
            .await
    }

    async fn my_orders(&self, ctx: &AuthContext) -> Result<Vec<Order>, ShopError> {
        let service = &self.service;
        self.collect_all(move |page| service.my_orders(ctx, page))
            .await
    }

    async fn order_detail(
        &self,
        ctx: &AuthContext,
        order_id: i64,
    ) -> Result<OrderDetail, ShopError> {
        self.service.get_order(ctx, order_id).await
    }
}
