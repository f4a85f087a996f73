//! Order workflow: statuses, orders, lines, cart, discounts, promo codes, returns

use super::{empty_page, Service};
use crate::contract::{
    AuthContext, CartEntry, CartEntryDraft, Discount, DiscountDraft, Order,
    OrderChildFilter, OrderDetail, OrderDraft, OrderFilter, OrderLine, OrderLineDraft,
    OrderLineUpdate, OrderStatus, OrderUpdate, OwnedFilter, Page, PageRequest, PricedLine,
    PromoCode, PromoCodeDraft, PromoCodeFilter, PromoValidation, Return, ReturnDraft, ShopError,
};
use crate::domain::access::{require_authenticated, require_staff};
use crate::domain::errors::map_storage_error;
use crate::domain::validation::FieldErrors;

const PROMO_UNAVAILABLE: &str = "promo code is inactive or already used";

/// Valid iff the code is active and not yet linked to an order.
/// Start and end dates are informational only.
pub(crate) fn promo_validation(code: &PromoCode) -> PromoValidation {
    if !code.active {
        return PromoValidation::Invalid {
            message: "promo code is inactive".to_string(),
        };
    }
    if code.order_id.is_some() {
        return PromoValidation::Invalid {
            message: "promo code has already been used".to_string(),
        };
    }
    PromoValidation::Valid { rate: code.rate }
}

fn check_label(label: &str) -> Result<(), ShopError> {
    let mut errors = FieldErrors::new();
    errors.require_text("label", label);
    errors.into_result()
}

fn check_rate(rate: rust_decimal::Decimal) -> Result<(), ShopError> {
    let mut errors = FieldErrors::new();
    errors.check_rate("rate", rate);
    errors.into_result()
}

impl Service {
    // ===== Statuses =====

    pub async fn list_statuses(
        &self,
        ctx: &AuthContext,
        page: PageRequest,
    ) -> Result<Page<OrderStatus>, ShopError> {
        require_authenticated(ctx)?;
        self.orders
            .list_statuses(page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_status(&self, ctx: &AuthContext, id: i64) -> Result<OrderStatus, ShopError> {
        require_authenticated(ctx)?;
        self.orders
            .find_status(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("order_status", id))
    }

    pub async fn create_status(
        &self,
        ctx: &AuthContext,
        label: &str,
    ) -> Result<OrderStatus, ShopError> {
        require_staff(ctx)?;
        check_label(label)?;
        self.orders
            .create_status(label)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_status(
        &self,
        ctx: &AuthContext,
        id: i64,
        label: &str,
    ) -> Result<OrderStatus, ShopError> {
        require_staff(ctx)?;
        check_label(label)?;
        self.orders
            .update_status(id, label)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("order_status", id))
    }

    /// Orders with this status keep existing with no status
    pub async fn delete_status(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_staff(ctx)?;
        let deleted = self
            .orders
            .delete_status(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("order_status", id))
    }

    // ===== Orders =====

    pub async fn list_orders(
        &self,
        ctx: &AuthContext,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Page<Order>, ShopError> {
        let Some(customer) = self.scope(ctx).await?.narrow(filter.customer) else {
            return Ok(empty_page(page));
        };
        let filter = OrderFilter { customer, ..filter };
        self.orders
            .list_orders(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn my_orders(
        &self,
        ctx: &AuthContext,
        page: PageRequest,
    ) -> Result<Page<Order>, ShopError> {
        let own = self.my_profile(ctx).await?;
        let filter = OrderFilter {
            customer: Some(own.id),
            ..OrderFilter::default()
        };
        self.orders
            .list_orders(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_order(&self, ctx: &AuthContext, id: i64) -> Result<OrderDetail, ShopError> {
        self.visible_order(ctx, id).await?;
        self.orders
            .order_detail(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("order", id))
    }

    /// Create an order, freezing each line's price from its product
    pub async fn create_order(
        &self,
        ctx: &AuthContext,
        draft: OrderDraft,
    ) -> Result<Order, ShopError> {
        let customer_id = self.resolve_owner(ctx, draft.customer_id).await?;
        let mut lines = Vec::with_capacity(draft.lines.len());
        for (index, line) in draft.lines.iter().enumerate() {
            lines.push(self.price_line(&format!("lines[{index}]"), line).await?);
        }

        let order = self
            .orders
            .create_order(customer_id, &draft, &lines)
            .await
            .map_err(map_storage_error)?;
        tracing::info!(
            order_id = order.id,
            customer_id,
            lines = lines.len(),
            "Order created"
        );
        Ok(order)
    }

    pub async fn update_order(
        &self,
        ctx: &AuthContext,
        id: i64,
        update: OrderUpdate,
    ) -> Result<Order, ShopError> {
        self.visible_order(ctx, id).await?;
        self.orders
            .update_order(id, &update)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("order", id))
    }

    pub async fn delete_order(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        self.visible_order(ctx, id).await?;
        self.orders
            .delete_order(id)
            .await
            .map_err(map_storage_error)?;
        tracing::info!(order_id = id, "Order deleted");
        Ok(())
    }

    /// Order the caller may see; others' orders read as missing
    async fn visible_order(&self, ctx: &AuthContext, id: i64) -> Result<Order, ShopError> {
        let scope = self.scope(ctx).await?;
        self.orders
            .find_order(id)
            .await
            .map_err(map_storage_error)?
            .filter(|order| scope.can_see(order.customer_id))
            .ok_or_else(|| ShopError::not_found("order", id))
    }

    /// Current product price for a new line; the article must be a variant
    /// of the same product
    async fn price_line(
        &self,
        field: &str,
        line: &OrderLineDraft,
    ) -> Result<PricedLine, ShopError> {
        let mut errors = FieldErrors::new();
        errors.check_quantity(&format!("{field}.quantity"), line.quantity);
        errors.into_result()?;

        let product = self
            .catalog
            .find_product(line.product_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::invalid(&format!("{field}.product_id"), "unknown product"))?;

        if let Some(article_id) = line.article_id {
            let article = self
                .catalog
                .find_article(article_id)
                .await
                .map_err(map_storage_error)?;
            if !matches!(article, Some(article) if article.product_id == product.id) {
                return Err(ShopError::invalid(
                    &format!("{field}.article_id"),
                    "article does not belong to the product",
                ));
            }
        }

        Ok(PricedLine {
            product_id: product.id,
            article_id: line.article_id,
            quantity: line.quantity,
            unit_price: product.price,
        })
    }

    // ===== Order lines =====

    pub async fn list_lines(
        &self,
        ctx: &AuthContext,
        filter: OrderChildFilter,
        page: PageRequest,
    ) -> Result<Page<OrderLine>, ShopError> {
        let Some(filter) = self.scoped_child_filter(ctx, filter).await? else {
            return Ok(empty_page(page));
        };
        self.orders
            .list_lines(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_line(&self, ctx: &AuthContext, id: i64) -> Result<OrderLine, ShopError> {
        let line = self
            .orders
            .find_line(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("order_line", id))?;
        self.visible_order(ctx, line.order_id)
            .await
            .map_err(|_| ShopError::not_found("order_line", id))?;
        Ok(line)
    }

    pub async fn create_line(
        &self,
        ctx: &AuthContext,
        order_id: i64,
        line: OrderLineDraft,
    ) -> Result<OrderLine, ShopError> {
        require_staff(ctx)?;
        self.visible_order(ctx, order_id)
            .await
            .map_err(|_| ShopError::invalid("order_id", "unknown order"))?;
        let priced = self.price_line("line", &line).await?;
        self.orders
            .create_line(order_id, &priced)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_line(
        &self,
        ctx: &AuthContext,
        id: i64,
        update: OrderLineUpdate,
    ) -> Result<OrderLine, ShopError> {
        require_staff(ctx)?;
        let current = self.get_line(ctx, id).await?;
        let draft = OrderLineDraft {
            product_id: current.product_id,
            article_id: update.article_id,
            quantity: update.quantity,
        };
        // validates quantity and article ownership; the frozen price is kept
        self.price_line("line", &draft).await?;

        self.orders
            .update_line(id, &update)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("order_line", id))
    }

    pub async fn delete_line(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_staff(ctx)?;
        let deleted = self.orders.delete_line(id).await.map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("order_line", id))
    }

    /// Restrict an order-child filter to what the caller may see
    async fn scoped_child_filter(
        &self,
        ctx: &AuthContext,
        filter: OrderChildFilter,
    ) -> Result<Option<OrderChildFilter>, ShopError> {
        let scope = self.scope(ctx).await?;
        Ok(scope
            .narrow(filter.customer)
            .map(|customer| OrderChildFilter { customer, ..filter }))
    }

    // ===== Cart =====

    pub async fn list_cart(
        &self,
        ctx: &AuthContext,
        filter: OwnedFilter,
        page: PageRequest,
    ) -> Result<Page<CartEntry>, ShopError> {
        let Some(customer) = self.scope(ctx).await?.narrow(filter.customer) else {
            return Ok(empty_page(page));
        };
        let filter = OwnedFilter { customer, ..filter };
        self.orders
            .list_cart(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn my_cart(
        &self,
        ctx: &AuthContext,
        page: PageRequest,
    ) -> Result<Page<CartEntry>, ShopError> {
        let own = self.my_profile(ctx).await?;
        let filter = OwnedFilter {
            customer: Some(own.id),
            product: None,
        };
        self.orders
            .list_cart(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_cart_entry(
        &self,
        ctx: &AuthContext,
        id: i64,
    ) -> Result<CartEntry, ShopError> {
        let scope = self.scope(ctx).await?;
        self.orders
            .find_cart_entry(id)
            .await
            .map_err(map_storage_error)?
            .filter(|entry| scope.can_see(entry.customer_id))
            .ok_or_else(|| ShopError::not_found("cart_entry", id))
    }

    pub async fn create_cart_entry(
        &self,
        ctx: &AuthContext,
        draft: CartEntryDraft,
    ) -> Result<CartEntry, ShopError> {
        let mut errors = FieldErrors::new();
        errors.check_quantity("quantity", draft.quantity);
        errors.into_result()?;

        let customer_id = self.resolve_owner(ctx, draft.customer_id).await?;
        let exists = self
            .orders
            .cart_entry_exists(customer_id, draft.product_id, None)
            .await
            .map_err(map_storage_error)?;
        if exists {
            return Err(ShopError::conflict("product is already in the cart"));
        }

        self.orders
            .create_cart_entry(customer_id, draft.product_id, draft.quantity)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_cart_entry(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: CartEntryDraft,
    ) -> Result<CartEntry, ShopError> {
        let mut errors = FieldErrors::new();
        errors.check_quantity("quantity", draft.quantity);
        errors.into_result()?;

        let current = self.get_cart_entry(ctx, id).await?;
        let customer_id = self
            .resolve_new_owner(ctx, draft.customer_id, current.customer_id)
            .await?;
        let exists = self
            .orders
            .cart_entry_exists(customer_id, draft.product_id, Some(id))
            .await
            .map_err(map_storage_error)?;
        if exists {
            return Err(ShopError::conflict("product is already in the cart"));
        }

        self.orders
            .update_cart_entry(id, customer_id, draft.product_id, draft.quantity)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("cart_entry", id))
    }

    pub async fn delete_cart_entry(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        self.get_cart_entry(ctx, id).await?;
        self.orders
            .delete_cart_entry(id)
            .await
            .map_err(map_storage_error)?;
        Ok(())
    }

    /// Turn selected cart entries into one pending order per customer
    ///
    /// Prices are taken from the products at conversion time. Unknown ids are
    /// skipped. Either every order is created and every entry consumed, or
    /// nothing changes.
    pub async fn convert_carts_to_orders(
        &self,
        ctx: &AuthContext,
        entry_ids: &[i64],
    ) -> Result<usize, ShopError> {
        let staff_id = require_staff(ctx)?;

        let converted = self
            .orders
            .convert_cart(&self.config.pending_status_label, entry_ids)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| {
                ShopError::conflict("cart entries were converted by another request")
            })?;
        if converted.is_empty() {
            tracing::debug!(requested = entry_ids.len(), "No cart entries to convert");
            return Ok(0);
        }

        for (order, batch) in &converted {
            tracing::info!(
                order_id = order.id,
                customer_id = batch.customer_id,
                entries = batch.entry_ids.len(),
                "Cart converted to order"
            );
        }
        tracing::info!(staff_id, orders = converted.len(), "Cart conversion finished");
        Ok(converted.len())
    }

    // ===== Discounts =====

    pub async fn list_discounts(
        &self,
        ctx: &AuthContext,
        filter: OrderChildFilter,
        page: PageRequest,
    ) -> Result<Page<Discount>, ShopError> {
        let Some(filter) = self.scoped_child_filter(ctx, filter).await? else {
            return Ok(empty_page(page));
        };
        self.orders
            .list_discounts(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_discount(&self, ctx: &AuthContext, id: i64) -> Result<Discount, ShopError> {
        let discount = self
            .orders
            .find_discount(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("discount", id))?;
        self.visible_order(ctx, discount.order_id)
            .await
            .map_err(|_| ShopError::not_found("discount", id))?;
        Ok(discount)
    }

    pub async fn create_discount(
        &self,
        ctx: &AuthContext,
        draft: DiscountDraft,
    ) -> Result<Discount, ShopError> {
        require_staff(ctx)?;
        check_rate(draft.rate)?;
        self.orders
            .create_discount(&draft)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_discount(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: DiscountDraft,
    ) -> Result<Discount, ShopError> {
        require_staff(ctx)?;
        check_rate(draft.rate)?;
        self.orders
            .update_discount(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("discount", id))
    }

    pub async fn delete_discount(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_staff(ctx)?;
        let deleted = self
            .orders
            .delete_discount(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("discount", id))
    }

    // ===== Promo codes =====

    pub async fn list_promo_codes(
        &self,
        ctx: &AuthContext,
        filter: PromoCodeFilter,
        page: PageRequest,
    ) -> Result<Page<PromoCode>, ShopError> {
        require_authenticated(ctx)?;
        self.orders
            .list_promo_codes(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_promo_code(&self, ctx: &AuthContext, id: i64) -> Result<PromoCode, ShopError> {
        require_authenticated(ctx)?;
        self.orders
            .find_promo_code(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("promo_code", id))
    }

    pub async fn create_promo_code(
        &self,
        ctx: &AuthContext,
        draft: PromoCodeDraft,
    ) -> Result<PromoCode, ShopError> {
        require_staff(ctx)?;
        check_promo_code(&draft)?;
        self.orders
            .create_promo_code(&draft)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_promo_code(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: PromoCodeDraft,
    ) -> Result<PromoCode, ShopError> {
        require_staff(ctx)?;
        check_promo_code(&draft)?;
        self.orders
            .update_promo_code(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("promo_code", id))
    }

    pub async fn delete_promo_code(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_staff(ctx)?;
        let deleted = self
            .orders
            .delete_promo_code(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("promo_code", id))
    }

    /// Check a promo code without consuming it
    pub async fn validate_promo_code(
        &self,
        ctx: &AuthContext,
        id: i64,
    ) -> Result<PromoValidation, ShopError> {
        let code = self.get_promo_code(ctx, id).await?;
        Ok(promo_validation(&code))
    }

    /// Consume a promo code for an order the caller can see
    pub async fn redeem_promo_code(
        &self,
        ctx: &AuthContext,
        id: i64,
        order_id: i64,
    ) -> Result<(), ShopError> {
        let code = self.get_promo_code(ctx, id).await?;
        self.visible_order(ctx, order_id).await?;
        if !promo_validation(&code).is_valid() {
            return Err(ShopError::conflict(PROMO_UNAVAILABLE));
        }

        let redeemed = self
            .orders
            .redeem_promo_code(id, order_id)
            .await
            .map_err(map_storage_error)?;
        if !redeemed {
            // lost a race with another redemption or a deactivation
            return Err(ShopError::conflict(PROMO_UNAVAILABLE));
        }
        tracing::info!(promo_code_id = id, order_id, "Promo code redeemed");
        Ok(())
    }

    // ===== Returns =====

    pub async fn list_returns(
        &self,
        ctx: &AuthContext,
        filter: OrderChildFilter,
        page: PageRequest,
    ) -> Result<Page<Return>, ShopError> {
        let Some(filter) = self.scoped_child_filter(ctx, filter).await? else {
            return Ok(empty_page(page));
        };
        self.orders
            .list_returns(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_return(&self, ctx: &AuthContext, id: i64) -> Result<Return, ShopError> {
        let found = self
            .orders
            .find_return(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("return", id))?;
        self.visible_order(ctx, found.order_id)
            .await
            .map_err(|_| ShopError::not_found("return", id))?;
        Ok(found)
    }

    pub async fn create_return(
        &self,
        ctx: &AuthContext,
        draft: ReturnDraft,
    ) -> Result<Return, ShopError> {
        self.visible_order(ctx, draft.order_id).await?;
        let created = self
            .orders
            .create_return(&draft)
            .await
            .map_err(map_storage_error)?;
        tracing::info!(return_id = created.id, order_id = draft.order_id, "Return recorded");
        Ok(created)
    }

    pub async fn update_return(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: ReturnDraft,
    ) -> Result<Return, ShopError> {
        self.get_return(ctx, id).await?;
        self.visible_order(ctx, draft.order_id).await?;
        self.orders
            .update_return(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("return", id))
    }

    pub async fn delete_return(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        self.get_return(ctx, id).await?;
        self.orders
            .delete_return(id)
            .await
            .map_err(map_storage_error)?;
        Ok(())
    }
}

fn check_promo_code(draft: &PromoCodeDraft) -> Result<(), ShopError> {
    let mut errors = FieldErrors::new();
    errors.require_text("code", &draft.code);
    errors.check_rate("rate", draft.rate);
    if let (Some(start), Some(end)) = (draft.start_date, draft.end_date) {
        if end < start {
            errors.add("end_date", "must not be before start_date");
        }
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::CartBatch;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn code(active: bool, order_id: Option<i64>) -> PromoCode {
        PromoCode {
            id: 1,
            code: "BIENVENUE10".to_string(),
            rate: Decimal::new(10, 0),
            order_id,
            start_date: None,
            end_date: None,
            active,
        }
    }

    fn entry(id: i64, customer_id: i64, product_id: i64, price: i64) -> CartEntry {
        CartEntry {
            id,
            customer_id,
            product_id,
            quantity: 1,
            added_at: Utc::now(),
            unit_price: Decimal::new(price, 0),
        }
    }

    #[test]
    fn active_unused_code_is_valid() {
        assert_eq!(
            promo_validation(&code(true, None)),
            PromoValidation::Valid {
                rate: Decimal::new(10, 0)
            }
        );
    }

    #[test]
    fn inactive_or_used_code_is_invalid() {
        assert!(!promo_validation(&code(false, None)).is_valid());
        assert!(!promo_validation(&code(true, Some(3))).is_valid());
    }

    #[test]
    fn past_end_date_does_not_invalidate() {
        let mut expired = code(true, None);
        expired.end_date = chrono::NaiveDate::from_ymd_opt(2000, 1, 1);
        assert!(promo_validation(&expired).is_valid());
    }

    #[test]
    fn entries_group_by_customer_in_order() {
        let batches = CartBatch::group_by_customer(vec![
            entry(10, 2, 100, 50),
            entry(11, 1, 101, 30),
            entry(12, 2, 102, 20),
        ]);

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].customer_id, 1);
        assert_eq!(batches[0].entry_ids, vec![11]);
        assert_eq!(batches[1].customer_id, 2);
        assert_eq!(batches[1].entry_ids, vec![10, 12]);
        assert_eq!(batches[1].lines[1].unit_price, Decimal::new(20, 0));
        assert!(batches[1].lines.iter().all(|line| line.article_id.is_none()));
    }
}
