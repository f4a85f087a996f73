use super::{delete_row, fetch_page, fetch_page_two, icontains, pair_exists};
use crate::contract::{
    CartBatch, CartEntry, Discount, DiscountDraft, Order, OrderChildFilter, OrderDetail,
    OrderDraft, OrderFilter, OrderLine, OrderLineUpdate, OrderSortField, OrderStatus, OrderUpdate,
    OwnedFilter, Page, PageRequest, PricedLine, PromoCode, PromoCodeDraft, PromoCodeFilter,
    Return, ReturnDraft,
};
use crate::domain::repository::OrderRepository;
use crate::infra::storage::{
    entity::{
        catalog::product,
        order::{cart_entry, discount, order, order_line, order_return, order_status, promo_code},
    },
    mapper,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Query, SelectStatement},
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, Order as SortOrder, QueryFilter, QueryOrder, TransactionTrait,
};
use std::sync::Arc;

pub struct SeaOrmOrderRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Ids of the orders placed by one customer
fn orders_of(customer_id: i64) -> SelectStatement {
    Query::select()
        .column(order::Column::Id)
        .from(order::Entity)
        .and_where(order::Column::CustomerId.eq(customer_id))
        .to_owned()
}

fn priced(row: (cart_entry::Model, Option<product::Model>)) -> Result<CartEntry> {
    let (entry, product) = row;
    let product =
        product.ok_or_else(|| anyhow!("cart entry {} has no product", entry.id))?;
    Ok(mapper::cart_entry(entry, product.price))
}

async fn load_cart_entry<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<CartEntry>> {
    cart_entry::Entity::find_by_id(id)
        .find_also_related(product::Entity)
        .one(db)
        .await?
        .map(priced)
        .transpose()
}

async fn insert_line<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
    line: &PricedLine,
) -> Result<order_line::Model> {
    let row = order_line::ActiveModel {
        order_id: Set(order_id),
        product_id: Set(line.product_id),
        article_id: Set(line.article_id),
        quantity: Set(line.quantity),
        unit_price: Set(line.unit_price),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(row)
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    // ===== Statuses =====

    async fn list_statuses(&self, page: PageRequest) -> Result<Page<OrderStatus>> {
        let select = order_status::Entity::find().order_by_asc(order_status::Column::Id);
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_status(&self, id: i64) -> Result<Option<OrderStatus>> {
        let row = order_status::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_status(&self, label: &str) -> Result<OrderStatus> {
        let active = order_status::ActiveModel {
            label: Set(label.to_string()),
            ..Default::default()
        };
        let row = order_status::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_status(&self, id: i64, label: &str) -> Result<Option<OrderStatus>> {
        let Some(row) = order_status::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: order_status::ActiveModel = row.into();
        active.label = Set(label.to_string());
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_status(&self, id: i64) -> Result<bool> {
        delete_row::<order_status::Entity, _>(&*self.db, id).await
    }

    // ===== Orders =====

    async fn list_orders(&self, filter: &OrderFilter, page: PageRequest) -> Result<Page<Order>> {
        let mut select = order::Entity::find();
        if let Some(customer_id) = filter.customer {
            select = select.filter(order::Column::CustomerId.eq(customer_id));
        }
        if let Some(status_id) = filter.status {
            select = select.filter(order::Column::StatusId.eq(status_id));
        }
        if let Some(date) = filter.order_date {
            select = select.filter(order::Column::OrderDate.eq(date));
        }

        select = match filter.sort {
            Some(sort) => {
                let column = match sort.field {
                    OrderSortField::OrderDate => order::Column::OrderDate,
                    OrderSortField::CreatedAt => order::Column::CreatedAt,
                    OrderSortField::UpdatedAt => order::Column::UpdatedAt,
                };
                let direction = if sort.descending {
                    SortOrder::Desc
                } else {
                    SortOrder::Asc
                };
                select.order_by(column, direction)
            }
            // newest first
            None => select.order_by_desc(order::Column::CreatedAt),
        }
        .order_by_desc(order::Column::Id);

        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_order(&self, id: i64) -> Result<Option<Order>> {
        let row = order::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn order_detail(&self, id: i64) -> Result<Option<OrderDetail>> {
        let Some(row) = order::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let status = match row.status_id {
            Some(status_id) => order_status::Entity::find_by_id(status_id)
                .one(&*self.db)
                .await?
                .map(Into::into),
            None => None,
        };
        let lines = order_line::Entity::find()
            .filter(order_line::Column::OrderId.eq(id))
            .order_by_asc(order_line::Column::Id)
            .all(&*self.db)
            .await?;
        let discounts = discount::Entity::find()
            .filter(discount::Column::OrderId.eq(id))
            .order_by_asc(discount::Column::Id)
            .all(&*self.db)
            .await?;
        let promo_codes = promo_code::Entity::find()
            .filter(promo_code::Column::OrderId.eq(id))
            .order_by_asc(promo_code::Column::Id)
            .all(&*self.db)
            .await?;
        let returns = order_return::Entity::find()
            .filter(order_return::Column::OrderId.eq(id))
            .order_by_asc(order_return::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(Some(OrderDetail {
            order: row.into(),
            status,
            lines: lines.into_iter().map(Into::into).collect(),
            discounts: discounts.into_iter().map(Into::into).collect(),
            promo_codes: promo_codes.into_iter().map(Into::into).collect(),
            returns: returns.into_iter().map(Into::into).collect(),
        }))
    }

    async fn create_order(
        &self,
        customer_id: i64,
        draft: &OrderDraft,
        lines: &[PricedLine],
    ) -> Result<Order> {
        let txn = self.db.begin().await?;

        let now = Utc::now();
        let row = order::ActiveModel {
            customer_id: Set(customer_id),
            order_date: Set(now.date_naive()),
            address: Set(draft.address.clone()),
            region: Set(draft.region.clone()),
            status_id: Set(draft.status_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        for line in lines {
            insert_line(&txn, row.id, line).await?;
        }

        txn.commit().await?;
        Ok(row.into())
    }

    async fn update_order(&self, id: i64, update: &OrderUpdate) -> Result<Option<Order>> {
        let Some(row) = order::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: order::ActiveModel = row.into();
        active.address = Set(update.address.clone());
        active.region = Set(update.region.clone());
        active.status_id = Set(update.status_id);
        active.updated_at = Set(Utc::now());
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_order(&self, id: i64) -> Result<bool> {
        delete_row::<order::Entity, _>(&*self.db, id).await
    }

    // ===== Lines =====

    async fn list_lines(
        &self,
        filter: &OrderChildFilter,
        page: PageRequest,
    ) -> Result<Page<OrderLine>> {
        let mut select = order_line::Entity::find().order_by_asc(order_line::Column::Id);
        if let Some(order_id) = filter.order {
            select = select.filter(order_line::Column::OrderId.eq(order_id));
        }
        if let Some(customer_id) = filter.customer {
            select = select.filter(order_line::Column::OrderId.in_subquery(orders_of(customer_id)));
        }
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_line(&self, id: i64) -> Result<Option<OrderLine>> {
        let row = order_line::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_line(&self, order_id: i64, line: &PricedLine) -> Result<OrderLine> {
        Ok(insert_line(&*self.db, order_id, line).await?.into())
    }

    async fn update_line(&self, id: i64, update: &OrderLineUpdate) -> Result<Option<OrderLine>> {
        let Some(row) = order_line::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: order_line::ActiveModel = row.into();
        active.article_id = Set(update.article_id);
        active.quantity = Set(update.quantity);
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_line(&self, id: i64) -> Result<bool> {
        delete_row::<order_line::Entity, _>(&*self.db, id).await
    }

    // ===== Cart =====

    async fn list_cart(&self, filter: &OwnedFilter, page: PageRequest) -> Result<Page<CartEntry>> {
        let mut select = cart_entry::Entity::find()
            .find_also_related(product::Entity)
            .order_by_desc(cart_entry::Column::AddedAt)
            .order_by_desc(cart_entry::Column::Id);
        if let Some(customer_id) = filter.customer {
            select = select.filter(cart_entry::Column::CustomerId.eq(customer_id));
        }
        if let Some(product_id) = filter.product {
            select = select.filter(cart_entry::Column::ProductId.eq(product_id));
        }
        fetch_page_two(&*self.db, select, page).await?.try_map(priced)
    }

    async fn find_cart_entry(&self, id: i64) -> Result<Option<CartEntry>> {
        load_cart_entry(&*self.db, id).await
    }

    async fn cart_entry_exists(
        &self,
        customer_id: i64,
        product_id: i64,
        except: Option<i64>,
    ) -> Result<bool> {
        pair_exists::<cart_entry::Entity, _>(
            &*self.db,
            cart_entry::Column::CustomerId,
            cart_entry::Column::ProductId,
            cart_entry::Column::Id,
            customer_id,
            product_id,
            except,
        )
        .await
    }

    async fn create_cart_entry(
        &self,
        customer_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> Result<CartEntry> {
        let row = cart_entry::ActiveModel {
            customer_id: Set(customer_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            added_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        load_cart_entry(&*self.db, row.id)
            .await?
            .ok_or_else(|| anyhow!("cart entry {} vanished after insert", row.id))
    }

    async fn update_cart_entry(
        &self,
        id: i64,
        customer_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> Result<Option<CartEntry>> {
        let Some(row) = cart_entry::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: cart_entry::ActiveModel = row.into();
        active.customer_id = Set(customer_id);
        active.product_id = Set(product_id);
        active.quantity = Set(quantity);
        active.update(&*self.db).await?;

        load_cart_entry(&*self.db, id).await
    }

    async fn delete_cart_entry(&self, id: i64) -> Result<bool> {
        delete_row::<cart_entry::Entity, _>(&*self.db, id).await
    }

    async fn convert_cart(
        &self,
        status_label: &str,
        entry_ids: &[i64],
    ) -> Result<Option<Vec<(Order, CartBatch)>>> {
        let txn = self.db.begin().await?;

        // entries and live prices are read inside the transaction so the
        // orders match what gets deleted below
        let entries = cart_entry::Entity::find()
            .filter(cart_entry::Column::Id.is_in(entry_ids.iter().copied()))
            .find_also_related(product::Entity)
            .order_by_asc(cart_entry::Column::Id)
            .all(&txn)
            .await?
            .into_iter()
            .map(priced)
            .collect::<Result<Vec<_>>>()?;
        if entries.is_empty() {
            txn.commit().await?;
            return Ok(Some(Vec::new()));
        }
        let batches = CartBatch::group_by_customer(entries);

        let existing = order_status::Entity::find()
            .filter(order_status::Column::Label.eq(status_label))
            .order_by_asc(order_status::Column::Id)
            .one(&txn)
            .await?;
        let status = match existing {
            Some(status) => status,
            None => {
                order_status::ActiveModel {
                    label: Set(status_label.to_string()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        let now = Utc::now();
        let mut orders = Vec::with_capacity(batches.len());
        for batch in batches {
            let row = order::ActiveModel {
                customer_id: Set(batch.customer_id),
                order_date: Set(now.date_naive()),
                address: Set(None),
                region: Set(None),
                status_id: Set(Some(status.id)),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            for line in &batch.lines {
                insert_line(&txn, row.id, line).await?;
            }

            let deleted = cart_entry::Entity::delete_many()
                .filter(cart_entry::Column::Id.is_in(batch.entry_ids.iter().copied()))
                .exec(&txn)
                .await?;
            if deleted.rows_affected != batch.entry_ids.len() as u64 {
                txn.rollback().await?;
                tracing::warn!(
                    customer_id = batch.customer_id,
                    expected = batch.entry_ids.len(),
                    deleted = deleted.rows_affected,
                    "Cart entries consumed concurrently, conversion rolled back"
                );
                return Ok(None);
            }

            tracing::debug!(
                order_id = row.id,
                customer_id = batch.customer_id,
                lines = batch.lines.len(),
                "Cart converted to order"
            );
            orders.push((row.into(), batch));
        }

        txn.commit().await?;
        Ok(Some(orders))
    }

    // ===== Discounts =====

    async fn list_discounts(
        &self,
        filter: &OrderChildFilter,
        page: PageRequest,
    ) -> Result<Page<Discount>> {
        let mut select = discount::Entity::find().order_by_asc(discount::Column::Id);
        if let Some(order_id) = filter.order {
            select = select.filter(discount::Column::OrderId.eq(order_id));
        }
        if let Some(customer_id) = filter.customer {
            select = select.filter(discount::Column::OrderId.in_subquery(orders_of(customer_id)));
        }
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_discount(&self, id: i64) -> Result<Option<Discount>> {
        let row = discount::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_discount(&self, draft: &DiscountDraft) -> Result<Discount> {
        let active = discount::ActiveModel {
            order_id: Set(draft.order_id),
            rate: Set(draft.rate),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let row = discount::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_discount(&self, id: i64, draft: &DiscountDraft) -> Result<Option<Discount>> {
        let Some(row) = discount::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: discount::ActiveModel = row.into();
        active.order_id = Set(draft.order_id);
        active.rate = Set(draft.rate);
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_discount(&self, id: i64) -> Result<bool> {
        delete_row::<discount::Entity, _>(&*self.db, id).await
    }

    // ===== Promo codes =====

    async fn list_promo_codes(
        &self,
        filter: &PromoCodeFilter,
        page: PageRequest,
    ) -> Result<Page<PromoCode>> {
        let mut select = promo_code::Entity::find().order_by_asc(promo_code::Column::Code);
        if let Some(active) = filter.active {
            select = select.filter(promo_code::Column::Active.eq(active));
        }
        if let Some(order_id) = filter.order {
            select = select.filter(promo_code::Column::OrderId.eq(order_id));
        }
        if let Some(search) = &filter.search {
            select = select.filter(icontains(promo_code::Entity, promo_code::Column::Code, search));
        }
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_promo_code(&self, id: i64) -> Result<Option<PromoCode>> {
        let row = promo_code::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_promo_code(&self, draft: &PromoCodeDraft) -> Result<PromoCode> {
        let active = promo_code::ActiveModel {
            code: Set(draft.code.clone()),
            rate: Set(draft.rate),
            order_id: Set(draft.order_id),
            start_date: Set(draft.start_date),
            end_date: Set(draft.end_date),
            active: Set(draft.active),
            ..Default::default()
        };
        let row = promo_code::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_promo_code(
        &self,
        id: i64,
        draft: &PromoCodeDraft,
    ) -> Result<Option<PromoCode>> {
        let Some(row) = promo_code::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: promo_code::ActiveModel = row.into();
        active.code = Set(draft.code.clone());
        active.rate = Set(draft.rate);
        active.order_id = Set(draft.order_id);
        active.start_date = Set(draft.start_date);
        active.end_date = Set(draft.end_date);
        active.active = Set(draft.active);
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_promo_code(&self, id: i64) -> Result<bool> {
        delete_row::<promo_code::Entity, _>(&*self.db, id).await
    }

    async fn redeem_promo_code(&self, id: i64, order_id: i64) -> Result<bool> {
        // single conditional UPDATE: of two concurrent redemptions only one matches
        let result = promo_code::Entity::update_many()
            .col_expr(promo_code::Column::OrderId, Expr::value(order_id))
            .filter(promo_code::Column::Id.eq(id))
            .filter(promo_code::Column::OrderId.is_null())
            .filter(promo_code::Column::Active.eq(true))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    // ===== Returns =====

    async fn list_returns(
        &self,
        filter: &OrderChildFilter,
        page: PageRequest,
    ) -> Result<Page<Return>> {
        let mut select = order_return::Entity::find()
            .order_by_desc(order_return::Column::ReturnDate)
            .order_by_desc(order_return::Column::Id);
        if let Some(order_id) = filter.order {
            select = select.filter(order_return::Column::OrderId.eq(order_id));
        }
        if let Some(customer_id) = filter.customer {
            select =
                select.filter(order_return::Column::OrderId.in_subquery(orders_of(customer_id)));
        }
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_return(&self, id: i64) -> Result<Option<Return>> {
        let row = order_return::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_return(&self, draft: &ReturnDraft) -> Result<Return> {
        let now = Utc::now();
        let active = order_return::ActiveModel {
            order_id: Set(draft.order_id),
            reason: Set(draft.reason.clone()),
            return_date: Set(now.date_naive()),
            created_at: Set(now),
            ..Default::default()
        };
        let row = order_return::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_return(&self, id: i64, draft: &ReturnDraft) -> Result<Option<Return>> {
        let Some(row) = order_return::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: order_return::ActiveModel = row.into();
        active.order_id = Set(draft.order_id);
        active.reason = Set(draft.reason.clone());
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_return(&self, id: i64) -> Result<bool> {
        delete_row::<order_return::Entity, _>(&*self.db, id).await
    }
}
