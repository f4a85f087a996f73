//! Order workflow: carts, orders, lines, discounts, promo codes, returns

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::common::Sort;

/// Free-text order state ("pending", "shipped", ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatus {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    /// Set once when the order is created
    pub order_date: NaiveDate,
    pub address: Option<String>,
    pub region: Option<String>,
    pub status_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    /// Defaults to the caller's own profile
    pub customer_id: Option<i64>,
    pub address: Option<String>,
    pub region: Option<String>,
    pub status_id: Option<i64>,
    pub lines: Vec<OrderLineDraft>,
}

/// Mutable order fields; customer and order date are fixed after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderUpdate {
    pub address: Option<String>,
    pub region: Option<String>,
    pub status_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortField {
    OrderDate,
    CreatedAt,
    UpdatedAt,
}

impl OrderSortField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "order_date" => Some(Self::OrderDate),
            "created_at" => Some(Self::CreatedAt),
            "updated_at" => Some(Self::UpdatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub customer: Option<i64>,
    pub status: Option<i64>,
    pub order_date: Option<NaiveDate>,
    pub sort: Option<Sort<OrderSortField>>,
}

/// Order line; `unit_price` is frozen when the line is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub article_id: Option<i64>,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineDraft {
    pub product_id: i64,
    pub article_id: Option<i64>,
    pub quantity: i32,
}

/// Line ready for insertion, priced from the product at that moment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: i64,
    pub article_id: Option<i64>,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Mutable order line fields; product and unit price stay fixed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineUpdate {
    pub article_id: Option<i64>,
    pub quantity: i32,
}

/// Filter for rows hanging off an order (lines, discounts, returns)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderChildFilter {
    pub order: Option<i64>,
    /// Restrict to orders of this customer
    pub customer: Option<i64>,
}

/// Order with its lines, discounts, redeemed codes and returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    pub order: Order,
    pub status: Option<OrderStatus>,
    pub lines: Vec<OrderLine>,
    pub discounts: Vec<Discount>,
    pub promo_codes: Vec<PromoCode>,
    pub returns: Vec<Return>,
}

/// Pre-order selection; priced live from the product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
    /// Current product price, not stored on the entry
    pub unit_price: Decimal,
}

/// Cart entries of one customer turned into one order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartBatch {
    pub customer_id: i64,
    pub entry_ids: Vec<i64>,
    pub lines: Vec<PricedLine>,
}

impl CartBatch {
    /// Split cart entries into one batch per customer, ascending by customer id
    pub fn group_by_customer(entries: Vec<CartEntry>) -> Vec<CartBatch> {
        let mut groups: BTreeMap<i64, CartBatch> = BTreeMap::new();
        for entry in entries {
            let batch = groups.entry(entry.customer_id).or_insert_with(|| CartBatch {
                customer_id: entry.customer_id,
                entry_ids: Vec::new(),
                lines: Vec::new(),
            });
            batch.entry_ids.push(entry.id);
            batch.lines.push(PricedLine {
                product_id: entry.product_id,
                article_id: None,
                quantity: entry.quantity,
                unit_price: entry.unit_price,
            });
        }
        groups.into_values().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntryDraft {
    /// Defaults to the caller's own profile
    pub customer_id: Option<i64>,
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discount {
    pub id: i64,
    pub order_id: i64,
    /// Percentage, e.g. `15.00`
    pub rate: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountDraft {
    pub order_id: i64,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCode {
    pub id: i64,
    pub code: String,
    pub rate: Decimal,
    /// Order that consumed the code; `None` while unused
    pub order_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCodeDraft {
    pub code: String,
    pub rate: Decimal,
    pub order_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromoCodeFilter {
    pub active: Option<bool>,
    pub order: Option<i64>,
    /// Substring match on the code
    pub search: Option<String>,
}

/// Outcome of a promo code check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoValidation {
    Valid { rate: Decimal },
    Invalid { message: String },
}

impl PromoValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, PromoValidation::Valid { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Return {
    pub id: i64,
    pub order_id: i64,
    pub reason: Option<String>,
    pub return_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnDraft {
    pub order_id: i64,
    pub reason: Option<String>,
}
