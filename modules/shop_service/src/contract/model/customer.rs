//! Customer store: profiles, favorites, reviews

use chrono::{DateTime, Utc};

/// Identity fields exposed alongside a customer profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub account: AccountSummary,
    pub last_name: String,
    pub first_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub loyalty_points: i32,
}

/// Self-registration input: creates the account and the profile together
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
}

/// Writable profile fields; loyalty points are not among them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub last_name: String,
    pub first_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub gender: Option<String>,
    /// Substring match on last name, first name or phone
    pub search: Option<String>,
}

/// Filter for per-customer product collections (cart, favorites)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedFilter {
    pub customer: Option<i64>,
    pub product: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteDraft {
    /// Defaults to the caller's own profile
    pub customer_id: Option<i64>,
    pub product_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    /// Defaults to the caller's own profile
    pub customer_id: Option<i64>,
    pub product_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSortField {
    CreatedAt,
    Rating,
}

impl ReviewSortField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(Self::CreatedAt),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub customer: Option<i64>,
    pub product: Option<i64>,
    pub rating: Option<i32>,
    /// Substring match on comment
    pub search: Option<String>,
    pub sort: Option<super::common::Sort<ReviewSortField>>,
}
