//! Catalog store: categories, products, articles, media, promotions, catalogues

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::common::Sort;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategory {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategoryDraft {
    pub name: String,
    pub description: Option<String>,
    pub category_id: i64,
}

/// Product (a shoe model); variants live in [`Article`]
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub sole_type: Option<String>,
    /// Free-form key/value metadata, e.g. `{"upper": "leather"}`
    pub raw_materials: Option<serde_json::Value>,
    pub origin: Option<String>,
    pub category_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub sole_type: Option<String>,
    pub raw_materials: Option<serde_json::Value>,
    pub origin: Option<String>,
    pub category_ids: Vec<i64>,
}

/// Product with everything hanging off it
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    pub articles: Vec<Article>,
    pub media: Vec<Media>,
    pub promotions: Vec<Promotion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    Price,
    Name,
}

impl ProductSortField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "price" => Some(Self::Price),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<i64>,
    pub origin: Option<String>,
    pub sole_type: Option<String>,
    /// Substring match on name or description
    pub search: Option<String>,
    pub sort: Option<Sort<ProductSortField>>,
}

/// Concrete variant of a product (color + size), identified by barcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: i64,
    pub product_id: i64,
    pub color: Option<String>,
    pub size: Option<String>,
    pub barcode: String,
    pub purchase_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub product_id: i64,
    pub color: Option<String>,
    pub size: Option<String>,
    pub barcode: String,
    pub purchase_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub product: Option<i64>,
    pub color: Option<String>,
    pub size: Option<String>,
    /// Substring match on barcode
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub id: i64,
    pub product_id: i64,
    pub media_type: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDraft {
    pub product_id: i64,
    pub media_type: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub id: i64,
    pub product_id: i64,
    pub promo_type: String,
    pub reduction: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionDraft {
    pub product_id: i64,
    pub promo_type: String,
    pub reduction: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_on: NaiveDate,
    pub product_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueDraft {
    pub name: String,
    pub description: Option<String>,
    pub product_ids: Vec<i64>,
}
