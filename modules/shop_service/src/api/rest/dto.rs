//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_true() -> bool {
    true
}

fn default_quantity() -> i32 {
    1
}

// ===== Paging =====

/// Paging parameters accepted by every list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// One page of a list
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    /// Matching rows across all pages
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

// ===== Auth DTOs =====

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenPairDto {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccessTokenDto {
    pub access: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VerifyRequest {
    pub token: String,
}

/// Staff-facing account view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub profile: Option<StaffProfileRequest>,
}

/// Partial account update; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
    pub is_active: Option<bool>,
    pub profile: Option<StaffProfileRequest>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StaffProfileDto {
    #[schema(example = "MAT12")]
    pub matricule: String,
    pub photo: Option<String>,
    pub phone: String,
    pub address: String,
    pub hire_date: Option<NaiveDate>,
    pub job_title: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account with its nested staff profile
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountDetailDto {
    #[serde(flatten)]
    pub account: AccountDto,
    pub profile: Option<StaffProfileDto>,
}

/// Staff profile fields to set; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct StaffProfileRequest {
    pub matricule: Option<String>,
    pub photo: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub job_title: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
}

// ===== Catalog DTOs =====

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,
    #[schema(example = "Sneakers")]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubCategoryDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category_id: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubCategoryQuery {
    pub category: Option<i64>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductDto {
    pub id: i64,
    #[schema(example = "Babouche Fès")]
    pub name: String,
    /// Decimal string, two places
    #[schema(example = "349.00")]
    pub price: Decimal,
    pub description: Option<String>,
    pub sole_type: Option<String>,
    /// Key/value material breakdown
    pub raw_materials: Option<serde_json::Value>,
    pub origin: Option<String>,
    pub category_ids: Vec<i64>,
}

/// Product with its variants, media and promotions
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductDetailDto {
    #[serde(flatten)]
    pub product: ProductDto,
    pub articles: Vec<ArticleDto>,
    pub media: Vec<MediaDto>,
    pub promotions: Vec<PromotionDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sole_type: Option<String>,
    #[serde(default)]
    pub raw_materials: Option<serde_json::Value>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<i64>,
    pub origin: Option<String>,
    pub sole_type: Option<String>,
    pub search: Option<String>,
    /// `price`, `-price`, `name` or `-name`
    pub ordering: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub product_id: i64,
    pub color: Option<String>,
    pub size: Option<String>,
    #[schema(example = "6111234567890")]
    pub barcode: String,
    pub purchase_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ArticleRequest {
    pub product_id: i64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    pub barcode: String,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleQuery {
    pub product: Option<i64>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Filter for rows hanging off a product (media, promotions)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductChildQuery {
    pub product: Option<i64>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MediaDto {
    pub id: i64,
    pub product_id: i64,
    pub media_type: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MediaRequest {
    pub product_id: i64,
    #[serde(default)]
    pub media_type: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PromotionDto {
    pub id: i64,
    pub product_id: i64,
    pub promo_type: String,
    pub reduction: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PromotionRequest {
    pub product_id: i64,
    pub promo_type: String,
    pub reduction: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogueDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_on: NaiveDate,
    pub product_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CatalogueRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_ids: Vec<i64>,
}

// ===== Customer DTOs =====

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountSummaryDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerDto {
    pub id: i64,
    pub user: AccountSummaryDto,
    pub last_name: String,
    pub first_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    /// Read-only
    pub loyalty_points: i32,
}

/// Self-registration: account and profile in one request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterCustomerRequest {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerQuery {
    pub gender: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Filter for per-customer collections (cart, favorites)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnedQuery {
    pub customer: Option<i64>,
    pub product: Option<i64>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FavoriteDto {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FavoriteRequest {
    /// Defaults to the caller's own profile; required for staff
    #[serde(default)]
    pub customer_id: Option<i64>,
    pub product_id: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewDto {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    #[schema(minimum = 1, maximum = 5)]
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewRequest {
    #[serde(default)]
    pub customer_id: Option<i64>,
    pub product_id: i64,
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewQuery {
    pub customer: Option<i64>,
    pub product: Option<i64>,
    pub rating: Option<i32>,
    pub search: Option<String>,
    /// `created_at` or `rating`, optionally prefixed with `-`
    pub ordering: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

// ===== Order DTOs =====

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderStatusDto {
    pub id: i64,
    #[schema(example = "pending")]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderStatusRequest {
    pub label: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderDto {
    pub id: i64,
    pub customer_id: i64,
    pub order_date: NaiveDate,
    pub address: Option<String>,
    pub region: Option<String>,
    pub status_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderLineDto {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub article_id: Option<i64>,
    pub quantity: i32,
    /// Frozen at line creation
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DiscountDto {
    pub id: i64,
    pub order_id: i64,
    #[schema(example = "15.00")]
    pub rate: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Discount as applied to its order's subtotal
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppliedDiscountDto {
    #[serde(flatten)]
    pub discount: DiscountDto,
    pub amount_saved: Decimal,
}

/// Order with lines, adjustments and derived totals
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderDetailDto {
    #[serde(flatten)]
    pub order: OrderDto,
    pub status: Option<OrderStatusDto>,
    pub lines: Vec<OrderLineDto>,
    pub discounts: Vec<AppliedDiscountDto>,
    pub promo_codes: Vec<PromoCodeDto>,
    pub returns: Vec<ReturnDto>,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub product_id: i64,
    #[serde(default)]
    pub article_id: Option<i64>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Defaults to the caller's own profile; required for staff
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub status_id: Option<i64>,
    /// Unit prices are taken from the products
    #[serde(default)]
    pub lines: Vec<OrderLineRequest>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub status_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderQuery {
    pub customer: Option<i64>,
    pub status: Option<i64>,
    pub order_date: Option<NaiveDate>,
    /// `order_date`, `created_at` or `updated_at`, optionally prefixed with `-`
    pub ordering: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Filter for rows hanging off an order (lines, discounts, returns)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderChildQuery {
    pub order: Option<i64>,
    pub customer: Option<i64>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderLineRequest {
    pub order_id: i64,
    pub product_id: i64,
    #[serde(default)]
    pub article_id: Option<i64>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateOrderLineRequest {
    #[serde(default)]
    pub article_id: Option<i64>,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartEntryDto {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
    /// Current product price
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CartEntryRequest {
    #[serde(default)]
    pub customer_id: Option<i64>,
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConvertCartRequest {
    pub entry_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConvertCartResponse {
    pub orders_created: usize,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DiscountRequest {
    pub order_id: i64,
    pub rate: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PromoCodeDto {
    pub id: i64,
    #[schema(example = "BIENVENUE10")]
    pub code: String,
    pub rate: Decimal,
    /// Order that consumed the code
    pub order_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PromoCodeRequest {
    pub code: String,
    pub rate: Decimal,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromoCodeQuery {
    pub active: Option<bool>,
    pub order: Option<i64>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// `{"valid": true, "rate": ...}` or `{"valid": false, "message": ...}`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PromoValidationDto {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RedeemRequest {
    pub order_id: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReturnDto {
    pub id: i64,
    pub order_id: i64,
    pub reason: Option<String>,
    pub return_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReturnRequest {
    pub order_id: i64,
    #[serde(default)]
    pub reason: Option<String>,
}

// ===== Organization DTOs =====

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PoleDto {
    pub id: i64,
    pub name: String,
    #[schema(example = "CLIENTS")]
    pub code: String,
    pub description: String,
    pub responsible_id: Option<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PoleRequest {
    pub name: String,
    /// CLIENTS, COMMANDES or PRODUCTS
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub responsible_id: Option<i64>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceUnitDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub pole_id: i64,
    pub responsible_id: Option<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ServiceUnitRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub pole_id: i64,
    #[serde(default)]
    pub responsible_id: Option<i64>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceUnitQuery {
    pub pole: Option<i64>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub service_id: i64,
    pub responsible_id: Option<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TeamRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub service_id: i64,
    #[serde(default)]
    pub responsible_id: Option<i64>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamQuery {
    pub service: Option<i64>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MembershipDto {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    pub account_id: i64,
    pub assigned_at: DateTime<Utc>,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MemberRequest {
    pub account_id: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoleAssignmentDto {
    pub id: i64,
    pub account_id: i64,
    #[schema(example = "GESTIONNAIRE_AVIS")]
    pub role: String,
    pub pole_id: Option<i64>,
    pub service_id: Option<i64>,
    pub team_id: Option<i64>,
    pub assigned_at: DateTime<Utc>,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RoleAssignmentRequest {
    pub account_id: i64,
    pub role: String,
    #[serde(default)]
    pub pole_id: Option<i64>,
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub team_id: Option<i64>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleQuery {
    pub account: Option<i64>,
    pub role: Option<String>,
    pub pole: Option<i64>,
    pub active: Option<bool>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}
