//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories/.
//!
//! Update methods return `None` and delete methods return `false` when the
//! target row does not exist.

use crate::contract::{
    Account, AccountDetail, AccountUpdate, Article, ArticleDraft, ArticleFilter, CartBatch,
    CartEntry, Catalogue, CatalogueDraft, Category, CategoryDraft, Customer, CustomerFilter,
    CustomerUpdate, Discount, DiscountDraft, Favorite, Media, MediaDraft, Membership,
    NewAccount, NewCustomer, Order, OrderChildFilter, OrderDetail, OrderDraft, OrderFilter,
    OrderLine, OrderLineUpdate, OrderStatus, OrderUpdate, OwnedFilter, Page, PageRequest, Pole,
    PoleDraft, PricedLine, Product, ProductDetail, ProductDraft, ProductFilter, PromoCode,
    PromoCodeDraft, PromoCodeFilter, Promotion, PromotionDraft, Return, ReturnDraft, Review,
    ReviewDraft, ReviewFilter, RoleAssignment, RoleAssignmentDraft, RoleFilter, ServiceUnit,
    ServiceUnitDraft, StoredAccount, SubCategory, SubCategoryDraft, Team, TeamDraft, UnitRef,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Login accounts
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert an account with an already hashed password, together with its
    /// staff profile
    async fn create(&self, account: &NewAccount, password_hash: &str) -> Result<AccountDetail>;

    async fn find(&self, id: i64) -> Result<Option<Account>>;

    /// Account with its staff profile
    async fn find_detail(&self, id: i64) -> Result<Option<AccountDetail>>;

    /// Account with its password hash, for login
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredAccount>>;

    async fn list(&self, page: PageRequest) -> Result<Page<Account>>;

    /// Apply a partial update; `password_hash` replaces the stored hash when
    /// set. Profile changes create the staff profile when it is missing.
    async fn update(
        &self,
        id: i64,
        update: &AccountUpdate,
        password_hash: Option<&str>,
    ) -> Result<Option<AccountDetail>>;

    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> Result<()>;

    /// Delete an account and everything owned by it
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Catalog store
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_categories(&self, page: PageRequest) -> Result<Page<Category>>;
    async fn find_category(&self, id: i64) -> Result<Option<Category>>;
    async fn create_category(&self, draft: &CategoryDraft) -> Result<Category>;
    async fn update_category(&self, id: i64, draft: &CategoryDraft) -> Result<Option<Category>>;
    async fn delete_category(&self, id: i64) -> Result<bool>;

    async fn list_sub_categories(
        &self,
        category: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<SubCategory>>;
    async fn find_sub_category(&self, id: i64) -> Result<Option<SubCategory>>;
    async fn create_sub_category(&self, draft: &SubCategoryDraft) -> Result<SubCategory>;
    async fn update_sub_category(
        &self,
        id: i64,
        draft: &SubCategoryDraft,
    ) -> Result<Option<SubCategory>>;
    async fn delete_sub_category(&self, id: i64) -> Result<bool>;

    async fn list_products(&self, filter: &ProductFilter, page: PageRequest)
        -> Result<Page<Product>>;
    async fn find_product(&self, id: i64) -> Result<Option<Product>>;
    /// Product with its articles, media and promotions
    async fn product_detail(&self, id: i64) -> Result<Option<ProductDetail>>;
    /// Insert a product and its category links in one transaction
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product>;
    /// Replace product fields and category links in one transaction
    async fn update_product(&self, id: i64, draft: &ProductDraft) -> Result<Option<Product>>;
    async fn delete_product(&self, id: i64) -> Result<bool>;

    async fn list_articles(&self, filter: &ArticleFilter, page: PageRequest)
        -> Result<Page<Article>>;
    async fn find_article(&self, id: i64) -> Result<Option<Article>>;
    async fn create_article(&self, draft: &ArticleDraft) -> Result<Article>;
    async fn update_article(&self, id: i64, draft: &ArticleDraft) -> Result<Option<Article>>;
    async fn delete_article(&self, id: i64) -> Result<bool>;

    async fn list_media(&self, product: Option<i64>, page: PageRequest) -> Result<Page<Media>>;
    async fn find_media(&self, id: i64) -> Result<Option<Media>>;
    async fn create_media(&self, draft: &MediaDraft) -> Result<Media>;
    async fn update_media(&self, id: i64, draft: &MediaDraft) -> Result<Option<Media>>;
    async fn delete_media(&self, id: i64) -> Result<bool>;

    async fn list_promotions(&self, product: Option<i64>, page: PageRequest)
        -> Result<Page<Promotion>>;
    async fn find_promotion(&self, id: i64) -> Result<Option<Promotion>>;
    async fn create_promotion(&self, draft: &PromotionDraft) -> Result<Promotion>;
    async fn update_promotion(&self, id: i64, draft: &PromotionDraft)
        -> Result<Option<Promotion>>;
    async fn delete_promotion(&self, id: i64) -> Result<bool>;

    async fn list_catalogues(&self, page: PageRequest) -> Result<Page<Catalogue>>;
    async fn find_catalogue(&self, id: i64) -> Result<Option<Catalogue>>;
    async fn create_catalogue(&self, draft: &CatalogueDraft) -> Result<Catalogue>;
    async fn update_catalogue(&self, id: i64, draft: &CatalogueDraft)
        -> Result<Option<Catalogue>>;
    async fn delete_catalogue(&self, id: i64) -> Result<bool>;
}

/// Customer store
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Create the account and the customer profile in one transaction
    async fn register(&self, customer: &NewCustomer, password_hash: &str) -> Result<Customer>;
    async fn list(&self, filter: &CustomerFilter, page: PageRequest) -> Result<Page<Customer>>;
    async fn find(&self, id: i64) -> Result<Option<Customer>>;
    async fn find_by_account(&self, account_id: i64) -> Result<Option<Customer>>;
    async fn update(&self, id: i64, update: &CustomerUpdate) -> Result<Option<Customer>>;
    /// Delete the profile together with its account
    async fn delete(&self, id: i64) -> Result<bool>;

    async fn list_favorites(&self, filter: &OwnedFilter, page: PageRequest)
        -> Result<Page<Favorite>>;
    async fn find_favorite(&self, id: i64) -> Result<Option<Favorite>>;
    /// Existing favorite for the pair, other than `except`
    async fn favorite_exists(&self, customer_id: i64, product_id: i64, except: Option<i64>)
        -> Result<bool>;
    async fn create_favorite(&self, customer_id: i64, product_id: i64) -> Result<Favorite>;
    async fn update_favorite(&self, id: i64, customer_id: i64, product_id: i64)
        -> Result<Option<Favorite>>;
    async fn delete_favorite(&self, id: i64) -> Result<bool>;

    async fn list_reviews(&self, filter: &ReviewFilter, page: PageRequest) -> Result<Page<Review>>;
    async fn find_review(&self, id: i64) -> Result<Option<Review>>;
    /// Existing review for the pair, other than `except`
    async fn review_exists(&self, customer_id: i64, product_id: i64, except: Option<i64>)
        -> Result<bool>;
    /// `draft.customer_id` is ignored in favor of `customer_id`
    async fn create_review(&self, customer_id: i64, draft: &ReviewDraft) -> Result<Review>;
    async fn update_review(&self, id: i64, customer_id: i64, draft: &ReviewDraft)
        -> Result<Option<Review>>;
    async fn delete_review(&self, id: i64) -> Result<bool>;
}

/// Order workflow store
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list_statuses(&self, page: PageRequest) -> Result<Page<OrderStatus>>;
    async fn find_status(&self, id: i64) -> Result<Option<OrderStatus>>;
    async fn create_status(&self, label: &str) -> Result<OrderStatus>;
    async fn update_status(&self, id: i64, label: &str) -> Result<Option<OrderStatus>>;
    async fn delete_status(&self, id: i64) -> Result<bool>;

    async fn list_orders(&self, filter: &OrderFilter, page: PageRequest) -> Result<Page<Order>>;
    async fn find_order(&self, id: i64) -> Result<Option<Order>>;
    async fn order_detail(&self, id: i64) -> Result<Option<OrderDetail>>;
    /// Insert the order and its priced lines in one transaction.
    /// `draft.customer_id` and `draft.lines` are ignored in favor of the arguments.
    async fn create_order(
        &self,
        customer_id: i64,
        draft: &OrderDraft,
        lines: &[PricedLine],
    ) -> Result<Order>;
    async fn update_order(&self, id: i64, update: &OrderUpdate) -> Result<Option<Order>>;
    async fn delete_order(&self, id: i64) -> Result<bool>;

    async fn list_lines(&self, filter: &OrderChildFilter, page: PageRequest)
        -> Result<Page<OrderLine>>;
    async fn find_line(&self, id: i64) -> Result<Option<OrderLine>>;
    async fn create_line(&self, order_id: i64, line: &PricedLine) -> Result<OrderLine>;
    async fn update_line(&self, id: i64, update: &OrderLineUpdate) -> Result<Option<OrderLine>>;
    async fn delete_line(&self, id: i64) -> Result<bool>;

    async fn list_cart(&self, filter: &OwnedFilter, page: PageRequest) -> Result<Page<CartEntry>>;
    async fn find_cart_entry(&self, id: i64) -> Result<Option<CartEntry>>;
    /// Existing entry for the pair, other than `except`
    async fn cart_entry_exists(&self, customer_id: i64, product_id: i64, except: Option<i64>)
        -> Result<bool>;
    async fn create_cart_entry(&self, customer_id: i64, product_id: i64, quantity: i32)
        -> Result<CartEntry>;
    async fn update_cart_entry(
        &self,
        id: i64,
        customer_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> Result<Option<CartEntry>>;
    async fn delete_cart_entry(&self, id: i64) -> Result<bool>;

    /// Load the entries among `entry_ids`, create one order per customer with
    /// the status labeled `status_label` (created when missing) and remove the
    /// consumed entries, all in one transaction. Unknown ids are skipped.
    ///
    /// `None` when another transaction consumed some of the loaded entries
    /// first; nothing is written in that case.
    async fn convert_cart(
        &self,
        status_label: &str,
        entry_ids: &[i64],
    ) -> Result<Option<Vec<(Order, CartBatch)>>>;

    async fn list_discounts(&self, filter: &OrderChildFilter, page: PageRequest)
        -> Result<Page<Discount>>;
    async fn find_discount(&self, id: i64) -> Result<Option<Discount>>;
    async fn create_discount(&self, draft: &DiscountDraft) -> Result<Discount>;
    async fn update_discount(&self, id: i64, draft: &DiscountDraft) -> Result<Option<Discount>>;
    async fn delete_discount(&self, id: i64) -> Result<bool>;

    async fn list_promo_codes(&self, filter: &PromoCodeFilter, page: PageRequest)
        -> Result<Page<PromoCode>>;
    async fn find_promo_code(&self, id: i64) -> Result<Option<PromoCode>>;
    async fn create_promo_code(&self, draft: &PromoCodeDraft) -> Result<PromoCode>;
    async fn update_promo_code(&self, id: i64, draft: &PromoCodeDraft)
        -> Result<Option<PromoCode>>;
    async fn delete_promo_code(&self, id: i64) -> Result<bool>;
    /// Link an active, unused code to an order; `false` if the code was
    /// inactive or already used when the update ran
    async fn redeem_promo_code(&self, id: i64, order_id: i64) -> Result<bool>;

    async fn list_returns(&self, filter: &OrderChildFilter, page: PageRequest)
        -> Result<Page<Return>>;
    async fn find_return(&self, id: i64) -> Result<Option<Return>>;
    async fn create_return(&self, draft: &ReturnDraft) -> Result<Return>;
    async fn update_return(&self, id: i64, draft: &ReturnDraft) -> Result<Option<Return>>;
    async fn delete_return(&self, id: i64) -> Result<bool>;
}

/// Staff organization store
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn list_poles(&self, page: PageRequest) -> Result<Page<Pole>>;
    async fn find_pole(&self, id: i64) -> Result<Option<Pole>>;
    async fn create_pole(&self, draft: &PoleDraft) -> Result<Pole>;
    async fn update_pole(&self, id: i64, draft: &PoleDraft) -> Result<Option<Pole>>;
    async fn delete_pole(&self, id: i64) -> Result<bool>;

    async fn list_services(&self, pole: Option<i64>, page: PageRequest)
        -> Result<Page<ServiceUnit>>;
    async fn find_service(&self, id: i64) -> Result<Option<ServiceUnit>>;
    async fn create_service(&self, draft: &ServiceUnitDraft) -> Result<ServiceUnit>;
    async fn update_service(&self, id: i64, draft: &ServiceUnitDraft)
        -> Result<Option<ServiceUnit>>;
    async fn delete_service(&self, id: i64) -> Result<bool>;

    async fn list_teams(&self, service: Option<i64>, page: PageRequest) -> Result<Page<Team>>;
    async fn find_team(&self, id: i64) -> Result<Option<Team>>;
    async fn create_team(&self, draft: &TeamDraft) -> Result<Team>;
    async fn update_team(&self, id: i64, draft: &TeamDraft) -> Result<Option<Team>>;
    async fn delete_team(&self, id: i64) -> Result<bool>;

    async fn list_members(&self, unit: UnitRef) -> Result<Vec<Membership>>;
    async fn add_member(&self, unit: UnitRef, account_id: i64) -> Result<Membership>;
    async fn remove_member(&self, unit: UnitRef, account_id: i64) -> Result<bool>;

    async fn list_roles(&self, filter: &RoleFilter, page: PageRequest)
        -> Result<Page<RoleAssignment>>;
    async fn find_role(&self, id: i64) -> Result<Option<RoleAssignment>>;
    /// Same account, role and scope as `draft`, other than `except`;
    /// absent scopes match absent scopes
    async fn role_exists(&self, draft: &RoleAssignmentDraft, except: Option<i64>)
        -> Result<bool>;
    async fn create_role(&self, draft: &RoleAssignmentDraft) -> Result<RoleAssignment>;
    async fn update_role(&self, id: i64, draft: &RoleAssignmentDraft)
        -> Result<Option<RoleAssignment>>;
    async fn delete_role(&self, id: i64) -> Result<bool>;
}
