//! Domain service - business logic orchestration
//!
//! One `Service` fronts every store; the per-store operations live in the
//! submodules. Every operation takes the caller's `AuthContext` and applies
//! the access rules before touching a repository.

mod accounts;
mod catalog;
mod customers;
mod orders;
mod organization;

use super::access::{require_authenticated, Scope};
use super::auth::{PasswordHasher, TokenAuthority};
use super::errors::map_storage_error;
use super::repository::{
    AccountRepository, CatalogRepository, CustomerRepository, OrderRepository,
    OrganizationRepository,
};
use crate::config::Config;
use crate::contract::{AuthContext, Customer, Page, PageRequest, ShopError};
use std::sync::Arc;

/// Storage handles the service works with
#[derive(Clone)]
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub organization: Arc<dyn OrganizationRepository>,
}

/// Domain service for the shop
pub struct Service {
    accounts: Arc<dyn AccountRepository>,
    catalog: Arc<dyn CatalogRepository>,
    customers: Arc<dyn CustomerRepository>,
    orders: Arc<dyn OrderRepository>,
    organization: Arc<dyn OrganizationRepository>,
    tokens: Arc<dyn TokenAuthority>,
    passwords: Arc<dyn PasswordHasher>,
    config: Config,
}

impl Service {
    pub fn new(
        repos: Repositories,
        tokens: Arc<dyn TokenAuthority>,
        passwords: Arc<dyn PasswordHasher>,
        config: Config,
    ) -> Self {
        Self {
            accounts: repos.accounts,
            catalog: repos.catalog,
            customers: repos.customers,
            orders: repos.orders,
            organization: repos.organization,
            tokens,
            passwords,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ===== Ownership helpers =====

    /// Customer profile linked to the caller's account, if any
    async fn own_customer(&self, ctx: &AuthContext) -> Result<Option<Customer>, ShopError> {
        let account_id = require_authenticated(ctx)?;
        self.customers
            .find_by_account(account_id)
            .await
            .map_err(map_storage_error)
    }

    /// Customer rows visible to the caller
    async fn scope(&self, ctx: &AuthContext) -> Result<Scope, ShopError> {
        require_authenticated(ctx)?;
        if ctx.is_staff {
            return Ok(Scope::All);
        }
        Ok(match self.own_customer(ctx).await? {
            Some(customer) => Scope::Own(customer.id),
            None => Scope::Nothing,
        })
    }

    /// Owner of a row the caller is creating
    ///
    /// Staff must name the customer; everyone else writes to their own
    /// profile and may not name another one.
    async fn resolve_owner(
        &self,
        ctx: &AuthContext,
        requested: Option<i64>,
    ) -> Result<i64, ShopError> {
        require_authenticated(ctx)?;

        if ctx.is_staff {
            let customer_id =
                requested.ok_or_else(|| ShopError::invalid("customer_id", "this field is required"))?;
            let exists = self
                .customers
                .find(customer_id)
                .await
                .map_err(map_storage_error)?
                .is_some();
            if !exists {
                return Err(ShopError::invalid("customer_id", "unknown customer"));
            }
            return Ok(customer_id);
        }

        let own = self
            .own_customer(ctx)
            .await?
            .ok_or_else(|| ShopError::not_found("customer", "me"))?;
        match requested {
            Some(other) if other != own.id => Err(ShopError::forbidden(
                "cannot act on behalf of another customer",
            )),
            _ => Ok(own.id),
        }
    }

    /// Owner of a row the caller is updating; staff keep the current owner
    /// unless they name a new one
    async fn resolve_new_owner(
        &self,
        ctx: &AuthContext,
        requested: Option<i64>,
        current: i64,
    ) -> Result<i64, ShopError> {
        if ctx.is_staff {
            return self.resolve_owner(ctx, requested.or(Some(current))).await;
        }
        self.resolve_owner(ctx, requested).await
    }
}

fn empty_page<T>(page: PageRequest) -> Page<T> {
    Page::new(Vec::new(), 0, page)
}
