//! Customer store: profiles, favorites and reviews

use super::accounts::check_email;
use super::{empty_page, Service};
use crate::contract::{
    AuthContext, Customer, CustomerFilter, CustomerUpdate, Favorite, FavoriteDraft, NewCustomer,
    OwnedFilter, Page, PageRequest, Review, ReviewDraft, ReviewFilter, ShopError,
};
use crate::domain::access::{require_authenticated, require_staff};
use crate::domain::errors::map_storage_error;
use crate::domain::validation::FieldErrors;

fn check_registration(customer: &NewCustomer) -> Result<(), ShopError> {
    let mut errors = FieldErrors::new();
    errors.require_text("last_name", &customer.last_name);
    errors.require_text("first_name", &customer.first_name);
    errors.require_text("username", &customer.username);
    errors.require_text("password", &customer.password);
    check_email(&mut errors, &customer.email);
    errors.into_result()
}

fn check_review(draft: &ReviewDraft) -> Result<(), ShopError> {
    let mut errors = FieldErrors::new();
    errors.check_rating(draft.rating);
    errors.into_result()
}

impl Service {
    // ===== Profiles =====

    /// Self-registration: creates the account and the profile together
    pub async fn register_customer(&self, customer: NewCustomer) -> Result<Customer, ShopError> {
        check_registration(&customer)?;
        let hash = self.hash_password(&customer.password)?;
        let created = self
            .customers
            .register(&customer, &hash)
            .await
            .map_err(map_storage_error)?;
        tracing::info!(
            customer_id = created.id,
            account_id = created.account.id,
            "Customer registered"
        );
        Ok(created)
    }

    pub async fn list_customers(
        &self,
        ctx: &AuthContext,
        filter: CustomerFilter,
        page: PageRequest,
    ) -> Result<Page<Customer>, ShopError> {
        require_authenticated(ctx)?;
        self.customers
            .list(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_customer(&self, ctx: &AuthContext, id: i64) -> Result<Customer, ShopError> {
        require_staff(ctx)?;
        self.customers
            .find(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("customer", id))
    }

    /// Profile linked to the caller's account
    pub async fn my_profile(&self, ctx: &AuthContext) -> Result<Customer, ShopError> {
        self.own_customer(ctx)
            .await?
            .ok_or_else(|| ShopError::not_found("customer", "me"))
    }

    pub async fn update_customer(
        &self,
        ctx: &AuthContext,
        id: i64,
        update: CustomerUpdate,
    ) -> Result<Customer, ShopError> {
        require_staff(ctx)?;
        let mut errors = FieldErrors::new();
        errors.require_text("last_name", &update.last_name);
        errors.require_text("first_name", &update.first_name);
        errors.into_result()?;

        self.customers
            .update(id, &update)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("customer", id))
    }

    /// Removes the profile and its login account
    pub async fn delete_customer(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_staff(ctx)?;
        let deleted = self.customers.delete(id).await.map_err(map_storage_error)?;
        if !deleted {
            return Err(ShopError::not_found("customer", id));
        }
        tracing::info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    // ===== Favorites =====

    pub async fn list_favorites(
        &self,
        ctx: &AuthContext,
        filter: OwnedFilter,
        page: PageRequest,
    ) -> Result<Page<Favorite>, ShopError> {
        let Some(customer) = self.scope(ctx).await?.narrow(filter.customer) else {
            return Ok(empty_page(page));
        };
        let filter = OwnedFilter { customer, ..filter };
        self.customers
            .list_favorites(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    /// Favorites of the caller's own profile
    pub async fn my_favorites(
        &self,
        ctx: &AuthContext,
        page: PageRequest,
    ) -> Result<Page<Favorite>, ShopError> {
        let own = self.my_profile(ctx).await?;
        let filter = OwnedFilter {
            customer: Some(own.id),
            product: None,
        };
        self.customers
            .list_favorites(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_favorite(&self, ctx: &AuthContext, id: i64) -> Result<Favorite, ShopError> {
        let scope = self.scope(ctx).await?;
        self.customers
            .find_favorite(id)
            .await
            .map_err(map_storage_error)?
            .filter(|favorite| scope.can_see(favorite.customer_id))
            .ok_or_else(|| ShopError::not_found("favorite", id))
    }

    pub async fn create_favorite(
        &self,
        ctx: &AuthContext,
        draft: FavoriteDraft,
    ) -> Result<Favorite, ShopError> {
        let customer_id = self.resolve_owner(ctx, draft.customer_id).await?;
        let exists = self
            .customers
            .favorite_exists(customer_id, draft.product_id, None)
            .await
            .map_err(map_storage_error)?;
        if exists {
            return Err(ShopError::conflict("product is already a favorite"));
        }

        self.customers
            .create_favorite(customer_id, draft.product_id)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_favorite(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: FavoriteDraft,
    ) -> Result<Favorite, ShopError> {
        let current = self.get_favorite(ctx, id).await?;
        let customer_id = self
            .resolve_new_owner(ctx, draft.customer_id, current.customer_id)
            .await?;
        let exists = self
            .customers
            .favorite_exists(customer_id, draft.product_id, Some(id))
            .await
            .map_err(map_storage_error)?;
        if exists {
            return Err(ShopError::conflict("product is already a favorite"));
        }

        self.customers
            .update_favorite(id, customer_id, draft.product_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("favorite", id))
    }

    pub async fn delete_favorite(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        self.get_favorite(ctx, id).await?;
        self.customers
            .delete_favorite(id)
            .await
            .map_err(map_storage_error)?;
        Ok(())
    }

    // ===== Reviews =====

    /// Reviews are public
    pub async fn list_reviews(
        &self,
        filter: ReviewFilter,
        page: PageRequest,
    ) -> Result<Page<Review>, ShopError> {
        self.customers
            .list_reviews(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn my_reviews(
        &self,
        ctx: &AuthContext,
        page: PageRequest,
    ) -> Result<Page<Review>, ShopError> {
        let own = self.my_profile(ctx).await?;
        let filter = ReviewFilter {
            customer: Some(own.id),
            ..ReviewFilter::default()
        };
        self.list_reviews(filter, page).await
    }

    pub async fn get_review(&self, id: i64) -> Result<Review, ShopError> {
        self.customers
            .find_review(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("review", id))
    }

    /// One review per customer and product
    pub async fn create_review(
        &self,
        ctx: &AuthContext,
        draft: ReviewDraft,
    ) -> Result<Review, ShopError> {
        check_review(&draft)?;
        let customer_id = self.resolve_owner(ctx, draft.customer_id).await?;
        let exists = self
            .customers
            .review_exists(customer_id, draft.product_id, None)
            .await
            .map_err(map_storage_error)?;
        if exists {
            return Err(ShopError::conflict(
                "customer has already reviewed this product",
            ));
        }

        let review = self
            .customers
            .create_review(customer_id, &draft)
            .await
            .map_err(map_storage_error)?;
        tracing::debug!(review_id = review.id, customer_id, "Review created");
        Ok(review)
    }

    pub async fn update_review(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: ReviewDraft,
    ) -> Result<Review, ShopError> {
        check_review(&draft)?;
        let current = self.owned_review(ctx, id).await?;
        let customer_id = self
            .resolve_new_owner(ctx, draft.customer_id, current.customer_id)
            .await?;
        let exists = self
            .customers
            .review_exists(customer_id, draft.product_id, Some(id))
            .await
            .map_err(map_storage_error)?;
        if exists {
            return Err(ShopError::conflict(
                "customer has already reviewed this product",
            ));
        }

        self.customers
            .update_review(id, customer_id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("review", id))
    }

    pub async fn delete_review(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        self.owned_review(ctx, id).await?;
        self.customers
            .delete_review(id)
            .await
            .map_err(map_storage_error)?;
        Ok(())
    }

    /// Review the caller may modify: staff any, customers their own
    async fn owned_review(&self, ctx: &AuthContext, id: i64) -> Result<Review, ShopError> {
        let scope = self.scope(ctx).await?;
        let review = self.get_review(id).await?;
        if !scope.can_see(review.customer_id) {
            return Err(ShopError::forbidden("only the author may modify a review"));
        }
        Ok(review)
    }
}
