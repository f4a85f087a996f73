//! Catalog store: readable by anyone, writable by any authenticated caller

use super::Service;
use crate::contract::{
    Article, ArticleDraft, ArticleFilter, AuthContext, Catalogue, CatalogueDraft, Category,
    CategoryDraft, Media, MediaDraft, Page, PageRequest, Product, ProductDetail, ProductDraft,
    ProductFilter, Promotion, PromotionDraft, ShopError, SubCategory, SubCategoryDraft,
};
use crate::domain::access::require_authenticated;
use crate::domain::errors::map_storage_error;
use crate::domain::validation::FieldErrors;

fn check_product(draft: &ProductDraft) -> Result<(), ShopError> {
    let mut errors = FieldErrors::new();
    errors.require_text("name", &draft.name);
    if let Some(materials) = &draft.raw_materials {
        if !materials.is_object() {
            errors.add("raw_materials", "must be an object of key/value pairs");
        }
    }
    errors.into_result()
}

fn check_promotion(draft: &PromotionDraft) -> Result<(), ShopError> {
    let mut errors = FieldErrors::new();
    errors.require_text("promo_type", &draft.promo_type);
    if draft.end_date < draft.start_date {
        errors.add("end_date", "must not be before start_date");
    }
    errors.into_result()
}

fn required_name(name: &str) -> Result<(), ShopError> {
    let mut errors = FieldErrors::new();
    errors.require_text("name", name);
    errors.into_result()
}

impl Service {
    // ===== Categories =====

    pub async fn list_categories(&self, page: PageRequest) -> Result<Page<Category>, ShopError> {
        self.catalog
            .list_categories(page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, ShopError> {
        self.catalog
            .find_category(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("category", id))
    }

    pub async fn create_category(
        &self,
        ctx: &AuthContext,
        draft: CategoryDraft,
    ) -> Result<Category, ShopError> {
        require_authenticated(ctx)?;
        required_name(&draft.name)?;
        self.catalog
            .create_category(&draft)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_category(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: CategoryDraft,
    ) -> Result<Category, ShopError> {
        require_authenticated(ctx)?;
        required_name(&draft.name)?;
        self.catalog
            .update_category(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("category", id))
    }

    pub async fn delete_category(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_authenticated(ctx)?;
        let deleted = self
            .catalog
            .delete_category(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("category", id))
    }

    // ===== Sub-categories =====

    pub async fn list_sub_categories(
        &self,
        category: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<SubCategory>, ShopError> {
        self.catalog
            .list_sub_categories(category, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_sub_category(&self, id: i64) -> Result<SubCategory, ShopError> {
        self.catalog
            .find_sub_category(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("sub_category", id))
    }

    pub async fn create_sub_category(
        &self,
        ctx: &AuthContext,
        draft: SubCategoryDraft,
    ) -> Result<SubCategory, ShopError> {
        require_authenticated(ctx)?;
        required_name(&draft.name)?;
        self.catalog
            .create_sub_category(&draft)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_sub_category(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: SubCategoryDraft,
    ) -> Result<SubCategory, ShopError> {
        require_authenticated(ctx)?;
        required_name(&draft.name)?;
        self.catalog
            .update_sub_category(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("sub_category", id))
    }

    pub async fn delete_sub_category(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_authenticated(ctx)?;
        let deleted = self
            .catalog
            .delete_sub_category(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("sub_category", id))
    }

    // ===== Products =====

    pub async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, ShopError> {
        self.catalog
            .list_products(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_product(&self, id: i64) -> Result<ProductDetail, ShopError> {
        self.catalog
            .product_detail(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("product", id))
    }

    pub async fn create_product(
        &self,
        ctx: &AuthContext,
        draft: ProductDraft,
    ) -> Result<Product, ShopError> {
        require_authenticated(ctx)?;
        check_product(&draft)?;
        let product = self
            .catalog
            .create_product(&draft)
            .await
            .map_err(map_storage_error)?;
        tracing::debug!(product_id = product.id, "Product created");
        Ok(product)
    }

    pub async fn update_product(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: ProductDraft,
    ) -> Result<Product, ShopError> {
        require_authenticated(ctx)?;
        check_product(&draft)?;
        self.catalog
            .update_product(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("product", id))
    }

    /// Also removes everything hanging off the product, order lines included
    pub async fn delete_product(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_authenticated(ctx)?;
        let deleted = self
            .catalog
            .delete_product(id)
            .await
            .map_err(map_storage_error)?;
        if !deleted {
            return Err(ShopError::not_found("product", id));
        }
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }

    // ===== Articles =====

    pub async fn list_articles(
        &self,
        filter: ArticleFilter,
        page: PageRequest,
    ) -> Result<Page<Article>, ShopError> {
        self.catalog
            .list_articles(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_article(&self, id: i64) -> Result<Article, ShopError> {
        self.catalog
            .find_article(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("article", id))
    }

    pub async fn create_article(
        &self,
        ctx: &AuthContext,
        draft: ArticleDraft,
    ) -> Result<Article, ShopError> {
        require_authenticated(ctx)?;
        let mut errors = FieldErrors::new();
        errors.require_text("barcode", &draft.barcode);
        errors.into_result()?;
        self.catalog
            .create_article(&draft)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_article(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: ArticleDraft,
    ) -> Result<Article, ShopError> {
        require_authenticated(ctx)?;
        let mut errors = FieldErrors::new();
        errors.require_text("barcode", &draft.barcode);
        errors.into_result()?;
        self.catalog
            .update_article(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("article", id))
    }

    /// Order lines that pointed at the article keep their product and price
    pub async fn delete_article(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_authenticated(ctx)?;
        let deleted = self
            .catalog
            .delete_article(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("article", id))
    }

    // ===== Media =====

    pub async fn list_media(
        &self,
        product: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<Media>, ShopError> {
        self.catalog
            .list_media(product, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_media(&self, id: i64) -> Result<Media, ShopError> {
        self.catalog
            .find_media(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("media", id))
    }

    pub async fn create_media(
        &self,
        ctx: &AuthContext,
        draft: MediaDraft,
    ) -> Result<Media, ShopError> {
        require_authenticated(ctx)?;
        let mut errors = FieldErrors::new();
        errors.require_text("url", &draft.url);
        errors.into_result()?;
        self.catalog
            .create_media(&draft)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_media(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: MediaDraft,
    ) -> Result<Media, ShopError> {
        require_authenticated(ctx)?;
        let mut errors = FieldErrors::new();
        errors.require_text("url", &draft.url);
        errors.into_result()?;
        self.catalog
            .update_media(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("media", id))
    }

    pub async fn delete_media(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_authenticated(ctx)?;
        let deleted = self
            .catalog
            .delete_media(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("media", id))
    }

    // ===== Promotions =====

    pub async fn list_promotions(
        &self,
        product: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<Promotion>, ShopError> {
        self.catalog
            .list_promotions(product, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_promotion(&self, id: i64) -> Result<Promotion, ShopError> {
        self.catalog
            .find_promotion(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("promotion", id))
    }

    pub async fn create_promotion(
        &self,
        ctx: &AuthContext,
        draft: PromotionDraft,
    ) -> Result<Promotion, ShopError> {
        require_authenticated(ctx)?;
        check_promotion(&draft)?;
        self.catalog
            .create_promotion(&draft)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_promotion(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: PromotionDraft,
    ) -> Result<Promotion, ShopError> {
        require_authenticated(ctx)?;
        check_promotion(&draft)?;
        self.catalog
            .update_promotion(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("promotion", id))
    }

    pub async fn delete_promotion(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_authenticated(ctx)?;
        let deleted = self
            .catalog
            .delete_promotion(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("promotion", id))
    }

    // ===== Catalogues =====

    pub async fn list_catalogues(&self, page: PageRequest) -> Result<Page<Catalogue>, ShopError> {
        self.catalog
            .list_catalogues(page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_catalogue(&self, id: i64) -> Result<Catalogue, ShopError> {
        self.catalog
            .find_catalogue(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("catalogue", id))
    }

    pub async fn create_catalogue(
        &self,
        ctx: &AuthContext,
        draft: CatalogueDraft,
    ) -> Result<Catalogue, ShopError> {
        require_authenticated(ctx)?;
        required_name(&draft.name)?;
        self.catalog
            .create_catalogue(&draft)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_catalogue(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: CatalogueDraft,
    ) -> Result<Catalogue, ShopError> {
        require_authenticated(ctx)?;
        required_name(&draft.name)?;
        self.catalog
            .update_catalogue(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("catalogue", id))
    }

    pub async fn delete_catalogue(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_authenticated(ctx)?;
        let deleted = self
            .catalog
            .delete_catalogue(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("catalogue", id))
    }
}
