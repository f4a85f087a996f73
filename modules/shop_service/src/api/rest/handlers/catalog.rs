//! Catalog handlers; reads are public, writes need a signed-in caller

use super::super::{
    auth::Caller,
    dto::*,
    error::{map_domain_error, Problem},
};
use super::ordering;
use crate::contract::{ArticleFilter, ProductFilter, ProductSortField};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

// ===== Categories =====

pub async fn list_categories(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageDto<CategoryDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let categories = service
        .list_categories(page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(categories.into()))
}

pub async fn get_category(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<CategoryDto>, Problem> {
    let category = service.get_category(id).await.map_err(map_domain_error)?;
    Ok(Json(category.into()))
}

pub async fn create_category(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryDto>), Problem> {
    let category = service
        .create_category(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

pub async fn update_category(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<CategoryDto>, Problem> {
    let category = service
        .update_category(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(category.into()))
}

pub async fn delete_category(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_category(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Sub-categories =====

pub async fn list_sub_categories(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Query(query): Query<SubCategoryQuery>,
) -> Result<Json<PageDto<SubCategoryDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let subs = service
        .list_sub_categories(query.category, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(subs.into()))
}

pub async fn get_sub_category(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<SubCategoryDto>, Problem> {
    let sub = service
        .get_sub_category(id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(sub.into()))
}

pub async fn create_sub_category(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<SubCategoryRequest>,
) -> Result<(StatusCode, Json<SubCategoryDto>), Problem> {
    let sub = service
        .create_sub_category(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(sub.into())))
}

pub async fn update_sub_category(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<SubCategoryRequest>,
) -> Result<Json<SubCategoryDto>, Problem> {
    let sub = service
        .update_sub_category(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(sub.into()))
}

pub async fn delete_sub_category(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_sub_category(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Products =====

/// List products with filters, search and ordering
pub async fn list_products(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Query(query): Query<ProductQuery>,
) -> Result<Json<PageDto<ProductDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let filter = ProductFilter {
        sort: ordering(query.ordering.as_deref(), ProductSortField::parse)?,
        category: query.category,
        origin: query.origin,
        sole_type: query.sole_type,
        search: query.search,
    };
    let products = service
        .list_products(filter, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(products.into()))
}

/// Product with its articles, media and promotions
pub async fn get_product(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<ProductDetailDto>, Problem> {
    let detail = service.get_product(id).await.map_err(map_domain_error)?;
    Ok(Json(detail.into()))
}

pub async fn create_product(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductDto>), Problem> {
    let product = service
        .create_product(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

pub async fn update_product(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<ProductDto>, Problem> {
    let product = service
        .update_product(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(product.into()))
}

/// Delete a product; its articles, media, promotions and order lines go with it
pub async fn delete_product(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_product(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Articles =====

pub async fn list_articles(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Query(query): Query<ArticleQuery>,
) -> Result<Json<PageDto<ArticleDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let filter = ArticleFilter {
        product: query.product,
        color: query.color,
        size: query.size,
        search: query.search,
    };
    let articles = service
        .list_articles(filter, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(articles.into()))
}

pub async fn get_article(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<ArticleDto>, Problem> {
    let article = service.get_article(id).await.map_err(map_domain_error)?;
    Ok(Json(article.into()))
}

pub async fn create_article(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<ArticleRequest>,
) -> Result<(StatusCode, Json<ArticleDto>), Problem> {
    let article = service
        .create_article(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(article.into())))
}

pub async fn update_article(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<ArticleRequest>,
) -> Result<Json<ArticleDto>, Problem> {
    let article = service
        .update_article(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(article.into()))
}

pub async fn delete_article(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_article(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Media =====

pub async fn list_media(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Query(query): Query<ProductChildQuery>,
) -> Result<Json<PageDto<MediaDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let media = service
        .list_media(query.product, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(media.into()))
}

pub async fn get_media(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<MediaDto>, Problem> {
    let media = service.get_media(id).await.map_err(map_domain_error)?;
    Ok(Json(media.into()))
}

pub async fn create_media(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<MediaRequest>,
) -> Result<(StatusCode, Json<MediaDto>), Problem> {
    let media = service
        .create_media(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(media.into())))
}

pub async fn update_media(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<MediaRequest>,
) -> Result<Json<MediaDto>, Problem> {
    let media = service
        .update_media(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(media.into()))
}

pub async fn delete_media(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_media(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Promotions =====

pub async fn list_promotions(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Query(query): Query<ProductChildQuery>,
) -> Result<Json<PageDto<PromotionDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let promotions = service
        .list_promotions(query.product, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(promotions.into()))
}

pub async fn get_promotion(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<PromotionDto>, Problem> {
    let promotion = service.get_promotion(id).await.map_err(map_domain_error)?;
    Ok(Json(promotion.into()))
}

pub async fn create_promotion(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<PromotionRequest>,
) -> Result<(StatusCode, Json<PromotionDto>), Problem> {
    let promotion = service
        .create_promotion(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(promotion.into())))
}

pub async fn update_promotion(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<PromotionRequest>,
) -> Result<Json<PromotionDto>, Problem> {
    let promotion = service
        .update_promotion(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(promotion.into()))
}

pub async fn delete_promotion(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_promotion(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Catalogues =====

pub async fn list_catalogues(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageDto<CatalogueDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let catalogues = service
        .list_catalogues(page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(catalogues.into()))
}

pub async fn get_catalogue(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<CatalogueDto>, Problem> {
    let catalogue = service.get_catalogue(id).await.map_err(map_domain_error)?;
    Ok(Json(catalogue.into()))
}

pub async fn create_catalogue(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<CatalogueRequest>,
) -> Result<(StatusCode, Json<CatalogueDto>), Problem> {
    let catalogue = service
        .create_catalogue(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(catalogue.into())))
}

pub async fn update_catalogue(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<CatalogueRequest>,
) -> Result<Json<CatalogueDto>, Problem> {
    let catalogue = service
        .update_catalogue(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(catalogue.into()))
}

pub async fn delete_catalogue(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_catalogue(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}
