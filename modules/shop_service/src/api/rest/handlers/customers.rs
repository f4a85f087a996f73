//! Customer profile, favorite and review handlers

use super::super::{
    auth::Caller,
    dto::*,
    error::{map_domain_error, Problem},
};
use super::ordering;
use crate::contract::{CustomerFilter, OwnedFilter, ReviewFilter, ReviewSortField};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

// ===== Profiles =====

/// Public self-registration: creates the account and its profile
pub async fn register_customer(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Json(req): Json<RegisterCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerDto>), Problem> {
    let customer = service
        .register_customer(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

pub async fn list_customers(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<PageDto<CustomerDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let filter = CustomerFilter {
        gender: query.gender,
        search: query.search,
    };
    let customers = service
        .list_customers(&ctx, filter, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(customers.into()))
}

pub async fn my_profile(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
) -> Result<Json<CustomerDto>, Problem> {
    let customer = service.my_profile(&ctx).await.map_err(map_domain_error)?;
    Ok(Json(customer.into()))
}

pub async fn get_customer(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<CustomerDto>, Problem> {
    let customer = service
        .get_customer(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(customer.into()))
}

pub async fn update_customer(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerDto>, Problem> {
    let customer = service
        .update_customer(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(customer.into()))
}

pub async fn delete_customer(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_customer(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Favorites =====

pub async fn list_favorites(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<OwnedQuery>,
) -> Result<Json<PageDto<FavoriteDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let filter = OwnedFilter {
        customer: query.customer,
        product: query.product,
    };
    let favorites = service
        .list_favorites(&ctx, filter, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(favorites.into()))
}

pub async fn my_favorites(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageDto<FavoriteDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let favorites = service
        .my_favorites(&ctx, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(favorites.into()))
}

pub async fn get_favorite(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<FavoriteDto>, Problem> {
    let favorite = service
        .get_favorite(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(favorite.into()))
}

pub async fn create_favorite(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<FavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteDto>), Problem> {
    let favorite = service
        .create_favorite(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(favorite.into())))
}

pub async fn update_favorite(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<FavoriteRequest>,
) -> Result<Json<FavoriteDto>, Problem> {
    let favorite = service
        .update_favorite(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(favorite.into()))
}

pub async fn delete_favorite(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_favorite(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Reviews =====

/// Public review listing
pub async fn list_reviews(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Query(query): Query<ReviewQuery>,
) -> Result<Json<PageDto<ReviewDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let filter = ReviewFilter {
        sort: ordering(query.ordering.as_deref(), ReviewSortField::parse)?,
        customer: query.customer,
        product: query.product,
        rating: query.rating,
        search: query.search,
    };
    let reviews = service
        .list_reviews(filter, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(reviews.into()))
}

pub async fn my_reviews(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageDto<ReviewDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let reviews = service
        .my_reviews(&ctx, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(reviews.into()))
}

pub async fn get_review(
    Extension(service): Extension<Arc<Service>>,
    Caller(_caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<ReviewDto>, Problem> {
    let review = service.get_review(id).await.map_err(map_domain_error)?;
    Ok(Json(review.into()))
}

pub async fn create_review(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewDto>), Problem> {
    let review = service
        .create_review(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(review.into())))
}

pub async fn update_review(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<ReviewDto>, Problem> {
    let review = service
        .update_review(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(review.into()))
}

pub async fn delete_review(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_review(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}
