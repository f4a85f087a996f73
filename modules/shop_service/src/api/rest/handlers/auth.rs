//! Token and account handlers

use super::super::{
    auth::Caller,
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

/// Exchange credentials for an access/refresh pair
pub async fn obtain_token(
    Extension(service): Extension<Arc<Service>>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenPairDto>, Problem> {
    let pair = service
        .login(&req.username, &req.password)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(pair.into()))
}

/// Mint a new access token from a refresh token
pub async fn refresh_token(
    Extension(service): Extension<Arc<Service>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<AccessTokenDto>, Problem> {
    let access = service
        .refresh_token(&req.refresh)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(AccessTokenDto { access }))
}

/// Check signature and expiry of a token
pub async fn verify_token(
    Extension(service): Extension<Arc<Service>>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<serde_json::Value>, Problem> {
    service.verify_token(&req.token).map_err(map_domain_error)?;
    Ok(Json(serde_json::json!({})))
}

pub async fn current_account(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
) -> Result<Json<AccountDto>, Problem> {
    let account = service
        .current_account(&ctx)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(account.into()))
}

// ===== Account administration =====

pub async fn list_accounts(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageDto<AccountDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let accounts = service
        .list_accounts(&ctx, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(accounts.into()))
}

pub async fn get_account(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<AccountDetailDto>, Problem> {
    let account = service
        .get_account(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(account.into()))
}

pub async fn create_account(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountDetailDto>), Problem> {
    let account = service
        .create_account(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

pub async fn update_account(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<AccountDetailDto>, Problem> {
    let account = service
        .update_account(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(account.into()))
}

pub async fn delete_account(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_account(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}
