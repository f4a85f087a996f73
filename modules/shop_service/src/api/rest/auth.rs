//! Bearer-token extraction

use super::error::{map_domain_error, Problem};
use crate::contract::{AuthContext, ShopError};
use crate::domain::Service;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;

/// Caller identity resolved from the `Authorization: Bearer` header.
///
/// Requests without the header are anonymous; a present but invalid token
/// is rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct Caller(pub AuthContext);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Caller(AuthContext::anonymous()));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                map_domain_error(ShopError::unauthorized("malformed Authorization header"))
            })?;

        let service = parts
            .extensions
            .get::<Arc<Service>>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("shop service extension missing from router");
                map_domain_error(ShopError::Internal)
            })?;

        let ctx = service.authenticate(token).await.map_err(map_domain_error)?;
        Ok(Caller(ctx))
    }
}
