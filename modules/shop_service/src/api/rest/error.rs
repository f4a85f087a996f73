//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::ShopError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Per-field validation messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            errors: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add instance URI
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Attach field errors
    pub fn with_errors(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
        self.errors = Some(errors);
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: ShopError) -> Problem {
    match error {
        ShopError::NotFound { resource, id } => {
            Problem::new(StatusCode::NOT_FOUND, format!("{} Not Found", resource))
                .with_detail(format!("{} with id '{}' was not found", resource, id))
        }

        ShopError::Conflict { reason } => {
            Problem::new(StatusCode::CONFLICT, "Conflict").with_detail(reason)
        }

        ShopError::Validation { fields } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error")
                .with_detail("One or more fields are invalid")
                .with_errors(fields)
        }

        ShopError::Unauthorized { reason } => {
            Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized").with_detail(reason)
        }

        ShopError::Forbidden { reason } => {
            Problem::new(StatusCode::FORBIDDEN, "Forbidden").with_detail(reason)
        }

        ShopError::Internal => {
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("An unexpected error occurred")
        }
    }
}

/// Map a malformed query or path parameter to a validation problem
pub fn invalid_parameter(field: &str, message: impl Into<String>) -> Problem {
    map_domain_error(ShopError::invalid(field, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_carries_field_errors() {
        let problem = map_domain_error(ShopError::invalid("rating", "must be between 1 and 5"));
        assert_eq!(problem.status, 400);
        let errors = problem.errors.unwrap();
        assert_eq!(errors["rating"], vec!["must be between 1 and 5".to_string()]);
    }

    #[test]
    fn internal_hides_details() {
        let problem = map_domain_error(ShopError::Internal);
        assert_eq!(problem.status, 500);
        assert_eq!(problem.detail.as_deref(), Some("An unexpected error occurred"));
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(map_domain_error(ShopError::not_found("order", 1)).status, 404);
        assert_eq!(map_domain_error(ShopError::conflict("dup")).status, 409);
        assert_eq!(map_domain_error(ShopError::unauthorized("x")).status, 401);
        assert_eq!(map_domain_error(ShopError::forbidden("x")).status, 403);
    }
}
