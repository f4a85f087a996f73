//! Contract error types for shop service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use std::collections::BTreeMap;

/// Shop service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShopError {
    /// Entity not found (or not visible to the caller)
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (product, order, promo_code, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// Uniqueness or state conflict
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Input rejected, keyed by field name
    #[error("Validation error: {}", format_fields(.fields))]
    Validation {
        fields: BTreeMap<String, Vec<String>>,
    },

    /// Missing or invalid credentials
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// Authenticated but not allowed
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    /// Unexpected storage or infrastructure failure
    #[error("Internal error")]
    Internal,
}

impl ShopError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    /// Single-field validation error
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.to_string(), vec![message.into()]);
        Self::Validation { fields }
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}

fn format_fields(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join("; ")))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_lists_fields() {
        let err = ShopError::invalid("rating", "must be between 1 and 5");
        assert_eq!(
            err.to_string(),
            "Validation error: rating: must be between 1 and 5"
        );
    }

    #[test]
    fn not_found_display() {
        let err = ShopError::not_found("order", 42);
        assert_eq!(err.to_string(), "order not found: 42");
    }
}
