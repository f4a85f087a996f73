//! Input rules checked before anything reaches storage

use crate::contract::{Pole, PoleCode, Role, ShopError};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Collects per-field messages and turns them into one `Validation` error
#[derive(Debug, Default)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "this field may not be blank");
        }
    }

    pub fn check_rating(&mut self, rating: i32) {
        if !(1..=5).contains(&rating) {
            self.add("rating", "must be between 1 and 5");
        }
    }

    pub fn check_quantity(&mut self, field: &str, quantity: i32) {
        if quantity < 1 {
            self.add(field, "must be at least 1");
        }
    }

    /// Percentage in 0..=100
    pub fn check_rate(&mut self, field: &str, rate: Decimal) {
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            self.add(field, "must be between 0 and 100");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_result(self) -> Result<(), ShopError> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(ShopError::Validation {
                fields: self.fields,
            })
        }
    }
}

/// Clients-pole roles must be attached to the CLIENTS pole
pub fn validate_role_scope(role: Role, pole: Option<&Pole>) -> Result<(), ShopError> {
    if role.home_pole() != Some(PoleCode::Clients) {
        return Ok(());
    }

    match pole {
        Some(pole) if pole.code == PoleCode::Clients => Ok(()),
        _ => Err(ShopError::invalid(
            "role",
            format!("role {} must be assigned within the CLIENTS pole", role),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pole(code: PoleCode) -> Pole {
        Pole {
            id: 1,
            name: code.to_string(),
            code,
            description: String::new(),
            responsible_id: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn errors_accumulate_per_field() {
        let mut errors = FieldErrors::new();
        errors.require_text("name", "  ");
        errors.check_rating(6);
        errors.check_quantity("quantity", 0);

        let Err(ShopError::Validation { fields }) = errors.into_result() else {
            panic!("expected validation error");
        };
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["rating"], vec!["must be between 1 and 5"]);
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        for rating in 1..=5 {
            let mut errors = FieldErrors::new();
            errors.check_rating(rating);
            assert!(errors.is_empty());
        }
        let mut errors = FieldErrors::new();
        errors.check_rating(0);
        assert!(!errors.is_empty());
    }

    #[test]
    fn rate_must_be_a_percentage() {
        let mut errors = FieldErrors::new();
        errors.check_rate("rate", Decimal::new(10, 0));
        errors.check_rate("rate", Decimal::ONE_HUNDRED);
        assert!(errors.is_empty());

        errors.check_rate("rate", Decimal::new(-1, 0));
        errors.check_rate("rate", Decimal::new(10001, 2));
        assert!(!errors.is_empty());
    }

    #[test]
    fn clients_roles_need_clients_pole() {
        let clients = pole(PoleCode::Clients);
        let products = pole(PoleCode::Products);

        assert!(validate_role_scope(Role::GestionnaireAvis, Some(&clients)).is_ok());
        assert!(validate_role_scope(Role::GestionnaireAvis, Some(&products)).is_err());
        assert!(validate_role_scope(Role::DirecteurClients, None).is_err());
    }

    #[test]
    fn other_roles_are_unconstrained() {
        let clients = pole(PoleCode::Clients);
        assert!(validate_role_scope(Role::Manager, None).is_ok());
        assert!(validate_role_scope(Role::DirecteurProduits, Some(&clients)).is_ok());
    }
}
