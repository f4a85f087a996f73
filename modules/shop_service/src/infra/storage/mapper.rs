//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use crate::contract::{
    Account, AccountDetail, AccountSummary, Article, CartEntry, Catalogue, Category, Customer,
    Discount, Favorite, Media, Membership, Order, OrderLine, OrderStatus, Pole, PoleCode, Product,
    PromoCode, Promotion, Return, Review, Role, RoleAssignment, ServiceUnit, StaffProfile,
    StoredAccount, SubCategory, Team, UnitRef,
};
use rust_decimal::Decimal;

use super::entity::{account, catalog, customer, order, organization, staff_profile};

/// Two-decimal scale regardless of backend (SQLite hands decimals back as floats)
pub(crate) fn money(value: Decimal) -> Decimal {
    let mut value = value;
    value.rescale(2);
    value
}

// ===== Accounts =====

impl From<account::Model> for Account {
    fn from(entity: account::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            is_staff: entity.is_staff,
            is_superuser: entity.is_superuser,
            is_active: entity.is_active,
            date_joined: entity.date_joined,
            last_login: entity.last_login,
        }
    }
}

impl From<account::Model> for StoredAccount {
    fn from(entity: account::Model) -> Self {
        let password_hash = entity.password_hash.clone();
        Self {
            account: entity.into(),
            password_hash,
        }
    }
}

impl From<staff_profile::Model> for StaffProfile {
    fn from(entity: staff_profile::Model) -> Self {
        Self {
            account_id: entity.account_id,
            matricule: entity.matricule,
            photo: entity.photo,
            phone: entity.phone,
            address: entity.address,
            hire_date: entity.hire_date,
            job_title: entity.job_title,
            bio: entity.bio,
            skills: skills(&entity.skills),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// String entries of a stored skills array; anything else is dropped
fn skills(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn account_detail(
    entity: account::Model,
    profile: Option<staff_profile::Model>,
) -> AccountDetail {
    AccountDetail {
        account: entity.into(),
        profile: profile.map(Into::into),
    }
}

impl From<account::Model> for AccountSummary {
    fn from(entity: account::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
        }
    }
}

// ===== Catalog =====

impl From<catalog::category::Model> for Category {
    fn from(entity: catalog::category::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
        }
    }
}

impl From<catalog::sub_category::Model> for SubCategory {
    fn from(entity: catalog::sub_category::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            category_id: entity.category_id,
        }
    }
}

/// Product row plus its category links
pub(crate) fn product(entity: catalog::product::Model, category_ids: Vec<i64>) -> Product {
    Product {
        id: entity.id,
        name: entity.name,
        price: money(entity.price),
        description: entity.description,
        sole_type: entity.sole_type,
        raw_materials: entity.raw_materials,
        origin: entity.origin,
        category_ids,
    }
}

impl From<catalog::article::Model> for Article {
    fn from(entity: catalog::article::Model) -> Self {
        Self {
            id: entity.id,
            product_id: entity.product_id,
            color: entity.color,
            size: entity.size,
            barcode: entity.barcode,
            purchase_date: entity.purchase_date,
        }
    }
}

impl From<catalog::media::Model> for Media {
    fn from(entity: catalog::media::Model) -> Self {
        Self {
            id: entity.id,
            product_id: entity.product_id,
            media_type: entity.media_type,
            url: entity.url,
        }
    }
}

impl From<catalog::promotion::Model> for Promotion {
    fn from(entity: catalog::promotion::Model) -> Self {
        Self {
            id: entity.id,
            product_id: entity.product_id,
            promo_type: entity.promo_type,
            reduction: money(entity.reduction),
            start_date: entity.start_date,
            end_date: entity.end_date,
        }
    }
}

pub(crate) fn catalogue(entity: catalog::catalogue::Model, product_ids: Vec<i64>) -> Catalogue {
    Catalogue {
        id: entity.id,
        name: entity.name,
        description: entity.description,
        created_on: entity.created_on,
        product_ids,
    }
}

// ===== Customers =====

pub(crate) fn customer(entity: customer::customer::Model, account: account::Model) -> Customer {
    Customer {
        id: entity.id,
        account: account.into(),
        last_name: entity.last_name,
        first_name: entity.first_name,
        phone: entity.phone,
        gender: entity.gender,
        loyalty_points: entity.loyalty_points,
    }
}

impl From<customer::favorite::Model> for Favorite {
    fn from(entity: customer::favorite::Model) -> Self {
        Self {
            id: entity.id,
            customer_id: entity.customer_id,
            product_id: entity.product_id,
            added_at: entity.added_at,
        }
    }
}

impl From<customer::review::Model> for Review {
    fn from(entity: customer::review::Model) -> Self {
        Self {
            id: entity.id,
            customer_id: entity.customer_id,
            product_id: entity.product_id,
            rating: entity.rating,
            comment: entity.comment,
            created_at: entity.created_at,
        }
    }
}

// ===== Orders =====

impl From<order::order_status::Model> for OrderStatus {
    fn from(entity: order::order_status::Model) -> Self {
        Self {
            id: entity.id,
            label: entity.label,
        }
    }
}

impl From<order::order::Model> for Order {
    fn from(entity: order::order::Model) -> Self {
        Self {
            id: entity.id,
            customer_id: entity.customer_id,
            order_date: entity.order_date,
            address: entity.address,
            region: entity.region,
            status_id: entity.status_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<order::order_line::Model> for OrderLine {
    fn from(entity: order::order_line::Model) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            product_id: entity.product_id,
            article_id: entity.article_id,
            quantity: entity.quantity,
            unit_price: money(entity.unit_price),
        }
    }
}

/// Cart entry priced from its product row
pub(crate) fn cart_entry(entity: order::cart_entry::Model, price: Decimal) -> CartEntry {
    CartEntry {
        id: entity.id,
        customer_id: entity.customer_id,
        product_id: entity.product_id,
        quantity: entity.quantity,
        added_at: entity.added_at,
        unit_price: money(price),
    }
}

impl From<order::discount::Model> for Discount {
    fn from(entity: order::discount::Model) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            rate: money(entity.rate),
            created_at: entity.created_at,
        }
    }
}

impl From<order::promo_code::Model> for PromoCode {
    fn from(entity: order::promo_code::Model) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            rate: money(entity.rate),
            order_id: entity.order_id,
            start_date: entity.start_date,
            end_date: entity.end_date,
            active: entity.active,
        }
    }
}

impl From<order::order_return::Model> for Return {
    fn from(entity: order::order_return::Model) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            reason: entity.reason,
            return_date: entity.return_date,
            created_at: entity.created_at,
        }
    }
}

// ===== Organization =====
//
// Enum columns are plain strings; an unknown value means the row was written
// outside this service and is reported as a storage error.

impl TryFrom<organization::pole::Model> for Pole {
    type Error = anyhow::Error;

    fn try_from(entity: organization::pole::Model) -> Result<Self, Self::Error> {
        let code: PoleCode = entity.code.parse().map_err(anyhow::Error::msg)?;
        Ok(Self {
            id: entity.id,
            name: entity.name,
            code,
            description: entity.description,
            responsible_id: entity.responsible_id,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<organization::org_service::Model> for ServiceUnit {
    fn from(entity: organization::org_service::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            pole_id: entity.pole_id,
            responsible_id: entity.responsible_id,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<organization::team::Model> for Team {
    fn from(entity: organization::team::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            service_id: entity.service_id,
            responsible_id: entity.responsible_id,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<organization::service_member::Model> for Membership {
    fn from(entity: organization::service_member::Model) -> Self {
        Self {
            id: entity.id,
            unit: UnitRef::Service(entity.service_id),
            account_id: entity.account_id,
            assigned_at: entity.assigned_at,
            active: entity.active,
        }
    }
}

impl From<organization::team_member::Model> for Membership {
    fn from(entity: organization::team_member::Model) -> Self {
        Self {
            id: entity.id,
            unit: UnitRef::Team(entity.team_id),
            account_id: entity.account_id,
            assigned_at: entity.assigned_at,
            active: entity.active,
        }
    }
}

impl TryFrom<organization::role_assignment::Model> for RoleAssignment {
    type Error = anyhow::Error;

    fn try_from(entity: organization::role_assignment::Model) -> Result<Self, Self::Error> {
        let role: Role = entity.role.parse().map_err(anyhow::Error::msg)?;
        Ok(Self {
            id: entity.id,
            account_id: entity.account_id,
            role,
            pole_id: entity.pole_id,
            service_id: entity.service_id,
            team_id: entity.team_id,
            assigned_at: entity.assigned_at,
            active: entity.active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    #[test]
    fn money_is_scaled_to_cents() {
        let price = Decimal::from_str("89.9").unwrap();
        assert_eq!(money(price).to_string(), "89.90");
        assert_eq!(money(Decimal::from(10)).to_string(), "10.00");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let row = organization::role_assignment::Model {
            id: 1,
            account_id: 1,
            role: "JANITOR".to_string(),
            pole_id: None,
            service_id: None,
            team_id: None,
            assigned_at: Utc::now(),
            active: true,
        };
        assert!(RoleAssignment::try_from(row).is_err());
    }

    #[test]
    fn non_string_skills_are_dropped() {
        let stored = serde_json::json!(["sourcing", 3, "inventory", null]);
        assert_eq!(skills(&stored), vec!["sourcing", "inventory"]);
        assert!(skills(&serde_json::json!({"lead": true})).is_empty());
    }
}
