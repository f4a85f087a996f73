//! Staff organization: poles, services, teams and role assignments

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Fixed set of poles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoleCode {
    Clients,
    Commandes,
    Products,
}

impl PoleCode {
    pub const ALL: [PoleCode; 3] = [PoleCode::Clients, PoleCode::Commandes, PoleCode::Products];

    pub fn as_str(self) -> &'static str {
        match self {
            PoleCode::Clients => "CLIENTS",
            PoleCode::Commandes => "COMMANDES",
            PoleCode::Products => "PRODUCTS",
        }
    }
}

impl fmt::Display for PoleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoleCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PoleCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| format!("unknown pole code '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pole {
    pub id: i64,
    pub name: String,
    pub code: PoleCode,
    pub description: String,
    pub responsible_id: Option<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoleDraft {
    pub name: String,
    pub code: PoleCode,
    pub description: String,
    pub responsible_id: Option<i64>,
    pub active: bool,
}

/// Organizational service inside a pole
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUnit {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub pole_id: i64,
    pub responsible_id: Option<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUnitDraft {
    pub name: String,
    pub description: String,
    pub pole_id: i64,
    pub responsible_id: Option<i64>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub service_id: i64,
    pub responsible_id: Option<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDraft {
    pub name: String,
    pub description: String,
    pub service_id: i64,
    pub responsible_id: Option<i64>,
    pub active: bool,
}

/// Which unit a membership row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitRef {
    Service(i64),
    Team(i64),
}

/// Account membership in a service or team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: i64,
    pub unit: UnitRef,
    pub account_id: i64,
    pub assigned_at: DateTime<Utc>,
    pub active: bool,
}

/// Organization-wide and pole-specific roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
    Employee,
    External,
    DirecteurClients,
    ResponsableCrm,
    GestionnaireAvis,
    DirecteurCommandes,
    ResponsableLogistique,
    GestionnairePromo,
    DirecteurProduits,
    ResponsableCatalogue,
    GestionnairePromotion,
}

impl Role {
    pub const ALL: [Role; 14] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Manager,
        Role::Employee,
        Role::External,
        Role::DirecteurClients,
        Role::ResponsableCrm,
        Role::GestionnaireAvis,
        Role::DirecteurCommandes,
        Role::ResponsableLogistique,
        Role::GestionnairePromo,
        Role::DirecteurProduits,
        Role::ResponsableCatalogue,
        Role::GestionnairePromotion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPERADMIN",
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Employee => "EMPLOYEE",
            Role::External => "EXTERNAL",
            Role::DirecteurClients => "DIRECTEUR_CLIENTS",
            Role::ResponsableCrm => "RESPONSABLE_CRM",
            Role::GestionnaireAvis => "GESTIONNAIRE_AVIS",
            Role::DirecteurCommandes => "DIRECTEUR_COMMANDES",
            Role::ResponsableLogistique => "RESPONSABLE_LOGISTIQUE",
            Role::GestionnairePromo => "GESTIONNAIRE_PROMO",
            Role::DirecteurProduits => "DIRECTEUR_PRODUITS",
            Role::ResponsableCatalogue => "RESPONSABLE_CATALOGUE",
            Role::GestionnairePromotion => "GESTIONNAIRE_PROMOTION",
        }
    }

    /// Pole this role is tied to, if any
    pub fn home_pole(self) -> Option<PoleCode> {
        match self {
            Role::DirecteurClients | Role::ResponsableCrm | Role::GestionnaireAvis => {
                Some(PoleCode::Clients)
            }
            Role::DirecteurCommandes | Role::ResponsableLogistique | Role::GestionnairePromo => {
                Some(PoleCode::Commandes)
            }
            Role::DirecteurProduits
            | Role::ResponsableCatalogue
            | Role::GestionnairePromotion => Some(PoleCode::Products),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub id: i64,
    pub account_id: i64,
    pub role: Role,
    pub pole_id: Option<i64>,
    pub service_id: Option<i64>,
    pub team_id: Option<i64>,
    pub assigned_at: DateTime<Utc>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentDraft {
    pub account_id: i64,
    pub role: Role,
    pub pole_id: Option<i64>,
    pub service_id: Option<i64>,
    pub team_id: Option<i64>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleFilter {
    pub account: Option<i64>,
    pub role: Option<Role>,
    pub pole: Option<i64>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_its_code() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("JANITOR".parse::<Role>().is_err());
    }

    #[test]
    fn clients_roles_belong_to_clients_pole() {
        assert_eq!(Role::GestionnaireAvis.home_pole(), Some(PoleCode::Clients));
        assert_eq!(Role::Manager.home_pole(), None);
    }
}
