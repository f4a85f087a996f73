//! Accounts and issued tokens

use chrono::{DateTime, NaiveDate, Utc};

/// Login identity shared by customers and staff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Account {
    /// "First Last", falling back to the username
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }
}

/// Account plus its stored password hash (never leaves the domain layer)
#[derive(Debug, Clone)]
pub struct StoredAccount {
    pub account: Account,
    pub password_hash: String,
}

/// Input for creating an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Initial staff profile; the matricule defaults to `MAT{id}`
    pub profile: StaffProfileChanges,
}

/// Partial account update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
    pub is_active: Option<bool>,
    pub profile: Option<StaffProfileChanges>,
}

/// HR details of a back-office account, one per account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffProfile {
    pub account_id: i64,
    /// Employee number, unique across profiles
    pub matricule: String,
    /// Stored path or URL of the photo
    pub photo: Option<String>,
    pub phone: String,
    pub address: String,
    pub hire_date: Option<NaiveDate>,
    pub job_title: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Staff profile fields to set; `None` keeps the current (or default) value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffProfileChanges {
    pub matricule: Option<String>,
    pub photo: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub job_title: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
}

/// Account with its staff profile, if it has one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDetail {
    pub account: Account,
    pub profile: Option<StaffProfile>,
}

/// Access/refresh token pair returned by login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}
