//! Domain layer - business logic and services

pub mod access;
pub mod auth;
pub mod errors;
pub mod pricing;
pub mod repository;
pub mod service;
pub mod validation;

pub use auth::{PasswordHasher, TokenAuthority, VerifiedToken};
pub use errors::map_storage_error;
pub use repository::{
    AccountRepository, CatalogRepository, CustomerRepository, OrderRepository,
    OrganizationRepository,
};
pub use service::{Repositories, Service};
