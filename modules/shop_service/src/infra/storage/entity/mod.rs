//! SeaORM entities for database tables

pub mod account;
pub mod catalog;
pub mod customer;
pub mod order;
pub mod organization;
pub mod staff_profile;
