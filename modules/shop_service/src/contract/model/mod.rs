//! Contract models for shop service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

pub mod account;
pub mod catalog;
pub mod common;
pub mod customer;
pub mod order;
pub mod organization;

pub use account::*;
pub use catalog::*;
pub use common::*;
pub use customer::*;
pub use order::*;
pub use organization::*;
