//! Shop Service Module
//!
//! Catalog, customer profiles, the cart → order → promo workflow and the
//! staff organization of a footwear shop, served as a REST API with bearer
//! tokens and as an in-process [`OrderWorkflowApi`] client.

// Public exports
pub mod contract;
pub use contract::{client::OrderWorkflowApi, error::ShopError, AuthContext, Page, PageRequest};

pub mod module;
pub use module::ShopServiceModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
