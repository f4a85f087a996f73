//! Infrastructure layer - storage and credential handling

pub mod auth;
pub mod storage;
