//! Storefront domain, persistence, and payment-gateway modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod gateway;
pub mod uuids;
