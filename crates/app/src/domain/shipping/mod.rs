//! Shipping rate resolution

pub mod models;
pub mod repository;
pub mod service;

pub use repository::*;
pub use service::*;
