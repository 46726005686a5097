//! Promotions

pub mod errors;
pub mod models;
pub mod redirect;
mod repository;
pub mod service;
mod validate;

pub use errors::PromotionsServiceError;
pub use service::*;
