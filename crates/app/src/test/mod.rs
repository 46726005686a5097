//! Shared test infrastructure.

pub mod db;
pub mod helpers;

pub use context::TestContext;
