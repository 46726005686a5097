//! PR bubble HTTP surface.

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod requests;
