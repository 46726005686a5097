//! PR bubble handlers.

pub(crate) mod active;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod duplicate;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod redirect;
pub(crate) mod stats;
pub(crate) mod track;
pub(crate) mod update;
