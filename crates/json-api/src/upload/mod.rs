//! Image upload handlers.

pub(crate) mod image;
