//! PR Maker Domain Concerns

pub mod promotions;
