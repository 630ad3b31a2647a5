// Vitrine - ui/panels/mod.rs

pub mod about;
pub mod catalogs;
pub mod detail;
pub mod filters;
pub mod gallery;
pub mod onboarding;
pub mod options;
pub mod summary;
