// Vitrine - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library plus serialisation/traversal crates.
// Must NOT depend on: ui, platform, or app.

pub mod catalog;
pub mod discover;
pub mod export;
pub mod filter;
pub mod model;
