// Vitrine - lib.rs
//
// Crate library surface: every layer except the GUI shell, so the
// integration tests under tests/ can drive catalogue loading, state,
// and persistence without opening a window.
//
// `gui` stays binary-only (declared in main.rs); the eframe wiring is
// not part of the library API.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
