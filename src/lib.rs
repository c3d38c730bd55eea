// The binary entry point is main.rs; the library exposes the model, store and
// widgets so integration tests can drive them without a terminal.

pub mod app;
pub mod config;
pub mod event;
pub mod model;
pub mod store;
pub mod ui;
