// Library surface shared by the binary and the integration tests.
pub mod app_dirs;
pub mod engine;
pub mod keys;
pub mod persistence;
pub mod runtime;
pub mod session;
pub mod ui;
