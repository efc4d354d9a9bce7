// SocialGaze - lib.rs
//
// Library entry point, exposing all layers for integration testing
// and programmatic use. The CLI lives in `main.rs`.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
