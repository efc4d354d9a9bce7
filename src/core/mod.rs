// SocialGaze - core/mod.rs
//
// Core business logic layer.
// Dependencies: csv/serde for parsing and serialisation only.
// Must NOT depend on: ui, platform, app, or touch the filesystem.

pub mod aggregate;
pub mod dashboard;
pub mod export;
pub mod loader;
pub mod matcher;
pub mod model;
