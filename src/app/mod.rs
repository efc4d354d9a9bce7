// SocialGaze - app/mod.rs
//
// Application layer: source acquisition and the load lifecycle.
// Dependencies: core and platform layers.
// Must NOT depend on: ui.

pub mod source;
pub mod state;
