// SocialGaze - ui/mod.rs
//
// Presentation layer: turns finished reports into terminal output.
// Dependencies: app (view states) and core (report types).

pub mod render;
