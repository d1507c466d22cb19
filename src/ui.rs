//! Terminal UI for burrow.
//!
//! - [render]: frame entry point and screen layout.
//! - [widgets]: draw functions for the header, list, details, status line and overlays.

pub mod render;
pub mod widgets;

pub use render::render;
