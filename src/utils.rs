//! Miscellaneous utilities for burrow.
//!
//! - [cli]: command-line argument parsing.
//! - [helpers]: path display and start directory resolution.

pub mod cli;
pub mod helpers;

pub use helpers::{resolve_start_dir, shorten_home_path};
