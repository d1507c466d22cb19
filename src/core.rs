//! Core runtime logic for burrow.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory listing and file metadata (see [browse_dir], [FileEntry]).
//! - [formatter]: formatting helpers for sizes, times, permissions and exact-width text.
//! - [fuzzy]: fuzzy ranking behind the search filter.
//! - [names]: sanitizing and de-duplicating names for new entries.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.
//! - [proc]: the external editor and the shell handoff.

pub mod fm;
pub mod formatter;
pub mod fuzzy;
pub mod names;
pub mod proc;
pub mod terminal;

pub use fm::{FileEntry, browse_dir, sort_entries};
