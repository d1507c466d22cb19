//! Application state and input handling for burrow.
//!
//! - [state]: [AppState], the session controller, and its result types.
//! - [handlers]: per-mode key handling implemented on [AppState].
//! - [nav]: directory listing, search filter, selection and scrolling.
//! - [actions]: create, rename and delete.
//! - [keymap]: key spec parsing and action lookup.
//! - [mode]: the input modes and popup input buffer.
//! - [status]: timed status messages.

pub mod actions;
pub mod handlers;
pub mod keymap;
pub mod mode;
pub mod nav;
pub mod state;
pub mod status;

pub use mode::{ModeState, Popup, PopupKind};
pub use nav::NavState;
pub use state::{AppState, ExitAction, KeypressResult, LayoutMetrics};
pub use status::StatusMessage;
