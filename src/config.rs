//! Configuration for burrow.
//!
//! - [input]: default key bindings plus the editor and shell commands.
//! - [load]: the [Config] struct assembled from the command line and environment.

pub mod input;
pub mod load;

pub use input::{Editor, EditorCommand, Keys, Shell};
pub use load::Config;
