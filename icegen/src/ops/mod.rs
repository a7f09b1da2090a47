//! Core operations.
//!
//! This module contains the business logic for icegen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod preview;
pub mod render;
pub mod setup;
pub mod watch;

pub use check::check;
pub use preview::preview;
pub use render::render;
pub use setup::{SetupOptions, build_generator};
pub use watch::{WatchOptions, watch};
