//! Terminal front end for the project dashboard
//!
//! The binary is a thin wrapper over [`app::command`] and [`app::run`], so
//! the whole command surface can be driven from tests with an in-memory
//! writer.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod app;
pub mod export;
pub mod format;
pub mod render;

pub use app::{command, run};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
