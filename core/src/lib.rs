//! Board engine for a single-player mine-clearing puzzle.
//!
//! A [`Session`] owns the board of one game and accepts four moves: reveal,
//! toggle flag, a one-shot undo, and restart. Everything else a UI needs is
//! read back through [`Cell`] copies and [`SessionStatus`].

pub use board::*;
pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod engine;
mod error;
mod generator;
mod types;
