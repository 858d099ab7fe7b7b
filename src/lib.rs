//! Game core for a single-screen arcade shooter.
//!
//! `compute` and `collision` are pure functions over `GameState` with an
//! injected RNG; `session::Game` wraps them with the score table and the
//! per-tick error boundary.  Terminal I/O lives in the binary.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod prompt;
pub mod score;
pub mod session;
pub mod spawn;
