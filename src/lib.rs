//! # Salatr Library
//!
//! Internal library for the salatr binary. The split exists so the
//! calculation and phase internals are testable and CLI dispatch (main.rs)
//! stays separate from application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: `Salatr` struct owns resource setup and the run
//!   lifecycle
//! - **Core Loop**: `core` samples the clock each tick and re-evaluates the
//!   pipeline below
//! - **Calculation**: `solar` (astronomical solves) → `schedule` (the day's
//!   event list) → `locator` (neighboring events) → `phase` (the display
//!   phase state machine)
//! - **Configuration**: `config` for TOML settings with validation and hot
//!   reload
//! - **Infrastructure**: signal handling, timezone resolution, the
//!   real/simulated time source, logging, and display output

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

// Public API modules
pub mod args;
pub mod config;
pub mod constants;
pub mod core;
pub mod display;
pub mod locator;
pub mod phase;
pub mod schedule;
pub mod signals;
pub mod simulate;
pub mod solar;
pub mod time_source;
pub mod tz;

// Internal modules
mod salatr;

// Re-export for the binary
pub use salatr::Salatr;
