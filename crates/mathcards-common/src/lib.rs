//! # Mathcards Common
//!
//! Shared types, errors, and constants used across Mathcards components.
//!
//! ## Modules
//! - `types` - Practice domain types (Mode, Difficulty, Problem, views)
//! - `error` - Common error types
//! - `constants` - Shared configuration constants

pub mod constants;
pub mod error;
pub mod types;

pub use error::MathcardsError;
pub use types::*;
