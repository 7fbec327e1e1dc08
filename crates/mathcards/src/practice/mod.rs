//! Practice engine: problem generation and graded sessions.

mod generator;
mod session;
mod store;

pub use store::{SessionStore, StoreStats};
