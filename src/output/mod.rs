//! Output for release progress
//!
//! This module provides:
//! - Colored status lines for each release phase
//! - An in-memory sink for capturing output in tests

mod reporter;

pub use reporter::{MemorySink, Reporter, Tone};
