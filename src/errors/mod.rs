//! # Error Handling
//!
//! Error types for graph construction and synthesis, built on `thiserror`.
//! Every error is raised locally at the call site that caused it and aborts
//! graph construction; nothing is recovered and nothing retries.

mod types;

pub use types::{Error, Result};
