//! Result type alias shared across the workspace.
//!
//! Defaults the error type to the common `RampError`, so functions can simply
//! return `Result<T>`.
use crate::error::RampError;

/// Workspace-wide `Result` alias with `RampError` as the default error.
pub type Result<T, E = RampError> = std::result::Result<T, E>;
