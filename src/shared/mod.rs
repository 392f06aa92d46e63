/// Shared utilities and error types
pub mod error;
pub mod result;

pub use error::{ExitCode, SbomGraphError};
pub use result::Result;
