//! Shared primitives consumed by every other `flowctl-*` crate: the
//! closed error taxonomy, exit-code mapping, the retry policy, lifecycle
//! and signal handling, and user-local configuration.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod retry;
pub mod types;

pub use error::{ErrorCode, ExitCode, FlowError};
pub use lifecycle::CancellationToken;
pub use types::{Confidence, OutputFormat, WorkflowId};
