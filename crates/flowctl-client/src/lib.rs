//! Control-plane client (spec §5): the `ControlPlane` trait plus an HTTP
//! implementation, so the rest of the workspace talks to an interface
//! rather than `reqwest` directly.

mod control_plane;
mod http;
mod model;

pub use control_plane::ControlPlane;
pub use http::HttpControlPlane;
pub use model::{ExecutionSummary, WorkflowSummary};

