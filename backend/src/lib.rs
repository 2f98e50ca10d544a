//! Backend library modules.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Request tracing middleware re-exported for server wiring.
pub use middleware::Trace;
