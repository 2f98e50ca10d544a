//! Actix middleware shared by every inbound HTTP surface.

pub mod trace;

pub use trace::{Trace, TraceId, TRACE_ID_HEADER};
