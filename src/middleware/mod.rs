//! Middleware layer.
//!
//! Cross-cutting behavior wrapped around every routed request. Today that is
//! [`trace`]: one span per request carrying method and path, closed with the
//! response status and latency.

mod trace;

pub(crate) use trace::trace;
