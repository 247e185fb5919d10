//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns; currently per-request
//! trace identifiers and completion logging.

pub mod trace;

pub use trace::Trace;
