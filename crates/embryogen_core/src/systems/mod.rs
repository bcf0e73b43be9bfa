//! Per-tick systems. Each takes a context of read-only inputs plus the
//! mutable state it owns and returns counters for logging.

pub mod cpm;
pub mod differentiation;
pub mod forces;
pub mod growth;
pub mod stats;
