//! Domain primitives shared by the tesdash crates.
//!
//! Holds the core error type and the validated job identifier used to
//! address individual jobs on the upstream task-execution service.

pub mod error;
pub mod job_id;
