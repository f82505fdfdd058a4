//! Reconsolidation bookkeeping: turns a proposed plan into durable state
//! changes and a report of exactly what happened.
//!
//! The executor applies a plan as a strict create → supersede →
//! increment-cycles sequence of batched repository calls. Failures are folded
//! into the report's notes instead of propagating; callers always get a
//! report back.

mod executor;
mod resolve;

pub use executor::ReconsolidationExecutor;
