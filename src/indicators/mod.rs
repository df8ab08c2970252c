//! Technical indicator primitives, computed for the latest bar of a series.
//!
//! Every function returns `None` when the series does not cover the
//! indicator's look-back window; callers surface that as a null value, never
//! a computed edge artifact.

pub mod momentum;
pub mod trend;
pub mod volume;
