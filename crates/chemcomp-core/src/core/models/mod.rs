//! Data models of a loaded run.
//!
//! - [`planet`] - The `Planet` record: stored time series plus configuration parameters
//! - [`composition`] - Per-species views over the composition arrays
//! - [`series`] - Columns that may be stored either as numbers or as labels

pub mod composition;
pub mod planet;
pub mod series;
