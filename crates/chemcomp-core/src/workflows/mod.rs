//! # Workflows Module
//!
//! High-level entry points that tie the readers in [`crate::core`] together.
//!
//! - **Load Workflow** ([`load`]) - Reads the `/planet` group of a simulation file,
//!   evaluates the run configuration and fans the composition arrays out into named
//!   per-species sequences, producing one [`crate::Planet`].

pub mod load;
