//! File input/output for chemcomp runs.
//!
//! - [`h5`] - Reads the `/planet` group of a simulation output file
//! - [`csv`] - Writes a composition view as a table, one row per output step

pub mod csv;
pub mod h5;
