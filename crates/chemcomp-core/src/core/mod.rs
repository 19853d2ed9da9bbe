//! # Core Module
//!
//! Stateless building blocks for reading a chemcomp run.
//!
//! - **Data Models** ([`models`]) - The planet record, its time series and the
//!   per-species composition views
//! - **File I/O** ([`io`]) - HDF5 reader for the `/planet` group and CSV export
//! - **Run Configuration** ([`config`]) - Section extraction and typed evaluation of
//!   configuration values
//! - **Physical Units** ([`units`]) - cgs conversion factors
//! - **Species Tables** ([`chemistry`]) - Ordered element and molecule names of the
//!   composition arrays

pub mod chemistry;
pub mod config;
pub mod io;
pub mod models;
pub mod units;
