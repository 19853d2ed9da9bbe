//! # chemcomp-loader
//!
//! Typed access to the output of chemcomp planet-formation runs.
//!
//! A run leaves behind two artifacts: an HDF5 file whose `/planet` group holds one
//! dataset per tracked quantity, and the YAML (or TOML) configuration the run was
//! started with. This library reads both into a single immutable [`Planet`] record.
//!
//! ## Layers
//!
//! - **[`core`]: The Foundation.** Data models (`Planet`, `CompositionView`), unit
//!   constants, species tables, and the HDF5/configuration readers.
//!
//! - **[`workflows`]: The Public API.** Ties the readers together into the
//!   load → merge → fan-out sequence that produces a `Planet`.
//!
//! ```ignore
//! use chemcomp_loader::Planet;
//!
//! let planet = Planet::open("simulation.h5", "config.yaml")?;
//! let core_mass = &planet.series.m_c;
//! let core_fe = planet.core.element("Fe");
//! let atmo_h = planet.atmo.element("H");
//! ```

pub mod core;
pub mod workflows;

pub use crate::core::models::composition::CompositionView;
pub use crate::core::models::planet::Planet;
pub use crate::workflows::load::LoadError;
