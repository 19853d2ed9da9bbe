//! Run configuration.
//!
//! A chemcomp configuration is a mapping of sections. Only `config_planet` and
//! `config_planetesimal_accretion` describe the planet; every other section is
//! ignored here.
//!
//! - [`file`] - Reads the two sections and evaluates the recognized options
//! - [`expr`] - Typed evaluation of textual option values (`"True"`, `"5.2 * u.au"`)
//! - [`value`] - The typed value an option evaluates to

pub mod expr;
pub mod file;
pub mod value;

pub use file::{ConfigError, PlanetParameters};
pub use value::ConfigValue;
