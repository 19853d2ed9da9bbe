use crate::core::chemistry::SpeciesNames;
use crate::core::config::{ConfigError, PlanetParameters};
use crate::core::io::h5::{PlanetFile, PlanetFileError};
use crate::core::models::composition::{CompositionError, CompositionView};
use crate::core::models::planet::Planet;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read planet file: {0}")]
    PlanetFile(#[from] PlanetFileError),
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid {part} composition: {source}")]
    Composition {
        part: &'static str,
        source: CompositionError,
    },
}

impl Planet {
    /// Loads a planet from a simulation file and its configuration, labelling the
    /// composition arrays with the standard chemcomp species tables.
    pub fn open(
        file_path: impl AsRef<Path>,
        config_path: impl AsRef<Path>,
    ) -> Result<Self, LoadError> {
        run(
            file_path.as_ref(),
            config_path.as_ref(),
            &SpeciesNames::default(),
        )
    }
}

/// Builds a [`Planet`] from a simulation file and the configuration of its run.
///
/// Stored fields are read first, then the configured options, then both
/// composition arrays are labelled with `names`. Any failure aborts the load.
#[instrument(skip_all, name = "load_workflow")]
pub fn run(
    file_path: &Path,
    config_path: &Path,
    names: &SpeciesNames,
) -> Result<Planet, LoadError> {
    info!(
        "Loading planet from '{}' with configuration '{}'.",
        file_path.display(),
        config_path.display()
    );

    let series = PlanetFile::read_from_path(file_path)?;
    let parameters = PlanetParameters::load(config_path)?;

    let atmo = CompositionView::build(&series.comp_a, names).map_err(|source| {
        LoadError::Composition {
            part: "atmosphere",
            source,
        }
    })?;
    let core = CompositionView::build(&series.comp_c, names).map_err(|source| {
        LoadError::Composition {
            part: "core",
            source,
        }
    })?;
    debug!(
        elements = atmo.elements.len(),
        molecules = atmo.molecules.len(),
        "Labelled composition arrays."
    );

    info!(
        steps = series.steps(),
        options = parameters.populated_count(),
        "Planet loaded."
    );
    Ok(Planet {
        series,
        parameters,
        atmo,
        core,
    })
}
