pub mod export;
pub mod inspect;
pub mod series;

use crate::cli::PlanetArgs;
use crate::error::Result;
use chemcomp_loader::Planet;
use chemcomp_loader::core::chemistry::SpeciesNames;
use chemcomp_loader::workflows::load;
use tracing::info;

/// Loads the planet named by `args`, applying any species-name overrides.
pub fn load_planet(args: &PlanetArgs) -> Result<Planet> {
    let mut names = SpeciesNames::default();
    if let Some(elements) = &args.elements {
        names.elements = elements.clone();
    }
    if let Some(molecules) = &args.molecules {
        names.molecules = molecules.clone();
    }

    info!("Loading planet from {:?}", &args.planet);
    Ok(load::run(&args.planet, &args.config, &names)?)
}
