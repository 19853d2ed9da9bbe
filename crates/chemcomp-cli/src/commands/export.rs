use super::load_planet;
use crate::cli::{ExportArgs, Layer};
use crate::error::Result;
use chemcomp_loader::core::io::csv::{write_species_csv, write_species_csv_to_path};
use chemcomp_loader::core::models::composition::{CompositionView, SpeciesSeries};
use tracing::info;

pub fn run(args: ExportArgs) -> Result<()> {
    let planet = load_planet(&args.planet)?;
    let species = select_layer(planet.composition(args.part), args.layer);

    match &args.output {
        Some(path) => {
            info!(
                "Writing {} species over {} step(s) to {:?}",
                species.len(),
                planet.series.steps(),
                path
            );
            write_species_csv_to_path(species, &planet.series.t, path)?;
            println!("Wrote {:?} {:?} to {}", args.part, args.layer, path.display());
        }
        None => write_species_csv(species, &planet.series.t, std::io::stdout().lock())?,
    }
    Ok(())
}

pub(crate) fn select_layer(view: &CompositionView, layer: Layer) -> &SpeciesSeries {
    match layer {
        Layer::Elements => &view.elements,
        Layer::Molecules => &view.molecules,
    }
}
