use super::load_planet;
use crate::cli::InspectArgs;
use crate::error::Result;
use chemcomp_loader::core::models::planet::{Attribute, PlanetSeries};
use std::io::Write;

pub fn run(args: InspectArgs) -> Result<()> {
    let planet = load_planet(&args.planet)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "{} ({} step(s))",
        args.planet.planet.display(),
        planet.series.steps()
    )?;
    render(&planet.attributes(), &planet.series.stored_fields, &mut out)?;
    Ok(())
}

/// Writes one line per attribute, then any group members that are not loaded.
fn render<W: Write>(
    attributes: &[Attribute<'_>],
    stored_fields: &[String],
    out: &mut W,
) -> std::io::Result<()> {
    for attribute in attributes {
        writeln!(out, "{attribute}")?;
    }

    let unread: Vec<&str> = stored_fields
        .iter()
        .map(String::as_str)
        .filter(|f| !PlanetSeries::FIELD_NAMES.contains(f))
        .collect();
    if !unread.is_empty() {
        writeln!(out, "Not loaded: {}", unread.join(", "))?;
    }
    Ok(())
}
