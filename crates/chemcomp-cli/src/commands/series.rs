use super::export::select_layer;
use super::load_planet;
use crate::cli::{Layer, SeriesArgs};
use crate::error::{CliError, Result};
use chemcomp_loader::core::models::composition::CompositionView;
use ndarray::Array1;
use std::io::Write;

pub fn run(args: SeriesArgs) -> Result<()> {
    let planet = load_planet(&args.planet)?;
    let view = planet.composition(args.part);
    let values = lookup(view, &args.species, args.layer).ok_or_else(|| {
        CliError::UnknownSpecies {
            species: args.species.clone(),
            part: format!("{:?}", args.part).to_lowercase(),
        }
    })?;

    let stdout = std::io::stdout();
    render(&args.species, &planet.series.t, values, &mut stdout.lock())?;
    Ok(())
}

fn lookup<'a>(
    view: &'a CompositionView,
    species: &str,
    layer: Option<Layer>,
) -> Option<&'a Array1<f64>> {
    match layer {
        Some(layer) => select_layer(view, layer).get(species),
        None => view.get(species),
    }
}

fn render<W: Write>(
    species: &str,
    time: &Array1<f64>,
    values: &Array1<f64>,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "{:>14}  {}", "t [Myr]", species)?;
    for (t, value) in time.iter().zip(values) {
        writeln!(out, "{t:>14.6}  {value:e}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemcomp_loader::core::chemistry::SpeciesNames;
    use ndarray::array;

    fn carbon_view() -> CompositionView {
        let composition = array![[[1.0, 0.0], [2.0, 5.0]], [[1.5, 0.0], [2.5, 6.0]]];
        CompositionView::build(&composition, &SpeciesNames::new(["C"], ["C", "CO"])).unwrap()
    }

    #[test]
    fn lookup_searches_elements_first_without_layer() {
        let view = carbon_view();
        assert_eq!(lookup(&view, "C", None).unwrap(), &array![1.0, 1.5]);
        assert_eq!(lookup(&view, "CO", None).unwrap(), &array![5.0, 6.0]);
    }

    #[test]
    fn lookup_honours_explicit_layer() {
        let view = carbon_view();
        assert_eq!(
            lookup(&view, "C", Some(Layer::Molecules)).unwrap(),
            &array![2.0, 2.5]
        );
        assert!(lookup(&view, "CO", Some(Layer::Elements)).is_none());
    }

    #[test]
    fn render_prints_one_row_per_step() {
        let mut buffer = Vec::new();
        render("Fe", &array![0.5, 1.0], &array![10.0, 20.0], &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("Fe"));
        assert_eq!(lines[1].split_whitespace().collect::<Vec<_>>(), ["0.500000", "1e1"]);
        assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), ["1.000000", "2e1"]);
    }
}
