use crate::core::models::composition::SpeciesSeries;
use ndarray::Array1;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV writing error for '{path}': {source}")]
    Csv { path: String, source: ::csv::Error },
    #[error("Time axis has {time_steps} step(s) but species series have {species_steps}")]
    StepMismatch {
        time_steps: usize,
        species_steps: usize,
    },
}

/// Writes `species` as CSV with a leading `t_Myr` column taken from `time`.
///
/// The header row is `t_Myr` followed by the species names in view order.
pub fn write_species_csv<W: Write>(
    species: &SpeciesSeries,
    time: &Array1<f64>,
    writer: W,
) -> Result<(), ExportError> {
    write_with(species, time, writer, "<writer>")
}

/// Like [`write_species_csv`], creating (or truncating) the file at `path`.
pub fn write_species_csv_to_path(
    species: &SpeciesSeries,
    time: &Array1<f64>,
    path: &Path,
) -> Result<(), ExportError> {
    let path_str = path.to_string_lossy().to_string();
    let file = std::fs::File::create(path).map_err(|e| ExportError::Csv {
        path: path_str.clone(),
        source: e.into(),
    })?;
    write_with(species, time, file, &path_str)
}

fn write_with<W: Write>(
    species: &SpeciesSeries,
    time: &Array1<f64>,
    writer: W,
    path: &str,
) -> Result<(), ExportError> {
    if !species.is_empty() && species.steps() != time.len() {
        return Err(ExportError::StepMismatch {
            time_steps: time.len(),
            species_steps: species.steps(),
        });
    }
    let csv_err = |source| ExportError::Csv {
        path: path.to_string(),
        source,
    };

    let mut csv_writer = ::csv::Writer::from_writer(writer);
    let header = std::iter::once("t_Myr").chain(species.names());
    csv_writer.write_record(header).map_err(csv_err)?;

    for (step, t) in time.iter().enumerate() {
        let row = std::iter::once(*t)
            .chain(species.iter().map(|(_, values)| values[step]))
            .map(|v| v.to_string());
        csv_writer.write_record(row).map_err(csv_err)?;
    }
    csv_writer
        .flush()
        .map_err(|e| csv_err(::csv::Error::from(e)))?;
    Ok(())
}
