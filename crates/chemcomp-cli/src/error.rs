use chemcomp_loader::LoadError;
use chemcomp_loader::core::io::csv::ExportError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Species '{species}' not found in the {part} composition")]
    UnknownSpecies { species: String, part: String },
}
