use crate::core::models::planet::PlanetSeries;
use crate::core::models::series::Series;
use crate::core::units::{AU_IN_CGS, MYR_IN_CGS};
use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Dataset, Group};
use ndarray::{Array1, Array3, ArrayD, Ix3};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Name of the group holding the planet datasets.
pub const PLANET_GROUP: &str = "planet";

/// Upper bound on the byte length of a fixed-length label.
const LABEL_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum PlanetFileError {
    #[error("Simulation file '{path}' does not exist")]
    NotFound { path: String },
    #[error("Failed to open simulation file '{path}': {source}")]
    Open { path: String, source: hdf5::Error },
    #[error("Simulation file '{path}' has no '/planet' group")]
    MissingGroup { path: String },
    #[error("Required dataset '/planet/{field}' is missing")]
    MissingField { field: &'static str },
    #[error("Failed to read '/planet/{field}': {source}")]
    Read {
        field: &'static str,
        source: hdf5::Error,
    },
    #[error("Dataset '/planet/{field}' has shape {found:?}, expected {expected}")]
    Shape {
        field: &'static str,
        expected: &'static str,
        found: Vec<usize>,
    },
    #[error(
        "Composition arrays disagree: comp_a has shape {comp_a:?} but comp_c has shape {comp_c:?}"
    )]
    CompositionShape {
        comp_a: Vec<usize>,
        comp_c: Vec<usize>,
    },
}

/// Reader for the HDF5 output of a chemcomp run.
pub struct PlanetFile;

impl PlanetFile {
    /// Reads every dataset of the `/planet` group.
    ///
    /// `a_p` is converted from cm to AU and `t` from s to Myr. The file is opened
    /// read-only and closed before returning, whether or not the read succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable, the group or any
    /// dataset is absent, or a dataset has the wrong rank.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from_path(path: &Path) -> Result<PlanetSeries, PlanetFileError> {
        let path_str = path.to_string_lossy().to_string();
        if !path.exists() {
            return Err(PlanetFileError::NotFound { path: path_str });
        }

        let file = hdf5::File::open(path).map_err(|e| PlanetFileError::Open {
            path: path_str.clone(),
            source: e,
        })?;
        if !file.link_exists(PLANET_GROUP) {
            return Err(PlanetFileError::MissingGroup { path: path_str });
        }
        let group = file
            .group(PLANET_GROUP)
            .map_err(|_| PlanetFileError::MissingGroup { path: path_str })?;

        let series = Self::read_group(&group)?;
        debug!(
            steps = series.steps(),
            members = series.stored_fields.len(),
            "Planet group read."
        );
        Ok(series)
    }

    fn read_group(group: &Group) -> Result<PlanetSeries, PlanetFileError> {
        let reader = FieldReader { group };

        let stored_fields = group
            .member_names()
            .map_err(|e| PlanetFileError::Read {
                field: PLANET_GROUP,
                source: e,
            })?
            .into_iter()
            .filter(|name| !name.starts_with('_'))
            .collect();

        let series = PlanetSeries {
            m: reader.series("M")?,
            m_a: reader.series("M_a")?,
            m_c: reader.series("M_c")?,
            m_z_gas: reader.series("M_z_gas")?,
            m_z_peb: reader.series("M_z_peb")?,
            temperature: reader.series("T")?,
            a_p: reader.series("a_p")? / AU_IN_CGS,
            comp_a: reader.composition("comp_a")?,
            comp_c: reader.composition("comp_c")?,
            f_sigma: reader.series("fSigma")?,
            gamma_norm: reader.series("gamma_norm")?,
            gamma_tot: reader.series("gamma_tot")?,
            m_dot_a_chem_gas: reader.array("m_dot_a_chem_gas")?,
            m_dot_a_chem_peb: reader.array("m_dot_a_chem_peb")?,
            m_dot_a_gas: reader.series("m_dot_a_gas")?,
            m_dot_a_peb: reader.series("m_dot_a_peb")?,
            m_dot_c_chem_gas: reader.array("m_dot_c_chem_gas")?,
            m_dot_c_chem_peb: reader.array("m_dot_c_chem_peb")?,
            m_dot_c_gas: reader.series("m_dot_c_gas")?,
            m_dot_c_peb: reader.series("m_dot_c_peb")?,
            m_dot_gas: reader.series("m_dot_gas")?,
            m_dot_peb: reader.series("m_dot_peb")?,
            peb_iso: reader.series("peb_iso")?,
            pebble_flux: reader.series("pebble_flux")?,
            regime_gas: reader.column("regime_gas")?,
            regime_peb: reader.column("regime_peb")?,
            sigma_g: reader.series("sigma_g")?,
            sigma_peb: reader.series("sigma_peb")?,
            t: reader.series("t")? / MYR_IN_CGS,
            tau_m: reader.series("tau_m")?,
            units: reader.column("units")?,
            stored_fields,
        };

        if series.comp_a.shape() != series.comp_c.shape() {
            return Err(PlanetFileError::CompositionShape {
                comp_a: series.comp_a.shape().to_vec(),
                comp_c: series.comp_c.shape().to_vec(),
            });
        }
        if series.comp_a.len_of(ndarray::Axis(0)) != series.steps() {
            warn!(
                composition_steps = series.comp_a.len_of(ndarray::Axis(0)),
                time_steps = series.steps(),
                "Composition arrays and time axis have different step counts."
            );
        }

        Ok(series)
    }
}

struct FieldReader<'g> {
    group: &'g Group,
}

impl FieldReader<'_> {
    fn dataset(&self, field: &'static str) -> Result<Dataset, PlanetFileError> {
        if !self.group.link_exists(field) {
            return Err(PlanetFileError::MissingField { field });
        }
        self.group
            .dataset(field)
            .map_err(|source| PlanetFileError::Read { field, source })
    }

    fn series(&self, field: &'static str) -> Result<Array1<f64>, PlanetFileError> {
        let dataset = self.dataset(field)?;
        if dataset.ndim() != 1 {
            return Err(PlanetFileError::Shape {
                field,
                expected: "a 1-D array",
                found: dataset.shape(),
            });
        }
        dataset
            .read_1d::<f64>()
            .map_err(|source| PlanetFileError::Read { field, source })
    }

    fn composition(&self, field: &'static str) -> Result<Array3<f64>, PlanetFileError> {
        let dataset = self.dataset(field)?;
        if dataset.ndim() != 3 {
            return Err(PlanetFileError::Shape {
                field,
                expected: "a [step, layer, species] array",
                found: dataset.shape(),
            });
        }
        dataset
            .read::<f64, Ix3>()
            .map_err(|source| PlanetFileError::Read { field, source })
    }

    fn array(&self, field: &'static str) -> Result<ArrayD<f64>, PlanetFileError> {
        self.dataset(field)?
            .read_dyn::<f64>()
            .map_err(|source| PlanetFileError::Read { field, source })
    }

    /// Reads a column that may hold numbers, booleans or strings.
    fn column(&self, field: &'static str) -> Result<Series, PlanetFileError> {
        let dataset = self.dataset(field)?;
        if dataset.ndim() != 1 {
            return Err(PlanetFileError::Shape {
                field,
                expected: "a 1-D column",
                found: dataset.shape(),
            });
        }
        let read_err = |source| PlanetFileError::Read { field, source };
        let descriptor = dataset
            .dtype()
            .and_then(|dtype| dtype.to_descriptor())
            .map_err(read_err)?;

        let series = match descriptor {
            TypeDescriptor::FixedAscii(_) => Series::Labels(labels(
                dataset.read_raw::<FixedAscii<LABEL_CAPACITY>>().map_err(read_err)?,
                |s| s.as_str().to_string(),
            )),
            TypeDescriptor::FixedUnicode(_) => Series::Labels(labels(
                dataset
                    .read_raw::<FixedUnicode<LABEL_CAPACITY>>()
                    .map_err(read_err)?,
                |s| s.as_str().to_string(),
            )),
            TypeDescriptor::VarLenAscii => Series::Labels(labels(
                dataset.read_raw::<VarLenAscii>().map_err(read_err)?,
                |s| s.as_str().to_string(),
            )),
            TypeDescriptor::VarLenUnicode => Series::Labels(labels(
                dataset.read_raw::<VarLenUnicode>().map_err(read_err)?,
                |s| s.as_str().to_string(),
            )),
            TypeDescriptor::Boolean => Series::Numeric(
                dataset
                    .read_raw::<bool>()
                    .map_err(read_err)?
                    .into_iter()
                    .map(|b| if b { 1.0 } else { 0.0 })
                    .collect(),
            ),
            _ => Series::Numeric(Array1::from(
                dataset.read_raw::<f64>().map_err(read_err)?,
            )),
        };
        Ok(series)
    }
}

fn labels<T>(raw: Vec<T>, to_string: impl Fn(&T) -> String) -> Vec<String> {
    raw.iter()
        .map(|s| to_string(s).trim_end().to_string())
        .collect()
}
