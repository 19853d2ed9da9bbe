use ndarray::Array1;
use std::fmt;

/// A one-dimensional stored column whose element type varies between runs.
///
/// Regime indicators and the unit table are written as numbers by some chemcomp
/// versions and as byte strings by others.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Numeric(Array1<f64>),
    Labels(Vec<String>),
}

impl Series {
    pub fn len(&self) -> usize {
        match self {
            Series::Numeric(values) => values.len(),
            Series::Labels(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_numeric(&self) -> Option<&Array1<f64>> {
        match self {
            Series::Numeric(values) => Some(values),
            Series::Labels(_) => None,
        }
    }

    pub fn as_labels(&self) -> Option<&[String]> {
        match self {
            Series::Labels(labels) => Some(labels),
            Series::Numeric(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Series::Numeric(_) => "numeric",
            Series::Labels(_) => "labels",
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind(), self.len())
    }
}
