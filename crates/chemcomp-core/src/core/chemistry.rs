//! Species tables for the composition arrays.
//!
//! The species axis of `comp_a`/`comp_c` is positional: column `i` of the element
//! layer belongs to `ELEMENTS[i]`, column `i` of the molecule layer to
//! `MOLECULES[i]`. Both layers share one axis, sized for the longer table, so the
//! element layer carries trailing zero columns.

/// Element symbols in the order chemcomp writes them.
pub const ELEMENTS: [&str; 14] = [
    "C", "O", "Fe", "S", "Mg", "Si", "Na", "K", "N", "Al", "Ti", "V", "H", "He",
];

/// Molecule formulas in the order chemcomp writes them.
pub const MOLECULES: [&str; 19] = [
    "rest", "CO", "N2", "CH4", "CO2", "NH3", "H2S", "H2O", "Fe3O4", "C", "FeS", "NaAlSi3O8",
    "KAlSi3O8", "Mg2SiO4", "Fe2O3", "VO", "MgSiO3", "Al2O3", "TiO",
];

/// The pair of ordered name tables used to label a composition array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesNames {
    pub elements: Vec<String>,
    pub molecules: Vec<String>,
}

impl SpeciesNames {
    pub fn new<E, M>(elements: E, molecules: M) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
            molecules: molecules.into_iter().map(Into::into).collect(),
        }
    }

    /// Width of the species axis needed to hold both tables.
    pub fn species_width(&self) -> usize {
        self.elements.len().max(self.molecules.len())
    }
}

impl Default for SpeciesNames {
    fn default() -> Self {
        Self::new(ELEMENTS, MOLECULES)
    }
}
