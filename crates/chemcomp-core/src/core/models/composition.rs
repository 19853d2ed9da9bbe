use crate::core::chemistry::SpeciesNames;
use indexmap::IndexMap;
use ndarray::{Array1, Array3, ArrayView2, Axis};
use thiserror::Error;

/// Index of the element layer on axis 1 of a composition array.
pub const ELEMENT_LAYER: usize = 0;
/// Index of the molecule layer on axis 1 of a composition array.
pub const MOLECULE_LAYER: usize = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompositionError {
    #[error("Composition array has {found} layer(s); element and molecule layers are required")]
    MissingLayer { found: usize },
    #[error(
        "{layer} layer has {species} species column(s) but {names} name(s) were supplied"
    )]
    DimensionMismatch {
        layer: &'static str,
        names: usize,
        species: usize,
    },
    #[error("{layer} layer column {column} has no name but holds non-zero masses")]
    NonZeroPadding { layer: &'static str, column: usize },
}

/// Ordered mapping from species name to its per-step mass sequence.
///
/// Iteration follows the order of the name table the mapping was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesSeries {
    series: IndexMap<String, Array1<f64>>,
}

impl SpeciesSeries {
    pub fn get(&self, name: &str) -> Option<&Array1<f64>> {
        self.series.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Array1<f64>)> {
        self.series.iter().map(|(name, values)| (name.as_str(), values))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Number of time steps covered by each sequence.
    pub fn steps(&self) -> usize {
        self.series.values().next().map_or(0, Array1::len)
    }

    /// Pairs the columns of a `[step, species]` layer with `names`.
    ///
    /// Columns past the end of `names` must be zero padding; a name without a
    /// column is an error.
    fn from_layer(
        layer: ArrayView2<'_, f64>,
        names: &[String],
        layer_name: &'static str,
    ) -> Result<Self, CompositionError> {
        let species = layer.len_of(Axis(1));
        if names.len() > species {
            return Err(CompositionError::DimensionMismatch {
                layer: layer_name,
                names: names.len(),
                species,
            });
        }
        if let Some(column) =
            (names.len()..species).find(|&c| layer.column(c).iter().any(|&v| v != 0.0))
        {
            return Err(CompositionError::NonZeroPadding {
                layer: layer_name,
                column,
            });
        }

        let series = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), layer.column(i).to_owned()))
            .collect();
        Ok(Self { series })
    }
}

/// Element and molecule masses of one body part (atmosphere or core), per step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositionView {
    pub elements: SpeciesSeries,
    pub molecules: SpeciesSeries,
}

impl CompositionView {
    /// Fans a `[step, layer, species]` composition array out into named sequences.
    ///
    /// # Errors
    ///
    /// Returns an error if the array lacks the molecule layer, if a name table is
    /// longer than the species axis, or if an unnamed trailing column is non-zero.
    pub fn build(
        composition: &Array3<f64>,
        names: &SpeciesNames,
    ) -> Result<Self, CompositionError> {
        let layers = composition.len_of(Axis(1));
        if layers <= MOLECULE_LAYER {
            return Err(CompositionError::MissingLayer { found: layers });
        }

        let elements = SpeciesSeries::from_layer(
            composition.index_axis(Axis(1), ELEMENT_LAYER),
            &names.elements,
            "element",
        )?;
        let molecules = SpeciesSeries::from_layer(
            composition.index_axis(Axis(1), MOLECULE_LAYER),
            &names.molecules,
            "molecule",
        )?;

        Ok(Self {
            elements,
            molecules,
        })
    }

    pub fn element(&self, name: &str) -> Option<&Array1<f64>> {
        self.elements.get(name)
    }

    pub fn molecule(&self, name: &str) -> Option<&Array1<f64>> {
        self.molecules.get(name)
    }

    /// Looks `name` up among the elements first, then among the molecules.
    ///
    /// `C` names both an element and a molecule; use [`Self::molecule`] for the
    /// latter.
    pub fn get(&self, name: &str) -> Option<&Array1<f64>> {
        self.element(name).or_else(|| self.molecule(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, array};

    fn names(elements: &[&str], molecules: &[&str]) -> SpeciesNames {
        SpeciesNames::new(elements.iter().copied(), molecules.iter().copied())
    }

    // 3 steps, 2 layers, 2 species.
    fn two_species_composition() -> Array3<f64> {
        array![
            [[1.0, 2.0], [10.0, 20.0]],
            [[3.0, 4.0], [30.0, 40.0]],
            [[5.0, 6.0], [50.0, 60.0]],
        ]
    }

    #[test]
    fn build_fans_element_layer_out_per_species() {
        let view =
            CompositionView::build(&two_species_composition(), &names(&["Fe", "Si"], &["H2O", "CO"]))
                .unwrap();

        assert_eq!(view.element("Fe").unwrap(), &array![1.0, 3.0, 5.0]);
        assert_eq!(view.element("Si").unwrap(), &array![2.0, 4.0, 6.0]);
        assert_eq!(view.molecule("H2O").unwrap(), &array![10.0, 30.0, 50.0]);
        assert_eq!(view.molecule("CO").unwrap(), &array![20.0, 40.0, 60.0]);
        assert_eq!(view.elements.steps(), 3);
    }

    #[test]
    fn build_round_trips_species_axis_in_name_order() {
        let composition = two_species_composition();
        let view =
            CompositionView::build(&composition, &names(&["Fe", "Si"], &["H2O", "CO"])).unwrap();

        for (layer, series) in [(ELEMENT_LAYER, &view.elements), (MOLECULE_LAYER, &view.molecules)]
        {
            for (column, (_, values)) in series.iter().enumerate() {
                for (step, value) in values.iter().enumerate() {
                    assert_eq!(*value, composition[[step, layer, column]]);
                }
            }
        }
        assert_eq!(view.elements.names().collect::<Vec<_>>(), ["Fe", "Si"]);
    }

    #[test]
    fn build_accepts_zero_padded_shorter_table() {
        let composition = array![[[1.0, 0.0], [7.0, 8.0]], [[2.0, 0.0], [9.0, 10.0]]];
        let view =
            CompositionView::build(&composition, &names(&["Fe"], &["H2O", "CO"])).unwrap();

        assert_eq!(view.elements.len(), 1);
        assert_eq!(view.element("Fe").unwrap(), &array![1.0, 2.0]);
    }

    #[test]
    fn build_rejects_unnamed_column_with_mass() {
        let result =
            CompositionView::build(&two_species_composition(), &names(&["Fe"], &["H2O", "CO"]));
        assert_eq!(
            result,
            Err(CompositionError::NonZeroPadding {
                layer: "element",
                column: 1
            })
        );
    }

    #[test]
    fn build_rejects_more_names_than_species() {
        let result = CompositionView::build(
            &two_species_composition(),
            &names(&["Fe", "Si"], &["H2O", "CO", "CH4"]),
        );
        assert_eq!(
            result,
            Err(CompositionError::DimensionMismatch {
                layer: "molecule",
                names: 3,
                species: 2
            })
        );
    }

    #[test]
    fn build_rejects_array_without_molecule_layer() {
        let composition = Array3::<f64>::zeros((4, 1, 2));
        let result = CompositionView::build(&composition, &names(&["Fe"], &["H2O"]));
        assert_eq!(result, Err(CompositionError::MissingLayer { found: 1 }));
    }

    #[test]
    fn get_prefers_elements_over_molecules() {
        let composition = array![[[1.0], [2.0]]];
        let view = CompositionView::build(&composition, &names(&["C"], &["C"])).unwrap();

        assert_eq!(view.get("C").unwrap(), &array![1.0]);
        assert_eq!(view.molecule("C").unwrap(), &array![2.0]);
        assert!(view.get("Fe").is_none());
    }
}
