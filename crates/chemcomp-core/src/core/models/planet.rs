use super::composition::CompositionView;
use super::series::Series;
use crate::core::config::{ConfigValue, PlanetParameters};
use ndarray::{Array1, Array3, ArrayD};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every quantity chemcomp stores in the `/planet` group, one entry per output step.
///
/// Fields are in cgs except `a_p` (AU) and `t` (Myr), which are rescaled on load.
/// Each field documents the dataset name it is read from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetSeries {
    /// `M` - total planet mass.
    pub m: Array1<f64>,
    /// `M_a` - atmosphere mass.
    pub m_a: Array1<f64>,
    /// `M_c` - core mass.
    pub m_c: Array1<f64>,
    /// `M_z_gas` - metal mass accreted with the gas.
    pub m_z_gas: Array1<f64>,
    /// `M_z_peb` - metal mass accreted with pebbles.
    pub m_z_peb: Array1<f64>,
    /// `T` - disk midplane temperature at the planet.
    pub temperature: Array1<f64>,
    /// `a_p` - semi-major axis in AU.
    pub a_p: Array1<f64>,
    /// `comp_a` - atmosphere composition, `[step, layer, species]`.
    pub comp_a: Array3<f64>,
    /// `comp_c` - core composition, `[step, layer, species]`.
    pub comp_c: Array3<f64>,
    /// `fSigma` - gap surface-density factor.
    pub f_sigma: Array1<f64>,
    /// `gamma_norm` - normalized migration torque.
    pub gamma_norm: Array1<f64>,
    /// `gamma_tot` - total migration torque.
    pub gamma_tot: Array1<f64>,
    /// `m_dot_a_chem_gas` - per-species atmosphere accretion rate from the gas.
    pub m_dot_a_chem_gas: ArrayD<f64>,
    /// `m_dot_a_chem_peb` - per-species atmosphere accretion rate from pebbles.
    pub m_dot_a_chem_peb: ArrayD<f64>,
    /// `m_dot_a_gas` - atmosphere gas accretion rate.
    pub m_dot_a_gas: Array1<f64>,
    /// `m_dot_a_peb` - atmosphere pebble accretion rate.
    pub m_dot_a_peb: Array1<f64>,
    /// `m_dot_c_chem_gas` - per-species core accretion rate from the gas.
    pub m_dot_c_chem_gas: ArrayD<f64>,
    /// `m_dot_c_chem_peb` - per-species core accretion rate from pebbles.
    pub m_dot_c_chem_peb: ArrayD<f64>,
    /// `m_dot_c_gas` - core gas accretion rate.
    pub m_dot_c_gas: Array1<f64>,
    /// `m_dot_c_peb` - core pebble accretion rate.
    pub m_dot_c_peb: Array1<f64>,
    /// `m_dot_gas` - total gas accretion rate.
    pub m_dot_gas: Array1<f64>,
    /// `m_dot_peb` - total pebble accretion rate.
    pub m_dot_peb: Array1<f64>,
    /// `peb_iso` - pebble isolation mass.
    pub peb_iso: Array1<f64>,
    /// `pebble_flux` - pebble mass flux through the planet's orbit.
    pub pebble_flux: Array1<f64>,
    /// `regime_gas` - gas accretion regime per step.
    pub regime_gas: Series,
    /// `regime_peb` - pebble accretion regime per step.
    pub regime_peb: Series,
    /// `sigma_g` - gas surface density at the planet.
    pub sigma_g: Array1<f64>,
    /// `sigma_peb` - pebble surface density at the planet.
    pub sigma_peb: Array1<f64>,
    /// `t` - elapsed time in Myr.
    pub t: Array1<f64>,
    /// `tau_m` - migration timescale.
    pub tau_m: Array1<f64>,
    /// `units` - unit labels written alongside the datasets.
    pub units: Series,
    /// Names of every member of the `/planet` group, including ones not read above.
    pub stored_fields: Vec<String>,
}

impl PlanetSeries {
    /// Dataset names read from the `/planet` group, in listing order.
    pub const FIELD_NAMES: [&'static str; 31] = [
        "M",
        "M_a",
        "M_c",
        "M_z_gas",
        "M_z_peb",
        "T",
        "a_p",
        "comp_a",
        "comp_c",
        "fSigma",
        "gamma_norm",
        "gamma_tot",
        "m_dot_a_chem_gas",
        "m_dot_a_chem_peb",
        "m_dot_a_gas",
        "m_dot_a_peb",
        "m_dot_c_chem_gas",
        "m_dot_c_chem_peb",
        "m_dot_c_gas",
        "m_dot_c_peb",
        "m_dot_gas",
        "m_dot_peb",
        "peb_iso",
        "pebble_flux",
        "regime_gas",
        "regime_peb",
        "sigma_g",
        "sigma_peb",
        "t",
        "tau_m",
        "units",
    ];

    /// Number of output steps, taken from the time axis.
    pub fn steps(&self) -> usize {
        self.t.len()
    }

    fn values(&self) -> [AttributeValue<'_>; 31] {
        use AttributeValue::{Array, Column};
        let shape = |a: &[usize]| Array(a.to_vec());
        [
            shape(self.m.shape()),
            shape(self.m_a.shape()),
            shape(self.m_c.shape()),
            shape(self.m_z_gas.shape()),
            shape(self.m_z_peb.shape()),
            shape(self.temperature.shape()),
            shape(self.a_p.shape()),
            shape(self.comp_a.shape()),
            shape(self.comp_c.shape()),
            shape(self.f_sigma.shape()),
            shape(self.gamma_norm.shape()),
            shape(self.gamma_tot.shape()),
            shape(self.m_dot_a_chem_gas.shape()),
            shape(self.m_dot_a_chem_peb.shape()),
            shape(self.m_dot_a_gas.shape()),
            shape(self.m_dot_a_peb.shape()),
            shape(self.m_dot_c_chem_gas.shape()),
            shape(self.m_dot_c_chem_peb.shape()),
            shape(self.m_dot_c_gas.shape()),
            shape(self.m_dot_c_peb.shape()),
            shape(self.m_dot_gas.shape()),
            shape(self.m_dot_peb.shape()),
            shape(self.peb_iso.shape()),
            shape(self.pebble_flux.shape()),
            Column(&self.regime_gas),
            Column(&self.regime_peb),
            shape(self.sigma_g.shape()),
            shape(self.sigma_peb.shape()),
            shape(self.t.shape()),
            shape(self.tau_m.shape()),
            Column(&self.units),
        ]
    }
}

/// Where an attribute of a [`Planet`] comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Stored,
    Config,
    Derived,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Origin::Stored => "stored",
            Origin::Config => "config",
            Origin::Derived => "derived",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue<'a> {
    /// A numeric array, summarized by its shape.
    Array(Vec<usize>),
    Column(&'a Series),
    Parameter(Option<&'a ConfigValue>),
    Composition(&'a CompositionView),
}

/// One entry of the attribute listing of a [`Planet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<'a> {
    pub name: &'static str,
    pub origin: Origin,
    pub value: AttributeValue<'a>,
}

impl fmt::Display for Attribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:<7}] {:<20} ", self.origin, self.name)?;
        match &self.value {
            AttributeValue::Array(shape) => write!(f, "array{shape:?}"),
            AttributeValue::Column(series) => write!(f, "{series}"),
            AttributeValue::Parameter(Some(value)) => {
                write!(f, "{} = {value}", value.type_name())
            }
            AttributeValue::Parameter(None) => f.write_str("None"),
            AttributeValue::Composition(view) => write!(
                f,
                "{} element(s), {} molecule(s)",
                view.elements.len(),
                view.molecules.len()
            ),
        }
    }
}

/// A body part of the planet with its own composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPart {
    Atmosphere,
    Core,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown body part '{0}'. Expected 'atmo' or 'core'.")]
pub struct UnknownBodyPart(String);

impl FromStr for BodyPart {
    type Err = UnknownBodyPart;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "atmo" | "atmosphere" => Ok(BodyPart::Atmosphere),
            "core" => Ok(BodyPart::Core),
            _ => Err(UnknownBodyPart(s.to_string())),
        }
    }
}

/// One chemcomp planet: stored time series, configured parameters and the
/// per-species composition of atmosphere and core.
///
/// Built once by the load workflow and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub series: PlanetSeries,
    pub parameters: PlanetParameters,
    pub atmo: CompositionView,
    pub core: CompositionView,
}

impl Planet {
    pub fn composition(&self, part: BodyPart) -> &CompositionView {
        match part {
            BodyPart::Atmosphere => &self.atmo,
            BodyPart::Core => &self.core,
        }
    }

    /// Lists every attribute of the planet: the stored fields, the configured
    /// options and the two composition views.
    pub fn attributes(&self) -> Vec<Attribute<'_>> {
        let stored = PlanetSeries::FIELD_NAMES
            .into_iter()
            .zip(self.series.values())
            .map(|(name, value)| Attribute {
                name,
                origin: Origin::Stored,
                value,
            });
        let configured = self
            .parameters
            .entries()
            .into_iter()
            .map(|(name, value)| Attribute {
                name,
                origin: Origin::Config,
                value: AttributeValue::Parameter(value),
            });
        let derived = [("atmo", &self.atmo), ("core", &self.core)]
            .into_iter()
            .map(|(name, view)| Attribute {
                name,
                origin: Origin::Derived,
                value: AttributeValue::Composition(view),
            });

        stored.chain(configured).chain(derived).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::chemistry::SpeciesNames;
    use ndarray::{Array1, Array3, ArrayD, IxDyn, array};

    pub(crate) fn sample_series(steps: usize) -> PlanetSeries {
        let ramp = || Array1::from_iter((0..steps).map(|i| i as f64));
        let mut comp = Array3::<f64>::zeros((steps, 2, 2));
        for step in 0..steps {
            comp[[step, 0, 0]] = step as f64 + 1.0;
            comp[[step, 1, 1]] = 2.0 * step as f64;
        }
        PlanetSeries {
            m: ramp(),
            m_a: ramp(),
            m_c: ramp(),
            m_z_gas: ramp(),
            m_z_peb: ramp(),
            temperature: ramp(),
            a_p: ramp(),
            comp_a: comp.clone(),
            comp_c: comp,
            f_sigma: ramp(),
            gamma_norm: ramp(),
            gamma_tot: ramp(),
            m_dot_a_chem_gas: ArrayD::zeros(IxDyn(&[steps, 2, 2])),
            m_dot_a_chem_peb: ArrayD::zeros(IxDyn(&[steps, 2, 2])),
            m_dot_a_gas: ramp(),
            m_dot_a_peb: ramp(),
            m_dot_c_chem_gas: ArrayD::zeros(IxDyn(&[steps, 2, 2])),
            m_dot_c_chem_peb: ArrayD::zeros(IxDyn(&[steps, 2, 2])),
            m_dot_c_gas: ramp(),
            m_dot_c_peb: ramp(),
            m_dot_gas: ramp(),
            m_dot_peb: ramp(),
            peb_iso: ramp(),
            pebble_flux: ramp(),
            regime_gas: Series::Numeric(ramp()),
            regime_peb: Series::Labels(vec!["Bondi".into(); steps]),
            sigma_g: ramp(),
            sigma_peb: ramp(),
            t: ramp(),
            tau_m: ramp(),
            units: Series::Labels(vec!["g".into(), "cm".into()]),
            stored_fields: PlanetSeries::FIELD_NAMES.map(String::from).to_vec(),
        }
    }

    fn sample_planet() -> Planet {
        let series = sample_series(3);
        let names = SpeciesNames::new(["Fe", "Si"], ["H2O", "CO"]);
        let atmo = CompositionView::build(&series.comp_a, &names).unwrap();
        let core = CompositionView::build(&series.comp_c, &names).unwrap();
        Planet {
            series,
            parameters: PlanetParameters {
                migration: Some(ConfigValue::Bool(false)),
                ..Default::default()
            },
            atmo,
            core,
        }
    }

    #[test]
    fn attributes_list_stored_config_and_derived_entries_in_order() {
        let planet = sample_planet();
        let attributes = planet.attributes();

        assert_eq!(attributes.len(), 31 + 13 + 2);
        let stored: Vec<_> = attributes
            .iter()
            .filter(|a| a.origin == Origin::Stored)
            .map(|a| a.name)
            .collect();
        assert_eq!(stored, PlanetSeries::FIELD_NAMES);

        let configured: Vec<_> = attributes
            .iter()
            .filter(|a| a.origin == Origin::Config)
            .map(|a| a.name)
            .collect();
        assert_eq!(configured, PlanetParameters::OPTION_NAMES);

        assert_eq!(attributes[44].name, "atmo");
        assert_eq!(attributes[45].name, "core");
    }

    #[test]
    fn attributes_summarize_values() {
        let planet = sample_planet();
        let attributes = planet.attributes();

        let comp_a = attributes.iter().find(|a| a.name == "comp_a").unwrap();
        assert_eq!(comp_a.value, AttributeValue::Array(vec![3, 2, 2]));

        let migration = attributes.iter().find(|a| a.name == "migration").unwrap();
        assert_eq!(
            migration.value,
            AttributeValue::Parameter(Some(&ConfigValue::Bool(false)))
        );
        assert!(migration.to_string().ends_with("bool = False"));

        let rho_pla = attributes.iter().find(|a| a.name == "rho_pla").unwrap();
        assert!(rho_pla.to_string().ends_with("None"));

        let atmo = attributes.iter().find(|a| a.name == "atmo").unwrap();
        assert!(atmo.to_string().ends_with("2 element(s), 2 molecule(s)"));
    }

    #[test]
    fn composition_selects_body_part() {
        let planet = sample_planet();
        assert_eq!(
            planet.composition(BodyPart::Atmosphere).element("Fe").unwrap(),
            &array![1.0, 2.0, 3.0]
        );
        assert_eq!(
            planet.composition(BodyPart::Core).molecule("CO").unwrap(),
            &array![0.0, 2.0, 4.0]
        );
    }

    #[test]
    fn body_part_parses_short_and_long_names() {
        assert_eq!("atmo".parse(), Ok(BodyPart::Atmosphere));
        assert_eq!("Atmosphere".parse(), Ok(BodyPart::Atmosphere));
        assert_eq!("core".parse(), Ok(BodyPart::Core));
        assert_eq!(
            "mantle".parse::<BodyPart>(),
            Err(UnknownBodyPart("mantle".into()))
        );
    }
}
