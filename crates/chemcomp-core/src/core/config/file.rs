use super::expr::{self, ExprError};
use super::value::ConfigValue;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

pub const PLANET_SECTION: &str = "config_planet";
pub const PLANETESIMAL_SECTION: &str = "config_planetesimal_accretion";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parsing error for '{path}': {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Failed to evaluate option '{option}': {source}")]
    Evaluation {
        option: &'static str,
        source: ExprError,
    },
}

/// An option value as written in the file, before evaluation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum RawSetting {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Sequences, mappings and tagged values; rejected per option on evaluation.
    Other(serde_yaml::Value),
}

impl RawSetting {
    fn evaluate(self, option: &'static str) -> Result<Option<ConfigValue>, ConfigError> {
        match self {
            RawSetting::Bool(b) => Ok(Some(ConfigValue::Bool(b))),
            RawSetting::Int(i) => Ok(Some(ConfigValue::Int(i))),
            RawSetting::Float(x) => Ok(Some(ConfigValue::Float(x))),
            RawSetting::Text(text) => {
                expr::evaluate(&text).map_err(|source| ConfigError::Evaluation { option, source })
            }
            RawSetting::Other(value) => {
                let kind = match value {
                    serde_yaml::Value::Sequence(_) => "sequence",
                    serde_yaml::Value::Mapping(_) => "mapping",
                    serde_yaml::Value::Tagged(_) => "tagged value",
                    _ => "non-scalar value",
                };
                Err(ConfigError::Evaluation {
                    option,
                    source: ExprError::NotScalar { kind },
                })
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawPlanetSection {
    matter_removal: Option<RawSetting>,
    use_heat_torque: Option<RawSetting>,
    use_dynamical_torque: Option<RawSetting>,
    migration: Option<RawSetting>,
    #[serde(rename = "M0_fact")]
    m0_fact: Option<RawSetting>,
    a_p: Option<RawSetting>,
    t_0: Option<RawSetting>,
    rho_c: Option<RawSetting>,
    r_in: Option<RawSetting>,
    keep_peb_iso: Option<RawSetting>,
    use_pebiso_diffusion: Option<RawSetting>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPlanetesimalSection {
    #[serde(rename = "R_pla")]
    r_pla: Option<RawSetting>,
    rho_pla: Option<RawSetting>,
}

/// The parts of a chemcomp configuration that describe the planet.
///
/// Unknown sections and keys are ignored: a full configuration also carries the
/// disk, pebble and chemistry setup.
#[derive(Debug, Default, Deserialize)]
struct RawConfigFile {
    config_planet: Option<RawPlanetSection>,
    config_planetesimal_accretion: Option<RawPlanetesimalSection>,
}

/// The thirteen planet options of a run configuration, evaluated to typed values.
///
/// `None` means the option was absent from its section or was set to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanetParameters {
    pub matter_removal: Option<ConfigValue>,
    pub use_heat_torque: Option<ConfigValue>,
    pub use_dynamical_torque: Option<ConfigValue>,
    pub migration: Option<ConfigValue>,
    pub m0_fact: Option<ConfigValue>,
    /// Initial semi-major axis as configured. Independent of the stored `a_p` series.
    pub a_p: Option<ConfigValue>,
    pub t_0: Option<ConfigValue>,
    pub rho_c: Option<ConfigValue>,
    pub r_in: Option<ConfigValue>,
    pub keep_peb_iso: Option<ConfigValue>,
    pub use_pebiso_diffusion: Option<ConfigValue>,
    pub r_pla: Option<ConfigValue>,
    pub rho_pla: Option<ConfigValue>,
}

impl PlanetParameters {
    /// Option names as they appear in the configuration file, in listing order.
    pub const OPTION_NAMES: [&'static str; 13] = [
        "matter_removal",
        "use_heat_torque",
        "use_dynamical_torque",
        "migration",
        "M0_fact",
        "a_p",
        "t_0",
        "rho_c",
        "r_in",
        "keep_peb_iso",
        "use_pebiso_diffusion",
        "R_pla",
        "rho_pla",
    ];

    /// Reads the planet options from a YAML file, or a TOML file if the path ends in `.toml`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let raw = if is_toml {
            toml::from_str(&content).map_err(|e| ConfigError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?
        } else {
            Self::parse_yaml(&content).map_err(|e| ConfigError::Yaml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?
        };

        let parameters = Self::from_raw(raw)?;
        debug!(
            populated = parameters.populated_count(),
            "Planet options read from configuration."
        );
        Ok(parameters)
    }

    /// Parses YAML configuration text.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let raw = Self::parse_yaml(content).map_err(|e| ConfigError::Yaml {
            path: "<string>".to_string(),
            source: e,
        })?;
        Self::from_raw(raw)
    }

    fn parse_yaml(content: &str) -> Result<RawConfigFile, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(RawConfigFile::default());
        }
        serde_yaml::from_str::<Option<RawConfigFile>>(content).map(Option::unwrap_or_default)
    }

    fn from_raw(raw: RawConfigFile) -> Result<Self, ConfigError> {
        let planet = raw.config_planet.unwrap_or_default();
        let planetesimal = raw.config_planetesimal_accretion.unwrap_or_default();

        let eval = |setting: Option<RawSetting>, option: &'static str| {
            setting.map_or(Ok(None), |s| s.evaluate(option))
        };

        Ok(Self {
            matter_removal: eval(planet.matter_removal, "matter_removal")?,
            use_heat_torque: eval(planet.use_heat_torque, "use_heat_torque")?,
            use_dynamical_torque: eval(planet.use_dynamical_torque, "use_dynamical_torque")?,
            migration: eval(planet.migration, "migration")?,
            m0_fact: eval(planet.m0_fact, "M0_fact")?,
            a_p: eval(planet.a_p, "a_p")?,
            t_0: eval(planet.t_0, "t_0")?,
            rho_c: eval(planet.rho_c, "rho_c")?,
            r_in: eval(planet.r_in, "r_in")?,
            keep_peb_iso: eval(planet.keep_peb_iso, "keep_peb_iso")?,
            use_pebiso_diffusion: eval(planet.use_pebiso_diffusion, "use_pebiso_diffusion")?,
            r_pla: eval(planetesimal.r_pla, "R_pla")?,
            rho_pla: eval(planetesimal.rho_pla, "rho_pla")?,
        })
    }

    /// Options paired with their file names, in [`Self::OPTION_NAMES`] order.
    pub fn entries(&self) -> [(&'static str, Option<&ConfigValue>); 13] {
        let values = [
            &self.matter_removal,
            &self.use_heat_torque,
            &self.use_dynamical_torque,
            &self.migration,
            &self.m0_fact,
            &self.a_p,
            &self.t_0,
            &self.rho_c,
            &self.r_in,
            &self.keep_peb_iso,
            &self.use_pebiso_diffusion,
            &self.r_pla,
            &self.rho_pla,
        ];
        let mut entries = [("", None); 13];
        for (slot, (name, value)) in entries
            .iter_mut()
            .zip(Self::OPTION_NAMES.into_iter().zip(values))
        {
            *slot = (name, value.as_ref());
        }
        entries
    }

    /// Looks an option up by its file name (e.g. `M0_fact`).
    pub fn get(&self, option: &str) -> Option<&ConfigValue> {
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == option)
            .and_then(|(_, value)| value)
    }

    pub fn populated_count(&self) -> usize {
        self.entries().iter().filter(|(_, v)| v.is_some()).count()
    }
}
