//! Physical unit constants in cgs.
//!
//! chemcomp writes every dimensional quantity in cgs. The loader converts two of
//! them on the way in ([`AU_IN_CGS`] for `a_p`, [`MYR_IN_CGS`] for `t`), and the
//! configuration evaluator resolves `u.<name>` references through [`cgs_factor`].

use phf::{Map, phf_map};

/// One astronomical unit in centimetres (IAU 2012 exact definition).
pub const AU_IN_CGS: f64 = 1.495_978_707e13;

/// One Julian year in seconds.
pub const YEAR_IN_CGS: f64 = 3.155_76e7;

/// One mega-year (Julian) in seconds.
pub const MYR_IN_CGS: f64 = 1.0e6 * YEAR_IN_CGS;

static CGS_FACTORS: Map<&'static str, f64> = phf_map! {
    // length
    "cm" => 1.0,
    "mm" => 0.1,
    "m" => 1.0e2,
    "km" => 1.0e5,
    "au" => AU_IN_CGS,
    "AU" => AU_IN_CGS,
    "pc" => 3.085_677_581_491_367e18,
    "earthRad" => 6.378_1e8,
    "R_earth" => 6.378_1e8,
    "Rearth" => 6.378_1e8,
    "jupiterRad" => 7.149_2e9,
    "R_jup" => 7.149_2e9,
    "Rjup" => 7.149_2e9,
    "solRad" => 6.957e10,
    "R_sun" => 6.957e10,
    "Rsun" => 6.957e10,
    // mass
    "g" => 1.0,
    "kg" => 1.0e3,
    "earthMass" => 5.972_167_867_791_379e27,
    "M_earth" => 5.972_167_867_791_379e27,
    "Mearth" => 5.972_167_867_791_379e27,
    "jupiterMass" => 1.898_124_597_336_050_5e30,
    "M_jup" => 1.898_124_597_336_050_5e30,
    "Mjup" => 1.898_124_597_336_050_5e30,
    "solMass" => 1.988_409_870_698_051e33,
    "M_sun" => 1.988_409_870_698_051e33,
    "Msun" => 1.988_409_870_698_051e33,
    // time
    "s" => 1.0,
    "min" => 60.0,
    "h" => 3.6e3,
    "day" => 8.64e4,
    "d" => 8.64e4,
    "yr" => YEAR_IN_CGS,
    "year" => YEAR_IN_CGS,
    "kyr" => 1.0e3 * YEAR_IN_CGS,
    "Myr" => MYR_IN_CGS,
    "Gyr" => 1.0e9 * YEAR_IN_CGS,
    // temperature, energy, force
    "K" => 1.0,
    "erg" => 1.0,
    "J" => 1.0e7,
    "dyn" => 1.0,
    "N" => 1.0e5,
    // dimensionless
    "dimensionless_unscaled" => 1.0,
};

/// Returns the factor converting one `unit` into cgs, if the unit is known.
pub fn cgs_factor(unit: &str) -> Option<f64> {
    CGS_FACTORS.get(unit).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn myr_is_a_million_julian_years() {
        assert!((MYR_IN_CGS - 3.155_76e13).abs() < 1.0);
    }

    #[test]
    fn cgs_factor_resolves_astronomical_units() {
        assert_eq!(cgs_factor("au"), Some(AU_IN_CGS));
        assert_eq!(cgs_factor("Myr"), Some(MYR_IN_CGS));
        assert_eq!(cgs_factor("km"), Some(1.0e5));
    }

    #[test]
    fn cgs_factor_accepts_short_body_aliases() {
        for (alias, canonical) in [
            ("Msun", "solMass"),
            ("Mearth", "earthMass"),
            ("Mjup", "jupiterMass"),
            ("Rsun", "solRad"),
            ("Rearth", "earthRad"),
            ("Rjup", "jupiterRad"),
        ] {
            assert_eq!(cgs_factor(alias), cgs_factor(canonical), "alias {alias}");
            assert!(cgs_factor(alias).is_some());
        }
    }

    #[test]
    fn cgs_factor_is_case_sensitive_and_rejects_unknown_units() {
        assert_eq!(cgs_factor("myr"), None);
        assert_eq!(cgs_factor("furlong"), None);
        assert_eq!(cgs_factor(""), None);
    }
}
