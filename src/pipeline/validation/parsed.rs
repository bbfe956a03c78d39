use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::ValidationError;
use crate::models::{ParameterKey, SpecMap};

static CANONICAL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?$").expect("Invalid canonical number regex"));

/// Rated voltage as `U`, or `Uo/U` when both are given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voltage {
    pub uo: Option<f64>,
    pub u: f64,
}

/// Corrected specs parsed into typed quantities for the rule checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSpecs {
    pub(super) present: BTreeSet<ParameterKey>,
    pub voltage: Option<Voltage>,
    pub conductor_size: Option<f64>,
    pub current: Option<f64>,
    pub temperature: Option<f64>,
    pub cores: Option<u32>,
    pub insulation: Option<String>,
    pub sheath: Option<String>,
    pub conductor_material: Option<String>,
    pub standard: Option<String>,
}

impl ParsedSpecs {
    /// Parse canonical values. A value that is not in canonical form is a fault:
    /// correction always produces canonical form for recognized input.
    pub fn from_specs(specs: &SpecMap) -> Result<Self, ValidationError> {
        let mut parsed = Self::default();

        for (key, value) in specs.iter() {
            if value.trim().is_empty() {
                return Err(malformed(key, value));
            }
            parsed.present.insert(key);

            match key {
                ParameterKey::VoltageRating => {
                    let sides = numeric_sides(key, value, 2)?;
                    parsed.voltage = Some(match sides.as_slice() {
                        [uo, u] => Voltage { uo: Some(*uo), u: *u },
                        [u] => Voltage { uo: None, u: *u },
                        _ => return Err(malformed(key, value)),
                    });
                }
                ParameterKey::ConductorSize => {
                    parsed.conductor_size = Some(single(key, value)?);
                }
                ParameterKey::CurrentRating => parsed.current = Some(single(key, value)?),
                ParameterKey::TemperatureRating => parsed.temperature = Some(single(key, value)?),
                ParameterKey::CoreCount => {
                    let count = single(key, value)?;
                    if count.fract() != 0.0 || count < 0.0 {
                        return Err(malformed(key, value));
                    }
                    // Saturates; oversized counts fail the range rule.
                    parsed.cores = Some(count as u32);
                }
                ParameterKey::InsulationType => parsed.insulation = Some(value.to_string()),
                ParameterKey::SheathMaterial => parsed.sheath = Some(value.to_string()),
                ParameterKey::ConductorMaterial => {
                    parsed.conductor_material = Some(value.to_string())
                }
                ParameterKey::StandardCompliance => parsed.standard = Some(value.to_string()),
            }
        }

        Ok(parsed)
    }

    pub fn has(&self, key: ParameterKey) -> bool {
        self.present.contains(&key)
    }

    pub fn is_aluminium(&self) -> bool {
        self.conductor_material
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case("Aluminium"))
    }
}

fn malformed(key: ParameterKey, value: &str) -> ValidationError {
    ValidationError::MalformedValue {
        key,
        value: value.to_string(),
    }
}

fn single(key: ParameterKey, value: &str) -> Result<f64, ValidationError> {
    let sides = numeric_sides(key, value, 1)?;
    sides.first().copied().ok_or_else(|| malformed(key, value))
}

/// Strip the canonical unit and parse up to `max_sides` `/`-separated numbers.
fn numeric_sides(key: ParameterKey, value: &str, max_sides: usize) -> Result<Vec<f64>, ValidationError> {
    let unit = key.quantity().map(|q| q.canonical_unit()).unwrap_or("");
    let number = value.strip_suffix(unit).ok_or_else(|| malformed(key, value))?;

    let sides: Vec<&str> = number.split('/').collect();
    if sides.len() > max_sides {
        return Err(malformed(key, value));
    }
    sides
        .iter()
        .map(|side| {
            if !CANONICAL_NUMBER.is_match(side) {
                return Err(malformed(key, value));
            }
            side.parse::<f64>().map_err(|_| malformed(key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_specs(pairs: &[(ParameterKey, &str)]) -> SpecMap {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn parses_canonical_values() {
        let specs = make_specs(&[
            (ParameterKey::VoltageRating, "600/1000V"),
            (ParameterKey::ConductorSize, "2.5mm"),
            (ParameterKey::CurrentRating, "32A"),
            (ParameterKey::TemperatureRating, "90°C"),
            (ParameterKey::CoreCount, "4"),
            (ParameterKey::ConductorMaterial, "Aluminium"),
        ]);
        let parsed = ParsedSpecs::from_specs(&specs).unwrap();
        assert_eq!(parsed.voltage, Some(Voltage { uo: Some(600.0), u: 1000.0 }));
        assert_eq!(parsed.conductor_size, Some(2.5));
        assert_eq!(parsed.current, Some(32.0));
        assert_eq!(parsed.temperature, Some(90.0));
        assert_eq!(parsed.cores, Some(4));
        assert!(parsed.is_aluminium());
        assert!(parsed.has(ParameterKey::CoreCount));
        assert!(!parsed.has(ParameterKey::InsulationType));
    }

    #[test]
    fn single_voltage_has_no_uo() {
        let specs = make_specs(&[(ParameterKey::VoltageRating, "600V")]);
        let parsed = ParsedSpecs::from_specs(&specs).unwrap();
        assert_eq!(parsed.voltage, Some(Voltage { uo: None, u: 600.0 }));
    }

    #[test]
    fn rejects_non_canonical_values() {
        for (key, value) in [
            (ParameterKey::VoltageRating, "6OO V"),
            (ParameterKey::VoltageRating, "0.6/1kV"),
            (ParameterKey::ConductorSize, "2.5mm²"),
            (ParameterKey::ConductorSize, "1/2/3mm"),
            (ParameterKey::CoreCount, "2.5"),
            (ParameterKey::InsulationType, "  "),
        ] {
            let specs = make_specs(&[(key, value)]);
            let err = ParsedSpecs::from_specs(&specs).unwrap_err();
            assert!(err.to_string().contains(value), "{err}");
        }
    }

    #[test]
    fn negative_temperature_parses() {
        let specs = make_specs(&[(ParameterKey::TemperatureRating, "-40°C")]);
        let parsed = ParsedSpecs::from_specs(&specs).unwrap();
        assert_eq!(parsed.temperature, Some(-40.0));
    }
}
