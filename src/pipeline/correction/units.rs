//! Numeric value repair: a value is split into number, separator and unit,
//! then an ordered list of rules rewrites the parts.

use crate::models::{ParameterKey, Quantity};
use crate::pipeline::extraction::patterns::units_for;

/// A numeric value split into its parts. `number` may be a `Uo/U` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub number: String,
    pub separator: String,
    pub unit: String,
}

/// Characters a number may hold before repair.
const NUMBER_CHARS: &str = "0123456789OolIS.,/ ";

impl Reading {
    /// Split a value on its unit suffix. `None` when the value is not numeric.
    pub fn parse(key: ParameterKey, raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        for unit in units_for(key) {
            let Some(split) = trimmed.len().checked_sub(unit.len()) else {
                continue;
            };
            if !trimmed.is_char_boundary(split) || !trimmed[split..].eq_ignore_ascii_case(unit) {
                continue;
            }
            let head = &trimmed[..split];
            let number = head.trim_end_matches(|c: char| c.is_whitespace() || c == '-');
            if is_number_shaped(number) {
                return Some(Self {
                    number: number.to_string(),
                    separator: head[number.len()..].to_string(),
                    unit: trimmed[split..].to_string(),
                });
            }
        }
        is_number_shaped(trimmed).then(|| Self {
            number: trimmed.to_string(),
            separator: String::new(),
            unit: String::new(),
        })
    }

    pub fn render(&self) -> String {
        format!("{}{}{}", self.number, self.separator, self.unit)
    }

    fn map_sides(&mut self, f: impl Fn(&str) -> String) {
        self.number = self.number.split('/').map(f).collect::<Vec<_>>().join("/");
    }

    /// Every side of the number as a float, or `None` if any side fails to parse.
    fn values(&self) -> Option<Vec<f64>> {
        self.number.split('/').map(|s| s.parse::<f64>().ok()).collect()
    }

    fn set_values(&mut self, values: &[f64]) {
        self.number = values.iter().map(|v| format_number(*v)).collect::<Vec<_>>().join("/");
    }
}

fn is_number_shaped(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| NUMBER_CHARS.contains(c))
        && s.chars().any(|c| c.is_ascii_digit())
}

pub type NumericRule = fn(&mut Reading, Quantity);

/// Ordered repair rules for numeric values. Each is a no-op on canonical input.
pub const NUMERIC_RULES: &[(&str, NumericRule)] = &[
    ("whitespace", strip_whitespace),
    ("digit_confusion", fix_digit_confusion),
    ("decimal_comma", fix_decimal_comma),
    ("unit_misread", fix_unit_misread),
    ("unit_case", fix_unit_case),
    ("awg_conversion", convert_awg),
    ("unit_conversion", convert_units),
    ("unit_canonical", canonical_unit),
    ("unit_default", default_unit),
    ("number_format", normalize_number),
];

fn strip_whitespace(r: &mut Reading, _: Quantity) {
    r.separator.clear();
    r.number.retain(|c| !c.is_whitespace());
}

fn fix_digit_confusion(r: &mut Reading, _: Quantity) {
    r.number = r
        .number
        .chars()
        .map(|c| match c {
            'O' | 'o' => '0',
            'l' | 'I' => '1',
            'S' => '5',
            _ => c,
        })
        .collect();
}

fn fix_decimal_comma(r: &mut Reading, _: Quantity) {
    r.map_sides(|side| {
        if !side.contains(',') {
            side.to_string()
        } else if is_thousands_grouped(side) {
            side.replace(',', "")
        } else {
            side.replace(',', ".")
        }
    });
}

/// `1,000` or `11,000`: a non-zero lead group then groups of exactly three.
fn is_thousands_grouped(side: &str) -> bool {
    let mut groups = side.split(',');
    let lead_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && !g.starts_with('0'));
    lead_ok && groups.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}

fn fix_unit_misread(r: &mut Reading, _: Quantity) {
    // rn read for m
    for misread in ["rnrn", "mrn", "rnm"] {
        if r.unit.contains(misread) {
            r.unit = r.unit.replace(misread, "mm");
        }
    }
}

/// Preferred spelling of each unit token, compared case-insensitively.
const UNIT_SPELLINGS: &[&str] = &[
    "kV", "V", "VAC", "VDC", "volts", "volt", "A", "amps", "amp", "ampere", "amperes", "AWG",
    "mm", "mm²", "mm2", "mm^2", "sq mm", "sq.mm", "sq. mm", "sqmm", "°C", "ºC", "° C", "°F", "ºF",
    "C", "F", "deg C", "degC", "deg F", "degrees C", "degrees F", "cores", "core",
];

fn fix_unit_case(r: &mut Reading, _: Quantity) {
    if let Some(preferred) = UNIT_SPELLINGS.iter().find(|s| s.eq_ignore_ascii_case(&r.unit)) {
        r.unit = preferred.to_string();
    }
}

/// Largest and smallest gauge with a defined diameter; `k/0` gauges are 1 - k.
const AWG_RANGE: std::ops::RangeInclusive<i32> = -3..=40;

fn convert_awg(r: &mut Reading, q: Quantity) {
    if q != Quantity::Area || r.unit != "AWG" {
        return;
    }
    let Some(area) = awg_gauge(&r.number).map(awg_area_mm2) else {
        return;
    };
    r.number = format_number(round_to(area, 2));
    r.unit = "mm".into();
}

fn awg_gauge(number: &str) -> Option<i32> {
    let gauge = match number.split_once('/') {
        Some((k, "0")) => 1 - k.parse::<i32>().ok()?,
        Some(_) => return None,
        None => number.parse::<i32>().ok()?,
    };
    AWG_RANGE.contains(&gauge).then_some(gauge)
}

/// Cross-sectional area of a solid conductor of the given AWG gauge.
pub fn awg_area_mm2(gauge: i32) -> f64 {
    let diameter = 0.127 * 92f64.powf(f64::from(36 - gauge) / 39.0);
    std::f64::consts::PI / 4.0 * diameter * diameter
}

fn convert_units(r: &mut Reading, q: Quantity) {
    match q {
        Quantity::Voltage if r.unit == "kV" => {
            if let Some(values) = r.values() {
                let volts: Vec<f64> = values.iter().map(|v| round_to(v * 1000.0, 3)).collect();
                r.set_values(&volts);
                r.unit = "V".into();
            }
        }
        Quantity::Temperature if is_fahrenheit(&r.unit) => {
            if let Ok(f) = r.number.parse::<f64>() {
                r.number = format_number(round_to((f - 32.0) * 5.0 / 9.0, 1));
                r.unit = "°C".into();
            }
        }
        _ => {}
    }
}

fn is_fahrenheit(unit: &str) -> bool {
    ["°F", "ºF", "F", "deg F", "degrees F"]
        .iter()
        .any(|f| f.eq_ignore_ascii_case(unit))
}

/// Spellings that mean the canonical unit itself, with no scaling.
fn aliases(q: Quantity) -> &'static [&'static str] {
    match q {
        Quantity::Voltage => &["V", "volt", "volts", "VAC", "VDC"],
        Quantity::Area => &["mm", "mm²", "mm2", "mm^2", "sq mm", "sq.mm", "sq. mm", "sqmm"],
        Quantity::Current => &["A", "amp", "amps", "ampere", "amperes"],
        Quantity::Temperature => &["°C", "ºC", "° C", "C", "oC", "deg C", "degC", "degrees C"],
        Quantity::Count => &["core", "cores", "x", "X", "×"],
    }
}

fn canonical_unit(r: &mut Reading, q: Quantity) {
    if aliases(q).iter().any(|a| a.eq_ignore_ascii_case(&r.unit)) {
        r.unit = q.canonical_unit().to_string();
    }
}

fn default_unit(r: &mut Reading, q: Quantity) {
    if r.unit.is_empty() && !r.number.is_empty() {
        r.unit = q.canonical_unit().to_string();
    }
}

fn normalize_number(r: &mut Reading, _: Quantity) {
    if let Some(values) = r.values() {
        let rounded: Vec<f64> = values.iter().map(|v| round_to(*v, 3)).collect();
        r.set_values(&rounded);
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Shortest decimal rendering: `600`, `2.5`, `0.75`.
/// Digit strings too long for `f64` saturate at its largest finite value.
pub fn format_number(value: f64) -> String {
    format!("{}", value.clamp(f64::MIN, f64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_all(key: ParameterKey, raw: &str) -> String {
        let q = key.quantity().unwrap();
        let mut r = Reading::parse(key, raw).unwrap();
        for (_, rule) in NUMERIC_RULES {
            rule(&mut r, q);
        }
        r.render()
    }

    #[test]
    fn parse_splits_unit_suffix() {
        let r = Reading::parse(ParameterKey::VoltageRating, "6OO V").unwrap();
        assert_eq!(r.number, "6OO");
        assert_eq!(r.separator, " ");
        assert_eq!(r.unit, "V");

        let r = Reading::parse(ParameterKey::VoltageRating, "0.6/1kV").unwrap();
        assert_eq!(r.number, "0.6/1");
        assert_eq!(r.unit, "kV");
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert!(Reading::parse(ParameterKey::VoltageRating, "high").is_none());
        assert!(Reading::parse(ParameterKey::ConductorSize, "OO mm").is_none());
    }

    #[test]
    fn parse_bare_number() {
        let r = Reading::parse(ParameterKey::CoreCount, "3").unwrap();
        assert_eq!(r.number, "3");
        assert!(r.unit.is_empty());
    }

    #[test]
    fn full_repair_of_common_readings() {
        assert_eq!(run_all(ParameterKey::VoltageRating, "6OO V"), "600V");
        assert_eq!(run_all(ParameterKey::VoltageRating, "0.6/1 KV"), "600/1000V");
        assert_eq!(run_all(ParameterKey::VoltageRating, "450/750 volts"), "450/750V");
        assert_eq!(run_all(ParameterKey::ConductorSize, "2.5mrn"), "2.5mm");
        assert_eq!(run_all(ParameterKey::ConductorSize, "2,5 mm²"), "2.5mm");
        assert_eq!(run_all(ParameterKey::ConductorSize, "16 sq mm"), "16mm");
        assert_eq!(run_all(ParameterKey::CurrentRating, "32 amps"), "32A");
        assert_eq!(run_all(ParameterKey::TemperatureRating, "90 ºC"), "90°C");
        assert_eq!(run_all(ParameterKey::TemperatureRating, "90 C"), "90°C");
        assert_eq!(run_all(ParameterKey::CoreCount, "4 x"), "4");
        assert_eq!(run_all(ParameterKey::CoreCount, "3 cores"), "3");
    }

    #[test]
    fn thousands_separator_is_removed() {
        assert_eq!(run_all(ParameterKey::VoltageRating, "1,000V"), "1000V");
        assert_eq!(run_all(ParameterKey::VoltageRating, "0,6/1 kV"), "600/1000V");
    }

    #[test]
    fn awg_gauges_convert_to_area() {
        assert_eq!(run_all(ParameterKey::ConductorSize, "14 AWG"), "2.08mm");
        assert_eq!(run_all(ParameterKey::ConductorSize, "4/0 awg"), "107.22mm");
        assert!((awg_area_mm2(10) - 5.26).abs() < 0.01);
    }

    #[test]
    fn fahrenheit_converts_to_celsius() {
        assert_eq!(run_all(ParameterKey::TemperatureRating, "194 °F"), "90°C");
        assert_eq!(run_all(ParameterKey::TemperatureRating, "221F"), "105°C");
    }

    #[test]
    fn bare_number_gets_canonical_unit() {
        assert_eq!(run_all(ParameterKey::VoltageRating, "600"), "600V");
        assert_eq!(run_all(ParameterKey::CoreCount, "04"), "4");
    }

    #[test]
    fn rules_are_no_ops_on_canonical_values() {
        for (key, canonical) in [
            (ParameterKey::VoltageRating, "600/1000V"),
            (ParameterKey::ConductorSize, "2.5mm"),
            (ParameterKey::CurrentRating, "32A"),
            (ParameterKey::TemperatureRating, "90°C"),
            (ParameterKey::CoreCount, "4"),
        ] {
            let q = key.quantity().unwrap();
            let mut r = Reading::parse(key, canonical).unwrap();
            for (name, rule) in NUMERIC_RULES {
                let before = r.render();
                rule(&mut r, q);
                assert_eq!(r.render(), before, "{name} changed canonical {canonical}");
            }
        }
    }

    #[test]
    fn overlong_numbers_stay_finite() {
        let raw = format!("{}V", "9".repeat(400));
        let repaired = run_all(ParameterKey::VoltageRating, &raw);
        assert!(!repaired.contains("inf"));
        assert_eq!(repaired, format!("{}V", f64::MAX));

        let kilovolts = format!("{}kV", "9".repeat(306));
        assert_eq!(run_all(ParameterKey::VoltageRating, &kilovolts), format!("{}V", f64::MAX));
        assert_eq!(round_to(f64::MAX, 3), f64::MAX);
    }

    #[test]
    fn thousands_grouping_detection() {
        assert!(is_thousands_grouped("1,000"));
        assert!(is_thousands_grouped("11,000"));
        assert!(!is_thousands_grouped("2,5"));
        assert!(!is_thousands_grouped("0,600"));
    }
}
