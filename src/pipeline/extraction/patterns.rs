//! Declarative recognition table: one entry per parameter key.
//!
//! Adding a parameter is a data change here plus a `ParameterKey` variant;
//! the matching routine in `extractor.rs` is generic over every entry.

use crate::models::ParameterKey;
use crate::pipeline::vocabulary::{
    Term, CONDUCTOR_TERMS, INSULATION_TERMS, SHEATH_TERMS, STANDARD_FAMILIES,
};

/// Shape of the value that follows a label.
pub enum ValueForm {
    /// A number (or `a/b` pair) followed by a unit token.
    Numeric {
        /// Units that anchor a match anywhere in the text.
        units: &'static [&'static str],
        /// Units too short or ambiguous to trust without a label.
        label_only_units: &'static [&'static str],
        /// Capture a leading minus sign (range lower bounds are then skipped).
        signed: bool,
    },
    /// One spelling from a vocabulary table.
    Vocabulary(&'static [Term]),
    /// A standards designation such as `IEC 60502-1`.
    Designation(&'static [Term]),
}

pub struct ParameterPattern {
    pub key: ParameterKey,
    /// Label synonyms. A space matches any run of whitespace, `-` or `_`.
    pub labels: &'static [&'static str],
    pub form: ValueForm,
    /// Whether the value is recognized without a label.
    pub bare: bool,
    /// Extra regexes with a `v` (value) group and optional `u` (anchor) group.
    pub alt_forms: &'static [&'static str],
    /// Anchor tokens the alternative forms may leave attached to a value.
    pub alt_units: &'static [&'static str],
}

pub const VOLTAGE_UNITS: &[&str] = &["kV", "KV", "kv", "Kv", "volts", "volt", "VAC", "VDC", "V"];
pub const AREA_UNITS: &[&str] = &[
    "mm²", "mm2", "mm^2", "sq. mm", "sq.mm", "sq mm", "sqmm", "mrn²", "mrn2", "rnm²", "rnm2", "AWG",
];
/// Plain `mm` (superscript lost) and its misreads. Unlabeled, these are lengths
/// such as insulation thickness or overall diameter.
pub const AREA_LABEL_ONLY_UNITS: &[&str] = &["mrn", "rnm", "rnrn", "mm"];
pub const CURRENT_UNITS: &[&str] = &["amperes", "ampere", "amps", "amp", "A"];
pub const TEMPERATURE_UNITS: &[&str] = &[
    "degrees C", "deg C", "degC", "°C", "ºC", "° C", "oC", "degrees F", "deg F", "°F", "ºF",
];
pub const TEMPERATURE_LABEL_ONLY_UNITS: &[&str] = &["C", "F"];
pub const CORE_UNITS: &[&str] = &["cores", "core"];

pub static PARAMETER_PATTERNS: &[ParameterPattern] = &[
    ParameterPattern {
        key: ParameterKey::VoltageRating,
        labels: &[
            "rated voltage",
            "voltage rating",
            "voltage grade",
            "working voltage",
            "nominal voltage",
            "voltage",
            "uo/u",
            "u0/u",
        ],
        form: ValueForm::Numeric {
            units: VOLTAGE_UNITS,
            label_only_units: &[],
            signed: false,
        },
        bare: true,
        alt_forms: &[],
        alt_units: &[],
    },
    ParameterPattern {
        key: ParameterKey::ConductorSize,
        labels: &[
            "nominal cross sectional area",
            "cross sectional area",
            "nominal cross section",
            "cross section",
            "conductor size",
            "nominal area",
            "csa",
            "size",
        ],
        form: ValueForm::Numeric {
            units: AREA_UNITS,
            label_only_units: AREA_LABEL_ONLY_UNITS,
            signed: false,
        },
        bare: true,
        alt_forms: &[],
        alt_units: &[],
    },
    ParameterPattern {
        key: ParameterKey::CurrentRating,
        labels: &[
            "current carrying capacity",
            "current rating",
            "rated current",
            "max current",
            "ampacity",
            "current",
        ],
        form: ValueForm::Numeric {
            units: CURRENT_UNITS,
            label_only_units: &[],
            signed: false,
        },
        bare: true,
        alt_forms: &[],
        alt_units: &[],
    },
    ParameterPattern {
        key: ParameterKey::TemperatureRating,
        labels: &[
            "maximum operating temperature",
            "max operating temperature",
            "max. operating temperature",
            "operating temperature",
            "conductor temperature",
            "temperature rating",
            "rated temperature",
            "temperature",
            "temp",
        ],
        form: ValueForm::Numeric {
            units: TEMPERATURE_UNITS,
            label_only_units: TEMPERATURE_LABEL_ONLY_UNITS,
            signed: true,
        },
        bare: true,
        alt_forms: &[],
        alt_units: &[],
    },
    ParameterPattern {
        key: ParameterKey::CoreCount,
        labels: &[
            "number of cores",
            "no. of cores",
            "no of cores",
            "core count",
            "cores",
        ],
        form: ValueForm::Numeric {
            units: CORE_UNITS,
            label_only_units: &[],
            signed: false,
        },
        bare: true,
        // `4 x 2.5mm²`: core count times conductor size.
        alt_forms: &[r"(?:^|[^0-9.,/])(?P<v>[1-9][0-9]?)[^\S\n]*(?P<u>[xX×])[^\S\n]*[0-9]"],
        alt_units: &["x", "X", "×"],
    },
    ParameterPattern {
        key: ParameterKey::InsulationType,
        labels: &[
            "insulation material",
            "insulation type",
            "insulated with",
            "insulation",
            "dielectric",
        ],
        form: ValueForm::Vocabulary(INSULATION_TERMS),
        bare: true,
        alt_forms: &[],
        alt_units: &[],
    },
    ParameterPattern {
        key: ParameterKey::SheathMaterial,
        labels: &[
            "outer sheath",
            "sheath material",
            "oversheath",
            "jacket material",
            "sheath",
            "jacket",
        ],
        form: ValueForm::Vocabulary(SHEATH_TERMS),
        bare: false,
        alt_forms: &[],
        alt_units: &[],
    },
    ParameterPattern {
        key: ParameterKey::ConductorMaterial,
        labels: &["conductor material", "conductor", "material"],
        form: ValueForm::Vocabulary(CONDUCTOR_TERMS),
        bare: true,
        alt_forms: &[],
        alt_units: &[],
    },
    ParameterPattern {
        key: ParameterKey::StandardCompliance,
        labels: &[
            "reference standard",
            "complies with",
            "conforms to",
            "according to",
            "specification",
            "compliance",
            "standards",
            "standard",
        ],
        form: ValueForm::Designation(STANDARD_FAMILIES),
        bare: true,
        alt_forms: &[],
        alt_units: &[],
    },
];

/// Recognition entry for a key. Every key has exactly one.
pub fn pattern_for(key: ParameterKey) -> Option<&'static ParameterPattern> {
    PARAMETER_PATTERNS.iter().find(|p| p.key == key)
}

/// Every unit token a numeric key's raw value may carry, longest first.
pub fn units_for(key: ParameterKey) -> Vec<&'static str> {
    let Some(pattern) = pattern_for(key) else {
        return Vec::new();
    };
    let mut units: Vec<&'static str> = match &pattern.form {
        ValueForm::Numeric {
            units,
            label_only_units,
            ..
        } => units.iter().chain(label_only_units.iter()).copied().collect(),
        _ => return Vec::new(),
    };
    units.extend(pattern.alt_units.iter().copied());
    units.sort_by_key(|u| std::cmp::Reverse(u.chars().count()));
    units
}
