//! The fixed, ordered rule set. Every rule is independent and runs on every call.

use super::parsed::ParsedSpecs;
use super::tables;
use crate::models::ParameterKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Three-valued rule result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Pass,
    /// A field the rule needs is absent.
    MissingData(String),
    Violation(String),
}

pub enum RuleCheck {
    /// Field must be present; absence makes the cable unverifiable.
    Required(ParameterKey),
    /// Field should be present; absence is reported but never blocks.
    Recommended(ParameterKey),
    /// Predicate over parsed values. Passes when its inputs are absent.
    Predicate(fn(&ParsedSpecs) -> RuleOutcome),
}

pub struct Rule {
    pub id: &'static str,
    pub severity: Severity,
    pub check: RuleCheck,
}

impl Rule {
    pub fn evaluate(&self, specs: &ParsedSpecs) -> RuleOutcome {
        match &self.check {
            RuleCheck::Required(key) if !specs.has(*key) => {
                RuleOutcome::MissingData(format!("Missing required field: {key}"))
            }
            RuleCheck::Recommended(key) if !specs.has(*key) => {
                RuleOutcome::MissingData(format!("Missing recommended field: {key}"))
            }
            RuleCheck::Required(_) | RuleCheck::Recommended(_) => RuleOutcome::Pass,
            RuleCheck::Predicate(check) => check(specs),
        }
    }
}

const fn error(id: &'static str, check: RuleCheck) -> Rule {
    Rule {
        id,
        severity: Severity::Error,
        check,
    }
}

const fn warning(id: &'static str, check: RuleCheck) -> Rule {
    Rule {
        id,
        severity: Severity::Warning,
        check,
    }
}

pub static RULES: &[Rule] = &[
    error("voltage_present", RuleCheck::Required(ParameterKey::VoltageRating)),
    error("conductor_size_present", RuleCheck::Required(ParameterKey::ConductorSize)),
    warning("insulation_present", RuleCheck::Recommended(ParameterKey::InsulationType)),
    warning(
        "conductor_material_present",
        RuleCheck::Recommended(ParameterKey::ConductorMaterial),
    ),
    warning(
        "temperature_present",
        RuleCheck::Recommended(ParameterKey::TemperatureRating),
    ),
    warning(
        "standard_present",
        RuleCheck::Recommended(ParameterKey::StandardCompliance),
    ),
    error("voltage_standard_class", RuleCheck::Predicate(voltage_standard_class)),
    error("voltage_pair_order", RuleCheck::Predicate(voltage_pair_order)),
    error("conductor_size_range", RuleCheck::Predicate(conductor_size_range)),
    warning("conductor_size_nominal", RuleCheck::Predicate(conductor_size_nominal)),
    error("current_range", RuleCheck::Predicate(current_range)),
    error("temperature_range", RuleCheck::Predicate(temperature_range)),
    error("core_count_range", RuleCheck::Predicate(core_count_range)),
    error("size_for_voltage", RuleCheck::Predicate(size_for_voltage)),
    error("current_for_size", RuleCheck::Predicate(current_for_size)),
    error(
        "insulation_temperature_limit",
        RuleCheck::Predicate(insulation_temperature_limit),
    ),
    error("insulation_voltage_limit", RuleCheck::Predicate(insulation_voltage_limit)),
    warning("standard_voltage_scope", RuleCheck::Predicate(standard_voltage_scope)),
];

fn violation_if(failed: bool, message: impl FnOnce() -> String) -> RuleOutcome {
    if failed {
        RuleOutcome::Violation(message())
    } else {
        RuleOutcome::Pass
    }
}

// ── Range checks ──────────────────────────────────────────────

fn voltage_standard_class(s: &ParsedSpecs) -> RuleOutcome {
    let Some(v) = s.voltage else {
        return RuleOutcome::Pass;
    };
    violation_if(!tables::is_standard_voltage(v.u), || {
        format!("Voltage rating {}V is not a standard voltage class", v.u)
    })
}

fn voltage_pair_order(s: &ParsedSpecs) -> RuleOutcome {
    let Some(v) = s.voltage else {
        return RuleOutcome::Pass;
    };
    match v.uo {
        Some(uo) => violation_if(uo > v.u, || {
            format!("Phase-to-earth voltage {uo}V exceeds phase-to-phase voltage {}V", v.u)
        }),
        None => RuleOutcome::Pass,
    }
}

fn conductor_size_range(s: &ParsedSpecs) -> RuleOutcome {
    let Some(size) = s.conductor_size else {
        return RuleOutcome::Pass;
    };
    violation_if(
        !(tables::MIN_SIZE_MM2..=tables::MAX_SIZE_MM2).contains(&size),
        || {
            format!(
                "Conductor size {size}mm² is outside {}-{}mm²",
                tables::MIN_SIZE_MM2,
                tables::MAX_SIZE_MM2
            )
        },
    )
}

fn conductor_size_nominal(s: &ParsedSpecs) -> RuleOutcome {
    let Some(size) = s.conductor_size else {
        return RuleOutcome::Pass;
    };
    violation_if(!tables::is_nominal_size(size), || {
        format!("Conductor size {size}mm² is not an IEC 60228 nominal size")
    })
}

fn current_range(s: &ParsedSpecs) -> RuleOutcome {
    let Some(current) = s.current else {
        return RuleOutcome::Pass;
    };
    violation_if(current <= 0.0 || current > tables::MAX_CURRENT_A, || {
        format!(
            "Current rating {current}A is outside 0-{}A",
            tables::MAX_CURRENT_A
        )
    })
}

fn temperature_range(s: &ParsedSpecs) -> RuleOutcome {
    let Some(t) = s.temperature else {
        return RuleOutcome::Pass;
    };
    violation_if(
        !(tables::MIN_TEMPERATURE_C..=tables::MAX_TEMPERATURE_C).contains(&t),
        || {
            format!(
                "Temperature rating {t}°C is outside {}-{}°C",
                tables::MIN_TEMPERATURE_C,
                tables::MAX_TEMPERATURE_C
            )
        },
    )
}

fn core_count_range(s: &ParsedSpecs) -> RuleOutcome {
    let Some(cores) = s.cores else {
        return RuleOutcome::Pass;
    };
    violation_if(!(1..=tables::MAX_CORES).contains(&cores), || {
        format!("Core count {cores} is outside 1-{}", tables::MAX_CORES)
    })
}

// ── Cross-field checks ────────────────────────────────────────

fn size_for_voltage(s: &ParsedSpecs) -> RuleOutcome {
    let (Some(v), Some(size)) = (s.voltage, s.conductor_size) else {
        return RuleOutcome::Pass;
    };
    let Some(min) = tables::min_size_for_voltage(v.u) else {
        return RuleOutcome::Pass;
    };
    violation_if(size < min, || {
        format!(
            "Conductor size {size}mm² is below the {min}mm² minimum for {}V cables",
            v.u
        )
    })
}

fn current_for_size(s: &ParsedSpecs) -> RuleOutcome {
    let (Some(current), Some(size)) = (s.current, s.conductor_size) else {
        return RuleOutcome::Pass;
    };
    let Some(copper) = tables::copper_ampacity(size) else {
        return RuleOutcome::Pass;
    };
    let (capacity, material) = if s.is_aluminium() {
        (copper * tables::ALUMINIUM_DERATING, "aluminium")
    } else {
        (copper, "copper")
    };
    violation_if(current > capacity, || {
        format!(
            "Current rating {current}A exceeds the {:.0}A capacity of a {size}mm² {material} conductor",
            capacity
        )
    })
}

fn insulation_temperature_limit(s: &ParsedSpecs) -> RuleOutcome {
    let (Some(t), Some(insulation)) = (s.temperature, s.insulation.as_deref()) else {
        return RuleOutcome::Pass;
    };
    let Some(limit) = tables::lookup(tables::INSULATION_MAX_TEMPERATURE_C, insulation) else {
        return RuleOutcome::Pass;
    };
    violation_if(t > limit, || {
        format!("Temperature rating {t}°C exceeds the {limit}°C limit of {insulation} insulation")
    })
}

fn insulation_voltage_limit(s: &ParsedSpecs) -> RuleOutcome {
    let (Some(v), Some(insulation)) = (s.voltage, s.insulation.as_deref()) else {
        return RuleOutcome::Pass;
    };
    let Some(limit) = tables::lookup(tables::INSULATION_MAX_VOLTAGE_V, insulation) else {
        return RuleOutcome::Pass;
    };
    violation_if(v.u > limit, || {
        format!("Voltage rating {}V exceeds the {limit}V limit of {insulation} insulation", v.u)
    })
}

/// IEC 60502-1 covers up to 3kV; IEC 60502-2 covers 6kV to 30kV.
fn standard_voltage_scope(s: &ParsedSpecs) -> RuleOutcome {
    let (Some(v), Some(standard)) = (s.voltage, s.standard.as_deref()) else {
        return RuleOutcome::Pass;
    };
    match standard {
        "IEC 60502-1" => violation_if(v.u > 3000.0, || {
            format!("IEC 60502-1 covers cables up to 3000V, rated {}V", v.u)
        }),
        "IEC 60502-2" => violation_if(v.u <= 3000.0, || {
            format!("IEC 60502-2 covers cables above 3000V, rated {}V", v.u)
        }),
        _ => RuleOutcome::Pass,
    }
}
