//! Engineering validation of corrected cable specs.
//!
//! Every rule in [`rules::RULES`] runs on every call. Status is derived from
//! the collected outcomes:
//! - a required field missing → `UNVERIFIABLE`
//! - otherwise any error-severity violation → `VIOLATION`
//! - otherwise `READY` (warnings never lower status)

pub mod parsed;
pub mod rules;
pub mod tables;

use thiserror::Error;

use crate::models::{ParameterKey, SpecMap, ValidationReport, ValidationStatus};

pub use parsed::ParsedSpecs;
pub use rules::{Rule, RuleOutcome, Severity, RULES};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Malformed value '{value}' for {key}: not in canonical form")]
    MalformedValue { key: ParameterKey, value: String },
}

/// Validate corrected specs. Never fails: internal faults become an `ERROR`
/// report carrying the fault message as its only error.
pub fn validate(specs: &SpecMap) -> ValidationReport {
    match try_validate(specs) {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(error = %e, "Validation fault");
            ValidationReport::fault(e.to_string())
        }
    }
}

/// Validate corrected specs, surfacing malformed values as an error.
pub fn try_validate(specs: &SpecMap) -> Result<ValidationReport, ValidationError> {
    let parsed = ParsedSpecs::from_specs(specs)?;
    Ok(evaluate(&parsed))
}

/// Run the full rule set over parsed specs.
pub fn evaluate(parsed: &ParsedSpecs) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut missing_required = false;
    let mut violated = false;

    for rule in RULES {
        let message = match (rule.evaluate(parsed), rule.severity) {
            (RuleOutcome::Pass, _) => continue,
            (RuleOutcome::MissingData(msg), Severity::Error) => {
                missing_required = true;
                msg
            }
            (RuleOutcome::Violation(msg), Severity::Error) => {
                violated = true;
                msg
            }
            (RuleOutcome::MissingData(msg) | RuleOutcome::Violation(msg), Severity::Warning) => {
                warnings.push(msg);
                continue;
            }
        };
        tracing::debug!(rule = rule.id, "Validation rule failed");
        errors.push(message);
    }

    let status = if missing_required {
        ValidationStatus::Unverifiable
    } else if violated {
        ValidationStatus::Violation
    } else {
        ValidationStatus::Ready
    };

    tracing::debug!(
        status = %status,
        errors = errors.len(),
        warnings = warnings.len(),
        "Validation complete"
    );

    ValidationReport::new(status, errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_specs(pairs: &[(ParameterKey, &str)]) -> SpecMap {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    fn make_complete_specs() -> SpecMap {
        make_specs(&[
            (ParameterKey::VoltageRating, "600/1000V"),
            (ParameterKey::ConductorSize, "16mm"),
            (ParameterKey::CurrentRating, "80A"),
            (ParameterKey::TemperatureRating, "90°C"),
            (ParameterKey::CoreCount, "4"),
            (ParameterKey::InsulationType, "XLPE"),
            (ParameterKey::SheathMaterial, "PVC"),
            (ParameterKey::ConductorMaterial, "Copper"),
            (ParameterKey::StandardCompliance, "IEC 60502-1"),
        ])
    }

    #[test]
    fn complete_cable_is_ready() {
        let report = validate(&make_complete_specs());
        assert_eq!(report.status, ValidationStatus::Ready);
        assert!(report.valid);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn noisy_scenario_values_pass() {
        let specs = make_specs(&[
            (ParameterKey::VoltageRating, "600V"),
            (ParameterKey::ConductorSize, "2.5mm"),
        ]);
        let report = validate(&specs);
        assert_eq!(report.status, ValidationStatus::Ready);
        assert!(report.errors.is_empty());
        // Recommended fields missing only warn.
        assert_eq!(report.warnings.len(), 4);
    }

    #[test]
    fn empty_specs_are_unverifiable() {
        let report = validate(&SpecMap::new());
        assert_eq!(report.status, ValidationStatus::Unverifiable);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("voltage_rating")));
        assert!(report.errors.iter().any(|e| e.contains("conductor_size")));
    }

    #[test]
    fn missing_required_outranks_violation() {
        let specs = make_specs(&[(ParameterKey::VoltageRating, "700V")]);
        let report = validate(&specs);
        assert_eq!(report.status, ValidationStatus::Unverifiable);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn every_violation_is_reported() {
        let mut specs = make_complete_specs();
        specs.insert(ParameterKey::VoltageRating, "700V");
        specs.insert(ParameterKey::ConductorSize, "2000mm");
        specs.insert(ParameterKey::CoreCount, "80");
        let report = validate(&specs);
        assert_eq!(report.status, ValidationStatus::Violation);
        assert!(report.errors.len() >= 3, "{:?}", report.errors);
    }

    #[test]
    fn adding_a_violation_never_returns_to_ready() {
        let mut specs = make_complete_specs();
        assert_eq!(validate(&specs).status, ValidationStatus::Ready);

        specs.insert(ParameterKey::CurrentRating, "9000A");
        let status = validate(&specs).status;
        assert!(matches!(
            status,
            ValidationStatus::Violation | ValidationStatus::Unverifiable
        ));
    }

    #[test]
    fn warnings_keep_ready_status() {
        let mut specs = make_complete_specs();
        specs.insert(ParameterKey::ConductorSize, "2.08mm");
        specs.insert(ParameterKey::CurrentRating, "20A");
        let report = validate(&specs);
        assert_eq!(report.status, ValidationStatus::Ready);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("nominal"));
    }

    #[test]
    fn malformed_value_is_a_fault() {
        let specs = make_specs(&[
            (ParameterKey::VoltageRating, "six hundred"),
            (ParameterKey::ConductorSize, "2.5mm"),
        ]);
        let report = validate(&specs);
        assert_eq!(report.status, ValidationStatus::Error);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("six hundred"));
        assert!(report.warnings.is_empty());

        assert!(matches!(
            try_validate(&specs),
            Err(ValidationError::MalformedValue { key: ParameterKey::VoltageRating, .. })
        ));
    }

    #[test]
    fn validation_is_deterministic() {
        let specs = make_complete_specs();
        let a = serde_json::to_string(&validate(&specs)).unwrap();
        let b = serde_json::to_string(&validate(&specs)).unwrap();
        assert_eq!(a, b);
    }
}
