use serde::{Deserialize, Serialize};

use super::enums::{ParameterKey, ValidationStatus};

/// One applied correction rule: what it saw, what it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionLogEntry {
    pub key: ParameterKey,
    pub original: String,
    pub corrected: String,
    pub rule_applied: String,
}

/// A ranked domain term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTerm {
    pub term: String,
    pub score: f64,
}

/// Output of keyword ranking over one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub category: String,
    pub top_terms: Vec<RankedTerm>,
    pub conductor_type_hint: Option<String>,
}

/// Backing data for the on-demand "keyword generation" view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordDetails {
    pub category: String,
    /// `None` when keyword generation failed.
    pub extracted_data: Option<KeywordResult>,
    pub full_text_debug: String,
}

/// Validation outcome plus everything a caller needs to explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    /// True only for `READY`.
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub correction_logs: Vec<CorrectionLogEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_details: Option<KeywordDetails>,
}

impl ValidationReport {
    pub fn new(status: ValidationStatus, errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            status,
            valid: status == ValidationStatus::Ready,
            errors,
            warnings,
            correction_logs: Vec::new(),
            keyword_details: None,
        }
    }

    /// Report for an internal fault: the fault message is the only error.
    pub fn fault(message: impl Into<String>) -> Self {
        Self::new(ValidationStatus::Error, vec![message.into()], Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_report_shape() {
        let report = ValidationReport::fault("boom");
        assert_eq!(report.status, ValidationStatus::Error);
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["boom".to_string()]);
        assert!(report.warnings.is_empty());
        assert!(report.correction_logs.is_empty());
    }

    #[test]
    fn only_ready_is_valid() {
        assert!(ValidationReport::new(ValidationStatus::Ready, vec![], vec![]).valid);
        assert!(!ValidationReport::new(ValidationStatus::Violation, vec![], vec![]).valid);
        assert!(!ValidationReport::new(ValidationStatus::Unverifiable, vec![], vec![]).valid);
    }

    #[test]
    fn keyword_details_omitted_when_absent() {
        let report = ValidationReport::new(ValidationStatus::Ready, vec![], vec![]);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("keyword_details").is_none());
        assert_eq!(json["status"], "READY");
    }
}
