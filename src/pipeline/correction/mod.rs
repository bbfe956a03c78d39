//! Value correction: repairs systematic OCR misreads and normalizes every
//! extracted value to its canonical form.
//!
//! Rules are ordered and pure. Each rule that changes a value records one
//! `CorrectionLogEntry` with the whole value before and after. Values no rule
//! recognizes pass through unchanged, so correcting an already-corrected map
//! produces no entries.

pub mod rules;
pub mod units;

use crate::models::{CorrectionLogEntry, ParameterKey, SpecMap};

use rules::{canonicalize_term, collapse_whitespace, fix_standard_prefix, format_standard, vocabulary_for};
use units::{Reading, NUMERIC_RULES};

/// Running value for one key plus the entries its corrections produced.
struct Trail<'a> {
    key: ParameterKey,
    value: String,
    logs: &'a mut Vec<CorrectionLogEntry>,
}

impl Trail<'_> {
    fn apply(&mut self, rule: &str, next: String) {
        if next == self.value {
            return;
        }
        self.logs.push(CorrectionLogEntry {
            key: self.key,
            original: std::mem::replace(&mut self.value, next.clone()),
            corrected: next,
            rule_applied: rule.to_string(),
        });
    }
}

/// Correct every value in a raw extraction result.
///
/// The output has exactly the keys of the input. Log entries appear in key
/// order, then rule order.
pub fn correct_specs(raw: &SpecMap) -> (SpecMap, Vec<CorrectionLogEntry>) {
    let mut corrected = SpecMap::new();
    let mut logs = Vec::new();

    for (key, value) in raw.iter() {
        let fixed = correct_value(key, value, &mut logs);
        corrected.insert(key, fixed);
    }

    tracing::debug!(
        parameters = corrected.len(),
        corrections = logs.len(),
        "Value correction complete"
    );

    (corrected, logs)
}

/// Correct one value, appending an entry per applied rule.
pub fn correct_value(key: ParameterKey, value: &str, logs: &mut Vec<CorrectionLogEntry>) -> String {
    let mut trail = Trail {
        key,
        value: value.to_string(),
        logs,
    };

    if let Some(quantity) = key.quantity() {
        if let Some(mut reading) = Reading::parse(key, value) {
            // Leading/trailing spaces are not part of any reading.
            trail.apply("whitespace", reading.render());
            for (rule, apply) in NUMERIC_RULES {
                apply(&mut reading, quantity);
                trail.apply(rule, reading.render());
            }
        }
        return trail.value;
    }

    trail.apply("whitespace", collapse_whitespace(value));

    if let Some(terms) = vocabulary_for(key) {
        if let Some((rule, canonical)) = canonicalize_term(terms, &trail.value) {
            trail.apply(rule, canonical);
        }
    } else if key == ParameterKey::StandardCompliance {
        let prefixed = fix_standard_prefix(&trail.value);
        trail.apply("standard_prefix", prefixed);
        let formatted = format_standard(&trail.value);
        trail.apply("standard_format", formatted);
    }

    trail.value
}
