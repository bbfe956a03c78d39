use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::patterns::{ParameterPattern, ValueForm, PARAMETER_PATTERNS};
use super::sanitize::sanitize_ocr_text;
use crate::models::{ParameterKey, SpecMap};
use crate::pipeline::vocabulary::{all_spellings, Term};

/// Number as OCR renders it: digits plus the letters OCR confuses with digits.
/// A match only counts if it holds at least one real digit.
const NUMBER: &str = r"[0-9OolIS]+(?:[.,][0-9OolIS]+)?";

/// Between a label and its value: spaces, an optional parenthetical such as
/// `(Uo/U)`, then colon/dash/equals/dot separators.
const SEPARATOR: &str = r"[^\S\n]*(?:\([^)\n]{0,40}\))?[\s:=\-–—.]*";

/// Signed values keep a dash glued to the digits as a sign; a dash used as a
/// separator must be followed by whitespace.
const SIGNED_SEPARATOR: &str = r"[^\S\n]*(?:\([^)\n]{0,40}\))?(?:[\s:=.]|[-–—]\s)*";

/// Up to three words between a label and a vocabulary term
/// (`Conductor: Class 2 stranded copper`).
const FILLER: &str = r"(?:[\p{L}\p{N}]+[^\S\n]+){0,3}";

/// Bare vocabulary matches shorter than this (`PE`, `Cu`, `Al`) need a label.
const MIN_BARE_TERM_CHARS: usize = 3;

/// A possible value for one key, with what it takes to rank it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: ParameterKey,
    /// Matched text, unit attached.
    pub value: String,
    /// Byte offset of the value in the sanitized text.
    pub offset: usize,
    /// Distance to the anchor token: the unit for numbers, the label for terms.
    pub anchor_gap: Option<usize>,
    /// Found after one of the key's labels.
    pub labeled: bool,
}

impl Candidate {
    /// Ordering key: anchored and labeled first, then anchored, then the rest.
    /// Within a tier, closest to its anchor wins, then earliest.
    fn rank(&self) -> (u8, usize, usize) {
        let tier = match (self.anchor_gap, self.labeled) {
            (Some(_), true) => 0,
            (Some(_), false) => 1,
            (None, _) => 2,
        };
        (tier, self.anchor_gap.unwrap_or(usize::MAX), self.offset)
    }
}

struct CompiledPattern {
    key: ParameterKey,
    kind: MatchKind,
    labeled: Regex,
    bare: Option<Regex>,
    alt: Vec<Regex>,
}

#[derive(Clone, Copy, PartialEq)]
enum MatchKind {
    Numeric,
    Term,
}

static COMPILED_PATTERNS: LazyLock<Vec<CompiledPattern>> =
    LazyLock::new(|| PARAMETER_PATTERNS.iter().map(compile).collect());

fn compile(pattern: &ParameterPattern) -> CompiledPattern {
    let labels = format!(r"(?P<l>(?i:\b(?:{})\b))", alternation(pattern.labels));

    let (kind, labeled, bare) = match &pattern.form {
        ValueForm::Numeric {
            units,
            label_only_units,
            signed,
        } => {
            let all_units: Vec<&str> = units.iter().chain(label_only_units.iter()).copied().collect();
            let (separator, sign, prefix) = if *signed {
                (SIGNED_SEPARATOR, r"(?P<sign>[-−])?", r"(?:^|[^0-9.,/\p{L}\-−])")
            } else {
                (SEPARATOR, "", r"(?:^|[^0-9.,/\p{L}]|[xX×])")
            };
            let value = format!(r"(?P<v>{NUMBER}(?:[^\S\n]*/[^\S\n]*{NUMBER})?)");
            let labeled = format!(
                r"{labels}{separator}{sign}{value}(?:[\s\-]{{0,3}}(?P<u>(?i:{}))(?:[^\p{{L}}]|$))?",
                alternation(&all_units)
            );
            let bare = format!(
                r"{prefix}{sign}{value}[\s\-]{{0,3}}(?P<u>(?i:{}))(?:[^\p{{L}}]|$)",
                alternation(units)
            );
            (MatchKind::Numeric, labeled, bare)
        }
        ValueForm::Vocabulary(terms) => {
            let terms = term_alternation(terms);
            let labeled =
                format!(r"{labels}{SEPARATOR}{FILLER}(?P<v>(?i:{terms}))(?:[^\p{{L}}\p{{N}}]|$)");
            let bare = format!(r"(?:^|[^\p{{L}}\p{{N}}])(?P<v>(?i:{terms}))(?:[^\p{{L}}\p{{N}}]|$)");
            (MatchKind::Term, labeled, bare)
        }
        ValueForm::Designation(families) => {
            let designation = format!(
                r"(?P<v>(?i:{})[^\S\n]*[0-9]{{2,5}}(?:[^\S\n]*[-–.][^\S\n]*[0-9]{{1,3}})*)",
                term_alternation(families)
            );
            let labeled = format!(r"{labels}{SEPARATOR}{designation}");
            let bare = format!(r"(?:^|[^\p{{L}}\p{{N}}]){designation}");
            (MatchKind::Term, labeled, bare)
        }
    };

    CompiledPattern {
        key: pattern.key,
        kind,
        labeled: Regex::new(&labeled).expect("Invalid extraction label pattern"),
        bare: pattern
            .bare
            .then(|| Regex::new(&bare).expect("Invalid extraction bare pattern")),
        alt: pattern
            .alt_forms
            .iter()
            .map(|p| Regex::new(p).expect("Invalid extraction alternative pattern"))
            .collect(),
    }
}

/// Regex alternation over literal tokens, longest first so `kV` wins over `V`.
fn alternation(tokens: &[&str]) -> String {
    let mut sorted: Vec<&str> = tokens.to_vec();
    sorted.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));
    sorted
        .iter()
        .map(|t| regex::escape(t).replace(' ', r"[\s\-_]*"))
        .collect::<Vec<_>>()
        .join("|")
}

fn term_alternation(terms: &[Term]) -> String {
    alternation(&all_spellings(terms))
}

impl CompiledPattern {
    fn candidates(&self, text: &str, out: &mut Vec<Candidate>) {
        for caps in self.labeled.captures_iter(text) {
            if let Some(c) = self.labeled_candidate(&caps) {
                out.push(c);
            }
        }
        if let Some(bare) = &self.bare {
            for caps in bare.captures_iter(text) {
                if let Some(c) = self.bare_candidate(&caps) {
                    out.push(c);
                }
            }
        }
        for alt in &self.alt {
            for caps in alt.captures_iter(text) {
                if let Some(c) = self.unit_anchored(&caps, false) {
                    out.push(c);
                }
            }
        }
    }

    fn labeled_candidate(&self, caps: &Captures<'_>) -> Option<Candidate> {
        match self.kind {
            MatchKind::Numeric => self.unit_anchored(caps, true),
            MatchKind::Term => {
                let label = caps.name("l")?;
                let v = caps.name("v")?;
                Some(Candidate {
                    key: self.key,
                    value: v.as_str().to_string(),
                    offset: v.start(),
                    anchor_gap: Some(v.start().saturating_sub(label.end())),
                    labeled: true,
                })
            }
        }
    }

    fn bare_candidate(&self, caps: &Captures<'_>) -> Option<Candidate> {
        match self.kind {
            MatchKind::Numeric => self.unit_anchored(caps, false),
            MatchKind::Term => {
                let v = caps.name("v")?;
                if v.as_str().chars().filter(|c| c.is_alphanumeric()).count() < MIN_BARE_TERM_CHARS {
                    return None;
                }
                Some(Candidate {
                    key: self.key,
                    value: v.as_str().to_string(),
                    offset: v.start(),
                    anchor_gap: None,
                    labeled: false,
                })
            }
        }
    }

    /// Numeric candidate: value text plus its unit, ranked by the gap between them.
    fn unit_anchored(&self, caps: &Captures<'_>, labeled: bool) -> Option<Candidate> {
        // Negative readings are range lower bounds, never ratings.
        if caps.name("sign").is_some() {
            return None;
        }
        let v = caps.name("v")?;
        if !v.as_str().chars().any(|c| c.is_ascii_digit()) {
            return None;
        }
        let text = caps.get(0)?.as_str();
        let base = caps.get(0)?.start();
        let (value, anchor_gap) = match caps.name("u") {
            Some(u) => (
                text[v.start() - base..u.end() - base].to_string(),
                Some(u.start().saturating_sub(v.end())),
            ),
            None => (v.as_str().to_string(), None),
        };
        Some(Candidate {
            key: self.key,
            value,
            offset: v.start(),
            anchor_gap,
            labeled,
        })
    }
}

/// Every candidate match in the text, for all keys, in pattern-table order.
/// Offsets refer to the sanitized text.
pub fn find_candidates(raw_text: &str) -> Vec<Candidate> {
    let text = sanitize_ocr_text(raw_text);
    let mut candidates = Vec::new();
    for pattern in COMPILED_PATTERNS.iter() {
        pattern.candidates(&text, &mut candidates);
    }
    candidates
}

/// Pick the winning candidate per key: labeled readings with their anchor
/// first, then closest to the anchor, then earliest.
pub fn select_best(candidates: &[Candidate]) -> SpecMap {
    let mut specs = SpecMap::new();
    for key in ParameterKey::ALL {
        let best = candidates
            .iter()
            .filter(|c| c.key == *key)
            .min_by_key(|c| c.rank());
        if let Some(best) = best {
            specs.insert(*key, best.value.clone());
        }
    }
    specs
}

/// Scan recognized text for every known parameter.
///
/// Never fails: parameters with no match are simply absent. Values keep the
/// unit text they were matched with; normalization happens in correction.
pub fn extract_terms(raw_text: &str) -> SpecMap {
    let candidates = find_candidates(raw_text);
    let specs = select_best(&candidates);

    tracing::debug!(
        candidates = candidates.len(),
        parameters = specs.len(),
        "Term extraction complete"
    );

    specs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(specs: &SpecMap, key: ParameterKey) -> Option<String> {
        specs.get(key).map(str::to_string)
    }

    #[test]
    fn extracts_noisy_labeled_values() {
        let specs = extract_terms("Voltage Rating: 6OO V  Conductor Size: 2.5mrn");
        assert_eq!(get(&specs, ParameterKey::VoltageRating).as_deref(), Some("6OO V"));
        assert_eq!(get(&specs, ParameterKey::ConductorSize).as_deref(), Some("2.5mrn"));
        assert_eq!(specs.len(), 2);
    }

    #[test]
    fn no_parameters_in_plain_prose() {
        let specs = extract_terms("Thank you for choosing our products. Call us today.");
        assert!(specs.is_empty(), "unexpected: {specs:?}");
    }

    #[test]
    fn empty_text_yields_empty_specs() {
        assert!(extract_terms("").is_empty());
    }

    #[test]
    fn tolerates_case_and_separators() {
        let specs = extract_terms("RATED VOLTAGE - 0.6/1 kV\ninsulation = xlpe\nCONDUCTOR : copper");
        assert_eq!(get(&specs, ParameterKey::VoltageRating).as_deref(), Some("0.6/1 kV"));
        assert_eq!(get(&specs, ParameterKey::InsulationType).as_deref(), Some("xlpe"));
        assert_eq!(get(&specs, ParameterKey::ConductorMaterial).as_deref(), Some("copper"));
    }

    #[test]
    fn parenthetical_after_label_is_skipped() {
        let specs = extract_terms("Voltage (Uo/U): 450/750V");
        assert_eq!(get(&specs, ParameterKey::VoltageRating).as_deref(), Some("450/750V"));
    }

    #[test]
    fn unit_anchored_value_beats_unitless_label_match() {
        // The labeled reading has no unit; the later reading sits right on one.
        let specs = extract_terms("Voltage: 600 see notes. Rated 0.6/1kV");
        assert_eq!(get(&specs, ParameterKey::VoltageRating).as_deref(), Some("0.6/1kV"));
    }

    #[test]
    fn earliest_wins_when_anchor_distance_ties() {
        let specs = extract_terms("Sizes available: 1.5mm² and 2.5mm²");
        assert_eq!(get(&specs, ParameterKey::ConductorSize).as_deref(), Some("1.5mm²"));
    }

    #[test]
    fn closer_unit_wins_over_earlier_match() {
        let specs = extract_terms("Cable 4 mm² multicore, 2.5mm² variant");
        assert_eq!(get(&specs, ParameterKey::ConductorSize).as_deref(), Some("2.5mm²"));
    }

    #[test]
    fn labeled_size_beats_lengths_in_millimetres() {
        let specs = extract_terms(
            "Conductor size: 2.5 mm². Insulation thickness: 0.7mm. \
             Overall diameter: 10.5mm. Rated voltage: 450/750 V",
        );
        assert_eq!(get(&specs, ParameterKey::ConductorSize).as_deref(), Some("2.5 mm²"));
        assert_eq!(get(&specs, ParameterKey::VoltageRating).as_deref(), Some("450/750 V"));
    }

    #[test]
    fn unlabeled_plain_millimetres_are_not_a_size() {
        let specs = extract_terms("Insulation thickness 0.7mm, overall diameter 10.5 mm");
        assert!(specs.get(ParameterKey::ConductorSize).is_none(), "{specs:?}");
    }

    #[test]
    fn labeled_reading_beats_tighter_bare_reading() {
        // Bare `4mm²` sits right on its unit; the labeled reading has a space.
        let specs = extract_terms("Screen 4mm² copper tape. Nominal area: 95 mm²");
        assert_eq!(get(&specs, ParameterKey::ConductorSize).as_deref(), Some("95 mm²"));
    }

    #[test]
    fn labeled_term_beats_bare_mention() {
        let specs = extract_terms("PVC outer layer. Insulation: XLPE");
        assert_eq!(get(&specs, ParameterKey::InsulationType).as_deref(), Some("XLPE"));
    }

    #[test]
    fn short_terms_need_a_label() {
        let specs = extract_terms("Made with Cu and PE parts");
        assert!(specs.get(ParameterKey::ConductorMaterial).is_none());
        assert!(specs.get(ParameterKey::InsulationType).is_none());

        let specs = extract_terms("Conductor: Cu");
        assert_eq!(get(&specs, ParameterKey::ConductorMaterial).as_deref(), Some("Cu"));
    }

    #[test]
    fn filler_words_between_label_and_term() {
        let specs = extract_terms("Conductor: Class 2 stranded copper");
        assert_eq!(get(&specs, ParameterKey::ConductorMaterial).as_deref(), Some("copper"));
    }

    #[test]
    fn sheath_requires_label() {
        let specs = extract_terms("LSZH compound available");
        assert!(specs.get(ParameterKey::SheathMaterial).is_none());

        let specs = extract_terms("Outer sheath: LSZH");
        assert_eq!(get(&specs, ParameterKey::SheathMaterial).as_deref(), Some("LSZH"));
    }

    #[test]
    fn core_count_from_multiplier_form() {
        let specs = extract_terms("Construction 4 x 2.5mm² copper");
        assert_eq!(get(&specs, ParameterKey::CoreCount).as_deref(), Some("4 x"));
        assert_eq!(get(&specs, ParameterKey::ConductorSize).as_deref(), Some("2.5mm²"));
    }

    #[test]
    fn core_count_from_label() {
        let specs = extract_terms("No. of cores: 3");
        assert_eq!(get(&specs, ParameterKey::CoreCount).as_deref(), Some("3"));
    }

    #[test]
    fn negative_temperature_is_skipped() {
        let specs = extract_terms("Operating temperature: -15°C to +90°C");
        assert_eq!(get(&specs, ParameterKey::TemperatureRating).as_deref(), Some("90°C"));
    }

    #[test]
    fn temperature_label_only_unit() {
        let specs = extract_terms("Max operating temperature 90 C");
        assert_eq!(get(&specs, ParameterKey::TemperatureRating).as_deref(), Some("90 C"));
    }

    #[test]
    fn standards_designation() {
        let specs = extract_terms("Standard: lEC 60502-1 and IEC 60228");
        assert_eq!(
            get(&specs, ParameterKey::StandardCompliance).as_deref(),
            Some("lEC 60502-1")
        );
    }

    #[test]
    fn numbers_without_real_digits_are_ignored() {
        let specs = extract_terms("Voltage: OIL V");
        assert!(specs.get(ParameterKey::VoltageRating).is_none());
    }

    #[test]
    fn current_and_awg() {
        let specs = extract_terms("Ampacity: 32 A, 14 AWG");
        assert_eq!(get(&specs, ParameterKey::CurrentRating).as_deref(), Some("32 A"));
        assert_eq!(get(&specs, ParameterKey::ConductorSize).as_deref(), Some("14 AWG"));
    }

    #[test]
    fn newline_flattened_label_and_value() {
        let specs = extract_terms("Conductor Size\n16 mm2");
        assert_eq!(get(&specs, ParameterKey::ConductorSize).as_deref(), Some("16 mm2"));
    }

    #[test]
    fn candidates_only_use_known_keys() {
        let candidates = find_candidates("600V 2.5mm² XLPE copper IEC 60502-1 90°C 32A 3 core");
        assert!(!candidates.is_empty());
        for c in &candidates {
            assert!(ParameterKey::ALL.contains(&c.key));
        }
    }

    #[test]
    fn extraction_is_deterministic() {
        let text = "0.6/1kV XLPE 4x16mm² Cu, PVC sheath, 90°C, IEC 60502-1";
        assert_eq!(extract_terms(text), extract_terms(text));
    }
}
