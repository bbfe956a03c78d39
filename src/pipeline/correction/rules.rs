//! Repair of textual values: material vocabulary and standards designations.

use crate::models::ParameterKey;
use crate::pipeline::vocabulary::{
    all_spellings, canonical_term, Term, CONDUCTOR_TERMS, INSULATION_TERMS, SHEATH_TERMS,
    STANDARD_FAMILIES,
};

/// Vocabulary table backing a textual key, if it has one.
pub fn vocabulary_for(key: ParameterKey) -> Option<&'static [Term]> {
    match key {
        ParameterKey::InsulationType => Some(INSULATION_TERMS),
        ParameterKey::SheathMaterial => Some(SHEATH_TERMS),
        ParameterKey::ConductorMaterial => Some(CONDUCTOR_TERMS),
        _ => None,
    }
}

/// Trim and collapse inner whitespace runs to one space.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map a material spelling to its canonical term.
/// Returns the rule name and new value, or `None` for unknown or canonical terms.
pub fn canonicalize_term(terms: &[Term], value: &str) -> Option<(&'static str, String)> {
    let canonical = canonical_term(terms, value)?;
    if canonical == value {
        return None;
    }
    let rule = if canonical.eq_ignore_ascii_case(value) {
        "term_case"
    } else {
        "term_alias"
    };
    Some((rule, canonical.to_string()))
}

/// Replace a misread standards family prefix (`lEC` for `IEC`).
pub fn fix_standard_prefix(value: &str) -> String {
    match split_family(value) {
        Some((family, rest)) => format!("{family}{rest}"),
        None => value.to_string(),
    }
}

/// `IEC60502 – 1` becomes `IEC 60502-1`: one space after the family,
/// plain hyphens, no spaces around hyphens or dots.
pub fn format_standard(value: &str) -> String {
    let Some((family, rest)) = split_family(value) else {
        return value.to_string();
    };
    let mut number = rest.replace(['–', '—'], "-");
    number.retain(|c| !c.is_whitespace());
    if number.is_empty() {
        family.to_string()
    } else {
        format!("{family} {number}")
    }
}

/// Canonical family and the remainder after its spelling in `value`.
fn split_family(value: &str) -> Option<(&'static str, &str)> {
    let mut spellings = all_spellings(STANDARD_FAMILIES);
    spellings.sort_by_key(|s| std::cmp::Reverse(s.len()));

    spellings.into_iter().find_map(|spelling| {
        let head = value.get(..spelling.len())?;
        if !head.eq_ignore_ascii_case(spelling) {
            return None;
        }
        let rest = &value[spelling.len()..];
        if rest.starts_with(|c: char| c.is_alphabetic()) {
            return None;
        }
        let family = canonical_term(STANDARD_FAMILIES, spelling)?;
        Some((family, rest))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_alias_and_case() {
        assert_eq!(
            canonicalize_term(INSULATION_TERMS, "XIPE"),
            Some(("term_alias", "XLPE".to_string()))
        );
        assert_eq!(
            canonicalize_term(INSULATION_TERMS, "xlpe"),
            Some(("term_case", "XLPE".to_string()))
        );
        assert_eq!(
            canonicalize_term(CONDUCTOR_TERMS, "Cu"),
            Some(("term_alias", "Copper".to_string()))
        );
    }

    #[test]
    fn canonical_and_unknown_terms_unchanged() {
        assert_eq!(canonicalize_term(INSULATION_TERMS, "XLPE"), None);
        assert_eq!(canonicalize_term(INSULATION_TERMS, "Kapton"), None);
    }

    #[test]
    fn standard_prefix_misreads() {
        assert_eq!(fix_standard_prefix("lEC 60502-1"), "IEC 60502-1");
        assert_eq!(fix_standard_prefix("1EC 60228"), "IEC 60228");
        assert_eq!(fix_standard_prefix("bs en 50525"), "BS EN 50525");
        assert_eq!(fix_standard_prefix("IEC 60228"), "IEC 60228");
    }

    #[test]
    fn standard_spacing_and_dashes() {
        assert_eq!(format_standard("IEC60502 – 1"), "IEC 60502-1");
        assert_eq!(format_standard("IEC 60502-1"), "IEC 60502-1");
        assert_eq!(format_standard("AS/NZS 5000.1"), "AS/NZS 5000.1");
    }

    #[test]
    fn unknown_family_passes_through() {
        assert_eq!(format_standard("DIN 123"), "DIN 123");
        assert_eq!(fix_standard_prefix("DIN 123"), "DIN 123");
    }

    #[test]
    fn whitespace_collapsed() {
        assert_eq!(collapse_whitespace("  silicone   rubber "), "silicone rubber");
    }
}
