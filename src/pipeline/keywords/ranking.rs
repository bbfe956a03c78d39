use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::classify::CATEGORY_TERMS;
use super::stopwords::{domain_boost, is_stopword, DOMAIN_BOOST, DOMAIN_TERMS};
use crate::models::RankedTerm;
use crate::pipeline::vocabulary::{CONDUCTOR_TERMS, INSULATION_TERMS, SHEATH_TERMS};

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}\-]*").expect("Invalid token regex"));

/// Conductor vocabulary reported as the conductor-type hint.
const CONDUCTOR_HINTS: &[&str] = &[
    "tinned copper",
    "copper",
    "aluminium",
    "aluminum",
    "stranded",
    "solid",
    "flexible",
    "class 1",
    "class 2",
    "class 5",
    "class 6",
];

static HINT_MATCHERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CONDUCTOR_HINTS
        .iter()
        .map(|hint| {
            let pattern = format!(r"(?i)\b{}\b", hint.replace(' ', r"[\s\-]*"));
            (*hint, Regex::new(&pattern).expect("Invalid conductor hint regex"))
        })
        .collect()
});

/// The only words the ranker scores: boosted and neutral domain terms,
/// single words of the category term lists, and canonical material names.
static RANKING_VOCABULARY: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let boosted = DOMAIN_BOOST.iter().map(|(term, _)| *term);
    let categories = CATEGORY_TERMS
        .iter()
        .flat_map(|(_, terms)| terms.iter().map(|(term, _)| *term));
    let materials = [INSULATION_TERMS, SHEATH_TERMS, CONDUCTOR_TERMS]
        .into_iter()
        .flatten()
        .map(|term| term.canonical);

    boosted
        .chain(DOMAIN_TERMS.iter().copied())
        .chain(categories)
        .chain(materials)
        .flat_map(str::split_whitespace)
        .map(str::to_lowercase)
        .collect()
});

pub fn is_ranked_term(token: &str) -> bool {
    RANKING_VOCABULARY.contains(token)
}

/// Lowercased word tokens, stopwords and short tokens removed.
/// Tokens starting with a digit (`600v`, `5mm²`) are readings, not words.
pub fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    TOKEN
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches('-').to_lowercase())
        .filter(|t| t.starts_with(char::is_alphabetic))
        .filter(|t| t.chars().count() >= min_len)
        .filter(|t| !is_stopword(t))
        .collect()
}

/// Top `top_n` vocabulary terms by frequency times domain boost; ties keep
/// first occurrence order.
pub fn rank_terms(text: &str, min_len: usize, top_n: usize) -> Vec<RankedTerm> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in tokenize(text, min_len).into_iter().filter(|t| is_ranked_term(t)) {
        match index.get(&token) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(token.clone(), order.len());
                order.push((token, 1));
            }
        }
    }

    let mut ranked: Vec<RankedTerm> = order
        .into_iter()
        .map(|(term, count)| {
            let score = count as f64 * domain_boost(&term);
            RankedTerm { term, score }
        })
        .collect();

    // Stable: equal scores stay in first-occurrence order.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_n);
    ranked
}

/// Conductor terms present in the text, comma-joined in order of first occurrence.
/// A term inside a longer match (`copper` in `tinned copper`) is not repeated.
pub fn conductor_type_hint(text: &str) -> Option<String> {
    let mut spans: Vec<(usize, usize, &'static str)> = Vec::new();
    for (hint, re) in HINT_MATCHERS.iter() {
        for m in re.find_iter(text) {
            spans.push((m.start(), m.end(), *hint));
        }
    }
    // Earliest first; at equal starts the longer match first.
    spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut found: Vec<&'static str> = Vec::new();
    let mut covered_to = 0;
    for (start, end, hint) in spans {
        if start < covered_to {
            continue;
        }
        covered_to = end;
        if !found.contains(&hint) {
            found.push(hint);
        }
    }

    (!found.is_empty()).then(|| found.join(", "))
}
