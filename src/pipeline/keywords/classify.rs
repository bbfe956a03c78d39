use std::sync::LazyLock;

use regex::Regex;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Weighted indicator terms per cable category. Table order breaks score ties.
pub(super) const CATEGORY_TERMS: &[(&str, &[(&str, f64)])] = &[
    (
        "Power Cable",
        &[
            ("power cable", 3.0),
            ("power", 2.0),
            ("medium voltage", 2.0),
            ("low voltage", 1.5),
            ("armoured", 1.5),
            ("swa", 2.0),
            ("distribution", 1.0),
            ("feeder", 1.0),
            ("kv", 1.0),
        ],
    ),
    (
        "Control Cable",
        &[
            ("control cable", 3.0),
            ("control", 2.5),
            ("signalling", 1.5),
            ("plc", 1.0),
            ("multicore", 1.0),
        ],
    ),
    (
        "Instrumentation Cable",
        &[
            ("instrumentation", 3.0),
            ("instrument", 2.5),
            ("twisted pair", 1.5),
            ("pairs", 1.0),
            ("triads", 2.0),
            ("individually screened", 1.5),
        ],
    ),
    (
        "Data/Communication Cable",
        &[
            ("ethernet", 3.0),
            ("cat5e", 3.0),
            ("cat6", 3.0),
            ("cat 6", 3.0),
            ("lan", 2.0),
            ("utp", 2.5),
            ("communication", 2.0),
            ("telephone", 2.0),
            ("data", 2.0),
        ],
    ),
    (
        "Fiber Optic Cable",
        &[
            ("fiber", 3.0),
            ("fibre", 3.0),
            ("optical", 2.5),
            ("optic", 2.5),
            ("singlemode", 2.0),
            ("multimode", 2.0),
        ],
    ),
    (
        "Coaxial Cable",
        &[
            ("coaxial", 3.0),
            ("coax", 3.0),
            ("rg6", 3.0),
            ("rg59", 3.0),
            ("75 ohm", 2.0),
            ("50 ohm", 2.0),
        ],
    ),
    (
        "Solar PV Cable",
        &[
            ("solar", 3.0),
            ("photovoltaic", 3.0),
            ("pv", 2.0),
            ("h1z2z2", 3.0),
        ],
    ),
    (
        "Building Wire",
        &[
            ("building wire", 3.0),
            ("thhn", 3.0),
            ("thwn", 3.0),
            ("house wiring", 2.0),
            ("h07v", 2.5),
            ("h05v", 2.5),
            ("conduit", 1.5),
        ],
    ),
];

struct CategoryMatcher {
    name: &'static str,
    terms: Vec<(Regex, f64)>,
}

static CATEGORY_MATCHERS: LazyLock<Vec<CategoryMatcher>> = LazyLock::new(|| {
    CATEGORY_TERMS
        .iter()
        .map(|&(name, terms)| CategoryMatcher {
            name,
            terms: terms
                .iter()
                .map(|(term, weight)| {
                    let pattern = format!(r"(?i)\b{}\b", regex::escape(term).replace(' ', r"[\s\-]+"));
                    (Regex::new(&pattern).expect("Invalid category term regex"), *weight)
                })
                .collect(),
        })
        .collect()
});

/// Weighted indicator score for every category, in table order.
pub fn category_scores(text: &str) -> Vec<(&'static str, f64)> {
    CATEGORY_MATCHERS
        .iter()
        .map(|m| {
            let score = m
                .terms
                .iter()
                .map(|(re, weight)| re.find_iter(text).count() as f64 * weight)
                .sum::<f64>();
            (m.name, score)
        })
        .collect()
}

/// Highest-scoring category, or `Uncategorized` below `min_score`.
pub fn classify_text(text: &str, min_score: f64) -> &'static str {
    let mut best: Option<(&'static str, f64)> = None;
    for (name, score) in category_scores(text) {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((name, score));
        }
    }
    match best {
        Some((name, score)) if score >= min_score && score > 0.0 => name,
        _ => UNCATEGORIZED,
    }
}
