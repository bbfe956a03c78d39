/// English function words plus datasheet boilerplate that carries no meaning
/// for ranking. Lowercase, sorted for binary search.
pub const STOPWORDS: &[&str] = &[
    "about", "above", "according", "additional", "after", "all", "also", "and", "any", "are",
    "available", "based", "been", "before", "being", "between", "both", "but", "can", "catalog",
    "catalogue", "company", "contact", "data", "datasheet", "details", "does", "each", "for",
    "from", "further", "general", "has", "have", "information", "into", "its", "may", "more",
    "most", "must", "not", "note", "notes", "only", "other", "our", "over", "page", "per",
    "please", "product", "products", "range", "see", "shall", "should", "such", "than", "that",
    "the", "their", "them", "then", "there", "these", "they", "this", "those", "through", "type",
    "typical", "under", "unless", "upon", "use", "used", "using", "value", "values", "very",
    "was", "were", "when", "where", "which", "while", "will", "with", "within", "without",
    "www", "you", "your",
];

/// Score multipliers for terms that describe cable construction.
pub const DOMAIN_BOOST: &[(&str, f64)] = &[
    ("aluminium", 2.0),
    ("armour", 1.5),
    ("armoured", 1.5),
    ("cable", 1.2),
    ("conductor", 1.5),
    ("copper", 2.0),
    ("epr", 2.0),
    ("flexible", 1.5),
    ("halogen", 1.5),
    ("insulation", 1.5),
    ("lszh", 2.0),
    ("pvc", 2.0),
    ("screen", 1.5),
    ("screened", 1.5),
    ("sheath", 1.5),
    ("stranded", 1.5),
    ("swa", 2.0),
    ("tinned", 1.5),
    ("voltage", 1.2),
    ("xlpe", 2.0),
];

/// Construction and application words ranked at the neutral weight.
pub const DOMAIN_TERMS: &[&str] = &[
    "aluminum", "annealed", "bedding", "braid", "braided", "class", "compound", "core", "cores",
    "current", "earth", "fire", "flame", "insulated", "mica", "multicore", "nominal", "outdoor",
    "overall", "polyethylene", "power", "rated", "rating", "resistant", "retardant", "rubber",
    "shield", "shielded", "size", "smoke", "solid", "tape", "temperature", "underground",
];

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.binary_search(&token).is_ok()
}

pub fn domain_boost(token: &str) -> f64 {
    DOMAIN_BOOST
        .iter()
        .find(|(term, _)| *term == token)
        .map_or(1.0, |(_, boost)| *boost)
}
