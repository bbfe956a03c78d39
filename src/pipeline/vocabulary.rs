//! Cable material and standards vocabulary.
//!
//! Shared by extraction (what to recognize) and correction (what to map it to).
//! Aliases cover spelling variants, abbreviations and the OCR misreads seen on
//! datasheet photographs (I/l/1 swaps, rn read for m, O read for 0).

/// A canonical term and the spellings that should resolve to it.
pub struct Term {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

pub const INSULATION_TERMS: &[Term] = &[
    Term {
        canonical: "XLPE",
        aliases: &[
            "XIPE",
            "XLPF",
            "X1PE",
            "XL-PE",
            "X-LPE",
            "CROSS-LINKED POLYETHYLENE",
            "CROSSLINKED POLYETHYLENE",
        ],
    },
    Term {
        canonical: "PVC",
        aliases: &["PVG", "P.V.C", "PUC", "FVC", "POLYVINYL CHLORIDE"],
    },
    Term {
        canonical: "HEPR",
        aliases: &["HEPK", "HARD GRADE EPR"],
    },
    Term {
        canonical: "EPR",
        aliases: &["EPK", "ETHYLENE PROPYLENE RUBBER"],
    },
    Term {
        canonical: "LSZH",
        aliases: &["LS0H", "LSOH", "LSZ-H", "LOW SMOKE ZERO HALOGEN"],
    },
    Term {
        canonical: "XLPO",
        aliases: &["XIPO", "X1PO"],
    },
    Term {
        canonical: "PE",
        aliases: &["POLYETHYLENE", "P.E."],
    },
    Term {
        canonical: "SILICONE RUBBER",
        aliases: &["SILICONE", "SILICON RUBBER", "SIR"],
    },
    Term {
        canonical: "PTFE",
        aliases: &["TEFLON", "PTEF"],
    },
    Term {
        canonical: "FEP",
        aliases: &[],
    },
];

pub const SHEATH_TERMS: &[Term] = &[
    Term {
        canonical: "PVC",
        aliases: &["PVG", "P.V.C", "PUC", "FVC"],
    },
    Term {
        canonical: "LSZH",
        aliases: &["LS0H", "LSOH", "LSZ-H", "LOW SMOKE ZERO HALOGEN"],
    },
    Term {
        canonical: "MDPE",
        aliases: &["MDFE", "MEDIUM DENSITY POLYETHYLENE"],
    },
    Term {
        canonical: "HDPE",
        aliases: &["HDFE", "HIGH DENSITY POLYETHYLENE"],
    },
    Term {
        canonical: "PE",
        aliases: &["POLYETHYLENE"],
    },
    Term {
        canonical: "PUR",
        aliases: &["POLYURETHANE", "PU"],
    },
];

pub const CONDUCTOR_TERMS: &[Term] = &[
    Term {
        canonical: "Tinned Copper",
        aliases: &["TINNED CU", "TIN-PLATED COPPER", "TINNED C0PPER", "PLAIN TINNED COPPER"],
    },
    Term {
        canonical: "Copper",
        aliases: &["CU", "C0PPER", "COPPOR", "COOPER", "PLAIN ANNEALED COPPER", "ANNEALED COPPER"],
    },
    Term {
        canonical: "Aluminium",
        aliases: &["ALUMINUM", "AL", "ALU", "A1UMINIUM", "ALURNINIUM", "ALUMIN1UM"],
    },
];

/// Standard families, longest spellings first where they share a prefix.
pub const STANDARD_FAMILIES: &[Term] = &[
    Term {
        canonical: "BS EN",
        aliases: &["BSEN", "B.S. EN", "BS-EN"],
    },
    Term {
        canonical: "AS/NZS",
        aliases: &["AS NZS", "ASNZS"],
    },
    Term {
        canonical: "IEC",
        aliases: &["LEC", "1EC", "IEG", "I EC"],
    },
    Term {
        canonical: "ICEA",
        aliases: &["1CEA", "LCEA"],
    },
    Term {
        canonical: "NEMA",
        aliases: &[],
    },
    Term {
        canonical: "VDE",
        aliases: &["VOE"],
    },
    Term {
        canonical: "BS",
        aliases: &["B.S."],
    },
    Term {
        canonical: "EN",
        aliases: &[],
    },
    Term {
        canonical: "UL",
        aliases: &["U.L."],
    },
];

/// Every spelling in a term table, canonical forms included.
pub fn all_spellings(terms: &[Term]) -> Vec<&'static str> {
    let mut spellings = Vec::new();
    for term in terms {
        spellings.push(term.canonical);
        spellings.extend(term.aliases.iter().copied());
    }
    spellings
}

/// Resolve a spelling to its canonical term. Case is ignored, and runs of
/// whitespace, `-` and `_` compare equal, as they do during extraction.
pub fn canonical_term(terms: &[Term], raw: &str) -> Option<&'static str> {
    let wanted = fold(raw);
    terms.iter().find_map(|term| {
        let hit = fold(term.canonical) == wanted || term.aliases.iter().any(|a| fold(a) == wanted);
        hit.then_some(term.canonical)
    })
}

fn fold(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
