//! Abbreviations that do not terminate a sentence when followed by a period.
//!
//! Health and patient-facing text leans heavily on titles, units and dosing
//! shorthand, so those groups are broader than general prose needs.

use std::collections::HashSet;
use std::sync::LazyLock;

const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "rev", "fr", "sr", "jr", "st", "hon", "esq", "capt", "col",
    "gen", "lt", "maj", "sgt", "gov", "sen", "rep", "pres",
];

const DEGREES: &[&str] = &[
    "phd", "ph.d", "md", "m.d", "rn", "r.n", "np", "d.o", "dds", "d.d.s", "pharm.d",
    "mph", "m.p.h", "b.a", "b.s", "m.a", "m.s", "m.b.a",
];

const LATIN: &[&str] = &[
    "etc", "vs", "e.g", "i.e", "cf", "viz", "approx", "n.b", "p.s",
];

const CALENDAR: &[&str] = &[
    "a.m", "p.m", "jan", "feb", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
    "mon", "tue", "tues", "thu", "thur", "thurs", "fri",
];

const PLACES: &[&str] = &[
    "ave", "blvd", "rd", "ln", "apt", "ste", "rm", "bldg", "dept", "u.s", "u.k", "u.s.a",
];

const ORGANIZATIONS: &[&str] = &["inc", "corp", "ltd", "llc", "co", "assn", "intl"];

const MEASURES: &[&str] = &[
    "oz", "lb", "lbs", "kg", "mg", "mcg", "ml", "cm", "mm", "km", "ft", "yd", "mi", "hr", "hrs",
    "min", "mins", "sec", "tbsp", "tsp", "qt", "gal", "deg",
];

const DOSING: &[&str] = &[
    "b.i.d", "t.i.d", "q.i.d", "q.d", "p.r.n", "p.o", "q.h", "h.s", "a.c", "p.c",
];

const REFERENCES: &[&str] = &[
    "nos", "vol", "pp", "fig", "eq", "eds", "ref", "refs", "misc",
];

/// All known abbreviations, lowercased, without the trailing period.
pub static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        TITLES,
        DEGREES,
        LATIN,
        CALENDAR,
        PLACES,
        ORGANIZATIONS,
        MEASURES,
        DOSING,
        REFERENCES,
    ]
    .into_iter()
    .flatten()
    .copied()
    .collect()
});

/// Check if a word (with or without trailing periods) is a known abbreviation.
pub fn is_abbreviation(word: &str) -> bool {
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(lower.trim_matches('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_and_units() {
        assert!(is_abbreviation("Dr"));
        assert!(is_abbreviation("dr."));
        assert!(is_abbreviation("mg"));
        assert!(is_abbreviation("e.g."));
    }

    #[test]
    fn dosing_shorthand() {
        assert!(is_abbreviation("b.i.d"));
        assert!(is_abbreviation("P.R.N."));
    }

    #[test]
    fn ordinary_words_are_not_abbreviations() {
        assert!(!is_abbreviation("doctor"));
        assert!(!is_abbreviation("pill"));
        assert!(!is_abbreviation(""));
    }
}
