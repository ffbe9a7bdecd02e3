//! Syllable counting: exception dictionary with a vowel-group estimator.
//!
//! The estimator handles the regular cases (silent final `e`, `-ed`/`-es`
//! endings, consonant + `le`). The dictionary only carries words it gets
//! wrong, grouped by their true syllable count.

use std::collections::HashMap;
use std::sync::LazyLock;

const ONE: &[&str] = &[
    "are", "aisle", "come", "done", "eye", "eyes", "fire", "gone", "give", "have", "hour", "live",
    "love", "move", "none", "one", "once", "some", "sure", "were", "where", "there", "their",
    "whose", "lose", "prove", "tired", "used", "vague", "league", "through", "though", "sauce",
    "juice", "scene", "guide", "queue", "breathe", "clothes", "course", "source", "force",
    "piece", "niece", "voice", "choice", "noise", "cheese", "please", "blue", "true", "clue",
];

const TWO: &[&str] = &[
    "able", "being", "doing", "going", "seeing", "create", "lion", "quiet", "science", "poem",
    "poet", "ruin", "fluid", "cruel", "diet", "riot", "client", "giant", "people", "little",
    "middle", "table", "simple", "trouble", "single", "maybe", "something", "someone", "every",
    "nothing", "evening", "hungry", "business", "answered", "naive", "towel", "tower", "power",
    "flower", "shower", "really", "toward", "orange", "because", "before", "became", "become",
    "vaccine", "measles", "symptoms", "prescribe",
];

const THREE: &[&str] = &[
    "area", "idea", "video", "radio", "period", "serious", "various", "curious", "piano",
    "violin", "poetry", "creating", "dialog", "diagnose", "hospital", "everyone", "finally",
    "medicine", "everything", "family", "different", "interest", "camera", "general",
    "several", "natural", "beautiful", "energy", "pharmacy", "anyone", "library", "insulin",
    "allergy", "therapy", "probably", "recipe", "physician", "infection",
];

const FOUR: &[&str] = &[
    "january", "february", "especially", "experience", "military", "necessary", "ordinary",
    "secretary", "category", "territory", "variable", "material", "immediate", "appropriate",
    "community", "diabetic", "diabetes", "diagnosis", "pediatric", "anxiety", "society",
    "emergency", "medication", "inflammation", "ultimately", "hypertension", "available",
    "ability", "reality", "variety", "dialysis", "usually", "interesting", "everybody",
];

const FIVE: &[&str] = &[
    "vocabulary", "association", "particularly", "organization", "communication",
    "appropriately", "immediately", "pharmaceutical", "cardiology", "abbreviation",
    "radiology", "inflammatory", "laboratory", "individual", "immunization", "opportunity",
    "curiosity",
];

const SIX: &[&str] = &[
    "responsibility", "identification", "gastrointestinal", "cardiovascular",
    "hypoglycemia", "hyperglycemia", "individually",
];

/// Words whose syllable counts the estimator gets wrong.
pub static SYLLABLE_EXCEPTIONS: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    [(ONE, 1), (TWO, 2), (THREE, 3), (FOUR, 4), (FIVE, 5), (SIX, 6)]
        .into_iter()
        .flat_map(|(words, count)| words.iter().map(move |w| (*w, count)))
        .collect()
});

/// Look up a word in the exception dictionary.
pub fn lookup_syllables(word: &str) -> Option<usize> {
    SYLLABLE_EXCEPTIONS.get(word.to_lowercase().as_str()).copied()
}

const fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u' | b'y')
}

/// Estimate syllables with a vowel-group heuristic.
///
/// Non-ASCII letters are ignored; a word with letters but no vowel groups
/// still counts as one syllable.
pub fn estimate_syllables(word: &str) -> usize {
    let word: String = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if word.is_empty() {
        return 0;
    }
    if word.len() <= 3 {
        return 1;
    }

    let bytes = word.as_bytes();
    let mut syllables: usize = 0;
    let mut previous_was_vowel = false;
    for (i, &b) in bytes.iter().enumerate() {
        // Leading y is a consonant (yes, yellow).
        let vowel = is_vowel(b) && !(i == 0 && b == b'y');
        if vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = vowel;
    }

    let len = bytes.len();
    let at = |back: usize| bytes.get(len.wrapping_sub(back)).copied();

    // Silent final e, except consonant + "le" and doubled "ee".
    if word.ends_with('e') {
        let consonant_le = word.ends_with("le") && at(3).is_some_and(|c| !is_vowel(c));
        let double_e = word.ends_with("ee");
        if !consonant_le && !double_e {
            syllables = syllables.saturating_sub(1);
        }
    }

    // "-ed" is silent unless it follows t or d.
    if word.ends_with("ed") && at(3).is_some_and(|c| !matches!(c, b't' | b'd') && !is_vowel(c)) {
        syllables = syllables.saturating_sub(1);
    }

    // "-es" is silent unless it follows a sibilant.
    if word.ends_with("es") && !word.ends_with("ies") {
        let sibilant = matches!(at(3), Some(b's' | b'x' | b'z' | b'c' | b'g'))
            || word.ends_with("ches")
            || word.ends_with("shes");
        if !sibilant && at(3).is_some_and(|c| !is_vowel(c)) {
            syllables = syllables.saturating_sub(1);
        }
    }

    // Final "ia"/"io" split into two syllables (media, ratio).
    if word.ends_with("ia") || word.ends_with("io") {
        syllables += 1;
    }

    syllables.max(1)
}

/// Count syllables: exception lookup with estimation fallback.
pub fn count_syllables(word: &str) -> usize {
    lookup_syllables(word).unwrap_or_else(|| estimate_syllables(word))
}
