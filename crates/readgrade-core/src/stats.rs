//! Multi-formula readability statistics.
//!
//! Computes the six grade-level formulas the scorer blends:
//!
//! | Formula        | Grade level                                          |
//! |----------------|------------------------------------------------------|
//! | Flesch-Kincaid | `0.39 * W/S + 11.8 * Syl/W - 15.59`                  |
//! | ARI            | `4.71 * L/W + 0.5 * W/S - 21.43`                     |
//! | Coleman-Liau   | `0.0588 * L100 - 0.296 * S100 - 15.8`                |
//! | SMOG           | `1.0430 * sqrt(poly * 30 / S) + 3.1291`              |
//! | Gunning Fog    | `0.4 * (W/S + 100 * complex/W)`                      |
//! | Dale-Chall     | raw score mapped to a grade band                     |
//!
//! Every formula is floored at 0 so a blend of them never goes negative.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lexicon::{familiar, syllables};
use crate::text;

/// Raw counts gathered from a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextCounts {
    /// Alphabetic characters.
    pub letters: usize,
    /// Sentences containing at least one word.
    pub sentences: usize,
    /// Words, including numbers.
    pub words: usize,
    /// Total syllables.
    pub syllables: usize,
    /// Words of three or more syllables (SMOG).
    pub polysyllables: usize,
    /// Polysyllables that are not proper nouns, compounds, or inflected
    /// short words (Gunning Fog).
    pub complex_words: usize,
    /// Words outside the familiar list (Dale-Chall).
    pub difficult_words: usize,
}

/// Grade-level scores from each formula, plus the counts behind them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityScores {
    /// SMOG grade.
    pub smog: f64,
    /// New Dale-Chall, converted to a grade.
    pub dale_chall: f64,
    /// Automated Readability Index.
    pub ari: f64,
    /// Coleman-Liau Index.
    pub coleman_liau: f64,
    /// Flesch-Kincaid Grade Level.
    pub flesch_kincaid: f64,
    /// Gunning Fog Index.
    pub gunning_fog: f64,
    /// Number of alphabetic characters. Zero means nothing was scorable.
    pub letter_count: usize,
    /// Underlying counts.
    pub counts: TextCounts,
}

/// Gather raw counts from text.
pub fn count(text: &str) -> TextCounts {
    let mut counts = TextCounts::default();

    for span in text::sentence_spans(text) {
        let mut words_in_sentence = 0;
        for (position, word) in text::words(&text[span]).enumerate() {
            words_in_sentence += 1;
            tally_word(word, position == 0, &mut counts);
        }
        if words_in_sentence > 0 {
            counts.sentences += 1;
        }
    }

    counts
}

fn tally_word(word: &str, sentence_start: bool, counts: &mut TextCounts) {
    counts.words += 1;

    let letters = word.chars().filter(|c| c.is_alphabetic()).count();
    counts.letters += letters;
    if letters == 0 {
        // Numbers read as a single unit.
        counts.syllables += 1;
        return;
    }

    let syllable_count = word_syllables(word);
    counts.syllables += syllable_count;

    let proper_noun = !sentence_start && word.chars().next().is_some_and(char::is_uppercase);

    if syllable_count >= 3 {
        counts.polysyllables += 1;
        if !proper_noun && !word.contains('-') && !is_inflected_short_word(word) {
            counts.complex_words += 1;
        }
    }

    if !proper_noun && !familiar::is_familiar(word) {
        counts.difficult_words += 1;
    }
}

/// Syllables in a word, summing hyphenated parts.
fn word_syllables(word: &str) -> usize {
    word.split('-')
        .map(syllables::count_syllables)
        .sum::<usize>()
        .max(1)
}

/// Gunning Fog does not count words that only reach three syllables through
/// an `-es`, `-ed`, or `-ing` ending.
fn is_inflected_short_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    ["ing", "es", "ed"].iter().any(|suffix| {
        lower
            .strip_suffix(suffix)
            .is_some_and(|stem| !stem.is_empty() && syllables::count_syllables(stem) < 3)
    })
}

/// Compute every formula for a text.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn readability_scores(text: &str) -> ReadabilityScores {
    let scores = ReadabilityScores::from_counts(count(text));
    tracing::trace!(
        words = scores.counts.words,
        sentences = scores.counts.sentences,
        letters = scores.letter_count,
        "computed readability statistics"
    );
    scores
}

impl ReadabilityScores {
    /// Compute every formula from pre-gathered counts.
    pub fn from_counts(counts: TextCounts) -> Self {
        if counts.words == 0 || counts.sentences == 0 {
            return Self {
                letter_count: counts.letters,
                counts,
                ..Self::default()
            };
        }

        let words = counts.words as f64;
        let sentences = counts.sentences as f64;
        let words_per_sentence = words / sentences;
        let letters_per_word = counts.letters as f64 / words;

        let flesch_kincaid = 0.39f64.mul_add(
            words_per_sentence,
            11.8 * (counts.syllables as f64 / words),
        ) - 15.59;

        let ari = 4.71f64.mul_add(letters_per_word, 0.5 * words_per_sentence) - 21.43;

        let letters_per_100 = letters_per_word * 100.0;
        let sentences_per_100 = sentences / words * 100.0;
        let coleman_liau = 0.0588f64.mul_add(letters_per_100, -0.296 * sentences_per_100) - 15.8;

        let smog = 1.0430f64.mul_add(
            (counts.polysyllables as f64 * (30.0 / sentences)).sqrt(),
            3.1291,
        );

        let gunning_fog =
            0.4 * (words_per_sentence + 100.0 * (counts.complex_words as f64 / words));

        let dale_chall = dale_chall_grade(dale_chall_raw(
            counts.difficult_words as f64 / words * 100.0,
            words_per_sentence,
        ));

        Self {
            smog: floor_zero(smog),
            dale_chall,
            ari: floor_zero(ari),
            coleman_liau: floor_zero(coleman_liau),
            flesch_kincaid: floor_zero(flesch_kincaid),
            gunning_fog: floor_zero(gunning_fog),
            letter_count: counts.letters,
            counts,
        }
    }
}

/// New Dale-Chall raw score.
fn dale_chall_raw(percent_difficult: f64, words_per_sentence: f64) -> f64 {
    let raw = 0.1579f64.mul_add(percent_difficult, 0.0496 * words_per_sentence);
    if percent_difficult > 5.0 {
        raw + 3.6365
    } else {
        raw
    }
}

/// Map a raw Dale-Chall score to the midpoint of its grade band.
fn dale_chall_grade(raw: f64) -> f64 {
    match raw {
        r if r < 5.0 => 4.0,
        r if r < 6.0 => 5.5,
        r if r < 7.0 => 7.5,
        r if r < 8.0 => 9.5,
        r if r < 9.0 => 11.5,
        r if r < 10.0 => 14.0,
        _ => 16.0,
    }
}

fn floor_zero(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "The cat sat on the mat. The dog ran to the park. We had fun in the sun.";

    const DENSE: &str = "The implementation of the comprehensive organizational restructuring \
                         initiative necessitated the establishment of interdepartmental \
                         communication protocols that facilitated the dissemination of \
                         procedural documentation.";

    #[test]
    fn counts_simple_text() {
        let c = count(SIMPLE);
        assert_eq!(c.sentences, 3);
        assert_eq!(c.words, 18);
        assert_eq!(c.syllables, 18);
        assert_eq!(c.letters, 51);
        assert_eq!(c.polysyllables, 0);
        assert_eq!(c.difficult_words, 0);
    }

    #[test]
    fn simple_text_scores_low() {
        let s = readability_scores(SIMPLE);
        assert_eq!(s.flesch_kincaid, 0.0);
        assert_eq!(s.ari, 0.0);
        assert_eq!(s.coleman_liau, 0.0);
        assert!((s.smog - 3.1291).abs() < 1e-9);
        assert!((s.gunning_fog - 2.4).abs() < 1e-9);
        assert_eq!(s.dale_chall, 4.0);
        assert_eq!(s.letter_count, 51);
    }

    #[test]
    fn dense_text_scores_high() {
        let s = readability_scores(DENSE);
        assert_eq!(s.counts.sentences, 1);
        assert!(s.smog > 15.0, "smog = {}", s.smog);
        assert!(s.flesch_kincaid > 15.0, "fk = {}", s.flesch_kincaid);
        assert!(s.gunning_fog > 15.0, "fog = {}", s.gunning_fog);
        assert!(s.dale_chall >= 11.5, "dale-chall = {}", s.dale_chall);
    }

    #[test]
    fn formulas_from_known_counts() {
        let counts = TextCounts {
            letters: 500,
            sentences: 5,
            words: 100,
            syllables: 150,
            polysyllables: 10,
            complex_words: 10,
            difficult_words: 10,
        };
        let s = ReadabilityScores::from_counts(counts);
        // 0.39 * 20 + 11.8 * 1.5 - 15.59
        assert!((s.flesch_kincaid - 9.91).abs() < 1e-9);
        // 4.71 * 5 + 0.5 * 20 - 21.43
        assert!((s.ari - 12.12).abs() < 1e-9);
        // 0.0588 * 500 - 0.296 * 5 - 15.8
        assert!((s.coleman_liau - 12.12).abs() < 1e-9);
        // 1.043 * sqrt(60) + 3.1291
        assert!((s.smog - (1.043 * 60f64.sqrt() + 3.1291)).abs() < 1e-9);
        // 0.4 * (20 + 10)
        assert!((s.gunning_fog - 12.0).abs() < 1e-9);
        // 0.1579 * 10 + 0.0496 * 20 + 3.6365 = 6.2075
        assert_eq!(s.dale_chall, 7.5);
    }

    #[test]
    fn dale_chall_bands() {
        assert_eq!(dale_chall_grade(4.9), 4.0);
        assert_eq!(dale_chall_grade(5.0), 5.5);
        assert_eq!(dale_chall_grade(8.95), 11.5);
        assert_eq!(dale_chall_grade(12.0), 16.0);
    }

    #[test]
    fn punctuation_only_has_no_letters() {
        let s = readability_scores("...!?");
        assert_eq!(s.letter_count, 0);
        assert_eq!(s.smog, 0.0);
    }

    #[test]
    fn empty_text_is_all_zero() {
        assert_eq!(readability_scores(""), ReadabilityScores::default());
    }

    #[test]
    fn proper_nouns_are_not_difficult() {
        let c = count("We met Bartholomew today.");
        assert_eq!(c.difficult_words, 0);
        assert_eq!(c.complex_words, 0);
        assert_eq!(c.polysyllables, 1);
    }

    #[test]
    fn numbers_count_as_words() {
        let c = count("Take 2 pills.");
        assert_eq!(c.words, 3);
        assert_eq!(c.syllables, 3);
    }
}
