//! Word tables used by the readability statistics.
//!
//! - [`syllables`] - exception dictionary plus vowel-group estimator
//! - [`familiar`] - Dale-Chall style list of words known to most 4th graders
//! - [`abbreviations`] - abbreviations that must not end a sentence

pub mod abbreviations;
pub mod familiar;
pub mod syllables;
