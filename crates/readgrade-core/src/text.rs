//! Text segmentation.
//!
//! Splits text into paragraph and sentence spans. Spans are byte ranges into
//! the original string, trimmed of surrounding whitespace, so every unit can
//! be scored as `&text[span]` and highlighted in place.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::abbreviations::is_abbreviation;

/// Words: letter/digit runs joined by apostrophes, hyphens, or inner periods
/// ("don't", "well-known", "3.14", "e.g").
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['\u{2019}.\-][\p{L}\p{N}]+)*").expect("valid regex")
});

/// Initials such as "J.K." or "U.S.A.".
static INITIALS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\p{Lu}\.)+\p{Lu}?\.?$").expect("valid regex"));

/// A byte range into the source text.
pub type Span = Range<usize>;

/// Extract words from text in order of appearance.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str())
}

/// Split text into paragraph spans.
///
/// Paragraphs are separated by one or more blank (whitespace-only) lines.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn paragraph_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                push_trimmed(text, s..offset, &mut spans);
            }
        } else if start.is_none() {
            start = Some(offset);
        }
        offset += line.len();
    }
    if let Some(s) = start {
        push_trimmed(text, s..text.len(), &mut spans);
    }

    spans
}

/// Split text into sentence spans.
///
/// Sentences never cross paragraph boundaries. Boundary detection is aware
/// of abbreviations, initials, decimals, URLs and ellipses.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn sentence_spans(text: &str) -> Vec<Span> {
    paragraph_spans(text)
        .into_iter()
        .flat_map(|paragraph| {
            let base = paragraph.start;
            sentence_spans_in(&text[paragraph])
                .into_iter()
                .map(move |s| (s.start + base)..(s.end + base))
        })
        .collect()
}

/// Split a single paragraph into sentence spans.
fn sentence_spans_in(text: &str) -> Vec<Span> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if is_sentence_terminator(chars[i].1) && is_sentence_boundary(text, &chars, i, start) {
            // Keep closing quotes and brackets with the sentence they end.
            let mut j = i + 1;
            while j < chars.len() && is_closing(chars[j].1) {
                j += 1;
            }
            let end = chars.get(j).map_or(text.len(), |&(p, _)| p);
            push_trimmed(text, start..end, &mut spans);
            start = end;
            i = j;
            continue;
        }
        i += 1;
    }
    push_trimmed(text, start..text.len(), &mut spans);

    spans
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

const fn is_closing(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
}

fn is_sentence_boundary(text: &str, chars: &[(usize, char)], i: usize, start: usize) -> bool {
    let (pos, punctuation) = chars[i];
    let after = next_visible(chars, i);

    // Terminators inside a token ("3.14", "e.g", "example.com", "?!") are not boundaries.
    if let Some(&(_, next)) = chars.get(i + 1)
        && !next.is_whitespace()
        && !is_closing(next)
    {
        return false;
    }

    let Some(next_char) = after else {
        return true;
    };

    if punctuation != '.' {
        return !next_char.is_lowercase();
    }

    let token = token_before(text, start, pos);
    if is_abbreviation(token) || is_initial(token) {
        return false;
    }
    if text[start..=pos].ends_with("...") {
        return false;
    }

    // A lowercase continuation almost always means the period was not final.
    !next_char.is_lowercase()
}

/// The first non-whitespace, non-closing character after position `i`.
fn next_visible(chars: &[(usize, char)], i: usize) -> Option<char> {
    chars[i + 1..]
        .iter()
        .map(|&(_, c)| c)
        .find(|c| !c.is_whitespace() && !is_closing(*c))
}

/// The whitespace-delimited token ending at byte `pos` (exclusive of the
/// terminator itself), clamped to the current sentence.
fn token_before(text: &str, start: usize, pos: usize) -> &str {
    let head = &text[start..pos];
    let token_start = head
        .rfind(char::is_whitespace)
        .map_or(0, |idx| idx + head[idx..].chars().next().map_or(1, char::len_utf8));
    head[token_start..].trim_start_matches(|c: char| !c.is_alphanumeric())
}

fn is_initial(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let mut chars = token.chars();
    let single_upper =
        chars.next().is_some_and(char::is_uppercase) && chars.next().is_none();
    single_upper || INITIALS_PATTERN.is_match(&format!("{token}."))
}

fn push_trimmed(text: &str, span: Span, out: &mut Vec<Span>) {
    let slice = &text[span.clone()];
    let leading = slice.len() - slice.trim_start().len();
    let trailing = slice.len() - slice.trim_end().len();
    if leading + trailing < slice.len() {
        out.push((span.start + leading)..(span.end - trailing));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        sentence_spans(text).into_iter().map(|s| &text[s]).collect()
    }

    fn paragraphs(text: &str) -> Vec<&str> {
        paragraph_spans(text).into_iter().map(|s| &text[s]).collect()
    }

    #[test]
    fn basic_sentences() {
        assert_eq!(
            sentences("This is a sentence. This is another sentence."),
            vec!["This is a sentence.", "This is another sentence."]
        );
    }

    #[test]
    fn abbreviations_not_split() {
        let s = sentences("Dr. Smith went to the store. He bought milk.");
        assert_eq!(s.len(), 2);
        assert_eq!(s[0], "Dr. Smith went to the store.");
    }

    #[test]
    fn initials_not_split() {
        let s = sentences("Books by J. K. Rowling sell well. People love them.");
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn decimal_numbers_not_split() {
        let s = sentences("Take 2.5 mg each day. That's all.");
        assert_eq!(s, vec!["Take 2.5 mg each day.", "That's all."]);
    }

    #[test]
    fn urls_not_split() {
        let s = sentences("Visit www.example.com for details. Then call us.");
        assert_eq!(s.len(), 2);
        assert!(s[0].contains("www.example.com"));
    }

    #[test]
    fn question_and_exclamation() {
        assert_eq!(
            sentences("Are you serious? I can't believe it! This is amazing.").len(),
            3
        );
    }

    #[test]
    fn closing_quote_stays_with_sentence() {
        let s = sentences("She said \"Stop.\" Then she left.");
        assert_eq!(s, vec!["She said \"Stop.\"", "Then she left."]);
    }

    #[test]
    fn ellipsis_not_split() {
        let s = sentences("Wait... Something is wrong.");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn sentences_respect_paragraphs() {
        let s = sentences("No end mark here\n\nNext paragraph.");
        assert_eq!(s, vec!["No end mark here", "Next paragraph."]);
    }

    #[test]
    fn spans_point_into_source() {
        let text = "  One.  Two.  ";
        let spans = sentence_spans(text);
        assert_eq!(spans, vec![2..6, 8..12]);
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let text = "First paragraph.\n\nSecond paragraph.\n  \n\nThird.";
        assert_eq!(
            paragraphs(text),
            vec!["First paragraph.", "Second paragraph.", "Third."]
        );
    }

    #[test]
    fn single_newline_does_not_split_paragraph() {
        assert_eq!(paragraphs("Line one\nline two").len(), 1);
    }

    #[test]
    fn empty_input() {
        assert!(sentence_spans("").is_empty());
        assert!(sentence_spans("   \n\n  ").is_empty());
        assert!(paragraph_spans("").is_empty());
    }

    #[test]
    fn words_keep_contractions_and_numbers() {
        let w: Vec<&str> = words("Don't take 2.5 pills, e.g. twice-daily!").collect();
        assert_eq!(w, vec!["Don't", "take", "2.5", "pills", "e.g", "twice-daily"]);
    }
}
