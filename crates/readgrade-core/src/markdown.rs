//! Markdown to prose.
//!
//! Parses CommonMark with pulldown-cmark and keeps only the text a reader
//! reads as prose. Block boundaries become blank lines so paragraph
//! segmentation still works on the result.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip markdown formatting, returning plain prose.
///
/// Drops code blocks, inline code, HTML, YAML frontmatter, headings, tables,
/// and image alt text. Keeps link text, emphasis text, blockquotes, and list
/// items. Paragraphs and list items are separated by `"\n\n"`.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut prose = String::with_capacity(text.len());
    let mut skip_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(
                Tag::CodeBlock(_) | Tag::Heading { .. } | Tag::Table(_) | Tag::Image { .. },
            ) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Heading(_) | TagEnd::Table | TagEnd::Image) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            Event::Text(t) if skip_depth == 0 => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => prose.push(' '),
            // Nested list items start a new block before their parent ends.
            Event::Start(Tag::Item) | Event::End(TagEnd::Paragraph | TagEnd::Item)
                if skip_depth == 0 =>
            {
                end_block(&mut prose);
            }
            _ => {}
        }
    }

    prose.truncate(prose.trim_end().len());
    prose
}

/// Close the current block with a blank line, once.
fn end_block(prose: &mut String) {
    let trimmed = prose.trim_end().len();
    prose.truncate(trimmed);
    if !prose.is_empty() {
        prose.push_str("\n\n");
    }
}

/// Drop YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close) = after_opening.find("\n---") else {
        return text;
    };
    let remainder = &after_opening[close + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}

/// Whether a path looks like a markdown file.
pub fn is_markdown_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    [".md", ".markdown", ".mdown", ".mkd"]
        .iter()
        .any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::paragraph_spans;

    #[test]
    fn removes_code_blocks() {
        let out = strip_to_prose("Some text.\n\n```rust\nlet x = 1;\n```\n\nMore text.");
        assert!(!out.contains("let x"));
        assert_eq!(out, "Some text.\n\nMore text.");
    }

    #[test]
    fn removes_frontmatter() {
        let out = strip_to_prose("---\ntitle: Leaflet\n---\n\nTake one pill.");
        assert_eq!(out, "Take one pill.");
    }

    #[test]
    fn removes_headings() {
        let out = strip_to_prose("# Dosage\n\nTake one pill.\n\n## Side effects\n\nYou may feel sick.");
        assert!(!out.contains("Dosage"));
        assert!(!out.contains("Side effects"));
        assert_eq!(paragraph_spans(&out).len(), 2);
    }

    #[test]
    fn keeps_link_and_emphasis_text() {
        let out = strip_to_prose("Read **this** [leaflet](https://example.com) *today*.");
        assert_eq!(out, "Read this leaflet today.");
    }

    #[test]
    fn removes_inline_code_and_tables() {
        let out = strip_to_prose("Run `foo()` now.\n\n| A | B |\n|---|---|\n| 1 | 2 |\n\nDone.");
        assert!(!out.contains("foo()"));
        assert!(!out.contains('|'));
        assert!(out.ends_with("Done."));
    }

    #[test]
    fn list_items_become_paragraphs() {
        let out = strip_to_prose("- Drink water.\n- Rest in bed.\n");
        assert_eq!(out, "Drink water.\n\nRest in bed.");
    }

    #[test]
    fn nested_items_are_separate() {
        let out = strip_to_prose("- Call us.\n  - Ask for the nurse.\n");
        assert_eq!(out, "Call us.\n\nAsk for the nurse.");
    }

    #[test]
    fn soft_breaks_join_lines() {
        assert_eq!(strip_to_prose("One line\nsame paragraph."), "One line same paragraph.");
    }

    #[test]
    fn empty_input() {
        assert!(strip_to_prose("").is_empty());
    }

    #[test]
    fn markdown_paths() {
        assert!(is_markdown_path("README.md"));
        assert!(is_markdown_path("notes.Markdown"));
        assert!(!is_markdown_path("notes.txt"));
        assert!(!is_markdown_path("-"));
    }
}
