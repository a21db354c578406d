//! Line classifier: turns markdown-like test text into an ordered block model.
//!
//! # Rules (checked in order on the trimmed line)
//! - `"# "`   → heading 1, prefix stripped once
//! - `"## "`  → heading 2, prefix stripped once
//! - `"### "` → heading 3, prefix stripped once
//! - starts and ends with `"**"`, more than 4 chars → one bold run, markers removed
//! - anything else → plain paragraph with the untrimmed line
//!
//! Single pass, no backtracking. Unmatched markers fall through to plain text.

use serde::Serialize;

/// Minimum character count (exclusive) for a `**...**` line to count as bold.
const BOLD_MIN_CHARS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Paragraph style id used in the DOCX container.
    pub fn style_id(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "Heading1",
            HeadingLevel::H2 => "Heading2",
            HeadingLevel::H3 => "Heading3",
        }
    }

    fn content_spacing(self) -> Spacing {
        match self {
            HeadingLevel::H1 => Spacing::new(200, 120),
            HeadingLevel::H2 => Spacing::new(180, 100),
            HeadingLevel::H3 => Spacing::new(150, 80),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    Heading(HeadingLevel),
    /// A single bold run spanning the paragraph.
    Bold,
    Plain,
}

/// Paragraph spacing in twentieths of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
}

impl Spacing {
    pub const fn new(before: u32, after: u32) -> Self {
        Self { before, after }
    }

    pub const fn after(after: u32) -> Self {
        Self { before: 0, after }
    }
}

/// One paragraph-like block of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    pub centered: bool,
    pub spacing: Spacing,
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Heading(level),
            text: text.into(),
            centered: false,
            spacing: level.content_spacing(),
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Bold,
            text: text.into(),
            centered: false,
            spacing: Spacing::after(100),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Plain,
            text: text.into(),
            centered: false,
            spacing: Spacing::after(80),
        }
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }
}

/// Classifies one line. Never fails.
pub fn classify_line(line: &str) -> Block {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("# ") {
        return Block::heading(HeadingLevel::H1, rest);
    }
    if let Some(rest) = trimmed.strip_prefix("## ") {
        return Block::heading(HeadingLevel::H2, rest);
    }
    if let Some(rest) = trimmed.strip_prefix("### ") {
        return Block::heading(HeadingLevel::H3, rest);
    }
    if trimmed.starts_with("**")
        && trimmed.ends_with("**")
        && trimmed.chars().count() > BOLD_MIN_CHARS
    {
        return Block::bold(trimmed.replace("**", ""));
    }

    Block::plain(line)
}

/// Splits on `\n` (dropping a trailing `\r`) and classifies every line in order.
/// Blank lines become empty plain paragraphs.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    text.split('\n')
        .map(|line| classify_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels() {
        assert_eq!(classify_line("# Heading"), Block::heading(HeadingLevel::H1, "Heading"));
        assert_eq!(classify_line("## Part A"), Block::heading(HeadingLevel::H2, "Part A"));
        assert_eq!(classify_line("### I. Listen"), Block::heading(HeadingLevel::H3, "I. Listen"));
    }

    #[test]
    fn test_heading_prefix_stripped_once() {
        let block = classify_line("# # nested");
        assert_eq!(block.kind, BlockKind::Heading(HeadingLevel::H1));
        assert_eq!(block.text, "# nested");
    }

    #[test]
    fn test_heading_detected_after_trim() {
        let block = classify_line("   ## PART B  ");
        assert_eq!(block.kind, BlockKind::Heading(HeadingLevel::H2));
        assert_eq!(block.text, "PART B");
    }

    #[test]
    fn test_hashes_without_space_are_plain() {
        let block = classify_line("#hashtag");
        assert_eq!(block.kind, BlockKind::Plain);
        assert_eq!(block.text, "#hashtag");
        assert_eq!(classify_line("#### deep").kind, BlockKind::Plain);
    }

    #[test]
    fn test_bold_line() {
        let block = classify_line("**Bold**");
        assert_eq!(block.kind, BlockKind::Bold);
        assert_eq!(block.text, "Bold");
    }

    #[test]
    fn test_bold_removes_inner_markers() {
        let block = classify_line("**Name:** ____ **Class:**");
        assert_eq!(block.kind, BlockKind::Bold);
        assert_eq!(block.text, "Name: ____ Class:");
    }

    #[test]
    fn test_unterminated_bold_is_plain_and_unmodified() {
        let block = classify_line("**unterminated");
        assert_eq!(block.kind, BlockKind::Plain);
        assert_eq!(block.text, "**unterminated");
    }

    #[test]
    fn test_short_marker_lines_are_plain() {
        assert_eq!(classify_line("****").kind, BlockKind::Plain);
        assert_eq!(classify_line("**").kind, BlockKind::Plain);
        assert_eq!(classify_line("**x**").kind, BlockKind::Bold);
    }

    #[test]
    fn test_plain_keeps_untrimmed_text() {
        let block = classify_line("   A. television  ");
        assert_eq!(block.kind, BlockKind::Plain);
        assert_eq!(block.text, "   A. television  ");
    }

    #[test]
    fn test_blank_lines_preserved_in_order() {
        let blocks = parse_blocks("# Title\n\nLine one\r\n\n**End**\n");
        let kinds: Vec<_> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading(HeadingLevel::H1),
                BlockKind::Plain,
                BlockKind::Plain,
                BlockKind::Plain,
                BlockKind::Bold,
                BlockKind::Plain,
            ]
        );
        assert_eq!(blocks[1].text, "");
        assert_eq!(blocks[2].text, "Line one");
        assert_eq!(blocks[5].text, "");
    }

    #[test]
    fn test_spacing_per_kind() {
        assert_eq!(classify_line("# a").spacing, Spacing::new(200, 120));
        assert_eq!(classify_line("## a").spacing, Spacing::new(180, 100));
        assert_eq!(classify_line("### a").spacing, Spacing::new(150, 80));
        assert_eq!(classify_line("**a b**").spacing, Spacing::after(100));
        assert_eq!(classify_line("a").spacing, Spacing::after(80));
    }
}
