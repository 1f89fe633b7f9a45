//! Structure analysis: heading extraction, forbidden headings, and prose word count.

use std::sync::LazyLock;

use regex::Regex;

use crate::validation::models::StructureReport;

/// `##` through `####` followed by whitespace and heading text.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,4})\s+(.+?)\s*$").expect("heading regex"));

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)").expect("image regex"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("link regex"));
static HEADER_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("header marker regex"));
static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*{1,3}|_{1,3}").expect("emphasis regex"));
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-*+]\s+").expect("bullet regex"));
static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.\s+").expect("ordered list regex"));
static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*>\s*").expect("blockquote regex"));
static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[-*_]{3,}\s*$").expect("horizontal rule regex"));

/// A heading line: level 2 (section), 3 (subsection) or 4.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// Parses one line as a heading, if it is one.
pub fn parse_heading(line: &str) -> Option<Heading> {
    let caps = HEADING_RE.captures(line)?;
    Some(Heading {
        level: caps[1].len() as u8,
        text: caps[2].to_string(),
    })
}

/// All headings in document order.
pub fn headings(text: &str) -> Vec<Heading> {
    text.lines().filter_map(parse_heading).collect()
}

/// Heading texts at exactly `level`.
pub fn headings_at(text: &str, level: u8) -> Vec<String> {
    headings(text)
        .into_iter()
        .filter(|h| h.level == level)
        .map(|h| h.text)
        .collect()
}

pub fn analyze(text: &str) -> StructureReport {
    let parsed = headings(text);

    let starts_with_paragraph = text
        .trim()
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map_or(true, |line| !line.starts_with('#'));

    let begins_with = |word: &str| {
        parsed
            .iter()
            .any(|h| h.text.to_lowercase().starts_with(word))
    };

    StructureReport {
        starts_with_paragraph,
        has_introduction_heading: begins_with("introduction"),
        has_conclusion_heading: begins_with("conclusion"),
        heading_immediately_followed_by_subheading: section_followed_by_subsection(text),
        headings: parsed.into_iter().map(|h| h.text).collect(),
    }
}

/// True if some `##` line is followed, across blank lines only, by a `###` line.
fn section_followed_by_subsection(text: &str) -> bool {
    let mut after_section = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let heading = parse_heading(line);
        if after_section && matches!(&heading, Some(h) if h.level == 3) {
            return true;
        }
        after_section = matches!(&heading, Some(h) if h.level == 2);
    }
    false
}

/// Counts visible prose words, the way external content-grading tools do.
///
/// Images are removed, links collapse to their anchor text, and heading, emphasis,
/// list, blockquote, inline-code and horizontal-rule markup is stripped first.
pub fn prose_word_count(text: &str) -> usize {
    let text = IMAGE_RE.replace_all(text, "");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = HEADER_MARKER_RE.replace_all(&text, "");
    let text = EMPHASIS_RE.replace_all(&text, "");
    let text = BULLET_RE.replace_all(&text, "");
    let text = ORDERED_RE.replace_all(&text, "");
    let text = BLOCKQUOTE_RE.replace_all(&text, "");
    let text = text.replace('`', "");
    let text = RULE_RE.replace_all(&text, "");
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heading_levels() {
        assert_eq!(
            parse_heading("## Why Python"),
            Some(Heading {
                level: 2,
                text: "Why Python".to_string()
            })
        );
        assert_eq!(parse_heading("### Sub").map(|h| h.level), Some(3));
        assert_eq!(parse_heading("#### Deep").map(|h| h.level), Some(4));
        assert_eq!(parse_heading("# Title"), None);
        assert_eq!(parse_heading("##### Too deep"), None);
        assert_eq!(parse_heading("##NoSpace"), None);
    }

    #[test]
    fn test_introduction_heading_exact() {
        let report = analyze("## Introduction\nbody");
        assert!(report.has_introduction_heading);
    }

    #[test]
    fn test_introduction_heading_prefix() {
        let report = analyze("Lead paragraph.\n\n## Introduction to Testing\nbody");
        assert!(report.has_introduction_heading);
    }

    #[test]
    fn test_introduction_not_prefix_is_allowed() {
        let report = analyze("Lead paragraph.\n\n## Our Introduction Story\nbody");
        assert!(!report.has_introduction_heading);
    }

    #[test]
    fn test_conclusion_heading_any_level() {
        let report = analyze("Lead.\n\n#### conclusion\nbye");
        assert!(report.has_conclusion_heading);
        assert!(!report.has_introduction_heading);
    }

    #[test]
    fn test_starts_with_paragraph() {
        assert!(analyze("\n\n  Opening line.\n## Section").starts_with_paragraph);
        assert!(!analyze("\n## Section\nbody").starts_with_paragraph);
        assert!(analyze("").starts_with_paragraph);
    }

    #[test]
    fn test_section_followed_by_subsection_across_blank_lines() {
        let text = "Lead.\n\n## Section\n\n\n### Sub\nbody";
        assert!(analyze(text).heading_immediately_followed_by_subheading);
    }

    #[test]
    fn test_section_with_body_before_subsection_is_fine() {
        let text = "Lead.\n\n## Section\nSome body text.\n\n### Sub\nbody";
        assert!(!analyze(text).heading_immediately_followed_by_subheading);
    }

    #[test]
    fn test_subsection_after_subsection_is_fine() {
        let text = "Lead.\n\n## Section\nBody.\n### A\n### B\nbody";
        assert!(!analyze(text).heading_immediately_followed_by_subheading);
    }

    #[test]
    fn test_headings_collected_in_order() {
        let text = "Lead.\n## One\nx\n### Two\ny\n#### Three\nz";
        assert_eq!(analyze(text).headings, vec!["One", "Two", "Three"]);
        assert_eq!(headings_at(text, 2), vec!["One".to_string()]);
    }

    #[test]
    fn test_prose_word_count_strips_markup() {
        let text = "## Hiring **Python** developers\n\
                    \n\
                    Read the [official docs](https://docs.python.org/) today.\n\
                    ![diagram](https://example.com/a.png)\n\
                    - first `item`\n\
                    1. second item\n\
                    > quoted words\n\
                    ---\n";
        // Hiring Python developers / Read the official docs today. /
        // first item / second item / quoted words
        assert_eq!(prose_word_count(text), 14);
    }

    #[test]
    fn test_prose_word_count_empty() {
        assert_eq!(prose_word_count(""), 0);
        assert_eq!(prose_word_count("   \n\n"), 0);
    }
}
