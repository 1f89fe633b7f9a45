//! Header template coverage.
//!
//! Two tiers per required template:
//! 1. substring containment in either direction (case-insensitive)
//! 2. significant-word overlap: |template ∩ heading| / |template| ≥ 0.6
//!    after dropping stop words

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::validation::models::HeaderCoverage;
use crate::validation::terms::percentage;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]+").expect("word regex"));

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "to", "for", "of", "in", "on", "with", "and", "or", "is", "are", "do",
    "does", "how", "what", "when", "where", "why", "i", "you", "your", "my", "it", "can",
    "should", "must", "that", "this", "from",
];

const MIN_OVERLAP_RATIO: f64 = 0.6;
const MAX_MISSING_HEADERS: usize = 15;

/// Lower-case alphabetic words of `text` minus stop words.
pub fn significant_words(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Share of the template's significant words that also appear in the heading.
/// `None` when the template has no significant words.
pub fn overlap_ratio(template: &str, heading: &str) -> Option<f64> {
    let template_words = significant_words(template);
    if template_words.is_empty() {
        return None;
    }
    let heading_words = significant_words(heading);
    let shared = template_words.intersection(&heading_words).count();
    Some(shared as f64 / template_words.len() as f64)
}

fn template_matched(template: &str, produced_lower: &[String]) -> bool {
    let template_lower = template.trim().to_lowercase();

    let exact = produced_lower
        .iter()
        .any(|h| h.contains(&template_lower) || template_lower.contains(h.as_str()));
    if exact {
        return true;
    }

    produced_lower.iter().any(|h| {
        overlap_ratio(&template_lower, h).is_some_and(|ratio| ratio >= MIN_OVERLAP_RATIO)
    })
}

/// Matches `required_templates` against the headings the article actually has.
pub fn match_headers(produced_headings: &[String], required_templates: &[String]) -> HeaderCoverage {
    if required_templates.is_empty() {
        return HeaderCoverage {
            total: 0,
            found_count: 0,
            coverage_pct: 100.0,
            missing: vec![],
        };
    }

    let produced_lower: Vec<String> = produced_headings
        .iter()
        .map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty())
        .collect();

    let mut found_count = 0;
    let mut missing = Vec::new();
    for template in required_templates {
        if template_matched(template, &produced_lower) {
            found_count += 1;
        } else {
            missing.push(template.clone());
        }
    }
    missing.truncate(MAX_MISSING_HEADERS);

    HeaderCoverage {
        total: required_templates.len(),
        found_count,
        coverage_pct: percentage(found_count, required_templates.len()),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_requirements_are_fully_covered() {
        let result = match_headers(&strings(&["Anything"]), &[]);
        assert_eq!(result.coverage_pct, 100.0);
        assert_eq!(result.total, 0);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_exact_substring_either_direction() {
        let produced = strings(&["Why Hire Python Developers Through Lemon.io"]);
        let required = strings(&["why hire python developers", "Why Hire Python Developers Through Lemon.io Today"]);
        let result = match_headers(&produced, &required);
        assert_eq!(result.found_count, 2);
        assert_eq!(result.coverage_pct, 100.0);
    }

    #[test]
    fn test_fuzzy_overlap_ratio_formula() {
        // template words: {much, cost, hire, python, developers}
        // heading words:  {python, developers, cost}
        let ratio = overlap_ratio(
            "How Much Does It Cost to Hire Python Developers",
            "What Python Developers Cost",
        )
        .unwrap();
        assert!((ratio - 3.0 / 5.0).abs() < f64::EPSILON);

        let result = match_headers(
            &strings(&["What Python Developers Cost"]),
            &strings(&["How Much Does It Cost to Hire Python Developers"]),
        );
        assert_eq!(result.found_count, 1);
    }

    #[test]
    fn test_fuzzy_below_threshold_is_missing() {
        let result = match_headers(
            &strings(&["Python Developer Salaries"]),
            &strings(&["How Much Does It Cost to Hire Python Developers"]),
        );
        assert_eq!(result.found_count, 0);
        assert_eq!(result.missing.len(), 1);
    }

    #[test]
    fn test_stop_word_only_template_never_fuzzy_matches() {
        assert_eq!(overlap_ratio("How do you do it", "anything"), None);
    }

    #[test]
    fn test_missing_order_and_cap() {
        let required: Vec<String> = (0..20).map(|i| format!("Unmatched topic {i}")).collect();
        let result = match_headers(&strings(&["Something else"]), &required);
        assert_eq!(result.total, 20);
        assert_eq!(result.missing.len(), 15);
        assert_eq!(result.missing[0], "Unmatched topic 0");
        assert_eq!(result.coverage_pct, 0.0);
    }

    #[test]
    fn test_blank_produced_heading_does_not_match_everything() {
        let result = match_headers(&strings(&["   "]), &strings(&["Python Hiring Costs"]));
        assert_eq!(result.found_count, 0);
    }
}
