//! Term and keyword coverage.
//!
//! Terms match on any surface form (primary or variant) with a simple plural
//! fallback. Keywords are exact phrases: no variants, no plural handling.

use crate::validation::models::{ImportanceBucket, KeywordCoverage, Term, TermCoverage};

/// Reporting cap on missing terms.
const MAX_MISSING_TERMS: usize = 30;

/// Computes what fraction of `terms` appear in `text`.
///
/// A term is found if any lower-cased candidate (primary or variant) is a
/// substring of the lower-cased text, or the candidate with one trailing `s`
/// removed is, provided what remains is longer than two characters.
pub fn coverage(text: &str, terms: &[Term]) -> TermCoverage {
    if terms.is_empty() {
        return TermCoverage {
            total: 0,
            found_count: 0,
            coverage_pct: 100.0,
            missing: vec![],
            missing_high_importance: vec![],
        };
    }

    let text_lower = text.to_lowercase();
    let mut found_count = 0;
    let mut missing: Vec<&Term> = Vec::new();

    for term in terms {
        if term_found(&text_lower, term) {
            found_count += 1;
        } else {
            missing.push(term);
        }
    }

    let missing: Vec<Term> = missing
        .into_iter()
        .take(MAX_MISSING_TERMS)
        .cloned()
        .collect();
    let missing_high_importance = missing
        .iter()
        .filter(|t| t.bucket() == ImportanceBucket::High)
        .map(|t| t.primary.clone())
        .collect();

    TermCoverage {
        total: terms.len(),
        found_count,
        coverage_pct: percentage(found_count, terms.len()),
        missing,
        missing_high_importance,
    }
}

fn term_found(text_lower: &str, term: &Term) -> bool {
    std::iter::once(&term.primary)
        .chain(term.variants.iter())
        .map(|candidate| candidate.to_lowercase())
        .any(|candidate| {
            if text_lower.contains(&candidate) {
                return true;
            }
            match candidate.strip_suffix('s') {
                Some(singular) if singular.chars().count() > 2 => text_lower.contains(singular),
                _ => false,
            }
        })
}

/// Exact-phrase keyword coverage. An empty keyword list is 100% covered.
pub fn keyword_coverage(text: &str, keywords: &[String]) -> KeywordCoverage {
    let text_lower = text.to_lowercase();
    let (found, missing): (Vec<&String>, Vec<&String>) = keywords
        .iter()
        .partition(|kw| text_lower.contains(&kw.to_lowercase()));

    KeywordCoverage {
        total: keywords.len(),
        found: found.len(),
        coverage_pct: if keywords.is_empty() {
            100.0
        } else {
            percentage(found.len(), keywords.len())
        },
        missing: missing.into_iter().cloned().collect(),
    }
}

/// `part / whole * 100`, rounded to one decimal place.
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 100.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(primary: &str, variants: &[&str], importance: i64) -> Term {
        Term::new(
            primary,
            variants.iter().map(|v| v.to_string()).collect(),
            importance,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_terms_are_fully_covered() {
        let result = coverage("anything at all", &[]);
        assert_eq!(result.total, 0);
        assert_eq!(result.coverage_pct, 100.0);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_variant_match_counts_as_found() {
        let terms = vec![term("engineer", &["engineers", "engineering"], 8)];
        let result = coverage("We hire engineering talent", &terms);
        assert_eq!(result.found_count, 1);
        assert_eq!(result.coverage_pct, 100.0);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let terms = vec![term("Machine Learning", &[], 9)];
        let result = coverage("experience with MACHINE LEARNING pipelines", &terms);
        assert_eq!(result.found_count, 1);
    }

    #[test]
    fn test_trailing_s_fallback() {
        let terms = vec![term("frameworks", &[], 6)];
        let result = coverage("a mature framework ecosystem", &terms);
        assert_eq!(result.found_count, 1);
    }

    #[test]
    fn test_short_variant_never_uses_singular_fallback() {
        // "ais" stripped is "ai" (length 2): the fallback must not apply.
        let terms = vec![term("ais", &["ai"], 6)];
        let result = coverage("a simple sentence", &terms);
        assert_eq!(result.found_count, 0);

        let terms = vec![term("ai", &[], 6)];
        let result = coverage("a", &terms);
        assert_eq!(result.found_count, 0);
    }

    #[test]
    fn test_only_one_trailing_s_is_stripped() {
        // "bosss" -> "boss" is not in the text; "bos" would be, but only one s goes.
        let terms = vec![term("bosss", &[], 5)];
        let result = coverage("the bos", &terms);
        assert_eq!(result.found_count, 0);
    }

    #[test]
    fn test_coverage_pct_rounds_to_one_decimal() {
        let terms = vec![
            term("python", &[], 9),
            term("django", &[], 7),
            term("kubernetes", &[], 3),
        ];
        let result = coverage("python and django", &terms);
        assert_eq!(result.found_count, 2);
        assert_eq!(result.coverage_pct, 66.7);
    }

    #[test]
    fn test_missing_preserves_order_and_flags_high_importance() {
        let terms = vec![
            term("kafka", &[], 9),
            term("python", &[], 9),
            term("redis", &[], 4),
        ];
        let result = coverage("python only", &terms);
        let missing: Vec<&str> = result.missing.iter().map(|t| t.primary.as_str()).collect();
        assert_eq!(missing, vec!["kafka", "redis"]);
        assert_eq!(result.missing_high_importance, vec!["kafka".to_string()]);
    }

    #[test]
    fn test_missing_is_capped_at_thirty() {
        let terms: Vec<Term> = (0..40)
            .map(|i| term(&format!("absentterm{i}"), &[], 5))
            .collect();
        let result = coverage("nothing relevant", &terms);
        assert_eq!(result.total, 40);
        assert_eq!(result.missing.len(), 30);
        assert_eq!(result.missing[0].primary, "absentterm0");
        assert_eq!(result.coverage_pct, 0.0);
    }

    #[test]
    fn test_keyword_coverage_requires_exact_phrase() {
        let keywords = vec![
            "hire Python developers".to_string(),
            "Python developer".to_string(),
        ];
        let result = keyword_coverage("You can HIRE PYTHON DEVELOPERS fast.", &keywords);
        assert_eq!(result.found, 2);

        let keywords = vec!["hire Python developers".to_string()];
        let result = keyword_coverage("hire a Python developer", &keywords);
        assert_eq!(result.found, 0);
        assert_eq!(result.missing, keywords);
    }

    #[test]
    fn test_empty_keywords_are_fully_covered() {
        let result = keyword_coverage("text", &[]);
        assert_eq!(result.total, 0);
        assert_eq!(result.coverage_pct, 100.0);
    }
}
