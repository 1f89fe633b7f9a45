//! Brand voice: brand and technology mention counts, and the rule that the
//! brand's developers are never described with the forbidden term.

use regex::Regex;

use crate::validation::models::ValidationError;

/// Word the brand must not be paired with in the same clause.
pub const FORBIDDEN_BRAND_TERM: &str = "freelancer";

/// Maximum words allowed between the brand and the forbidden term for a hit.
const CLAUSE_WORD_GAP: usize = 5;

/// Case-insensitive, non-overlapping occurrences of `needle`.
pub fn count_mentions(text: &str, needle: &str) -> Result<usize, ValidationError> {
    if needle.is_empty() {
        return Ok(0);
    }
    let re = Regex::new(&format!("(?i){}", regex::escape(needle)))?;
    Ok(re.find_iter(text).count())
}

/// Phrases where the brand (full name, or its stem before the first `.`) is
/// followed within a few words by `forbidden`.
pub fn forbidden_pairings(
    text: &str,
    brand: &str,
    forbidden: &str,
) -> Result<Vec<String>, ValidationError> {
    let mut names = vec![regex::escape(brand)];
    if let Some((stem, _)) = brand.split_once('.') {
        if !stem.is_empty() {
            names.push(regex::escape(stem));
        }
    }
    let pattern = format!(
        r"(?i)(?:{})\s+(?:\w+\s+){{0,{CLAUSE_WORD_GAP}}}{}",
        names.join("|"),
        regex::escape(forbidden)
    );
    let re = Regex::new(&pattern)?;
    Ok(re.find_iter(text).map(|m| m.as_str().to_string()).collect())
}
