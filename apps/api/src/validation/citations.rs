//! Statistic citation check: numeric claims need a source link nearby, and
//! year references should not point at stale data.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::validation::models::CitationReport;

/// Percentages, currency amounts, comma-grouped integers, and "N million/billion/trillion".
static STAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\d+(?:\.\d+)?%|\$\d[\d,]*(?:\.\d+)?|\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?\s*(?:million|billion|trillion)",
    )
    .expect("statistic regex")
});

static SOURCE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]+\]\(https?://[^)]+\)").expect("source link regex"));

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})\b").expect("year regex"));

/// Earliest year treated as a data reference at all.
const STALE_YEAR_FLOOR: i32 = 2010;
const MAX_UNCITED_EXAMPLES: usize = 10;
const EXAMPLES_PER_LINE: usize = 2;

/// Scans non-heading lines for statistics and checks each line's context window
/// (previous, current and next line) for a source link.
///
/// Years from 2010 up to `current_year - 1` anywhere in the text are
/// reported as outdated.
pub fn check_citations(text: &str, current_year: i32) -> CitationReport {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut report = CitationReport::default();

    for (i, line) in lines.iter().enumerate() {
        if line.trim_start().starts_with('#') {
            continue;
        }
        let matches: Vec<&str> = STAT_RE.find_iter(line).map(|m| m.as_str()).collect();
        if matches.is_empty() {
            continue;
        }
        report.total_stats += matches.len();

        let start = i.saturating_sub(1);
        let end = (i + 2).min(lines.len());
        let window = lines[start..end].join("\n");
        if SOURCE_LINK_RE.is_match(&window) {
            continue;
        }

        report.uncited_count += matches.len();
        for stat in matches.iter().take(EXAMPLES_PER_LINE) {
            report.uncited_examples.push(format!("{stat} (line {})", i + 1));
        }
    }
    report.uncited_examples.truncate(MAX_UNCITED_EXAMPLES);

    let stale: Vec<&str> = YEAR_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|year| {
            year.parse::<i32>()
                .map(|y| (STALE_YEAR_FLOOR..current_year).contains(&y))
                .unwrap_or(false)
        })
        .collect();
    report.outdated_count = stale.len();
    report.outdated_years_found = stale.into_iter().map(str::to_string).collect::<BTreeSet<_>>();

    report
}
