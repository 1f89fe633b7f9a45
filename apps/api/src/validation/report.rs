//! Plain-text rendering of a `ValidationReport` for humans and CLI-style clients.

use std::fmt::Write as _;

use crate::validation::grader::GradingPolicy;
use crate::validation::models::ValidationReport;

const RULE_WIDTH: usize = 60;
const MAX_HIGH_TERMS_SHOWN: usize = 10;

fn status(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}

/// Renders the fixed report layout. Pure; the same report always renders the same text.
pub fn format_report(report: &ValidationReport, tech: &str, policy: &GradingPolicy) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // `write!` into a String cannot fail.
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "VALIDATION REPORT: {tech}");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Grade: {}", report.grade);
    out.push('\n');

    let _ = writeln!(
        out,
        "  [{}] Word count:       {}  (target: {}-{})",
        status(report.word_count.pass),
        report.word_count.count,
        policy.min_words,
        policy.soft_max_words
    );
    let _ = writeln!(
        out,
        "  [{}] H2 headers:       {}  (target: {}-{})",
        status(report.h2_count.pass),
        report.h2_count.count,
        policy.min_sections,
        policy.max_sections
    );
    let _ = writeln!(
        out,
        "  [{}] Internal links:   {}  (need: {}-{})",
        status(report.internal_links.pass),
        report.internal_links.count,
        policy.min_internal_links,
        policy.max_internal_links
    );
    let _ = writeln!(
        out,
        "  [{}] External links:   {}  (need: {}-{})",
        status(report.external_links.pass),
        report.external_links.count,
        policy.min_external_links,
        policy.max_external_links
    );

    let headers = &report.header_coverage;
    if headers.total > 0 {
        let _ = writeln!(
            out,
            "  [{}] Header templates: {} used out of {} available",
            status(headers.pass),
            headers.found_count,
            headers.total
        );
    }

    let keywords = &report.keyword_coverage;
    if keywords.total > 0 {
        let _ = writeln!(
            out,
            "  [{}] Keywords used:    {} exact matches  (need: {}+)",
            status(keywords.pass),
            keywords.found,
            policy.min_keywords_found
        );
    }

    let terms = &report.term_coverage;
    if terms.total > 0 {
        let _ = writeln!(
            out,
            "  [{}] SEO terms:        {}/{} = {:.0}%  (target: {:.0}%+)",
            status(terms.pass),
            terms.found_count,
            terms.total,
            terms.coverage_pct,
            policy.term_coverage_warning_pct
        );
        if !terms.missing_high_importance.is_empty() {
            let shown: Vec<&str> = terms
                .missing_high_importance
                .iter()
                .take(MAX_HIGH_TERMS_SHOWN)
                .map(String::as_str)
                .collect();
            let _ = writeln!(out, "    Missing HIGH importance: {}", shown.join(", "));
        }
    }

    let _ = writeln!(
        out,
        "  [{}] Brand mentions:   {}  (need: {}+)",
        status(report.brand_mentions.pass),
        report.brand_mentions.count,
        policy.min_brand_mentions
    );
    let _ = writeln!(
        out,
        "  [{}] Tech '{}' mentions: {}",
        status(report.tech_mentions.pass),
        report.tech_mentions.tech,
        report.tech_mentions.count
    );

    let citations = &report.cited_statistics;
    let _ = writeln!(
        out,
        "  [{}] Cited statistics: {} of {} uncited",
        status(citations.pass),
        citations.uncited_count,
        citations.total_stats
    );

    if !report.issues.is_empty() {
        let _ = writeln!(out, "\nISSUES ({}):", report.issues.len());
        for issue in &report.issues {
            let _ = writeln!(out, "  - {issue}");
        }
    }
    if !report.warnings.is_empty() {
        let _ = writeln!(out, "\nWARNINGS ({}):", report.warnings.len());
        for warning in &report.warnings {
            let _ = writeln!(out, "  ~ {warning}");
        }
    }
    if report.issues.is_empty() && report.warnings.is_empty() {
        out.push_str("\nAll checks passed!\n");
    }

    out.push_str(&rule);
    out
}
