//! Grader: turns raw check outputs into issues and warnings, then a letter grade.
//!
//! Thresholds live in `GradingPolicy`. The grade itself depends only on the
//! number of issues and warnings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::validation::models::{CheckOutputs, Grade};

/// Product-tuning thresholds. Built once at startup; never varied per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingPolicy {
    pub min_words: usize,
    /// Above this is a warning, up to `max_words`.
    pub soft_max_words: usize,
    pub max_words: usize,
    pub min_sections: usize,
    pub max_sections: usize,
    pub min_brand_mentions: usize,
    pub min_internal_links: usize,
    pub max_internal_links: usize,
    pub min_external_links: usize,
    pub max_external_links: usize,
    pub min_tech_mentions: usize,
    pub header_coverage_issue_pct: f64,
    pub header_coverage_warning_pct: f64,
    pub term_coverage_issue_pct: f64,
    pub term_coverage_warning_pct: f64,
    pub min_keywords_found: usize,
    pub target_keywords_found: usize,
    /// More uncited statistics than this is an issue; 1..=this is a warning.
    pub max_uncited_stats: usize,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            min_words: 2800,
            soft_max_words: 3200,
            max_words: 3500,
            min_sections: 7,
            max_sections: 10,
            min_brand_mentions: 3,
            min_internal_links: 2,
            max_internal_links: 4,
            min_external_links: 2,
            max_external_links: 4,
            min_tech_mentions: 5,
            header_coverage_issue_pct: 25.0,
            header_coverage_warning_pct: 40.0,
            term_coverage_issue_pct: 85.0,
            term_coverage_warning_pct: 90.0,
            min_keywords_found: 5,
            target_keywords_found: 7,
            max_uncited_stats: 3,
        }
    }
}

/// The checks that can raise issues. Used to derive each record's `pass` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckId {
    WordCount,
    Sections,
    Structure,
    BrandMentions,
    InternalLinks,
    ExternalLinks,
    CompetitorLinks,
    BrandVoice,
    TechMentions,
    HeaderCoverage,
    TermCoverage,
    KeywordCoverage,
    Citations,
}

/// Ordered findings for one article.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Findings {
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    failed: BTreeSet<CheckId>,
}

impl Findings {
    fn issue(&mut self, check: CheckId, message: String) {
        self.failed.insert(check);
        self.issues.push(message);
    }

    fn warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// True when `check` raised no issue. Warnings do not fail a check.
    pub fn passed(&self, check: CheckId) -> bool {
        !self.failed.contains(&check)
    }
}

impl Grade {
    /// The grade ladder. Warnings only matter while there are no issues.
    pub fn from_counts(issues: usize, warnings: usize) -> Grade {
        match (issues, warnings) {
            (0, 0) => Grade::APlus,
            (0, _) => Grade::A,
            (1, _) => Grade::AMinus,
            (2, _) => Grade::BPlus,
            (3, _) => Grade::B,
            (4..=5, _) => Grade::C,
            _ => Grade::D,
        }
    }
}

impl GradingPolicy {
    /// Applies every rule in a fixed order and returns the findings.
    pub fn collect_findings(&self, checks: &CheckOutputs, tech: &str) -> Findings {
        let mut f = Findings::default();

        let words = checks.word_count;
        if words < self.min_words {
            f.issue(
                CheckId::WordCount,
                format!("Too short: {words} words (need {}+)", self.min_words),
            );
        } else if words > self.max_words {
            f.issue(
                CheckId::WordCount,
                format!(
                    "Too long: {words} words (target {} max)",
                    self.soft_max_words
                ),
            );
        } else if words > self.soft_max_words {
            f.warning(format!(
                "Slightly long: {words} words (target {} max)",
                self.soft_max_words
            ));
        }

        let sections = checks.h2_headings.len();
        if sections < self.min_sections {
            f.issue(
                CheckId::Sections,
                format!(
                    "Too few H2s: {sections} (need {}-{})",
                    self.min_sections, self.max_sections
                ),
            );
        } else if sections > self.max_sections {
            f.issue(
                CheckId::Sections,
                format!(
                    "Too many H2s: {sections} (target {}-{})",
                    self.min_sections, self.max_sections
                ),
            );
        }

        let structure = &checks.structure;
        if !structure.starts_with_paragraph {
            f.issue(
                CheckId::Structure,
                "Article doesn't start with a paragraph before first H2".to_string(),
            );
        }
        if structure.has_introduction_heading {
            f.issue(
                CheckId::Structure,
                "Article has an 'Introduction' header (not allowed)".to_string(),
            );
        }
        if structure.has_conclusion_heading {
            f.issue(
                CheckId::Structure,
                "Article has a 'Conclusion' header (not allowed)".to_string(),
            );
        }
        if structure.heading_immediately_followed_by_subheading {
            f.warning("An H2 is immediately followed by H3 without body text".to_string());
        }

        if checks.brand_mentions < self.min_brand_mentions {
            f.issue(
                CheckId::BrandMentions,
                format!(
                    "Too few brand mentions: {} (need {}+)",
                    checks.brand_mentions, self.min_brand_mentions
                ),
            );
        }

        let internal = checks.links.internal.len();
        if internal < self.min_internal_links {
            f.issue(
                CheckId::InternalLinks,
                format!(
                    "Only {internal} internal links (need {}+)",
                    self.min_internal_links
                ),
            );
        } else if internal > self.max_internal_links {
            f.warning(format!(
                "Too many internal links: {internal} (max {})",
                self.max_internal_links
            ));
        }

        let external = checks.links.external.len();
        if external < self.min_external_links {
            f.issue(
                CheckId::ExternalLinks,
                format!(
                    "Only {external} external links (need {}+)",
                    self.min_external_links
                ),
            );
        } else if external > self.max_external_links {
            f.warning(format!(
                "Too many external links: {external} (max {})",
                self.max_external_links
            ));
        }

        if !checks.links.competitor_hits.is_empty() {
            let urls: Vec<&str> = checks
                .links
                .competitor_hits
                .iter()
                .map(|l| l.url.as_str())
                .collect();
            f.issue(
                CheckId::CompetitorLinks,
                format!("Contains competitor links: {}", urls.join(", ")),
            );
        }

        if !checks.brand_voice_hits.is_empty() {
            f.issue(
                CheckId::BrandVoice,
                format!(
                    "Brand described with a forbidden term: {}",
                    checks.brand_voice_hits.join("; ")
                ),
            );
        }

        if checks.tech_mentions < self.min_tech_mentions {
            f.issue(
                CheckId::TechMentions,
                format!(
                    "Tech '{tech}' only mentioned {} times (need {}+)",
                    checks.tech_mentions, self.min_tech_mentions
                ),
            );
        }

        let headers = &checks.header_coverage;
        if headers.total > 0 {
            if headers.coverage_pct < self.header_coverage_issue_pct {
                f.issue(
                    CheckId::HeaderCoverage,
                    format!(
                        "Low header template coverage: {:.0}% ({}/{})",
                        headers.coverage_pct, headers.found_count, headers.total
                    ),
                );
            } else if headers.coverage_pct < self.header_coverage_warning_pct {
                f.warning(format!(
                    "Header template coverage could be better: {:.0}% ({}/{})",
                    headers.coverage_pct, headers.found_count, headers.total
                ));
            }
        }

        let terms = &checks.term_coverage;
        if terms.coverage_pct < self.term_coverage_issue_pct {
            f.issue(
                CheckId::TermCoverage,
                format!(
                    "Low SEO term coverage: {:.0}% (target {:.0}%+)",
                    terms.coverage_pct, self.term_coverage_warning_pct
                ),
            );
        } else if terms.coverage_pct < self.term_coverage_warning_pct {
            f.warning(format!(
                "SEO term coverage below target: {:.0}% (target {:.0}%+)",
                terms.coverage_pct, self.term_coverage_warning_pct
            ));
        }

        let keywords = &checks.keyword_coverage;
        if keywords.total > 0 {
            if keywords.found < self.min_keywords_found {
                f.issue(
                    CheckId::KeywordCoverage,
                    format!(
                        "Too few keywords used: {}/{} (need {}+ exact phrases)",
                        keywords.found, keywords.total, self.min_keywords_found
                    ),
                );
            } else if keywords.found < self.target_keywords_found {
                f.warning(format!(
                    "Keyword usage on low end: {}/{} (target {}+ exact phrases)",
                    keywords.found, keywords.total, self.target_keywords_found
                ));
            }
        }

        let citations = &checks.citations;
        if citations.uncited_count > self.max_uncited_stats {
            f.issue(
                CheckId::Citations,
                format!(
                    "{} statistics without source links (max {} allowed)",
                    citations.uncited_count, self.max_uncited_stats
                ),
            );
        } else if citations.uncited_count > 0 {
            f.warning(format!(
                "{} statistics appear to lack source links",
                citations.uncited_count
            ));
        }
        if !citations.outdated_years_found.is_empty() {
            let years: Vec<&str> = citations
                .outdated_years_found
                .iter()
                .map(String::as_str)
                .collect();
            f.warning(format!(
                "{} references to outdated data ({})",
                citations.outdated_count,
                years.join(", ")
            ));
        }

        f
    }
}
