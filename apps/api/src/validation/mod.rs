// Article validation core.
// Pure and synchronous: no clock, no network, no files. Everything a run needs
// arrives in `ValidateRequest`; thresholds come from `GradingPolicy`.

pub mod brand;
pub mod citations;
pub mod grader;
pub mod handlers;
pub mod headers;
pub mod links;
pub mod models;
pub mod report;
pub mod runs;
pub mod structure;
pub mod terms;

use tracing::debug;

use crate::validation::grader::{CheckId, Findings, GradingPolicy};
use crate::validation::models::{
    BrandVoiceCheck, CheckOutputs, Checked, CompetitorCheck, CountCheck, Grade,
    HeadingCountCheck, LinkCheck, TechMentionCheck, ValidateRequest, ValidationError,
    ValidationReport,
};

/// The validator seam. Carried in `AppState` as `Arc<dyn ArticleValidator>` so
/// handlers and the generation loop never depend on a concrete rule set.
pub trait ArticleValidator: Send + Sync {
    fn validate(&self, request: &ValidateRequest) -> Result<ValidationReport, ValidationError>;

    fn policy(&self) -> &GradingPolicy;
}

/// Default validator: the fixed rule set graded against one policy.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedValidator {
    pub policy: GradingPolicy,
}

impl RuleBasedValidator {
    pub fn new(policy: GradingPolicy) -> Self {
        Self { policy }
    }
}

impl ArticleValidator for RuleBasedValidator {
    fn validate(&self, request: &ValidateRequest) -> Result<ValidationReport, ValidationError> {
        validate_article(request, &self.policy)
    }

    fn policy(&self) -> &GradingPolicy {
        &self.policy
    }
}

/// Runs every check over the article and grades the result.
///
/// Fails only on malformed input (see `ValidateRequest::check`). An empty
/// article is valid input and simply collects issues.
pub fn validate_article(
    request: &ValidateRequest,
    policy: &GradingPolicy,
) -> Result<ValidationReport, ValidationError> {
    request.check()?;

    let text = request.article_text.as_str();
    let tech = request.technology_name.trim();
    let brand = request.brand();

    let structure = structure::analyze(text);
    let h2_headings = structure::headings_at(text, 2);
    let produced_headings: Vec<String> = structure::headings(text)
        .into_iter()
        .filter(|h| h.level == 2 || h.level == 3)
        .map(|h| h.text)
        .collect();

    let checks = CheckOutputs {
        word_count: structure::prose_word_count(text),
        h2_headings,
        brand_mentions: brand::count_mentions(text, brand)?,
        brand_voice_hits: brand::forbidden_pairings(text, brand, brand::FORBIDDEN_BRAND_TERM)?,
        tech_mentions: brand::count_mentions(text, tech)?,
        links: links::analyze_links(text, &request.own_site_domain, &request.competitor_domains),
        header_coverage: headers::match_headers(&produced_headings, &request.required_headings),
        term_coverage: terms::coverage(text, &request.required_terms),
        keyword_coverage: terms::keyword_coverage(text, &request.required_keywords),
        citations: citations::check_citations(text, request.current_year),
        structure,
    };

    let findings = policy.collect_findings(&checks, tech);
    let grade = Grade::from_counts(findings.issues.len(), findings.warnings.len());

    debug!(
        tech,
        words = checks.word_count,
        issues = findings.issues.len(),
        warnings = findings.warnings.len(),
        %grade,
        "Article validated"
    );

    Ok(assemble_report(checks, findings, grade, tech))
}

fn assemble_report(
    checks: CheckOutputs,
    findings: Findings,
    grade: Grade,
    tech: &str,
) -> ValidationReport {
    let passed = |check| findings.passed(check);

    ValidationReport {
        word_count: CountCheck {
            count: checks.word_count,
            pass: passed(CheckId::WordCount),
        },
        h2_count: HeadingCountCheck {
            count: checks.h2_headings.len(),
            headings: checks.h2_headings,
            pass: passed(CheckId::Sections),
        },
        structure: Checked {
            result: checks.structure,
            pass: passed(CheckId::Structure),
        },
        brand_mentions: CountCheck {
            count: checks.brand_mentions,
            pass: passed(CheckId::BrandMentions),
        },
        internal_links: LinkCheck {
            count: checks.links.internal.len(),
            links: checks.links.internal,
            pass: passed(CheckId::InternalLinks),
        },
        external_links: LinkCheck {
            count: checks.links.external.len(),
            links: checks.links.external,
            pass: passed(CheckId::ExternalLinks),
        },
        competitor_links: CompetitorCheck {
            found: checks.links.competitor_hits,
            pass: passed(CheckId::CompetitorLinks),
        },
        brand_voice: BrandVoiceCheck {
            forbidden_term: brand::FORBIDDEN_BRAND_TERM.to_string(),
            found: checks.brand_voice_hits,
            pass: passed(CheckId::BrandVoice),
        },
        tech_mentions: TechMentionCheck {
            tech: tech.to_string(),
            count: checks.tech_mentions,
            pass: passed(CheckId::TechMentions),
        },
        header_coverage: Checked {
            result: checks.header_coverage,
            pass: passed(CheckId::HeaderCoverage),
        },
        term_coverage: Checked {
            result: checks.term_coverage,
            pass: passed(CheckId::TermCoverage),
        },
        keyword_coverage: Checked {
            result: checks.keyword_coverage,
            pass: passed(CheckId::KeywordCoverage),
        },
        cited_statistics: Checked {
            result: checks.citations,
            pass: passed(CheckId::Citations),
        },
        pass: findings.issues.is_empty(),
        issues: findings.issues,
        warnings: findings.warnings,
        grade,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::models::Term;

    const SECTIONS: [&str; 8] = [
        "Why Python Developers Matter",
        "Skills To Look For",
        "Django And Flask Experience",
        "Python Developer Rates",
        "Interview Questions",
        "Where To Find Talent",
        "Remote Hiring Tips",
        "Next Steps",
    ];

    fn filler(words: usize) -> String {
        vec!["lorem"; words].join(" ")
    }

    /// Opening paragraph, eight sections, three internal and three external links.
    fn strong_article() -> String {
        let links = [
            "[hire Python developers](https://lemon.io/hire/python-developers/)",
            "[Django engineers](https://lemon.io/hire/django-developers/)",
            "[how vetting works](https://lemon.io/vetting/)",
            "[official docs](https://docs.python.org/3/)",
            "[Django project](https://www.djangoproject.com/)",
            "[package index](https://pypi.org/)",
        ];
        let mut parts = vec![
            "Lemon.io connects companies with vetted Python developers. Lemon.io keeps Python hiring simple. Teams trust Lemon.io for Python work."
                .to_string(),
        ];
        for (i, section) in SECTIONS.iter().enumerate() {
            parts.push(format!("## {section}"));
            let link = links.get(i).copied().unwrap_or("");
            let opener = if i < 5 { "Python teams ship quickly." } else { "" };
            parts.push(format!("{opener} {link} {}", filler(360)));
        }
        parts.join("\n\n")
    }

    fn strong_request() -> ValidateRequest {
        ValidateRequest {
            article_text: strong_article(),
            technology_name: "Python".to_string(),
            required_keywords: [
                "python developers",
                "hire python developers",
                "django",
                "flask",
                "python developer rates",
                "interview questions",
                "remote hiring",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            required_terms: vec![
                Term::new("python developers", vec![], 9).unwrap(),
                Term::new("django", vec![], 7).unwrap(),
                Term::new("flask", vec!["flask framework".to_string()], 4).unwrap(),
            ],
            required_headings: vec![
                "Why Python Developers Matter".to_string(),
                "Skills to look for".to_string(),
            ],
            own_site_domain: "lemon.io".to_string(),
            brand_name: Some("Lemon.io".to_string()),
            competitor_domains: vec!["toptal.com".to_string(), "upwork.com".to_string()],
            current_year: 2026,
        }
    }

    #[test]
    fn test_strong_article_has_no_issues() {
        let report = validate_article(&strong_request(), &GradingPolicy::default()).unwrap();

        assert!(report.issues.is_empty(), "{:?}", report.issues);
        assert!(report.pass);
        assert!(matches!(report.grade, Grade::APlus | Grade::A));
        assert!(report.word_count.pass, "{} words", report.word_count.count);
        assert_eq!(report.h2_count.count, 8);
        assert_eq!(report.internal_links.count, 3);
        assert_eq!(report.external_links.count, 3);
        assert!(report.competitor_links.pass);
        assert!(report.tech_mentions.count >= 10);
        assert_eq!(report.term_coverage.coverage_pct, 100.0);
        assert_eq!(report.keyword_coverage.found, 7);
        assert_eq!(report.header_coverage.found_count, 2);
        assert_eq!(report.cited_statistics.total_stats, 0);
    }

    #[test]
    fn test_short_article_with_competitor_link_grades_b_or_worse() {
        let mut parts = vec!["Lemon.io helps you hire Python developers.".to_string()];
        for (i, section) in SECTIONS.iter().enumerate() {
            parts.push(format!("## {section}"));
            let link = match i {
                0 => "[hire](https://lemon.io/hire/python-developers/)",
                1 => "[rates](https://toptal.com/python)",
                _ => "",
            };
            parts.push(format!("Python {link} {}", filler(240)));
        }
        let mut request = strong_request();
        request.article_text = parts.join("\n\n");

        let report = validate_article(&request, &GradingPolicy::default()).unwrap();

        assert!(report.word_count.count < 2800);
        assert!(report.issues.iter().any(|i| i.starts_with("Too short")));
        assert!(report
            .issues
            .iter()
            .any(|i| i.starts_with("Only 1 internal links")));
        assert!(report
            .issues
            .iter()
            .any(|i| i.starts_with("Contains competitor links")));
        assert!(report.issues.len() >= 3);
        assert!(report.grade >= Grade::B);
        assert!(!report.pass);
        assert!(!report.competitor_links.pass);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let request = strong_request();
        let policy = GradingPolicy::default();
        let first = serde_json::to_string(&validate_article(&request, &policy).unwrap()).unwrap();
        let second = serde_json::to_string(&validate_article(&request, &policy).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_article_degrades_gracefully() {
        let mut request = strong_request();
        request.article_text = String::new();
        request.required_terms.clear();
        request.required_headings.clear();
        request.required_keywords.clear();

        let report = validate_article(&request, &GradingPolicy::default()).unwrap();
        assert_eq!(report.word_count.count, 0);
        assert_eq!(report.term_coverage.coverage_pct, 100.0);
        assert_eq!(report.header_coverage.coverage_pct, 100.0);
        assert_eq!(report.grade, Grade::D);
    }

    #[test]
    fn test_malformed_request_is_rejected() {
        let mut request = strong_request();
        request.technology_name = String::new();
        assert!(validate_article(&request, &GradingPolicy::default()).is_err());
    }

    #[test]
    fn test_forbidden_brand_phrase_is_an_issue() {
        let mut request = strong_request();
        request.article_text = request
            .article_text
            .replacen("Teams trust Lemon.io", "Teams trust every Lemon freelancer", 1);
        let report = validate_article(&request, &GradingPolicy::default()).unwrap();
        assert!(!report.brand_voice.pass);
        assert_eq!(report.brand_voice.found.len(), 1);
        assert!(report.issues.iter().any(|i| i.contains("forbidden term")));
    }

    #[test]
    fn test_validator_trait_uses_its_policy() {
        let strict = GradingPolicy {
            min_tech_mentions: 1000,
            ..GradingPolicy::default()
        };
        let validator = RuleBasedValidator::new(strict);
        let report = validator.validate(&strong_request()).unwrap();
        assert!(!report.tech_mentions.pass);
        assert_eq!(report.grade, Grade::AMinus);
        assert_eq!(validator.policy().min_tech_mentions, 1000);
    }
}
