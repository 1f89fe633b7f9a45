//! Validation data model: requirement inputs, per-check results and the aggregate report.
//!
//! Everything here is plain data. Checks build these records fresh on every run;
//! nothing is cached between calls.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// A term record that cannot be normalised into a `Term`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TermError {
    #[error("term is missing a primary variant")]
    MissingPrimary,

    #[error("importance for '{term}' is out of range 0-10: {value}")]
    ImportanceOutOfRange { term: String, value: i64 },

    #[error("importance for '{term}' is not a number: {raw:?}")]
    ImportanceUnparseable { term: String, raw: String },

    #[error("typical use count for '{term}' is not a number: {raw:?}")]
    UsesUnparseable { term: String, raw: String },

    #[error("typical use range for '{term}' is inverted: {min} > {max}")]
    InvertedUseRange { term: String, min: u32, max: u32 },
}

/// Malformed input to the validator. The only error class the core raises.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("competitor domain list contains an empty entry")]
    EmptyCompetitorDomain,

    #[error(transparent)]
    Term(#[from] TermError),

    #[error("failed to build match pattern: {0}")]
    Pattern(#[from] regex::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Terms
// ────────────────────────────────────────────────────────────────────────────

/// Prioritisation bucket for reporting. Coverage treats all buckets equally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportanceBucket {
    High,
    Medium,
    Low,
}

impl ImportanceBucket {
    pub fn from_importance(importance: u8) -> Self {
        match importance {
            i if i >= 8 => ImportanceBucket::High,
            5..=7 => ImportanceBucket::Medium,
            _ => ImportanceBucket::Low,
        }
    }
}

/// A mandatory SEO term with its accepted surface forms.
///
/// Deserialises through `RawTerm` so importance is parsed exactly once at the
/// boundary: integers, numeric strings and `"N/10"` are accepted, anything else
/// is rejected rather than silently defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTerm")]
pub struct Term {
    pub primary: String,
    pub variants: Vec<String>,
    pub importance: u8,
    pub typical_use_min: u32,
    pub typical_use_max: u32,
}

impl Term {
    pub fn new(
        primary: impl Into<String>,
        variants: Vec<String>,
        importance: i64,
    ) -> Result<Self, TermError> {
        Self::try_from(RawTerm {
            primary: Some(primary.into()),
            variants,
            importance: Some(RawImportance::Number(importance)),
            typical_use_min: None,
            typical_use_max: None,
        })
    }

    /// Builds a term from untyped text fields, as found in a CSV export row.
    /// Blank fields fall back to the same defaults as a JSON record.
    pub fn from_text_fields(
        primary: &str,
        variants: Vec<String>,
        importance: &str,
        typical_use_min: &str,
        typical_use_max: &str,
    ) -> Result<Self, TermError> {
        let uses = |raw: &str| -> Result<Option<u32>, TermError> {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse().map(Some).map_err(|_| TermError::UsesUnparseable {
                term: primary.trim().to_string(),
                raw: raw.to_string(),
            })
        };
        let importance = importance.trim();

        Self::try_from(RawTerm {
            primary: Some(primary.to_string()),
            variants,
            importance: (!importance.is_empty())
                .then(|| RawImportance::Text(importance.to_string())),
            typical_use_min: uses(typical_use_min)?,
            typical_use_max: uses(typical_use_max)?,
        })
    }

    pub fn bucket(&self) -> ImportanceBucket {
        ImportanceBucket::from_importance(self.importance)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawImportance {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct RawTerm {
    #[serde(alias = "term")]
    primary: Option<String>,
    #[serde(default)]
    variants: Vec<String>,
    importance: Option<RawImportance>,
    #[serde(alias = "typical_uses_min")]
    typical_use_min: Option<u32>,
    #[serde(alias = "typical_uses_max")]
    typical_use_max: Option<u32>,
}

const DEFAULT_IMPORTANCE: i64 = 5;
const DEFAULT_USE_MIN: u32 = 1;
const DEFAULT_USE_MAX: u32 = 2;

impl TryFrom<RawTerm> for Term {
    type Error = TermError;

    fn try_from(raw: RawTerm) -> Result<Self, Self::Error> {
        let primary = raw
            .primary
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .ok_or(TermError::MissingPrimary)?;

        let value = match raw.importance {
            None => DEFAULT_IMPORTANCE,
            Some(RawImportance::Number(n)) => n,
            Some(RawImportance::Text(text)) => parse_importance_text(&text).ok_or_else(|| {
                TermError::ImportanceUnparseable {
                    term: primary.clone(),
                    raw: text.clone(),
                }
            })?,
        };
        if !(0..=10).contains(&value) {
            return Err(TermError::ImportanceOutOfRange {
                term: primary,
                value,
            });
        }

        let typical_use_min = raw.typical_use_min.unwrap_or(DEFAULT_USE_MIN);
        let typical_use_max = raw.typical_use_max.unwrap_or(DEFAULT_USE_MAX);
        if typical_use_min > typical_use_max {
            return Err(TermError::InvertedUseRange {
                term: primary,
                min: typical_use_min,
                max: typical_use_max,
            });
        }

        let variants = raw
            .variants
            .into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();

        Ok(Term {
            primary,
            variants,
            importance: value as u8,
            typical_use_min,
            typical_use_max,
        })
    }
}

/// Accepts `"8"` and `"8/10"` (the SEO tool's export format).
fn parse_importance_text(text: &str) -> Option<i64> {
    let head = text.trim().split('/').next()?.trim();
    head.parse::<i64>().ok()
}

// ────────────────────────────────────────────────────────────────────────────
// Request
// ────────────────────────────────────────────────────────────────────────────

/// Everything one validation run needs. `current_year` and the competitor list
/// are passed in explicitly so the core never reads the clock or global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub article_text: String,
    pub technology_name: String,
    #[serde(default)]
    pub required_keywords: Vec<String>,
    #[serde(default)]
    pub required_terms: Vec<Term>,
    #[serde(default)]
    pub required_headings: Vec<String>,
    pub own_site_domain: String,
    /// Defaults to `own_site_domain` when absent.
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub competitor_domains: Vec<String>,
    pub current_year: i32,
}

impl ValidateRequest {
    /// Rejects inputs that would make the checks meaningless (an empty technology
    /// name matches everywhere, an empty domain makes every link internal).
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.technology_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("technology_name"));
        }
        if self.own_site_domain.trim().is_empty() {
            return Err(ValidationError::EmptyField("own_site_domain"));
        }
        if matches!(&self.brand_name, Some(b) if b.trim().is_empty()) {
            return Err(ValidationError::EmptyField("brand_name"));
        }
        if self.competitor_domains.iter().any(|d| d.trim().is_empty()) {
            return Err(ValidationError::EmptyCompetitorDomain);
        }
        Ok(())
    }

    pub fn brand(&self) -> &str {
        self.brand_name.as_deref().unwrap_or(&self.own_site_domain)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-check results
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub anchor: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountCheck {
    pub count: usize,
    pub pass: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadingCountCheck {
    pub count: usize,
    pub headings: Vec<String>,
    pub pass: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    pub starts_with_paragraph: bool,
    pub has_introduction_heading: bool,
    pub has_conclusion_heading: bool,
    pub heading_immediately_followed_by_subheading: bool,
    pub headings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkAnalysis {
    pub internal: Vec<Link>,
    pub external: Vec<Link>,
    pub competitor_hits: Vec<Link>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCheck {
    pub count: usize,
    pub links: Vec<Link>,
    pub pass: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorCheck {
    pub found: Vec<Link>,
    pub pass: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandVoiceCheck {
    pub forbidden_term: String,
    pub found: Vec<String>,
    pub pass: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechMentionCheck {
    pub tech: String,
    pub count: usize,
    pub pass: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermCoverage {
    pub total: usize,
    pub found_count: usize,
    pub coverage_pct: f64,
    pub missing: Vec<Term>,
    pub missing_high_importance: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCoverage {
    pub total: usize,
    pub found: usize,
    pub coverage_pct: f64,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCoverage {
    pub total: usize,
    pub found_count: usize,
    pub coverage_pct: f64,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitationReport {
    pub total_stats: usize,
    pub uncited_count: usize,
    pub uncited_examples: Vec<String>,
    pub outdated_count: usize,
    pub outdated_years_found: BTreeSet<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Grade and aggregate report
// ────────────────────────────────────────────────────────────────────────────

/// Letter grade, best first. `Ord` follows the ladder: `APlus < A < ... < D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A check result plus its `pass` flag, serialised as one flat object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checked<T> {
    #[serde(flatten)]
    pub result: T,
    pub pass: bool,
}

impl<T> Deref for Checked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.result
    }
}

impl<T> DerefMut for Checked<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.result
    }
}

/// Raw check outputs, before the grader turns them into issues and warnings.
#[derive(Debug, Clone)]
pub struct CheckOutputs {
    pub word_count: usize,
    pub structure: StructureReport,
    pub h2_headings: Vec<String>,
    pub brand_mentions: usize,
    pub brand_voice_hits: Vec<String>,
    pub tech_mentions: usize,
    pub links: LinkAnalysis,
    pub header_coverage: HeaderCoverage,
    pub term_coverage: TermCoverage,
    pub keyword_coverage: KeywordCoverage,
    pub citations: CitationReport,
}

/// Full validation result. Key names are part of the persisted contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub word_count: CountCheck,
    pub h2_count: HeadingCountCheck,
    pub structure: Checked<StructureReport>,
    pub brand_mentions: CountCheck,
    pub internal_links: LinkCheck,
    pub external_links: LinkCheck,
    pub competitor_links: CompetitorCheck,
    pub brand_voice: BrandVoiceCheck,
    pub tech_mentions: TechMentionCheck,
    pub header_coverage: Checked<HeaderCoverage>,
    pub term_coverage: Checked<TermCoverage>,
    pub keyword_coverage: Checked<KeywordCoverage>,
    pub cited_statistics: Checked<CitationReport>,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub pass: bool,
    pub grade: Grade,
}
