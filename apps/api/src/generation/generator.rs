//! Article Generation: prompt assembly, one LLM call, then validation.
//!
//! Flow: requirements → build prompt → TextGenerator → strip fence →
//!       ArticleValidator → return article + report.
//!
//! The generator and validator arrive as trait objects so the flow is testable
//! without network access.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{
    ARTICLE_PROMPT_TEMPLATE, ARTICLE_SYSTEM, INTERNAL_LINK_POOL, OFFICIAL_LINKS, STRUCTURE_RULES,
};
use crate::llm_client::prompts::{CITATION_INSTRUCTION, MARKDOWN_ONLY_SYSTEM};
use crate::llm_client::{strip_code_fence, TextGenerator};
use crate::loaders::Requirements;
use crate::validation::models::{ImportanceBucket, ValidateRequest, ValidationReport};
use crate::validation::ArticleValidator;

/// H2 sections the article is asked for.
pub const H2_SECTION_COUNT: usize = 8;

const COST_WORDS: &[&str] = &["cost", "price", "pricing", "rate", "salary", "budget"];

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Everything needed to write and grade one article.
#[derive(Debug, Clone)]
pub struct ArticleInputs {
    pub tech: String,
    pub page_url: String,
    pub brand: String,
    pub own_site_domain: String,
    pub competitor_domains: Vec<String>,
    pub current_year: i32,
    pub requirements: Requirements,
}

impl ArticleInputs {
    fn validate_request(&self, article_text: String) -> ValidateRequest {
        ValidateRequest {
            article_text,
            technology_name: self.tech.clone(),
            required_keywords: self.requirements.keywords.clone(),
            required_terms: self.requirements.terms.clone(),
            required_headings: self.requirements.headings.clone(),
            own_site_domain: self.own_site_domain.clone(),
            brand_name: Some(self.brand.clone()),
            competitor_domains: self.competitor_domains.clone(),
            current_year: self.current_year,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedArticle {
    pub article: String,
    pub report: ValidationReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Writes one article and grades it.
///
/// A poor grade is still a successful generation: the caller decides what to
/// do with the report.
pub async fn generate_article(
    generator: &dyn TextGenerator,
    validator: &dyn ArticleValidator,
    inputs: &ArticleInputs,
) -> Result<GeneratedArticle, AppError> {
    let system = format!(
        "{} {}",
        ARTICLE_SYSTEM.replace("{brand}", &inputs.brand),
        MARKDOWN_ONLY_SYSTEM
    );
    let prompt = build_article_prompt(inputs);

    info!("Generating {} article for {}", inputs.tech, inputs.page_url);
    let raw = generator
        .generate(&system, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Article generation failed: {e}")))?;

    let article = strip_code_fence(&raw).to_string();
    if article.is_empty() {
        return Err(AppError::Llm("Article generation returned no text".to_string()));
    }

    let report = validator.validate(&inputs.validate_request(article.clone()))?;
    info!(
        "Generated {} article: {} words, grade {}",
        inputs.tech, report.word_count.count, report.grade
    );

    Ok(GeneratedArticle { article, report })
}

/// Fills the article template with requirement lists and link candidates.
pub fn build_article_prompt(inputs: &ArticleInputs) -> String {
    let req = &inputs.requirements;

    let terms_in = |bucket: ImportanceBucket| {
        bullet_list(
            req.terms
                .iter()
                .filter(|t| t.bucket() == bucket)
                .map(|t| t.primary.clone()),
        )
    };

    let internal_links = bullet_list(
        INTERNAL_LINK_POOL
            .iter()
            .filter(|(_, url)| url.trim_end_matches('/') != inputs.page_url.trim_end_matches('/'))
            .map(|(anchor, url)| format!("[{anchor}]({url})")),
    );

    let outline = select_headings(&req.headings, &inputs.brand, H2_SECTION_COUNT);

    let tech_key = inputs.tech.to_lowercase();
    let external_links = OFFICIAL_LINKS
        .iter()
        .find(|(tech, _)| *tech == tech_key)
        .map(|(_, links)| {
            bullet_list(links.iter().map(|(anchor, url)| format!("[{anchor}]({url})")))
        })
        .unwrap_or_else(|| {
            format!("- Official {} documentation and recognised industry surveys", inputs.tech)
        });

    ARTICLE_PROMPT_TEMPLATE
        .replace("{structure_rules}", STRUCTURE_RULES)
        .replace("{citation_instruction}", CITATION_INSTRUCTION)
        .replace("{headings}", &bullet_list(outline.into_iter()))
        .replace("{keywords}", &bullet_list(req.keywords.iter().cloned()))
        .replace("{high_terms}", &terms_in(ImportanceBucket::High))
        .replace("{medium_terms}", &terms_in(ImportanceBucket::Medium))
        .replace("{internal_links}", &internal_links)
        .replace("{external_links}", &external_links)
        .replace("{page_url}", &inputs.page_url)
        .replace("{brand}", &inputs.brand)
        .replace("{year}", &inputs.current_year.to_string())
        .replace("{tech}", &inputs.tech)
}

/// Picks the H2 outline from the heading templates.
///
/// The first template naming the brand and the first about cost are always
/// kept; the rest fill up in file order. The outline keeps file order.
pub fn select_headings(templates: &[String], brand: &str, count: usize) -> Vec<String> {
    let brand = brand.to_lowercase();
    let brand_stem = brand.split('.').next().unwrap_or(brand.as_str()).to_string();
    let lowered: Vec<String> = templates.iter().map(|t| t.to_lowercase()).collect();

    let mut picked = BTreeSet::new();
    let names_brand = lowered
        .iter()
        .position(|t| !brand_stem.is_empty() && t.contains(&brand_stem));
    let about_cost = lowered
        .iter()
        .position(|t| COST_WORDS.iter().any(|w| t.contains(w)));
    picked.extend(names_brand.into_iter().chain(about_cost).take(count));

    for i in 0..templates.len() {
        if picked.len() >= count {
            break;
        }
        picked.insert(i);
    }

    picked.into_iter().map(|i| templates[i].clone()).collect()
}

/// `- item` lines, or `- (none)` for an empty list.
fn bullet_list(items: impl Iterator<Item = String>) -> String {
    let lines: Vec<String> = items.map(|item| format!("- {item}")).collect();
    if lines.is_empty() {
        "- (none)".to_string()
    } else {
        lines.join("\n")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
