//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{generate_article, ArticleInputs};
use crate::loaders::load_requirements;
use crate::loaders::templates::{slug_from_url, tech_from_url};
use crate::state::AppState;
use crate::validation::models::ValidationReport;
use crate::validation::runs::{insert_run, NewRun};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateArticleRequest {
    pub page_url: String,
    #[serde(default)]
    pub current_year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct GenerateArticleResponse {
    pub run_id: Uuid,
    pub technology_name: String,
    pub article: String,
    pub report: ValidationReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/articles/generate
///
/// Loads requirements for the hire page, writes the article, grades it, and
/// stores the run. A low grade is returned, not rejected.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateArticleRequest>,
) -> Result<Json<GenerateArticleResponse>, AppError> {
    let page_url = request.page_url.trim();
    if page_url.is_empty() {
        return Err(AppError::Validation("page_url cannot be empty".to_string()));
    }

    let tech = tech_from_url(page_url);
    let slug = slug_from_url(page_url);
    if tech.is_empty() || slug.is_empty() {
        return Err(AppError::Validation(format!(
            "Cannot derive a technology from {page_url}"
        )));
    }

    let requirements = load_requirements(&state.config.data_dir, &tech, &slug).await?;

    let inputs = ArticleInputs {
        tech,
        page_url: page_url.to_string(),
        brand: state.config.brand_name.clone(),
        own_site_domain: state.config.own_site_domain.clone(),
        competitor_domains: state.config.competitor_domains.clone(),
        current_year: request.current_year.unwrap_or_else(|| Utc::now().year()),
        requirements,
    };

    let generated =
        generate_article(state.llm.as_ref(), state.validator.as_ref(), &inputs).await?;

    let run_id = insert_run(
        &state.db,
        NewRun {
            technology_name: &inputs.tech,
            page_url: Some(&inputs.page_url),
            article_text: &generated.article,
            report: &generated.report,
        },
    )
    .await?;

    Ok(Json(GenerateArticleResponse {
        run_id,
        technology_name: inputs.tech,
        article: generated.article,
        report: generated.report,
    }))
}
