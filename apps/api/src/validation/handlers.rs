//! Axum route handlers for the Validation API.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::run::ValidationRunRow;
use crate::state::AppState;
use crate::validation::models::{Term, ValidateRequest, ValidationReport};
use crate::validation::report::format_report;
use crate::validation::runs::{get_run, insert_run, NewRun};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body for the validate endpoints. Site-level settings fall back to config,
/// and `current_year` falls back to the server clock.
#[derive(Debug, Deserialize)]
pub struct ValidateArticleBody {
    pub article_text: String,
    pub technology_name: String,
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub required_keywords: Vec<String>,
    #[serde(default)]
    pub required_terms: Vec<Term>,
    #[serde(default)]
    pub required_headings: Vec<String>,
    #[serde(default)]
    pub own_site_domain: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub competitor_domains: Option<Vec<String>>,
    #[serde(default)]
    pub current_year: Option<i32>,
}

impl ValidateArticleBody {
    fn into_request(self, config: &Config) -> Result<ValidateRequest, AppError> {
        if self.article_text.trim().is_empty() {
            return Err(AppError::Validation("article_text cannot be empty".to_string()));
        }
        if self.technology_name.trim().is_empty() {
            return Err(AppError::Validation(
                "technology_name cannot be empty".to_string(),
            ));
        }

        Ok(ValidateRequest {
            article_text: self.article_text,
            technology_name: self.technology_name,
            required_keywords: self.required_keywords,
            required_terms: self.required_terms,
            required_headings: self.required_headings,
            own_site_domain: self
                .own_site_domain
                .unwrap_or_else(|| config.own_site_domain.clone()),
            brand_name: Some(
                self.brand_name
                    .unwrap_or_else(|| config.brand_name.clone()),
            ),
            competitor_domains: self
                .competitor_domains
                .unwrap_or_else(|| config.competitor_domains.clone()),
            current_year: self.current_year.unwrap_or_else(|| Utc::now().year()),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ValidateArticleResponse {
    pub run_id: Uuid,
    pub report: ValidationReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/articles/validate
///
/// Validates an article, stores the run, and returns the structured report.
pub async fn handle_validate(
    State(state): State<AppState>,
    Json(body): Json<ValidateArticleBody>,
) -> Result<Json<ValidateArticleResponse>, AppError> {
    let page_url = body.page_url.clone();
    let request = body.into_request(&state.config)?;
    let report = state.validator.validate(&request)?;

    let run_id = insert_run(
        &state.db,
        NewRun {
            technology_name: &request.technology_name,
            page_url: page_url.as_deref(),
            article_text: &request.article_text,
            report: &report,
        },
    )
    .await?;

    Ok(Json(ValidateArticleResponse { run_id, report }))
}

/// POST /api/v1/articles/validate/report
///
/// Same checks, rendered as the plain-text report. Nothing is stored.
pub async fn handle_validate_report(
    State(state): State<AppState>,
    Json(body): Json<ValidateArticleBody>,
) -> Result<impl IntoResponse, AppError> {
    let request = body.into_request(&state.config)?;
    let report = state.validator.validate(&request)?;
    let text = format_report(
        &report,
        request.technology_name.trim(),
        state.validator.policy(),
    );

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}

/// GET /api/v1/articles/runs/:id
pub async fn handle_get_run(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> Result<Json<ValidationRunRow>, AppError> {
    let run = get_run(&state.db, run_id).await?;
    Ok(Json(run))
}
