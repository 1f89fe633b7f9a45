//! Persistence of validation runs.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::run::ValidationRunRow;
use crate::validation::models::ValidationReport;

/// What gets stored for one run. The report is kept whole as JSONB.
pub struct NewRun<'a> {
    pub technology_name: &'a str,
    pub page_url: Option<&'a str>,
    pub article_text: &'a str,
    pub report: &'a ValidationReport,
}

pub async fn insert_run(pool: &PgPool, run: NewRun<'_>) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    let report_value = serde_json::to_value(run.report)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize report: {e}")))?;

    sqlx::query(
        r#"
        INSERT INTO validation_runs
            (id, technology_name, page_url, grade, issue_count, warning_count, report, article_text)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(run.technology_name)
    .bind(run.page_url)
    .bind(run.report.grade.as_str())
    .bind(run.report.issues.len() as i32)
    .bind(run.report.warnings.len() as i32)
    .bind(&report_value)
    .bind(run.article_text)
    .execute(pool)
    .await?;

    info!(
        "Stored validation run {id} for {} (grade {})",
        run.technology_name, run.report.grade
    );
    Ok(id)
}

pub async fn get_run(pool: &PgPool, id: Uuid) -> Result<ValidationRunRow, AppError> {
    sqlx::query_as::<_, ValidationRunRow>("SELECT * FROM validation_runs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Validation run {id} not found")))
}
