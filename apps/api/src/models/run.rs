use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted validation, as stored in `validation_runs`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ValidationRunRow {
    pub id: Uuid,
    pub technology_name: String,
    pub page_url: Option<String>,
    pub grade: String,
    pub issue_count: i32,
    pub warning_count: i32,
    pub report: Value,
    pub article_text: String,
    pub created_at: DateTime<Utc>,
}
