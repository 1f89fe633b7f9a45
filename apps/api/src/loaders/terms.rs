//! SEO term files under `<data_dir>/terms/`.
//!
//! `<slug>.json` holds an array of term records. When it is absent the SEO
//! tool's CSV export, `<slug>.csv`, is read instead.

use std::io::ErrorKind;
use std::path::Path;

use csv::StringRecord;
use tracing::{info, warn};

use crate::loaders::LoaderError;
use crate::validation::models::Term;

const PRIMARY_COLUMNS: &[&str] = &["Primary Variant", "term", "Term"];
const VARIANT_COLUMNS: &[&str] = &["Secondary Variants", "variants"];
const IMPORTANCE_COLUMNS: &[&str] = &["Importance", "importance"];
const USES_MIN_COLUMNS: &[&str] = &["Typical Uses Min"];
const USES_MAX_COLUMNS: &[&str] = &["Typical Uses Max"];
const VARIANT_SEPARATOR: char = ';';

/// Loads the terms for `slug`, highest importance first.
///
/// A missing file is not an error: the article is then graded without term
/// requirements. A malformed record fails the whole file.
pub async fn load_terms(data_dir: &Path, slug: &str) -> Result<Vec<Term>, LoaderError> {
    let dir = data_dir.join("terms");
    let json_path = dir.join(format!("{slug}.json"));
    let csv_path = dir.join(format!("{slug}.csv"));

    let mut terms = if let Some(raw) = read_optional(&json_path).await? {
        serde_json::from_str::<Vec<Term>>(&raw).map_err(|source| LoaderError::Json {
            path: json_path.clone(),
            source,
        })?
    } else if let Some(raw) = read_optional(&csv_path).await? {
        terms_from_csv(&raw, &csv_path)?
    } else {
        warn!("No term file for '{slug}' under {}", dir.display());
        return Ok(Vec::new());
    };

    // Stable: equal importance keeps file order.
    terms.sort_by(|a, b| b.importance.cmp(&a.importance));

    info!("Loaded {} terms for '{slug}'", terms.len());
    Ok(terms)
}

async fn read_optional(path: &Path) -> Result<Option<String>, LoaderError> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(LoaderError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Column positions of one CSV export, resolved once from its header row.
struct ExportColumns {
    primary: Vec<usize>,
    variants: Vec<usize>,
    importance: Vec<usize>,
    uses_min: Vec<usize>,
    uses_max: Vec<usize>,
}

impl ExportColumns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |names: &[&str]| -> Vec<usize> {
            names
                .iter()
                .filter_map(|name| {
                    headers
                        .iter()
                        .position(|h| h.trim_start_matches('\u{feff}').trim() == *name)
                })
                .collect()
        };
        Self {
            primary: find(PRIMARY_COLUMNS),
            variants: find(VARIANT_COLUMNS),
            importance: find(IMPORTANCE_COLUMNS),
            uses_min: find(USES_MIN_COLUMNS),
            uses_max: find(USES_MAX_COLUMNS),
        }
    }
}

/// First non-blank value among `columns`, or `""`.
fn first_value<'r>(record: &'r StringRecord, columns: &[usize]) -> &'r str {
    columns
        .iter()
        .filter_map(|&i| record.get(i))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or("")
}

fn terms_from_csv(raw: &str, path: &Path) -> Result<Vec<Term>, LoaderError> {
    let csv_err = |source: csv::Error| LoaderError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(raw.as_bytes());
    let columns = ExportColumns::from_headers(reader.headers().map_err(csv_err)?);

    let mut terms = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let primary = first_value(&record, &columns.primary);
        if primary.is_empty() {
            continue;
        }
        let variants = first_value(&record, &columns.variants)
            .split(VARIANT_SEPARATOR)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();

        let term = Term::from_text_fields(
            primary,
            variants,
            first_value(&record, &columns.importance),
            first_value(&record, &columns.uses_min),
            first_value(&record, &columns.uses_max),
        )
        .map_err(|source| LoaderError::Term {
            path: path.to_path_buf(),
            source,
        })?;
        terms.push(term);
    }
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write_file(dir: &Path, name: &str, body: &str) {
        let terms_dir = dir.join("terms");
        tokio::fs::create_dir_all(&terms_dir).await.unwrap();
        tokio::fs::write(terms_dir.join(name), body).await.unwrap();
    }

    async fn write_terms(dir: &Path, slug: &str, body: &str) {
        write_file(dir, &format!("{slug}.json"), body).await;
    }

    const EXPORT: &str = "\u{feff}Primary Variant,Secondary Variants,Importance,Typical Uses Min,Typical Uses Max,Uses\n\
        flask,Flask framework; flask app ;,5/10,1,3,0\n\
        django,\"Django ORM;django rest framework\",9/10,2,4,1\n\
        ,orphan variant,7/10,1,2,0\n\
        pip,,,,,\n";

    #[tokio::test]
    async fn test_missing_file_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let terms = load_terms(dir.path(), "python-developers").await.unwrap();
        assert!(terms.is_empty());
    }

    #[tokio::test]
    async fn test_terms_sorted_by_importance_stably() {
        let dir = tempfile::tempdir().unwrap();
        write_terms(
            dir.path(),
            "python-developers",
            r#"[
                {"term": "flask", "importance": "5/10"},
                {"term": "django", "importance": 9},
                {"primary": "pandas", "importance": "5"},
                {"primary": "pip"}
            ]"#,
        )
        .await;

        let terms = load_terms(dir.path(), "python-developers").await.unwrap();
        let order: Vec<&str> = terms.iter().map(|t| t.primary.as_str()).collect();
        assert_eq!(order, vec!["django", "flask", "pandas", "pip"]);
    }

    #[tokio::test]
    async fn test_malformed_term_fails_the_file() {
        let dir = tempfile::tempdir().unwrap();
        write_terms(
            dir.path(),
            "go-developers",
            r#"[{"term": "goroutines", "importance": -3}]"#,
        )
        .await;

        let err = load_terms(dir.path(), "go-developers").await.unwrap_err();
        assert!(matches!(err, LoaderError::Json { .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_terms(dir.path(), "rust-developers", "not json").await;
        assert!(load_terms(dir.path(), "rust-developers").await.is_err());
    }

    #[tokio::test]
    async fn test_csv_export_is_read_when_json_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "python-developers.csv", EXPORT).await;

        let terms = load_terms(dir.path(), "python-developers").await.unwrap();
        let order: Vec<&str> = terms.iter().map(|t| t.primary.as_str()).collect();
        assert_eq!(order, vec!["django", "flask", "pip"]);

        assert_eq!(terms[0].importance, 9);
        assert_eq!(terms[0].typical_use_min, 2);
        assert_eq!(terms[0].typical_use_max, 4);
        assert_eq!(terms[2].importance, 5);
        assert_eq!(terms[2].typical_use_max, 2);
    }

    #[tokio::test]
    async fn test_csv_variants_split_on_semicolons() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "python-developers.csv", EXPORT).await;

        let terms = load_terms(dir.path(), "python-developers").await.unwrap();
        let flask = terms.iter().find(|t| t.primary == "flask").unwrap();
        assert_eq!(flask.variants, vec!["Flask framework", "flask app"]);
        let django = terms.iter().find(|t| t.primary == "django").unwrap();
        assert_eq!(django.variants, vec!["Django ORM", "django rest framework"]);
    }

    #[tokio::test]
    async fn test_json_takes_priority_over_csv() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "python-developers.csv", EXPORT).await;
        write_terms(
            dir.path(),
            "python-developers",
            r#"[{"term": "asyncio", "importance": 8}]"#,
        )
        .await;

        let terms = load_terms(dir.path(), "python-developers").await.unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].primary, "asyncio");
    }

    #[tokio::test]
    async fn test_csv_with_bad_importance_fails_the_file() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "go-developers.csv",
            "Term,Importance\ngoroutines,very\n",
        )
        .await;

        let err = load_terms(dir.path(), "go-developers").await.unwrap_err();
        assert!(matches!(err, LoaderError::Term { .. }));
    }
}
