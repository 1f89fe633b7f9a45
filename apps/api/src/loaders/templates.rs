//! Keyword and heading templates, plus hire-page URL helpers.
//!
//! Templates are CSV files whose first column holds a phrase with an optional
//! `{TECH}` placeholder. Only the first column is read.

use std::io::ErrorKind;
use std::path::Path;

use tracing::warn;

use crate::loaders::LoaderError;

const TECH_PLACEHOLDER: &str = "{TECH}";

const ROLE_SUFFIXES: &[&str] = &[
    "-developers",
    "-developer",
    "-engineers",
    "-engineer",
    "-analysts",
    "-analyst",
    "-scientists",
    "-scientist",
];

const KNOWN_CASING: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("php", "PHP"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("ios", "iOS"),
    ("asp-net", "ASP.NET"),
    ("net", ".NET"),
    ("node-js", "Node.js"),
    ("react-native", "React Native"),
    ("vue-js", "Vue.js"),
    ("next-js", "Next.js"),
    ("three-js", "Three.js"),
    ("ruby-on-rails", "Ruby on Rails"),
];

pub async fn load_keywords(data_dir: &Path, tech: &str) -> Result<Vec<String>, LoaderError> {
    load_template(&data_dir.join("templates").join("keywords.csv"), tech).await
}

pub async fn load_headings(data_dir: &Path, tech: &str) -> Result<Vec<String>, LoaderError> {
    load_template(&data_dir.join("templates").join("headers.csv"), tech).await
}

async fn load_template(path: &Path, tech: &str) -> Result<Vec<String>, LoaderError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Template file missing: {}", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(LoaderError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let phrases = first_column(&raw).map_err(|source| LoaderError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(phrases
        .into_iter()
        .map(|phrase| phrase.replace(TECH_PLACEHOLDER, tech))
        .collect())
}

/// First field of every record after the header row, trimmed, blanks dropped.
/// Rows may have any number of columns.
fn first_column(raw: &str) -> Result<Vec<String>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut phrases = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(field) = record.get(0).map(str::trim).filter(|f| !f.is_empty()) {
            phrases.push(field.to_string());
        }
    }
    Ok(phrases)
}

/// Last path segment of a hire-page URL, e.g. `python-developers`.
pub fn slug_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Display name of the technology a hire page is about.
///
/// `https://lemon.io/hire/ruby-on-rails-developers/` gives `Ruby on Rails`.
pub fn tech_from_url(url: &str) -> String {
    let slug = slug_from_url(url).to_lowercase();
    let base = ROLE_SUFFIXES
        .iter()
        .find_map(|suffix| slug.strip_suffix(suffix))
        .unwrap_or(slug.as_str());

    if let Some((_, display)) = KNOWN_CASING.iter().find(|(key, _)| *key == base) {
        return display.to_string();
    }

    base.split('-')
        .filter(|w| !w.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
