// File-backed requirement loaders: SEO terms per technology and the shared
// keyword/heading templates. Everything is read under `Config::data_dir`.

pub mod templates;
pub mod terms;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::validation::models::{Term, TermError};

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("bad term in {}: {source}", path.display())]
    Term {
        path: PathBuf,
        #[source]
        source: TermError,
    },
}

/// Requirement lists for one technology, ready to hand to the validator.
#[derive(Debug, Clone, Default)]
pub struct Requirements {
    pub terms: Vec<Term>,
    pub keywords: Vec<String>,
    pub headings: Vec<String>,
}

/// Loads terms, keywords and headings for `tech` (display name) and `slug`
/// (term file stem).
pub async fn load_requirements(
    data_dir: &Path,
    tech: &str,
    slug: &str,
) -> Result<Requirements, LoaderError> {
    Ok(Requirements {
        terms: terms::load_terms(data_dir, slug).await?,
        keywords: templates::load_keywords(data_dir, tech).await?,
        headings: templates::load_headings(data_dir, tech).await?,
    })
}
