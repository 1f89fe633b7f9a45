//! Link analysis: internal vs external links, plus competitor denylist hits.

use std::sync::LazyLock;

use regex::Regex;

use crate::validation::models::{Link, LinkAnalysis};

static MARKDOWN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\((https?://[^)]+)\)").expect("markdown link regex")
});

/// Every `[anchor](http(s)://...)` link in document order. No deduplication.
pub fn extract_links(text: &str) -> Vec<Link> {
    MARKDOWN_LINK_RE
        .captures_iter(text)
        .map(|caps| Link {
            anchor: caps[1].to_string(),
            url: caps[2].to_string(),
        })
        .collect()
}

/// Classifies links by domain substring match.
///
/// Competitor hits are checked independently of the internal/external split.
pub fn analyze_links(
    text: &str,
    own_domain: &str,
    competitor_domains: &[String],
) -> LinkAnalysis {
    let mut analysis = LinkAnalysis::default();

    for link in extract_links(text) {
        if competitor_domains
            .iter()
            .any(|domain| link.url.contains(domain.as_str()))
        {
            analysis.competitor_hits.push(link.clone());
        }
        if link.url.contains(own_domain) {
            analysis.internal.push(link);
        } else {
            analysis.external.push(link);
        }
    }

    analysis
}
