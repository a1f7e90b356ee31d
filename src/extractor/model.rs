use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Readable content recovered from a fetched page.
///
/// `source_url` is the URL as submitted by the caller, not the post-redirect
/// address, so that what gets stored matches what the owner pasted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractedArticle {
    pub title: String,
    pub publication_name: Option<String>,
    pub source_url: String,
    pub full_text: String,
}

static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_LINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Collapse runs of spaces and blank lines while keeping paragraph breaks.
pub fn normalize_whitespace(text: &str) -> String {
    let collapsed = SPACE_RUNS.replace_all(text.trim(), " ");
    BLANK_LINE_RUNS.replace_all(&collapsed, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_collapses_spaces() {
        assert_eq!(normalize_whitespace("  a   b\tc  "), "a b c");
    }

    #[test]
    fn collapses_blank_line_runs_to_paragraph_breaks() {
        assert_eq!(
            normalize_whitespace("para one\n\n\n  \npara two"),
            "para one\n\npara two"
        );
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_whitespace("   \n\t  "), "");
    }
}
