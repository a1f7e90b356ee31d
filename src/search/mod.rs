//! Free-text filtering over an owner's article list.

use crate::entities::Article;

/// Keep the articles whose title, publication name, summary or body contain
/// `query` as a case-insensitive literal substring. A blank query returns the
/// list unchanged, in the same order. Special characters carry no pattern
/// meaning.
pub fn filter_articles(articles: &[Article], query: &str) -> Vec<Article> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return articles.to_vec();
    }

    let needle = trimmed.to_lowercase();
    articles
        .iter()
        .filter(|article| matches_query(article, &needle))
        .cloned()
        .collect()
}

fn matches_query(article: &Article, needle: &str) -> bool {
    article.title.to_lowercase().contains(needle)
        || article
            .publication_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(needle))
        || article.summary.to_lowercase().contains(needle)
        || article.full_text.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn article(title: &str, publication: Option<&str>, summary: &str, body: &str) -> Article {
        let now = Utc::now();
        Article {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            publication_name: publication.map(str::to_string),
            source_url: "https://example.com/a".to_string(),
            full_text: body.to_string(),
            summary: summary.to_string(),
            date_added: now,
            created_at: now,
            updated_at: now,
        }
    }

    fn fixture() -> Vec<Article> {
        vec![
            article(
                "Understanding JavaScript Closures",
                Some("JS Weekly"),
                "Scopes and captured variables",
                "A closure is a function bundled with its lexical environment.",
            ),
            article(
                "TypeScript Best Practices",
                None,
                "Strictness pays off",
                "Enable strict mode and lean on the compiler.",
            ),
            article(
                "React Hooks Guide",
                Some("Frontend Digest"),
                "useState and friends",
                "Hooks let function components hold state.",
            ),
        ]
    }

    #[test]
    fn blank_query_returns_input_unchanged() {
        let articles = fixture();
        let result = filter_articles(&articles, "");
        assert_eq!(result.len(), articles.len());
        for (kept, original) in result.iter().zip(&articles) {
            assert_eq!(kept.id, original.id);
        }

        let result = filter_articles(&articles, "   ");
        assert_eq!(result.len(), articles.len());
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        let articles = fixture();
        let padded = filter_articles(&articles, "  TypeScript  ");
        let plain = filter_articles(&articles, "TypeScript");
        assert_eq!(
            padded.iter().map(|a| a.id).collect::<Vec<_>>(),
            plain.iter().map(|a| a.id).collect::<Vec<_>>()
        );
        assert_eq!(plain.len(), 1);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let articles = fixture();
        let upper = filter_articles(&articles, "TYPESCRIPT");
        let lower = filter_articles(&articles, "typescript");
        assert_eq!(
            upper.iter().map(|a| a.id).collect::<Vec<_>>(),
            lower.iter().map(|a| a.id).collect::<Vec<_>>()
        );
        assert_eq!(upper.len(), 1);
    }

    #[test]
    fn substring_matches_inside_words_and_preserves_order() {
        let articles = fixture();
        let result = filter_articles(&articles, "Script");
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "Understanding JavaScript Closures");
        assert_eq!(result[1].title, "TypeScript Best Practices");
    }

    #[test]
    fn searches_publication_summary_and_body() {
        let articles = fixture();
        assert_eq!(filter_articles(&articles, "frontend digest").len(), 1);
        assert_eq!(filter_articles(&articles, "strictness").len(), 1);
        assert_eq!(filter_articles(&articles, "lexical environment").len(), 1);
    }

    #[test]
    fn missing_publication_name_is_skipped_not_an_error() {
        let articles = fixture();
        // Would only match a publication name; the None article must not panic.
        let result = filter_articles(&articles, "weekly");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Understanding JavaScript Closures");
    }

    #[test]
    fn special_characters_are_literal() {
        let articles = vec![article(
            "C++ (and why .* is not a regex here)",
            None,
            "s",
            "b",
        )];
        assert_eq!(filter_articles(&articles, ".*").len(), 1);
        assert_eq!(filter_articles(&articles, "c++").len(), 1);
        assert_eq!(filter_articles(&articles, "[unmatched").len(), 0);
    }
}
