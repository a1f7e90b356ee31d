use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Free-text filter over title, publication, summary and full text.
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    pub publication_name: Option<String>,
    pub source_url: String,
    pub full_text: String,
    pub summary: String,
    /// Store even if the owner already has an article with this URL.
    #[serde(default)]
    pub force: bool,
}

impl CreateArticleRequest {
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("title", &self.title),
            ("source_url", &self.source_url),
            ("full_text", &self.full_text),
            ("summary", &self.summary),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{field} is required"));
            }
        }
        Ok(())
    }
}

/// Partial update. An absent field leaves the column untouched; an explicit
/// `"publication_name": null` clears it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub publication_name: Option<Option<String>>,
    pub summary: Option<String>,
}

impl UpdateArticleRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_none() && self.publication_name.is_none() && self.summary.is_none() {
            return Err("No fields to update".to_string());
        }
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty".to_string());
        }
        Ok(())
    }
}

fn double_option<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Some)
}
