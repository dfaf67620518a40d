use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/v1/bookmarks`. Both fields are required and must be
/// non-empty; missing fields deserialize to empty strings and are rejected
/// by [`CreateBookmark::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBookmark {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl CreateBookmark {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("title is required".to_string());
        }
        if self.url.is_empty() {
            return Err("url is required".to_string());
        }
        Ok(())
    }
}

/// Body of `PUT /api/v1/bookmarks/:id`. An omitted or empty field is left
/// unchanged; a `null` body changes nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBookmark {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl UpdateBookmark {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }
}
