use serde::{Deserialize, Serialize};

/// One photo returned by the search endpoint.
///
/// `description` is the only optional field; every other field must be
/// present or the whole response fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: String,
    pub description: Option<String>,
    pub urls: PhotoUrls,
    pub user: PhotoAuthor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrls {
    /// Display resolution, used for grid thumbnails.
    pub regular: String,
    pub full: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoAuthor {
    pub name: String,
}

impl PhotoRecord {
    #[must_use]
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn author_line(&self) -> String {
        format!("Author: {}", self.user.name)
    }
}

/// Envelope of a search response. Server order is kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<PhotoRecord>,
}
