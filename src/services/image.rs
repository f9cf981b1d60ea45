//! Downloads photo files to disk.

use crate::clients::transport::{HttpTransport, ReqwestTransport};
use crate::config::UnsplashConfig;
use crate::models::photo::PhotoRecord;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::info;
use url::Url;

const DEFAULT_EXTENSION: &str = "jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Display resolution, as shown in the result grid.
    Regular,
    Full,
}

impl ImageSize {
    #[must_use]
    pub fn url_of(self, photo: &PhotoRecord) -> &str {
        match self {
            Self::Regular => &photo.urls.regular,
            Self::Full => &photo.urls.full,
        }
    }
}

/// File extension for an image URL.
///
/// Unsplash serves extensionless paths and names the format in `fm`, so the
/// query wins over the path.
#[must_use]
pub fn image_extension(url: &Url) -> String {
    let is_plain =
        |s: &str| !s.is_empty() && s.len() <= 5 && s.chars().all(|c| c.is_ascii_alphanumeric());

    if let Some((_, fm)) = url
        .query_pairs()
        .find(|(k, v)| k == "fm" && is_plain(v))
    {
        return fm.to_ascii_lowercase();
    }

    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| is_plain(ext))
        .map_or_else(|| DEFAULT_EXTENSION.to_string(), str::to_ascii_lowercase)
}

/// Turns a photo id or URL segment into a safe file stem.
#[must_use]
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();

    if stem.is_empty() { "photo".to_string() } else { stem }
}

pub struct ImageService {
    transport: Arc<dyn HttpTransport>,
}

impl ImageService {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn from_config(config: &UnsplashConfig) -> Self {
        Self::new(Arc::new(ReqwestTransport::from_config(config)))
    }

    /// Downloads `url` into `dir` as `<stem>.<ext>` and returns the path.
    pub async fn save_image(&self, url: &str, dir: &Path, stem: &str) -> Result<PathBuf> {
        let parsed = Url::parse(url).with_context(|| format!("Invalid image URL: {url}"))?;
        let filename = format!("{}.{}", file_stem(stem), image_extension(&parsed));

        if !dir.exists() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let file_path = dir.join(&filename);

        info!(url = %url, path = %file_path.display(), "Downloading image");

        let bytes = self
            .transport
            .get(parsed)
            .await
            .map_err(|e| anyhow::anyhow!(e))
            .with_context(|| format!("Failed to download {url}"))?;

        fs::write(&file_path, bytes)
            .await
            .with_context(|| format!("Failed to write image to {}", file_path.display()))?;

        Ok(file_path)
    }

    /// Saves one search result, named after its id.
    pub async fn save_photo(
        &self,
        photo: &PhotoRecord,
        size: ImageSize,
        dir: &Path,
    ) -> Result<PathBuf> {
        self.save_image(size.url_of(photo), dir, &photo.id).await
    }

    /// Saves an arbitrary image URL, named after its last path segment.
    pub async fn download(&self, url: &str, dir: &Path) -> Result<PathBuf> {
        let stem = Url::parse(url)
            .ok()
            .and_then(|u| {
                u.path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .and_then(|name| Path::new(name).file_stem())
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .unwrap_or_default();

        self.save_image(url, dir, &stem).await
    }
}
