use crate::clients::transport::{HttpTransport, ReqwestTransport, TransportError};
use crate::config::UnsplashConfig;
use crate::constants::unsplash::{PER_PAGE, SEARCH_PATH};
use crate::models::photo::PhotoRecord;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::debug;
use url::Url;

/// Terminal failure of a single photo search.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request URL could not be built. Nothing was sent.
    #[error("Malformed request for {base_url}: {reason}")]
    MalformedRequest { base_url: String, reason: String },

    #[error("Transport failure: {0}")]
    TransportFailure(#[source] TransportError),

    /// The body did not match `{ "results": [PhotoRecord...] }`.
    #[error("Decode failure at {location}: {source}")]
    DecodeFailure {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    fn malformed(base_url: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRequest {
            base_url: base_url.to_string(),
            reason: reason.into(),
        }
    }
}

// Records are kept as raw values first so a failure can name its index.
#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    results: Vec<serde_json::Value>,
}

/// Builds `<base>/search/photos?query=..&per_page=..&client_id=..`.
///
/// # Errors
///
/// Returns [`FetchError::MalformedRequest`] when `base_url` is not a usable
/// base for the search path.
pub fn build_search_url(
    base_url: &str,
    query: &str,
    per_page: u32,
    access_key: &str,
) -> Result<Url, FetchError> {
    let mut base =
        Url::parse(base_url).map_err(|e| FetchError::malformed(base_url, e.to_string()))?;

    if base.cannot_be_a_base() {
        return Err(FetchError::malformed(base_url, "URL cannot be a base"));
    }

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let mut url = base
        .join(SEARCH_PATH)
        .map_err(|e| FetchError::malformed(base_url, e.to_string()))?;

    url.query_pairs_mut()
        .append_pair("query", query)
        .append_pair("per_page", &per_page.to_string())
        .append_pair("client_id", access_key);

    Ok(url)
}

/// Decodes a search response body, all or nothing.
///
/// A single record missing a required field fails the whole response.
///
/// # Errors
///
/// Returns [`FetchError::DecodeFailure`] with `location` set to either
/// `"response body"` or `"results[<index>]"`.
pub fn decode_search_response(body: &[u8]) -> Result<Vec<PhotoRecord>, FetchError> {
    let envelope: RawSearchResponse =
        serde_json::from_slice(body).map_err(|source| FetchError::DecodeFailure {
            location: "response body".to_string(),
            source,
        })?;

    envelope
        .results
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<PhotoRecord>(value).map_err(|source| {
                FetchError::DecodeFailure {
                    location: format!("results[{index}]"),
                    source,
                }
            })
        })
        .collect()
}

/// Client for the Unsplash photo search endpoint.
///
/// Each call is independent: overlapping searches are neither deduplicated
/// nor cancelled, and may complete in any order.
#[derive(Clone)]
pub struct SearchClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    access_key: String,
}

impl SearchClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            access_key: access_key.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &UnsplashConfig) -> Self {
        Self::new(
            Arc::new(ReqwestTransport::from_config(config)),
            config.base_url.clone(),
            config.access_key.clone(),
        )
    }

    /// Searches for photos matching `query`.
    ///
    /// An empty query is sent as-is. Zero results is a success.
    ///
    /// # Errors
    ///
    /// - [`FetchError::MalformedRequest`] if the URL cannot be built
    /// - [`FetchError::TransportFailure`] if the request itself fails
    /// - [`FetchError::DecodeFailure`] if the body does not decode
    pub async fn search_photos(&self, query: &str) -> Result<Vec<PhotoRecord>, FetchError> {
        let url = build_search_url(&self.base_url, query, PER_PAGE, &self.access_key)?;

        debug!(query, base_url = %self.base_url, "Searching photos");

        let body = self
            .transport
            .get(url)
            .await
            .map_err(FetchError::TransportFailure)?;

        let photos = decode_search_response(&body)?;

        debug!(query, count = photos.len(), "Decoded search results");

        Ok(photos)
    }

    /// Runs a search on its own task. Dropping or aborting the handle is the
    /// only form of cancellation.
    pub fn spawn_search(
        &self,
        query: impl Into<String>,
    ) -> JoinHandle<Result<Vec<PhotoRecord>, FetchError>> {
        let client = self.clone();
        let query = query.into();
        tokio::spawn(async move { client.search_photos(&query).await })
    }
}
