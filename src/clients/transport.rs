//! HTTP transport seam for the search client.
//!
//! The search client only needs "GET this URL and hand me the body". Keeping
//! that behind a trait lets tests swap in canned responses or failures
//! without a network.

use crate::config::UnsplashConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Boxed cause of a transport failure, kept intact for the caller.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issues a GET request and returns the raw response body.
    ///
    /// Response status is not inspected here; whatever body the server sent
    /// is handed back for decoding.
    async fn get(&self, url: Url) -> Result<Vec<u8>, TransportError>;
}

#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(&format!("ImageSearcher/{}", env!("CARGO_PKG_VERSION")), None)
    }
}

impl ReqwestTransport {
    #[must_use]
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }

    /// Transport carrying the configured user agent and timeout.
    #[must_use]
    pub fn from_config(config: &UnsplashConfig) -> Self {
        Self::new(
            &config.user_agent,
            config.request_timeout_seconds.map(Duration::from_secs),
        )
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<Vec<u8>, TransportError> {
        let response = self.client.get(url).send().await?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
