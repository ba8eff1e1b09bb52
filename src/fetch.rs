//! Page fetching.
//!
//! Scrapers never talk to `reqwest` directly; they go through the [`Fetcher`]
//! trait so pagination can be exercised against canned pages in tests.
//! A failed fetch is logged here and surfaces as `None`, which every
//! scraper treats as "no more pages".

use reqwest::Client;
use std::error::Error;
use tracing::{debug, error, instrument};

/// Browser identification sent with every request. Several sources refuse
/// requests without one.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Something that can turn a URL into page markup.
pub trait Fetcher {
    /// Fetch `url` and return its body.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute page URL
    ///
    /// # Returns
    ///
    /// The response body, or `None` on a transport error or a non-success
    /// status. Implementations log the failure themselves.
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// [`Fetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    async fn get_text(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.get_text(url).await {
            Ok(body) => {
                debug!(bytes = body.len(), "Fetched page");
                Some(body)
            }
            Err(e) if e.is_status() => {
                error!(%url, status = ?e.status(), "HTTP error occurred");
                None
            }
            Err(e) => {
                error!(%url, error = %e, "Request failed");
                None
            }
        }
    }
}
