use std::time::Duration;

use url::Url;

use crate::config::ArchiverConfig;
use crate::error::ArchiveError;

/// HTTP transport for page and image requests.
///
/// One client with a fixed User-Agent; page requests use the client's
/// default timeout, image requests override it per request. Non-2xx
/// statuses are errors. No retries - a failed request is terminal for
/// its unit of work.
pub struct Fetcher {
    client: reqwest::Client,
    image_timeout: Duration,
}

impl Fetcher {
    pub fn new(config: &ArchiverConfig) -> Result<Self, ArchiveError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            image_timeout: Duration::from_secs(config.image_timeout_secs),
        })
    }

    /// Fetch a page body as text
    pub async fn fetch_page(&self, url: &Url) -> Result<String, ArchiveError> {
        ::log::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Fetch raw bytes for an embedded asset, with the image timeout
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, ArchiveError> {
        ::log::debug!("GET {} (asset)", url);
        let response = self
            .client
            .get(url.clone())
            .timeout(self.image_timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
