//! HTTP content source

use super::url::UrlTemplate;
use super::ContentSource;
use crate::error::{FxHistoryError, Result};
use reqwest::blocking::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("rusty-fxhistory/", env!("CARGO_PKG_VERSION"));

/// Fetches yearly tables with a blocking GET per year
pub struct HttpSource {
    client: Client,
    template: UrlTemplate,
}

impl HttpSource {
    /// Source for the CNB yearly files
    pub fn new() -> Result<Self> {
        Self::with_template(UrlTemplate::cnb(), Duration::from_secs(30))
    }

    pub fn with_template(template: UrlTemplate, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FxHistoryError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, template })
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }
}

impl ContentSource for HttpSource {
    fn fetch_year(&self, year: i32) -> Result<String> {
        let url = self.template.build(year);
        log::info!("Fetching rate table for {} from {}", year, url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FxHistoryError::Fetch(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FxHistoryError::Fetch(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .map_err(|e| FxHistoryError::Fetch(format!("Failed to read response: {}", e)))
    }

    fn describe(&self) -> String {
        self.template.as_str().to_string()
    }
}
