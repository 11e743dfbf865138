//! HTTP access to the stats website.

use std::thread;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::error::AppError;

pub const BASE_URL: &str = "https://www.eliteprospects.com";

const USER_AGENT: &str = concat!("ep-data-loader/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Returns the HTML body behind a URL.
///
/// `EpClient` is the real implementation; tests serve fixtures instead.
pub trait PageSource: Sync {
    fn fetch(&self, url: &str) -> Result<String, AppError>;
}

/// Blocking client that waits a fixed delay before every request.
pub struct EpClient {
    client: Client,
    delay: Duration,
}

impl EpClient {
    pub fn new(delay_ms: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            delay: Duration::from_millis(delay_ms),
        })
    }
}

impl PageSource for EpClient {
    fn fetch(&self, url: &str) -> Result<String, AppError> {
        thread::sleep(self.delay);
        debug!("GET {url}");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::network(format!("Request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::network(format!(
                "Request to {url} failed with status {}.",
                resp.status()
            )));
        }

        resp.text()
            .map_err(|e| AppError::network(format!("Failed to read body of {url}: {e}")))
    }
}
