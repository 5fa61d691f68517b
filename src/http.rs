//! Configured transport handle for the register backend.
//!
//! The core never scrapes pages itself; concrete [`RawDataSource`]
//! implementations are built on top of this client. It owns the base URL
//! (scheme from the ssl flag, host, symbol), the timeout and the JSON
//! helpers the mobile endpoint needs.
//!
//! [`RawDataSource`]: crate::source::RawDataSource

use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::Config;
use crate::error::SourceError;

const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 8.1.0) Dalvik/2.1.0";

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub host: String,
    pub symbol: String,
    pub ssl: bool,
    pub timeout: Duration,
    pub log_requests: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            host: "fakelog.cf".to_string(),
            symbol: "Default".to_string(),
            ssl: true,
            timeout: Duration::from_secs(30),
            log_requests: true,
        }
    }
}

pub struct HttpClient {
    client: Client,
    base_url: String,
    log_requests: bool,
}

impl HttpClient {
    pub fn new(host: &str, symbol: &str) -> Result<Self, reqwest::Error> {
        Self::with_config(HttpClientConfig {
            host: host.to_string(),
            symbol: symbol.to_string(),
            ..Default::default()
        })
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .gzip(true)
            .build()?;
        let scheme = if config.ssl { "https" } else { "http" };
        Ok(Self {
            client,
            base_url: format!("{}://{}/{}", scheme, config.host, config.symbol),
            log_requests: config.log_requests,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::with_config(HttpClientConfig {
            host: config.host.clone(),
            symbol: config.symbol.clone(),
            ssl: config.ssl,
            timeout: config.timeout(),
            log_requests: config.log_requests,
        })
    }

    /// Base URL every page and endpoint path hangs off, without a trailing
    /// slash: `{scheme}://{host}/{symbol}`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a mobile-endpoint path and deserialize the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if self.log_requests {
            log::debug!("GET {url}");
        }
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    /// POST a JSON body to a mobile-endpoint path and deserialize the reply.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, SourceError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if self.log_requests {
            log::debug!("POST {url}");
        }
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    /// Underlying reqwest client, for page-scraping sources that need raw
    /// responses.
    pub fn client(&self) -> &Client {
        &self.client
    }
}
