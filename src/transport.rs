// src/transport.rs
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use url::Url;

use crate::config::TransportConfig;

/// Retrieval seam between the fetch pipeline and the outside world. The
/// pipeline never cares whether a location is fetched directly or through a
/// relay; test doubles implement this trait.
#[async_trait]
pub trait PayloadTransport: Send + Sync {
    /// One GET against the (possibly rewrapped) location. A non-success
    /// status is an error carrying the status line.
    async fn fetch_text(&self, location: &str) -> Result<String>;
}

/// reqwest-backed transport with optional CORS-relay wrapping and header
/// injection, both driven by `TransportConfig`.
pub struct HttpTransport {
    client: reqwest::Client,
    relay_url: Option<Url>,
    headers: Vec<(String, String)>,
}

impl HttpTransport {
    pub fn from_config(cfg: &TransportConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .context("building http client")?;
        let relay_url = match cfg.relay_url.as_deref() {
            Some(raw) => Some(Url::parse(raw).context("parsing relay url")?),
            None => None,
        };
        Ok(Self {
            client,
            relay_url,
            headers: cfg
                .request_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }

    /// Wrap a feed location in the configured relay, e.g.
    /// `https://relay.example/raw?url=<encoded feed url>`.
    fn resolve(&self, location: &str) -> String {
        match &self.relay_url {
            Some(base) => {
                let mut wrapped = base.clone();
                wrapped.query_pairs_mut().append_pair("url", location);
                wrapped.to_string()
            }
            None => location.to_string(),
        }
    }
}

#[async_trait]
impl PayloadTransport for HttpTransport {
    async fn fetch_text(&self, location: &str) -> Result<String> {
        let target = self.resolve(location);
        let mut request = self.client.get(&target);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("GET {target}"))?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("upstream answered {status}"));
        }
        response.text().await.context("reading response body")
    }
}
