// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "TRANSPORT_CONFIG_PATH";
const ENV_RELAY_URL: &str = "RELAY_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Outbound-transport settings: optional CORS relay, extra request headers,
/// and the per-source timeout that turns a stalled feed into a soft failure.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransportConfig {
    /// Relay base URL; the feed location is appended as a `url` query
    /// parameter. Absent means direct retrieval.
    pub relay_url: Option<String>,
    pub request_headers: BTreeMap<String, String>,
    pub request_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            relay_url: None,
            request_headers: BTreeMap::new(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Load transport config from an explicit path. Supports TOML or JSON.
pub fn load_from(path: &Path) -> Result<TransportConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading transport config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse(&content, ext.as_str())
}

/// Load transport config using env var + fallbacks:
/// 1) $TRANSPORT_CONFIG_PATH
/// 2) config/transport.toml
/// 3) config/transport.json
/// Nothing found → defaults (direct retrieval, no extra headers).
/// A non-empty $RELAY_URL always overrides the file value.
pub fn load_default() -> Result<TransportConfig> {
    let mut cfg = if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if !pb.exists() {
            return Err(anyhow!("TRANSPORT_CONFIG_PATH points to non-existent path"));
        }
        load_from(&pb)?
    } else {
        let toml_p = PathBuf::from("config/transport.toml");
        let json_p = PathBuf::from("config/transport.json");
        if toml_p.exists() {
            load_from(&toml_p)?
        } else if json_p.exists() {
            load_from(&json_p)?
        } else {
            TransportConfig::default()
        }
    };

    if let Ok(relay) = std::env::var(ENV_RELAY_URL) {
        if !relay.trim().is_empty() {
            cfg.relay_url = Some(relay);
        }
    }

    Ok(cfg)
}

fn parse(s: &str, hint_ext: &str) -> Result<TransportConfig> {
    if hint_ext == "json" {
        return serde_json::from_str(s).context("parsing transport config json");
    }
    if let Ok(cfg) = toml::from_str(s) {
        return Ok(cfg);
    }
    serde_json::from_str(s).context("unsupported transport config format")
}
