use crate::error::{SendError, SendResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_API_VERSION: &str = "2.11";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub proxy: Option<ProxyConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub graph_url: String,
    pub version: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            graph_url: DEFAULT_GRAPH_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub access_token: Option<String>,
}

/// Proxy descriptor. Both fields are optional on the wire so that a
/// half-filled descriptor can be reported instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub hostname: Option<String>,
    pub port: Option<u16>,
}

impl ProxyConfig {
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: Some(hostname.into()),
            port: Some(port),
        }
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn resolve_config_path() -> PathBuf {
    env::var("MESSENGER_SEND_CONFIG")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(|| expand_tilde("~/.messenger-send/config.json"))
}

pub fn load_config_from(path: &Path) -> SendResult<Config> {
    let raw = fs::read_to_string(path)
        .map_err(|e| SendError::Config(format!("{}: {e}", path.display())))?;
    serde_json::from_str::<Config>(&raw)
        .map_err(|e| SendError::Config(format!("{}: {e}", path.display())))
}

pub fn load_config() -> Config {
    let config_path = resolve_config_path();

    let mut cfg = Config::default();

    if config_path.exists() {
        match load_config_from(&config_path) {
            Ok(file_cfg) => cfg = file_cfg,
            Err(err) => tracing::warn!("ignoring config file: {err}"),
        }
    }

    apply_env_overrides(&mut cfg);
    cfg
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn apply_env_overrides(cfg: &mut Config) {
    if let Some(token) = non_empty_var("MESSENGER_SEND_ACCESS_TOKEN") {
        cfg.auth.access_token = Some(token);
    }

    if let Some(version) = non_empty_var("MESSENGER_SEND_API_VERSION") {
        cfg.api.version = version;
    }

    if let Some(url) = non_empty_var("MESSENGER_SEND_GRAPH_URL") {
        cfg.api.graph_url = url;
    }

    if let Some(host) = non_empty_var("MESSENGER_SEND_PROXY_HOST") {
        cfg.proxy.get_or_insert_with(ProxyConfig::default).hostname = Some(host);
    }

    if let Some(port) = non_empty_var("MESSENGER_SEND_PROXY_PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => {
                cfg.proxy.get_or_insert_with(ProxyConfig::default).port = Some(port);
            }
            Err(_) => tracing::warn!("ignoring MESSENGER_SEND_PROXY_PORT={port}: not a port"),
        }
    }
}
