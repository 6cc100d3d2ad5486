use crate::config::{Config, ProxyConfig};
use crate::error::{SendError, SendResult};
use crate::proxy::resolve_proxy;
use reqwest::{Client, Method};
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub url: String,
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub proxy: Option<String>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn with_path(mut self, path: &str) -> Self {
        self.url = format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

pub fn base_url(graph_url: &str, version: &str) -> String {
    format!(
        "{}/v{}",
        graph_url.trim_end_matches('/'),
        version.trim().trim_start_matches('v')
    )
}

/// Empty bodies become `null`, JSON is parsed, anything else is kept as a
/// JSON string.
pub fn normalize_body(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn build_http(proxy: Option<&str>) -> SendResult<Client> {
    let mut builder = Client::builder();
    if let Some(url) = proxy {
        let proxy = reqwest::Proxy::all(url)
            .map_err(|e| SendError::InvalidProxy(format!("{url}: {e}")))?;
        builder = builder.proxy(proxy);
    }
    Ok(builder.build()?)
}

#[derive(Clone)]
pub struct Requester {
    http: Client,
    graph_url: String,
    base_url: String,
    access_token: String,
    proxy: Option<String>,
}

impl fmt::Debug for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requester")
            .field("base_url", &self.base_url)
            .field("proxy", &self.proxy)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl Requester {
    pub fn new(
        graph_url: &str,
        version: &str,
        access_token: &str,
        proxy: Option<&ProxyConfig>,
    ) -> SendResult<Self> {
        let proxy = resolve_proxy(proxy)?;
        let http = build_http(proxy.as_deref())?;

        Ok(Self {
            http,
            graph_url: graph_url.trim_end_matches('/').to_string(),
            base_url: base_url(graph_url, version),
            access_token: access_token.to_string(),
            proxy,
        })
    }

    pub fn from_config(cfg: &Config) -> SendResult<Self> {
        let token = cfg
            .auth
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SendError::Config("auth.access_token is required".to_string()))?;
        Self::new(&cfg.api.graph_url, &cfg.api.version, token, cfg.proxy.as_ref())
    }

    pub fn with_api_version(&self, version: &str) -> Self {
        Self {
            base_url: base_url(&self.graph_url, version),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            url: self.base_url.clone(),
            method: Method::POST,
            query: Vec::new(),
            proxy: self.proxy.clone(),
            body: None,
        }
    }

    pub async fn send(&self, options: RequestOptions) -> SendResult<Value> {
        let RequestOptions {
            url,
            method,
            mut query,
            proxy,
            body,
        } = options;
        query.push(("access_token".to_string(), self.access_token.clone()));

        let http = if proxy == self.proxy {
            self.http.clone()
        } else {
            build_http(proxy.as_deref())?
        };

        debug!(%method, %url, proxy = proxy.as_deref().unwrap_or("none"), "send api request");
        let mut req = http.request(method.clone(), &url).query(&query);
        if let Some(body) = body.as_ref() {
            req = req.json(body);
        }

        // reqwest errors print the full URL, access_token included.
        let resp = req.send().await.map_err(|e| e.without_url())?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| e.without_url())?;
        let body = normalize_body(&text);

        if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
            let err = SendError::from_platform(error);
            warn!(%method, %url, %status, "send api error: {err}");
            return Err(err);
        }
        if !status.is_success() {
            warn!(%method, %url, %status, "send api returned non-success status");
            return Err(SendError::Status { status, body });
        }
        debug!(%method, %url, %status, "send api response");
        Ok(body)
    }
}
