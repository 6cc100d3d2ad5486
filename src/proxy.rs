use crate::config::ProxyConfig;
use crate::error::{SendError, SendResult};

/// A hostname without an `http://` or `https://` prefix gets `http://`.
pub fn proxy_url(proxy: &ProxyConfig) -> SendResult<String> {
    let hostname = proxy
        .hostname
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| SendError::InvalidProxy("proxy hostname is required".to_string()))?;
    let port = proxy
        .port
        .ok_or_else(|| SendError::InvalidProxy("proxy port is required".to_string()))?;

    let lower = hostname.to_ascii_lowercase();
    let host = if lower.starts_with("http://") || lower.starts_with("https://") {
        hostname.trim_end_matches('/').to_string()
    } else {
        format!("http://{}", hostname.trim_end_matches('/'))
    };
    Ok(format!("{host}:{port}"))
}

pub fn resolve_proxy(proxy: Option<&ProxyConfig>) -> SendResult<Option<String>> {
    proxy.map(proxy_url).transpose()
}
