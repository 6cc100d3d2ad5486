use messenger_send::config::{Config, ProxyConfig};
use messenger_send::proxy::{proxy_url, resolve_proxy};
use messenger_send::{MessengerClient, Requester, SendError};

#[test]
fn test_proxy_url_always_has_scheme() {
    let cases = [
        ("proxy.local", 3128, "http://proxy.local:3128"),
        ("http://proxy.local", 3128, "http://proxy.local:3128"),
        ("https://secure.proxy", 443, "https://secure.proxy:443"),
        ("HTTPS://Upper.proxy", 8443, "HTTPS://Upper.proxy:8443"),
        ("10.0.0.1", 80, "http://10.0.0.1:80"),
        ("proxy.local/", 3128, "http://proxy.local:3128"),
    ];
    for (host, port, expected) in cases {
        let url = proxy_url(&ProxyConfig::new(host, port)).unwrap();
        assert_eq!(url, expected);
        let lower = url.to_ascii_lowercase();
        assert!(lower.starts_with("http://") || lower.starts_with("https://"));
    }
}

#[test]
fn test_proxy_missing_hostname() {
    let proxy = ProxyConfig {
        hostname: None,
        port: Some(3128),
    };
    assert!(matches!(proxy_url(&proxy), Err(SendError::InvalidProxy(_))));
}

#[test]
fn test_proxy_blank_hostname() {
    let proxy = ProxyConfig {
        hostname: Some("  ".to_string()),
        port: Some(3128),
    };
    assert!(matches!(proxy_url(&proxy), Err(SendError::InvalidProxy(_))));
}

#[test]
fn test_proxy_missing_port() {
    let proxy = ProxyConfig {
        hostname: Some("proxy.local".to_string()),
        port: None,
    };
    assert!(matches!(proxy_url(&proxy), Err(SendError::InvalidProxy(_))));
}

#[test]
fn test_resolve_proxy_some() {
    let proxy = ProxyConfig::new("proxy.local", 3128);
    assert_eq!(
        resolve_proxy(Some(&proxy)).unwrap().as_deref(),
        Some("http://proxy.local:3128")
    );
}

#[test]
fn test_invalid_proxy_fails_at_construction() {
    let proxy = ProxyConfig {
        hostname: Some("proxy.local".to_string()),
        port: None,
    };
    let err = Requester::new("https://graph.facebook.com", "2.11", "tok", Some(&proxy))
        .unwrap_err();
    assert!(matches!(err, SendError::InvalidProxy(_)));

    let mut cfg = Config::default();
    cfg.auth.access_token = Some("tok".to_string());
    cfg.proxy = Some(proxy);
    assert!(matches!(
        MessengerClient::from_config(&cfg),
        Err(SendError::InvalidProxy(_))
    ));
}

#[test]
fn test_valid_proxy_lands_in_request_options() {
    let proxy = ProxyConfig::new("proxy.local", 3128);
    let requester =
        Requester::new("https://graph.facebook.com", "2.11", "tok", Some(&proxy)).unwrap();
    assert_eq!(requester.proxy(), Some("http://proxy.local:3128"));
    assert_eq!(
        requester.request_options().proxy.as_deref(),
        Some("http://proxy.local:3128")
    );
}
