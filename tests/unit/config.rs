use messenger_send::config::{
    apply_env_overrides, expand_tilde, load_config_from, resolve_config_path, Config,
    ProxyConfig,
};
use messenger_send::SendError;
use std::io::Write;

#[test]
fn test_default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.api.graph_url, "https://graph.facebook.com");
    assert_eq!(cfg.api.version, "2.11");
    assert!(cfg.auth.access_token.is_none());
    assert!(cfg.proxy.is_none());
}

#[test]
fn test_expand_tilde() {
    let expanded = expand_tilde("~/test/path");
    assert!(expanded.to_string_lossy().contains("test/path"));
}

#[test]
fn test_expand_tilde_no_tilde() {
    let expanded = expand_tilde("/absolute/path");
    assert_eq!(expanded.to_string_lossy(), "/absolute/path");
}

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "api": {{"graph_url": "http://localhost:9000", "version": "19.0"}},
            "auth": {{"access_token": "page-token"}},
            "proxy": {{"hostname": "proxy.local", "port": 3128}}
        }}"#
    )
    .unwrap();

    let cfg = load_config_from(file.path()).unwrap();
    assert_eq!(cfg.api.graph_url, "http://localhost:9000");
    assert_eq!(cfg.api.version, "19.0");
    assert_eq!(cfg.auth.access_token.as_deref(), Some("page-token"));
    assert_eq!(cfg.proxy, Some(ProxyConfig::new("proxy.local", 3128)));
}

#[test]
fn test_load_config_from_malformed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    let err = load_config_from(file.path()).unwrap_err();
    assert!(matches!(err, SendError::Config(_)));
}

#[test]
fn test_load_config_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config_from(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SendError::Config(_)));
}

// Environment is process-wide, so every env-dependent check lives here.
#[test]
fn test_environment_handling() {
    std::env::remove_var("MESSENGER_SEND_CONFIG");
    let path = resolve_config_path();
    assert!(path.to_string_lossy().contains(".messenger-send"));
    assert!(path.to_string_lossy().contains("config.json"));

    std::env::set_var("MESSENGER_SEND_CONFIG", "/custom/path/config.json");
    assert_eq!(
        resolve_config_path().to_string_lossy(),
        "/custom/path/config.json"
    );
    std::env::remove_var("MESSENGER_SEND_CONFIG");

    std::env::set_var("MESSENGER_SEND_ACCESS_TOKEN", "env-token");
    std::env::set_var("MESSENGER_SEND_API_VERSION", "3.3");
    std::env::set_var("MESSENGER_SEND_PROXY_HOST", "proxy.env");
    std::env::set_var("MESSENGER_SEND_PROXY_PORT", "8080");
    let mut cfg = Config::default();
    apply_env_overrides(&mut cfg);
    assert_eq!(cfg.auth.access_token.as_deref(), Some("env-token"));
    assert_eq!(cfg.api.version, "3.3");
    assert_eq!(cfg.proxy, Some(ProxyConfig::new("proxy.env", 8080)));

    std::env::set_var("MESSENGER_SEND_ACCESS_TOKEN", "   ");
    std::env::set_var("MESSENGER_SEND_PROXY_PORT", "not-a-port");
    std::env::remove_var("MESSENGER_SEND_PROXY_HOST");
    std::env::remove_var("MESSENGER_SEND_API_VERSION");
    let mut cfg = Config::default();
    apply_env_overrides(&mut cfg);
    assert!(cfg.auth.access_token.is_none());
    assert!(cfg.proxy.is_none());

    std::env::remove_var("MESSENGER_SEND_ACCESS_TOKEN");
    std::env::remove_var("MESSENGER_SEND_PROXY_PORT");
}
