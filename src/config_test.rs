use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("HCIMS_API_URL");
        std::env::remove_var("HCIMS_PROXY_TIMEOUT_SECS");
        std::env::remove_var("HCIMS_PROXY_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("HCIMS_SITE_DIR");
    }
}

#[test]
fn from_env_applies_defaults() {
    unsafe {
        clear_server_env();
        std::env::set_var("HCIMS_API_URL", "https://hr.example.com/api/");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.api_url, "https://hr.example.com/api");
    assert_eq!(
        cfg.timeouts,
        ProxyTimeouts { request_secs: DEFAULT_PROXY_TIMEOUT_SECS, connect_secs: DEFAULT_PROXY_CONNECT_TIMEOUT_SECS }
    );
    assert_eq!(cfg.site_dir, None);

    unsafe { clear_server_env() };
}

#[test]
fn from_env_parses_overrides() {
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("HCIMS_API_URL", "http://localhost:8000");
        std::env::set_var("HCIMS_PROXY_TIMEOUT_SECS", "30");
        std::env::set_var("HCIMS_PROXY_CONNECT_TIMEOUT_SECS", "2");
        std::env::set_var("HCIMS_SITE_DIR", "/srv/hcims");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.api_url, "http://localhost:8000");
    assert_eq!(cfg.timeouts, ProxyTimeouts { request_secs: 30, connect_secs: 2 });
    assert_eq!(cfg.site_dir, Some(PathBuf::from("/srv/hcims")));

    unsafe { clear_server_env() };
}

#[test]
fn from_env_requires_api_url() {
    unsafe { clear_server_env() };
    assert_eq!(ServerConfig::from_env(), Err(ConfigError::Missing("HCIMS_API_URL")));
}

#[test]
fn from_env_rejects_bad_values() {
    unsafe {
        clear_server_env();
        std::env::set_var("HCIMS_API_URL", "hr.example.com");
    }
    assert!(matches!(ServerConfig::from_env(), Err(ConfigError::Invalid { key: "HCIMS_API_URL", .. })));

    unsafe {
        std::env::set_var("HCIMS_API_URL", "https://hr.example.com");
        std::env::set_var("PORT", "not-a-port");
    }
    assert_eq!(
        ServerConfig::from_env(),
        Err(ConfigError::Invalid { key: "PORT", value: "not-a-port".to_owned() })
    );

    unsafe { clear_server_env() };
}

#[test]
fn bad_timeouts_fall_back_to_defaults() {
    unsafe {
        clear_server_env();
        std::env::set_var("HCIMS_API_URL", "https://hr.example.com");
        std::env::set_var("HCIMS_PROXY_TIMEOUT_SECS", "0");
        std::env::set_var("HCIMS_PROXY_CONNECT_TIMEOUT_SECS", "soon");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_PROXY_TIMEOUT_SECS);
    assert_eq!(cfg.timeouts.connect_secs, DEFAULT_PROXY_CONNECT_TIMEOUT_SECS);

    unsafe { clear_server_env() };
}
