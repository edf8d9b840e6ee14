use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_host_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("BIND_ADDR");
    }
}

// =============================================================================
// parse helpers
// =============================================================================

#[test]
fn port_defaults_when_missing_or_blank() {
    assert_eq!(parse_port(None), Ok(DEFAULT_PORT));
    assert_eq!(parse_port(Some("  ")), Ok(DEFAULT_PORT));
}

#[test]
fn port_rejects_zero_and_garbage() {
    assert_eq!(parse_port(Some("8080")), Ok(8080));
    assert_eq!(parse_port(Some("0")), Err(ConfigError::Port { value: "0".into() }));
    assert!(parse_port(Some("70000")).is_err());
    assert!(parse_port(Some("http")).is_err());
}

#[test]
fn bind_addr_accepts_v4_and_v6() {
    assert_eq!(parse_bind_addr(None), Ok(DEFAULT_BIND_ADDR));
    assert_eq!(parse_bind_addr(Some("127.0.0.1")), Ok(IpAddr::V4(Ipv4Addr::LOCALHOST)));
    assert!(parse_bind_addr(Some("::1")).is_ok_and(|ip| ip.is_ipv6()));
    assert_eq!(parse_bind_addr(Some("localhost")), Err(ConfigError::BindAddr { value: "localhost".into() }));
}

// =============================================================================
// from_env
// =============================================================================

#[test]
fn from_env_defaults() {
    unsafe { clear_host_env() };

    let cfg = Config::from_env().unwrap();
    assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn from_env_reads_overrides() {
    unsafe {
        clear_host_env();
        std::env::set_var("PORT", "4100");
        std::env::set_var("BIND_ADDR", "127.0.0.1");
    }

    let cfg = Config::from_env().unwrap();
    assert_eq!(cfg, Config { bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST), port: 4100 });

    unsafe { clear_host_env() };
}

#[test]
fn from_env_reports_bad_port() {
    unsafe {
        clear_host_env();
        std::env::set_var("PORT", "eighty");
    }

    let err = Config::from_env().unwrap_err();
    assert_eq!(err.to_string(), "invalid PORT \"eighty\": expected 1-65535");

    unsafe { clear_host_env() };
}
