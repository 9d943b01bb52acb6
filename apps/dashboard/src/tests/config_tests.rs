use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("order_dashboard_config_{suffix}.toml"));
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn strips_trailing_slash_and_orders_path() {
    assert_eq!(
        normalize_api_url(" https://localhost:7043/ ").expect("url"),
        "https://localhost:7043"
    );
    assert_eq!(
        normalize_api_url("https://localhost:7043/api/orders/").expect("url"),
        "https://localhost:7043"
    );
    assert_eq!(
        normalize_api_url("http://shop.internal/backend").expect("url"),
        "http://shop.internal/backend"
    );
}

#[test]
fn empty_url_falls_back_to_default() {
    assert_eq!(
        normalize_api_url("  ").expect("url"),
        Settings::default().api_base_url
    );
}

#[test]
fn rejects_non_http_urls() {
    assert!(normalize_api_url("ftp://localhost/api").is_err());
    assert!(normalize_api_url("localhost:7043").is_err());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config(
        "api_url = \"http://127.0.0.1:5000/api/orders\"\naccept_invalid_certs = true\ncolor = false\n",
    );
    let mut settings = Settings::default();
    apply_file(&mut settings, &path).expect("apply file");
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(settings.api_base_url, "http://127.0.0.1:5000/api/orders");
    assert!(settings.accept_invalid_certs);
    assert!(!settings.color);
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn unknown_file_keys_are_rejected() {
    let path = temp_config("api_ur = \"http://typo\"\n");
    let mut settings = Settings::default();
    let result = apply_file(&mut settings, &path);
    fs::remove_file(&path).expect("cleanup");
    assert!(result.is_err());
}

#[test]
fn app_prefixed_env_wins_over_plain() {
    let vars: HashMap<&str, &str> = [
        ("ORDER_API_URL", "http://plain:1"),
        ("APP__API_URL", "http://prefixed:2"),
        ("APP__ACCEPT_INVALID_CERTS", "yes"),
        ("NO_COLOR", "1"),
        ("RUST_LOG", "debug"),
    ]
    .into_iter()
    .collect();

    let mut settings = Settings::default();
    apply_env(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.api_base_url, "http://prefixed:2");
    assert!(settings.accept_invalid_certs);
    assert!(!settings.color);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn unparsable_flag_keeps_previous_value() {
    let mut settings = Settings::default();
    apply_env(&mut settings, |key| {
        (key == "APP__ACCEPT_INVALID_CERTS").then(|| "maybe".to_string())
    });
    assert!(!settings.accept_invalid_certs);
}

#[test]
fn cli_overrides_apply_last() {
    let path = temp_config("api_url = \"http://from-file:1\"\nlog_filter = \"info\"\n");
    let cli = CliOverrides {
        config_path: Some(path.clone()),
        api_url: Some("http://from-cli:9/api/orders".to_string()),
        accept_invalid_certs: false,
        log_filter: Some("trace".to_string()),
        no_color: true,
    };
    let settings = load_settings(&cli);
    fs::remove_file(&path).expect("cleanup");
    let settings = settings.expect("settings");

    assert_eq!(settings.api_base_url, "http://from-cli:9");
    assert_eq!(settings.log_filter, "trace");
    assert!(!settings.color);
}
