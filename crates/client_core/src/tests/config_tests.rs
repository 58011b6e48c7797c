use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_point_at_public_directory() {
    let settings = ClientSettings::default();
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = ClientSettings::default();
    apply_file(
        &mut settings,
        r#"
base_url = "http://127.0.0.1:3000"
request_timeout_secs = 5
log_filter = "debug"
"#,
    )
    .expect("apply file");

    assert_eq!(settings.base_url, "http://127.0.0.1:3000");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(5)));
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn negative_timeout_in_file_is_rejected() {
    let mut settings = ClientSettings::default();
    let err = apply_file(&mut settings, "request_timeout_secs = -1").expect_err("must fail");
    assert!(err.to_string().contains("request_timeout_secs"));
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = ClientSettings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("USER_DIRECTORY_URL", "http://plain.example"),
            ("APP__BASE_URL", "http://app.example"),
            ("APP__REQUEST_TIMEOUT_SECS", "12"),
        ]),
    )
    .expect("apply env");

    assert_eq!(settings.base_url, "http://app.example");
    assert_eq!(settings.request_timeout_secs, Some(12));
}

#[test]
fn invalid_env_timeout_is_an_error() {
    let mut settings = ClientSettings::default();
    let err = apply_env(
        &mut settings,
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    )
    .expect_err("must fail");
    assert!(err.to_string().contains("soon"));
}

#[test]
fn explicit_config_path_must_exist() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let missing = env::temp_dir().join(format!("user_directory_missing_{suffix}.toml"));

    assert!(load_settings(Some(&missing)).is_err());
}

#[test]
fn loads_explicit_config_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("user_directory_config_{suffix}.toml"));
    fs::write(&path, "log_filter = \"client_core=trace\"\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.log_filter, "client_core=trace");

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn normalizes_trailing_slash() {
    assert_eq!(
        normalize_base_url("http://localhost:8080/").expect("url"),
        "http://localhost:8080"
    );
}

#[test]
fn rejects_non_http_base_url() {
    assert!(normalize_base_url("ftp://example.com").is_err());
    assert!(normalize_base_url("not a url").is_err());
}
