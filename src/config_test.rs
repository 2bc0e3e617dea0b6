use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn empty_environment_yields_defaults() {
    let cfg = Config::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.port, 3333);
    assert_eq!(cfg.host, "http://localhost");
    assert_eq!(cfg.public_dir, PathBuf::from("public"));
    assert_eq!(cfg.initial_hue.value(), 30);
    assert_eq!(cfg.page_data, "test data");
    assert_eq!(cfg.client_buffer, 256);
}

#[test]
fn uppercase_port_wins_over_lowercase() {
    let cfg = Config::from_lookup(lookup_from(&[("PORT", "8080"), ("port", "9090")])).unwrap();
    assert_eq!(cfg.port, 8080);

    let cfg = Config::from_lookup(lookup_from(&[("port", "9090")])).unwrap();
    assert_eq!(cfg.port, 9090);
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = Config::from_lookup(lookup_from(&[("PORT", "  "), ("HOST", ""), ("INITIAL_HUE", "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.host, DEFAULT_HOST);
    assert_eq!(cfg.initial_hue, DEFAULT_HUE);
}

#[test]
fn overrides_are_applied() {
    let cfg = Config::from_lookup(lookup_from(&[
        ("HOST", "http://example.test"),
        ("PUBLIC_DIR", "/srv/assets"),
        ("INITIAL_HUE", "0"),
        ("PAGE_DATA", "hello"),
        ("CLIENT_BUFFER", "16"),
    ]))
    .unwrap();
    assert_eq!(cfg.host, "http://example.test");
    assert_eq!(cfg.public_dir, PathBuf::from("/srv/assets"));
    assert_eq!(cfg.initial_hue.value(), 0);
    assert_eq!(cfg.page_data, "hello");
    assert_eq!(cfg.client_buffer, 16);
}

#[test]
fn page_data_may_be_empty() {
    let cfg = Config::from_lookup(lookup_from(&[("PAGE_DATA", "")])).unwrap();
    assert_eq!(cfg.page_data, "");
}

#[test]
fn invalid_port_is_rejected() {
    let err = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));

    let err = Config::from_lookup(lookup_from(&[("PORT", "70000")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
}

#[test]
fn hue_outside_wheel_is_rejected() {
    let err = Config::from_lookup(lookup_from(&[("INITIAL_HUE", "360")])).unwrap_err();
    assert!(matches!(err, ConfigError::Hue(HueError::OutOfRange(360))));

    let err = Config::from_lookup(lookup_from(&[("INITIAL_HUE", "-1")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "INITIAL_HUE", .. }));
}

#[test]
fn zero_client_buffer_is_rejected() {
    let err = Config::from_lookup(lookup_from(&[("CLIENT_BUFFER", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "CLIENT_BUFFER", .. }));
    assert_eq!(err.to_string(), r#"invalid CLIENT_BUFFER: "0""#);
}
