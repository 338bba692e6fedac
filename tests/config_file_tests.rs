//! Loading console configuration from YAML files on disk.

use std::io::Write;
use stockroom::config::ConsoleConfig;
use stockroom::core::AccessPolicy;
use stockroom::query::SortDirection;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_config_file() {
    let file = write_config(
        r#"
api:
  base_url: https://console.example.com/api
  timeout_secs: 5
screens:
  - resource: purchase-orders
    page_size: 25
    sort: created_at:desc
  - resource: users
    access: admin_only
"#,
    );

    let config = ConsoleConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.api.base_url, "https://console.example.com/api");
    assert_eq!(config.api.timeout_secs, 5);

    let orders = config.screen("purchase-orders").unwrap();
    let state = orders.initial_state().unwrap();
    assert_eq!(state.page_size, 25);
    assert_eq!(state.sort_direction, Some(SortDirection::Desc));

    let users = config.screen("users").unwrap();
    assert_eq!(users.page_size, 10);
    assert!(matches!(users.access_policy(), AccessPolicy::AdminOnly));
}

#[test]
fn test_missing_file_is_reported() {
    let err = ConsoleConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_invalid_sort_is_rejected() {
    let file = write_config(
        r#"
screens:
  - resource: products
    sort: name:sideways
"#,
    );
    let err = ConsoleConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("products"));
}

#[test]
fn test_default_config_round_trips_through_file() {
    let yaml = serde_yaml::to_string(&ConsoleConfig::default_config()).unwrap();
    let file = write_config(&yaml);

    let config = ConsoleConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.screens.len(), 10);
    assert_eq!(
        config.screen_or_default("purchase-orders").sort.as_deref(),
        Some("created_at:desc")
    );
}
