use super::*;
use crate::origin::OriginMode;
use std::io::Write;

#[test]
fn load_from_str_should_build_policy_from_yaml() {
    // Arrange
    let yaml = r#"
allowed_origins: ["https://a.example", "https://b.example"]
allowed_origin_patterns: ['^https://[a-z]+\.trusted\.test$']
supports_credentials: true
allowed_methods: [get, post]
allowed_headers: [X-Trace]
exposed_headers: [X-Request-Id]
max_age: 600
"#;

    // Act
    let cors = load_from_str(yaml).expect("valid configuration");

    // Assert
    assert_eq!(cors.origin_mode(), &OriginMode::Dynamic);
    assert!(cors.supports_credentials());
}

#[test]
fn load_from_str_should_apply_defaults_given_empty_mapping() {
    let cors = load_from_str("{}").expect("valid configuration");

    assert_eq!(cors.origin_mode(), &OriginMode::Dynamic);
    assert!(!cors.supports_credentials());
}

#[test]
fn load_from_str_should_accept_null_max_age() {
    let result = load_from_str("allowed_origins: ['*']\nmax_age: ~\n");

    assert!(result.is_ok());
}

#[test]
fn load_from_str_should_reject_unknown_fields() {
    let result = load_from_str("allowed_origin: ['*']\n");

    assert!(matches!(result, Err(ConfigError::Yaml(_))));
}

#[test]
fn load_from_str_should_reject_negative_max_age() {
    let result = load_from_str("max_age: -1\n");

    assert!(matches!(result, Err(ConfigError::Yaml(_))));
}

#[test]
fn load_from_str_should_surface_validation_errors() {
    let result = load_from_str("allowed_origin_patterns: ['(unclosed']\n");

    assert!(matches!(
        result,
        Err(ConfigError::Validation(ValidationError::InvalidOriginPattern { .. }))
    ));
}

#[test]
fn load_from_file_should_read_yaml_file() {
    // Arrange
    let path = std::env::temp_dir().join(format!("stack-cors-{}.yaml", std::process::id()));
    let mut file = std::fs::File::create(&path).expect("create temp config");
    writeln!(file, "allowed_origins: ['https://only.example']").expect("write temp config");
    drop(file);

    // Act
    let result = load_from_file(&path);
    std::fs::remove_file(&path).expect("remove temp config");

    // Assert
    let cors = result.expect("valid configuration");
    assert_eq!(
        cors.origin_mode(),
        &OriginMode::Static("https://only.example".to_string())
    );
}

#[test]
fn load_from_file_should_report_missing_file() {
    let path = std::env::temp_dir().join("stack-cors-missing-config.yaml");

    let result = load_from_file(&path);

    match result {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected io error, got {:?}", other),
    }
}
