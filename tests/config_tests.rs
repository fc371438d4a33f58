use pretty_assertions::assert_eq;

mod common;

#[test]
fn test_server_address_joins_host_and_port() {
    let mut config = common::test_config();
    config.host = "0.0.0.0".to_string();
    config.port = 9000;

    assert_eq!(config.server_address(), "0.0.0.0:9000");
}

#[test]
fn test_environment_flags() {
    let mut config = common::test_config();
    assert!(!config.is_production());
    assert!(!config.is_development());

    config.environment = "production".to_string();
    assert!(config.is_production());

    config.environment = "development".to_string();
    assert!(config.is_development());
}

#[test]
fn test_duty_hours_default_is_full_time_month() {
    let config = common::test_config();
    assert_eq!(config.duty_hours_default, 192.0);
}
