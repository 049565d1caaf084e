//! Unit tests for server configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;

fn mock_env(vars: HashMap<String, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn bind_vars(value: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert(BIND_ADDR_ENV.to_string(), value.to_string());
    vars
}

fn expect_error(
    result: Result<ServerConfig, ServerConfigError>,
    label: &str,
) -> ServerConfigError {
    match result {
        Ok(_) => panic!("{label}"),
        Err(error) => error,
    }
}

#[rstest]
fn release_missing_bind_addr_is_rejected() {
    let env = mock_env(HashMap::new());
    let err = expect_error(
        server_config_from_env(&env, BuildMode::Release),
        "expected missing bind address to fail",
    );
    assert!(matches!(
        err,
        ServerConfigError::MissingEnv {
            name: BIND_ADDR_ENV
        }
    ));
}

#[rstest]
#[case("not-an-addr")]
#[case("127.0.0.1")]
#[case("")]
fn release_invalid_bind_addr_is_rejected(#[case] value: &str) {
    let env = mock_env(bind_vars(value));
    let err = expect_error(
        server_config_from_env(&env, BuildMode::Release),
        "expected invalid bind address to fail",
    );
    assert!(matches!(
        err,
        ServerConfigError::InvalidEnv {
            name: BIND_ADDR_ENV,
            ..
        }
    ));
}

#[rstest]
fn release_valid_bind_addr_succeeds() {
    let env = mock_env(bind_vars("127.0.0.1:9090"));
    let config = server_config_from_env(&env, BuildMode::Release)
        .expect("expected valid bind address");
    assert_eq!(config.bind_addr.port(), 9090);
}

#[rstest]
fn debug_missing_bind_addr_uses_default() {
    let env = mock_env(HashMap::new());
    let config = server_config_from_env(&env, BuildMode::Debug)
        .expect("debug defaults should succeed");
    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
}

#[rstest]
fn debug_invalid_bind_addr_falls_back_to_default() {
    let env = mock_env(bind_vars("nonsense"));
    let config = server_config_from_env(&env, BuildMode::Debug)
        .expect("debug should fall back to defaults");
    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
}
