//! Network profile validation tests for ibpctl-config.
// crates/ibpctl-config/tests/profile_validation.rs
// =============================================================================
// Module: Profile Validation Tests
// Description: Validate profile parsing guards and field rules.
// Purpose: Ensure profile input handling is strict and fail-closed.
// =============================================================================

use std::time::Duration;

use ibpctl_config::ConfigError;
use ibpctl_config::NetworkProfile;

type TestResult = Result<(), String>;

const BASE: &str = "name: net
endpoint: https://agent.example.com
organization: org1
msp_id: Org1MSP
admin:
  enrollment_secret: adminpw
";

fn assert_invalid(result: Result<NetworkProfile, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid profile".to_string()),
    }
}

fn parse(extra: &str) -> Result<NetworkProfile, ConfigError> {
    NetworkProfile::from_slice(format!("{BASE}{extra}").as_bytes())
}

fn with_endpoint(endpoint: &str, extra: &str) -> Result<NetworkProfile, ConfigError> {
    let yaml = BASE.replace("https://agent.example.com", endpoint);
    NetworkProfile::from_slice(format!("{yaml}{extra}").as_bytes())
}

#[test]
fn defaults_apply() -> TestResult {
    let profile = parse("").map_err(|err| err.to_string())?;
    if profile.admin.enrollment_id != "admin" {
        return Err(format!("unexpected enrollment id {}", profile.admin.enrollment_id));
    }
    if profile.timeout() != Duration::from_secs(30) || profile.api_key.is_some() {
        return Err("unexpected defaults".to_string());
    }
    Ok(())
}

#[test]
fn json_profiles_are_accepted() -> TestResult {
    let json = r#"{"name": "net", "endpoint": "https://agent.example.com",
        "organization": "org1", "msp_id": "Org1MSP",
        "admin": {"enrollment_id": "root", "enrollment_secret": "pw"}}"#;
    let profile = NetworkProfile::from_slice(json.as_bytes()).map_err(|err| err.to_string())?;
    if profile.admin.enrollment_id != "root" {
        return Err("json admin id not read".to_string());
    }
    Ok(())
}

#[test]
fn rejects_unknown_fields() -> TestResult {
    assert_invalid(parse("endpiont: https://typo.example.com\n"), "config parse error")
}

#[test]
fn rejects_missing_secret() -> TestResult {
    let yaml = BASE.replace("  enrollment_secret: adminpw\n", "  enrollment_id: admin\n");
    assert_invalid(NetworkProfile::from_slice(yaml.as_bytes()), "enrollment_secret")
}

#[test]
fn rejects_blank_names() -> TestResult {
    let yaml = BASE.replace("organization: org1", "organization: '  '");
    assert_invalid(NetworkProfile::from_slice(yaml.as_bytes()), "organization must be non-empty")
}

#[test]
fn rejects_plain_http_without_opt_in() -> TestResult {
    assert_invalid(with_endpoint("http://127.0.0.1:7054", ""), "must use https")?;
    with_endpoint("http://127.0.0.1:7054", "allow_http: true\n").map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn rejects_unsupported_scheme() -> TestResult {
    assert_invalid(with_endpoint("ftp://agent.example.com", ""), "unsupported endpoint scheme")
}

#[test]
fn rejects_embedded_credentials() -> TestResult {
    assert_invalid(
        with_endpoint("https://user:pw@agent.example.com", ""),
        "must not embed credentials",
    )
}

#[test]
fn rejects_query_string() -> TestResult {
    assert_invalid(with_endpoint("https://agent.example.com/?token=x", ""), "query or fragment")
}

#[test]
fn rejects_timeout_out_of_range() -> TestResult {
    assert_invalid(parse("timeout_ms: 10\n"), "timeout_ms must be between")?;
    assert_invalid(parse("timeout_ms: 600000\n"), "timeout_ms must be between")
}

#[test]
fn rejects_empty_api_key() -> TestResult {
    assert_invalid(parse("api_key: ''\n"), "api_key must be non-empty")
}

#[test]
fn rejects_non_utf8_bytes() -> TestResult {
    assert_invalid(NetworkProfile::from_slice(&[0xFF, 0xFE, 0xFF]), "config file must be utf-8")
}

#[test]
fn rejects_oversized_profile() -> TestResult {
    let mut bytes = BASE.as_bytes().to_vec();
    bytes.resize(1_048_577, b' ');
    assert_invalid(NetworkProfile::from_slice(&bytes), "config file exceeds size limit")
}
