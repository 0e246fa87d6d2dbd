// crates/ibpctl-config/src/profile.rs
// ============================================================================
// Module: Network Profile
// Description: Network profile parsing and validation.
// Purpose: Provide strict, fail-closed profile parsing with hard limits.
// Dependencies: ibpctl-core, serde, serde_yaml, thiserror, url
// ============================================================================

//! ## Overview
//! A profile names the network agent endpoint, the organization, and the
//! admin identity used to open a session. Unknown fields are rejected so a
//! misspelled key never silently falls back to a default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use ibpctl_core::MAX_PROFILE_BYTES;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Minimum request timeout in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 1_000;
/// Maximum request timeout in milliseconds.
pub const MAX_TIMEOUT_MS: u64 = 300_000;
/// Maximum length of a name or identifier field.
const MAX_NAME_LENGTH: usize = 256;
/// Maximum length of a secret or API key.
const MAX_SECRET_LENGTH: usize = 4_096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Profile loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid profile data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Profile Types
// ============================================================================

/// Network profile handed to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkProfile {
    /// Human-readable network name.
    pub name: String,
    /// Network agent base URL.
    pub endpoint: String,
    /// Organization name.
    pub organization: String,
    /// Organization MSP identifier.
    pub msp_id: String,
    /// Organization admin identity.
    pub admin: AdminIdentity,
    /// Optional API key sent as a bearer token.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Allow plain `http` endpoints (local development only).
    #[serde(default)]
    pub allow_http: bool,
}

/// Admin identity credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminIdentity {
    /// Enrollment identifier.
    #[serde(default = "default_enrollment_id")]
    pub enrollment_id: String,
    /// Enrollment secret.
    pub enrollment_secret: String,
}

impl NetworkProfile {
    /// Parses and validates a profile from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the bytes are oversized, not UTF-8, not
    /// valid YAML, or describe an invalid profile.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() > MAX_PROFILE_BYTES {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let profile: Self =
            serde_yaml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Validates the profile for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_name("name", &self.name)?;
        validate_name("organization", &self.organization)?;
        validate_name("msp_id", &self.msp_id)?;
        self.admin.validate()?;
        if let Some(api_key) = &self.api_key {
            validate_secret("api_key", api_key)?;
        }
        if !(MIN_TIMEOUT_MS ..= MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        self.endpoint_url().map(|_| ())
    }

    /// Returns the parsed endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the endpoint is malformed, uses a scheme
    /// other than `https` (or `http` with `allow_http`), or embeds
    /// credentials, a query, or a fragment.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.endpoint.trim())
            .map_err(|err| ConfigError::Invalid(format!("endpoint is not a valid url: {err}")))?;
        match url.scheme() {
            "https" => {}
            "http" if self.allow_http => {}
            "http" => {
                return Err(ConfigError::Invalid(
                    "endpoint must use https unless allow_http is set".to_string(),
                ));
            }
            scheme => {
                return Err(ConfigError::Invalid(format!("unsupported endpoint scheme: {scheme}")));
            }
        }
        if url.host_str().is_none() {
            return Err(ConfigError::Invalid("endpoint must include a host".to_string()));
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(ConfigError::Invalid("endpoint must not embed credentials".to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::Invalid(
                "endpoint must not include a query or fragment".to_string(),
            ));
        }
        Ok(url)
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl AdminIdentity {
    /// Validates admin credentials.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_name("admin.enrollment_id", &self.enrollment_id)?;
        validate_secret("admin.enrollment_secret", &self.enrollment_secret)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default timeout for serde.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default admin enrollment identifier for serde.
fn default_enrollment_id() -> String {
    "admin".to_string()
}

/// Validates a non-empty, bounded name field.
fn validate_name(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Validates a non-empty, bounded secret without echoing it.
fn validate_secret(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_SECRET_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}
