//! Client configuration for the payments API.
//!
//! [`ClientConfig`] carries the three values every call needs: the service host,
//! the default access key, and the optional service key sent as `appkey`.
//! It is validated once, when a client is constructed, and never mutated afterwards.
//!
//! # Environment Variable Resolution
//!
//! Keys in a JSON configuration file may be written as literals or as references
//! to environment variables through [`LiteralOrEnv`]:
//!
//! ```json
//! {
//!   "host": "https://payments.tokes.dev",   // Literal value
//!   "apiKey": "$TOKES_API_KEY",              // Simple env var
//!   "serviceKey": "${TOKES_SERVICE_KEY}"     // Braced env var
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use url::Url;

/// Value sent as `appkey` when no service key is configured.
pub const DEFAULT_SERVICE_KEY: &str = "unsigned";

/// Connection settings for a payments client.
///
/// ```
/// use tokes_payments_types::ClientConfig;
///
/// let config = ClientConfig::new("https://payments.test").with_api_key("merchant-key");
/// assert!(config.validate().is_ok());
/// assert_eq!(config.app_key(), "unsigned");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base of every request URL. Paths are appended verbatim.
    pub host: String,
    /// Access key used when a call does not supply its own.
    #[serde(default, alias = "api_key", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Service key sent as the `appkey` header.
    #[serde(default, alias = "service_key", skip_serializing_if = "Option::is_none")]
    pub service_key: Option<String>,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: None,
            service_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_service_key(mut self, service_key: impl Into<String>) -> Self {
        self.service_key = Some(service_key.into());
        self
    }

    /// Checks the configuration before a client is built from it.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingHost`] if `host` is empty or whitespace
    /// - [`ConfigError::InvalidHost`] if `host` is not an absolute URL
    /// - [`ConfigError::EmptyApiKey`] if an API key is present but empty
    ///
    /// A missing API key is accepted here; calls made without a per-call key
    /// then fail with [`ConfigError::MissingAccessKey`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingHost);
        }
        Url::parse(&self.host).map_err(|source| ConfigError::InvalidHost {
            host: self.host.clone(),
            source,
        })?;
        if matches!(self.api_key.as_deref(), Some(key) if key.is_empty()) {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(())
    }

    /// The `appkey` header value: the service key, or [`DEFAULT_SERVICE_KEY`].
    pub fn app_key(&self) -> &str {
        match self.service_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => DEFAULT_SERVICE_KEY,
        }
    }
}

/// Errors raised by configuration checks.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Payments host definition is required")]
    MissingHost,
    #[error("Payments host {host:?} is not a valid URL: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },
    #[error("The API key must not be empty when provided")]
    EmptyApiKey,
    #[error("No access key: pass one to the call or configure a default API key")]
    MissingAccessKey,
}

/// A transparent wrapper that resolves environment variables during deserialization.
///
/// Supports both literal values and environment variable references:
/// - Literal: `"fa4325aa98748b4ff6c"`
/// - Simple env var: `"$TOKES_API_KEY"`
/// - Braced env var: `"${TOKES_API_KEY}"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOrEnv<T>(T);

impl<T> LiteralOrEnv<T> {
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Returns the variable name if the string matches `$VAR` or `${VAR}` syntax.
    fn parse_env_var_syntax(s: &str) -> Option<&str> {
        if let Some(braced) = s.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
            return Some(braced);
        }
        let name = s.strip_prefix('$')?;
        let is_var_name = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_');
        is_var_name.then_some(name)
    }
}

impl<'de, T> Deserialize<'de> for LiteralOrEnv<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let value = match Self::parse_env_var_syntax(&s) {
            Some(var_name) => std::env::var(var_name).map_err(|_| {
                serde::de::Error::custom(format!(
                    "Environment variable '{var_name}' not found (referenced as '{s}')"
                ))
            })?,
            None => s,
        };

        let parsed = value
            .parse::<T>()
            .map_err(|e| serde::de::Error::custom(format!("Failed to parse value: {e}")))?;

        Ok(LiteralOrEnv(parsed))
    }
}

impl<T> Serialize for LiteralOrEnv<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}
