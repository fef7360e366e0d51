//! Configuration for Dirauth

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for a directory server
///
/// Set once when a client is built and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuthConfig {
    /// Directory server address or hostname
    pub host: String,

    /// TCP port of the directory server
    #[serde(default = "default_port")]
    pub port: u16,

    /// Reachability probe timeout in seconds
    ///
    /// Only the probe is bounded; connect and bind may block on a slow server.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,

    /// LDAP protocol version applied to each connection (2 or 3)
    #[serde(default = "default_protocol_version")]
    pub protocol_version: u32,
}

fn default_port() -> u16 {
    crate::DEFAULT_PORT
}

fn default_timeout() -> f64 {
    crate::DEFAULT_TIMEOUT_SECONDS
}

fn default_protocol_version() -> u32 {
    crate::DEFAULT_PROTOCOL_VERSION
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new("localhost")
    }
}

impl AuthConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            protocol_version: default_protocol_version(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: f64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_protocol_version(mut self, protocol_version: u32) -> Self {
        self.protocol_version = protocol_version;
        self
    }

    /// Probe timeout as a [`Duration`], `None` when negative or NaN
    ///
    /// Values too large for a `Duration`, infinity included, saturate to
    /// [`Duration::MAX`].
    pub fn timeout(&self) -> Option<Duration> {
        let seconds = self.timeout_seconds;
        if seconds.is_nan() || seconds < 0.0 {
            return None;
        }
        Some(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX))
    }

    pub fn from_file(path: &str) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from `DIRAUTH_*` environment variables
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("DIRAUTH_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("DIRAUTH_PORT") {
            if let Ok(p) = port.parse() {
                self.port = p;
            }
        }
        if let Ok(timeout) = std::env::var("DIRAUTH_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_seconds = t;
            }
        }
        if let Ok(version) = std::env::var("DIRAUTH_PROTOCOL_VERSION") {
            if let Ok(v) = version.parse() {
                self.protocol_version = v;
            }
        }
    }

    /// Check for values that can never lead to a successful bind
    ///
    /// Building a client does not require a valid configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if self.host.trim().is_empty() {
            return Err(crate::Error::Config("Host is required".to_string()));
        }

        if self.port == 0 {
            return Err(crate::Error::Config("Port must be between 1 and 65535".to_string()));
        }

        if self.timeout().is_none() {
            return Err(crate::Error::Config(format!(
                "Timeout must be a non-negative number of seconds, got {}",
                self.timeout_seconds
            )));
        }

        if !(2..=3).contains(&self.protocol_version) {
            return Err(crate::Error::Config(format!(
                "Protocol version must be 2 or 3, got {}",
                self.protocol_version
            )));
        }

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("Failed to serialize config: {}", e)))
    }
}
