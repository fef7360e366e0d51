//! Dirauth Core Library
//!
//! Configuration and error types shared by the dirauth crates.

pub mod config;
pub mod error;

pub use config::AuthConfig;
pub use error::{Error, ErrorKind, Result};

/// Dirauth version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default LDAP port
pub const DEFAULT_PORT: u16 = 389;

/// Default reachability probe timeout (seconds)
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 1.0;

/// Default LDAP protocol version
pub const DEFAULT_PROTOCOL_VERSION: u32 = 3;
