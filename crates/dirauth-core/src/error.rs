//! Error types for Dirauth

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by the underlying directory library
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Uniform message shown when a bind attempt raised an error
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Your username and/or password were incorrect.";

#[derive(Error, Debug)]
pub enum Error {
    // Authentication flow errors
    #[error("Unable to reach the ldap server you tried at: {host}:{port} with a timeout of {timeout_seconds} seconds ({reason})")]
    UnreachableServer {
        host: String,
        port: u16,
        timeout_seconds: f64,
        reason: String,
    },

    #[error("Unable to initialize a connection to the ldap server at: {host}:{port} ({reason})")]
    CannotInitializeConnection {
        host: String,
        port: u16,
        reason: String,
    },

    #[error("{}", LOGIN_FAILED_MESSAGE)]
    AuthenticationFailed {
        #[source]
        source: BoxError,
    },

    #[error("The ldap bind failed with result code {code}: {message}")]
    BindFailed { code: u32, message: String },

    // Unclassified errors
    #[error("LDAP protocol version {version} was rejected: {reason}")]
    ProtocolVersion { version: u32, reason: String },

    #[error("The {0} must not be empty")]
    EmptyCredential(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Caller-facing classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnreachableServer,
    CannotInitializeConnection,
    AuthenticationFailed,
    BindFailed,
    /// Anything outside the four authentication failure kinds
    Fatal,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::UnreachableServer => "UnreachableServer",
            ErrorKind::CannotInitializeConnection => "CannotInitializeConnection",
            ErrorKind::AuthenticationFailed => "AuthenticationFailed",
            ErrorKind::BindFailed => "BindFailed",
            ErrorKind::Fatal => "Fatal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnreachableServer { .. } => ErrorKind::UnreachableServer,
            Error::CannotInitializeConnection { .. } => ErrorKind::CannotInitializeConnection,
            Error::AuthenticationFailed { .. } => ErrorKind::AuthenticationFailed,
            Error::BindFailed { .. } => ErrorKind::BindFailed,
            Error::ProtocolVersion { .. } | Error::EmptyCredential(_) | Error::Config(_) => {
                ErrorKind::Fatal
            }
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Only an unreachable server is worth retrying later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::UnreachableServer { .. })
    }
}
