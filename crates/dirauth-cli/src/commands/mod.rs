//! CLI command implementations

pub mod check;
pub mod config;
pub mod probe;

use dirauth_core::{Error, ErrorKind};
use serde::Serialize;

/// Outcome printed by `check` and `probe`
#[derive(Debug, Serialize)]
pub struct Report {
    pub success: bool,
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    pub message: String,
}

impl Report {
    pub fn print(&self, json: bool) {
        if json {
            match serde_json::to_string_pretty(self) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("Failed to encode report: {}", e),
            }
        } else if self.success {
            println!("OK {}:{} {}", self.host, self.port, self.message);
        } else {
            eprintln!(
                "FAILED {}:{} [{}] {}",
                self.host,
                self.port,
                self.code.unwrap_or("Fatal"),
                self.message
            );
        }
    }
}

/// Exit status for a successful command
pub const EXIT_SUCCESS: u8 = 0;

/// Process exit status for a failed authentication
pub fn error_status(err: &Error) -> u8 {
    exit_status(err.kind())
}

pub fn exit_status(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Fatal => 1,
        ErrorKind::UnreachableServer => 2,
        ErrorKind::CannotInitializeConnection => 3,
        ErrorKind::AuthenticationFailed => 4,
        ErrorKind::BindFailed => 5,
    }
}
