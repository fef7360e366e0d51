//! probe command - TCP reachability only

use super::{exit_status, Report, EXIT_SUCCESS};
use dirauth_auth::{AuthClient, ProbeOutcome};
use dirauth_core::{AuthConfig, ErrorKind};

pub fn execute(config: AuthConfig, json: bool) -> u8 {
    let host = config.host.clone();
    let port = config.port;
    let timeout_seconds = config.timeout_seconds;
    let client = AuthClient::new(config);

    match client.probe() {
        ProbeOutcome::Reachable => {
            Report {
                success: true,
                host,
                port,
                code: None,
                message: "reachable".to_string(),
            }
            .print(json);
            EXIT_SUCCESS
        }
        ProbeOutcome::Unreachable { message, .. } => {
            let kind = ErrorKind::UnreachableServer;
            Report {
                success: false,
                host,
                port,
                code: Some(kind.code()),
                message: format!("unreachable within {} seconds: {}", timeout_seconds, message),
            }
            .print(json);
            exit_status(kind)
        }
    }
}
