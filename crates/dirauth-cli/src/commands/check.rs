//! check command - bind with a DN and password

use super::{error_status, Report, EXIT_SUCCESS};
use dirauth_auth::AuthClient;
use dirauth_core::AuthConfig;

pub fn execute(config: AuthConfig, dn: &str, password: &str, json: bool) -> u8 {
    let host = config.host.clone();
    let port = config.port;
    let client = AuthClient::new(config);

    let (report, status) = match client.authenticate(dn, password) {
        Ok(()) => (
            Report {
                success: true,
                host,
                port,
                code: None,
                message: format!("bind succeeded for {}", dn),
            },
            EXIT_SUCCESS,
        ),
        Err(e) => (
            Report {
                success: false,
                host,
                port,
                code: Some(e.code()),
                message: e.to_string(),
            },
            error_status(&e),
        ),
    };

    report.print(json);
    status
}
