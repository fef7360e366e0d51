//! TCP reachability probe
//!
//! A bare transport-level check run before any LDAP traffic.

use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

/// Result of a single probe
///
/// Returned by value and never stored, so concurrent probes cannot overwrite
/// each other's diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
    Unreachable {
        /// OS error number, when the failure came from the OS
        errno: Option<i32>,
        message: String,
    },
}

impl ProbeOutcome {
    pub fn unreachable(message: impl Into<String>) -> Self {
        ProbeOutcome::Unreachable {
            errno: None,
            message: message.into(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable)
    }
}

impl From<std::io::Error> for ProbeOutcome {
    fn from(err: std::io::Error) -> Self {
        ProbeOutcome::Unreachable {
            errno: err.raw_os_error(),
            message: err.to_string(),
        }
    }
}

/// Reachability check against `host:port`
pub trait Probe: Send + Sync {
    fn probe(&self, host: &str, port: u16, timeout: Duration) -> ProbeOutcome;
}

/// Probe that opens and immediately closes a TCP connection
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

impl Probe for TcpProbe {
    fn probe(&self, host: &str, port: u16, timeout: Duration) -> ProbeOutcome {
        let addrs = match resolve(host, port) {
            Ok(addrs) => addrs,
            Err(e) => return e.into(),
        };

        if addrs.is_empty() {
            return ProbeOutcome::unreachable(format!("No addresses found for {}", host));
        }

        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => {
                    debug!("Probe connected to {}", addr);
                    let _ = stream.shutdown(Shutdown::Both);
                    return ProbeOutcome::Reachable;
                }
                Err(e) => {
                    debug!("Probe of {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => e.into(),
            None => ProbeOutcome::unreachable("Probe made no connection attempt"),
        }
    }
}

/// Resolve a host that may be a bracketed IPv6 literal
fn resolve(host: &str, port: u16) -> std::io::Result<Vec<SocketAddr>> {
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    Ok((host, port).to_socket_addrs()?.collect())
}
