//! LDAP authentication client
//!
//! Runs the probe, connect, version and bind steps for one credential pair
//! and maps each failure point to its own error kind.

use crate::ldap::directory::{BindOutcome, Directory, DirectoryHandle, Ldap3Directory};
use crate::probe::{Probe, ProbeOutcome, TcpProbe};
use dirauth_core::{AuthConfig, Error, Result};
use tracing::{debug, info, warn};

/// Client that checks credentials by binding to a directory server
///
/// Holds only read-only configuration. Every call to
/// [`authenticate`](Self::authenticate) opens and releases its own connection
/// handle, so a client can be shared across threads.
pub struct AuthClient<D = Ldap3Directory, P = TcpProbe> {
    config: AuthConfig,
    directory: D,
    probe: P,
}

impl AuthClient {
    /// Create a client backed by `ldap3` and a TCP probe
    ///
    /// Never fails, whatever the state of the network.
    pub fn new(config: AuthConfig) -> Self {
        Self::with_backends(config, Ldap3Directory::new(), TcpProbe)
    }
}

impl<D: Directory, P: Probe> AuthClient<D, P> {
    pub fn with_backends(config: AuthConfig, directory: D, probe: P) -> Self {
        let client = Self {
            config,
            directory,
            probe,
        };
        client.warm_up();
        client
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Best-effort pre-flight probe run at construction
    ///
    /// The outcome is only logged.
    pub fn warm_up(&self) {
        match self.probe() {
            ProbeOutcome::Reachable => debug!(
                "Warm-up probe reached {}:{}",
                self.config.host, self.config.port
            ),
            ProbeOutcome::Unreachable { message, .. } => debug!(
                "Warm-up probe could not reach {}:{}: {}",
                self.config.host, self.config.port, message
            ),
        }
    }

    /// Probe `host:port` with the configured timeout
    pub fn probe(&self) -> ProbeOutcome {
        match self.config.timeout() {
            Some(timeout) => self
                .probe
                .probe(&self.config.host, self.config.port, timeout),
            None => ProbeOutcome::unreachable(format!(
                "Invalid probe timeout: {} seconds",
                self.config.timeout_seconds
            )),
        }
    }

    /// Verify `dn` and `password` with a simple bind
    ///
    /// Makes exactly one probe and at most one bind. No retries.
    pub fn authenticate(&self, dn: &str, password: &str) -> Result<()> {
        if dn.is_empty() {
            return Err(Error::EmptyCredential("bind DN"));
        }
        if password.is_empty() {
            return Err(Error::EmptyCredential("password"));
        }

        let host = &self.config.host;
        let port = self.config.port;

        // Step 1: plain TCP reachability
        if let ProbeOutcome::Unreachable { message, .. } = self.probe() {
            warn!("LDAP server {}:{} is unreachable: {}", host, port, message);
            return Err(Error::UnreachableServer {
                host: host.clone(),
                port,
                timeout_seconds: self.config.timeout_seconds,
                reason: message,
            });
        }

        // Step 2: connection handle
        let mut handle = self.directory.connect(host, port).map_err(|e| {
            warn!("Cannot initialize LDAP connection to {}:{}: {}", host, port, e);
            Error::CannotInitializeConnection {
                host: host.clone(),
                port,
                reason: e.to_string(),
            }
        })?;

        // Step 3: protocol version
        let version = self.config.protocol_version;
        if let Err(e) = handle.set_protocol_version(version) {
            handle.release();
            return Err(Error::ProtocolVersion {
                version,
                reason: e.to_string(),
            });
        }

        // Step 4: bind
        debug!("Binding to {}:{} as {}", host, port, dn);
        let outcome = handle.bind(dn, password);
        handle.release();

        match classify_bind(outcome) {
            Ok(()) => {
                info!("LDAP bind succeeded for {}", dn);
                Ok(())
            }
            Err(e) => {
                warn!("LDAP bind failed for {}: {}", dn, e.code());
                Err(e)
            }
        }
    }
}

/// Map a bind outcome to the caller-facing result
pub fn classify_bind(outcome: BindOutcome) -> Result<()> {
    match outcome {
        BindOutcome::Success => Ok(()),
        BindOutcome::Rejected { code, message } => Err(Error::BindFailed { code, message }),
        BindOutcome::Raised(source) => Err(Error::AuthenticationFailed { source }),
    }
}
