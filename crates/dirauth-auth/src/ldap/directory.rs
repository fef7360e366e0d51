//! Directory connection seam
//!
//! The wire protocol lives in `ldap3`; this module narrows it to the three
//! calls authentication needs and reports bind results as a closed set.

use dirauth_core::error::BoxError;
use ldap3::{LdapConn, LdapConnSettings};
use std::fmt;
use tracing::{debug, warn};
use url::Url;

/// Result of a bind request
pub enum BindOutcome {
    /// Server accepted the credentials
    Success,
    /// Server answered with a non-zero result code
    Rejected { code: u32, message: String },
    /// The bind call itself failed before a result was read
    Raised(BoxError),
}

impl fmt::Debug for BindOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindOutcome::Success => f.write_str("Success"),
            BindOutcome::Rejected { code, message } => f
                .debug_struct("Rejected")
                .field("code", code)
                .field("message", message)
                .finish(),
            BindOutcome::Raised(e) => f.debug_tuple("Raised").field(&e.to_string()).finish(),
        }
    }
}

/// Factory for call-scoped connection handles
pub trait Directory: Send + Sync {
    type Handle: DirectoryHandle;

    fn connect(&self, host: &str, port: u16) -> Result<Self::Handle, BoxError>;
}

/// An open logical link to a directory server
pub trait DirectoryHandle {
    fn set_protocol_version(&mut self, version: u32) -> Result<(), BoxError>;

    fn bind(&mut self, dn: &str, password: &str) -> BindOutcome;

    /// Close the link. Must not fail the caller.
    fn release(self);
}

/// [`Directory`] backed by the synchronous `ldap3` client
#[derive(Debug, Clone, Copy, Default)]
pub struct Ldap3Directory;

impl Ldap3Directory {
    pub fn new() -> Self {
        Self
    }
}

impl Directory for Ldap3Directory {
    type Handle = Ldap3Handle;

    fn connect(&self, host: &str, port: u16) -> Result<Ldap3Handle, BoxError> {
        let url = ldap_url(host, port)?;

        debug!("Connecting to LDAP server: {}", url);

        // No connect timeout: only the reachability probe is time-bounded
        let conn = LdapConn::with_settings(LdapConnSettings::new(), url.as_str())?;

        Ok(Ldap3Handle { conn })
    }
}

/// Connection handle owned by a single authentication attempt
pub struct Ldap3Handle {
    conn: LdapConn,
}

impl Ldap3Handle {
    /// `ldap3` always encodes binds as LDAPv3
    pub const SUPPORTED_PROTOCOL_VERSION: u32 = 3;
}

impl DirectoryHandle for Ldap3Handle {
    fn set_protocol_version(&mut self, version: u32) -> Result<(), BoxError> {
        if version != Self::SUPPORTED_PROTOCOL_VERSION {
            return Err(format!(
                "the ldap3 client only supports protocol version {}",
                Self::SUPPORTED_PROTOCOL_VERSION
            )
            .into());
        }
        Ok(())
    }

    fn bind(&mut self, dn: &str, password: &str) -> BindOutcome {
        match self.conn.simple_bind(dn, password) {
            Ok(result) if result.rc == 0 => BindOutcome::Success,
            Ok(result) => BindOutcome::Rejected {
                code: result.rc,
                message: result.text,
            },
            Err(e) => BindOutcome::Raised(Box::new(e)),
        }
    }

    fn release(mut self) {
        if let Err(e) = self.conn.unbind() {
            warn!("LDAP unbind failed: {}", e);
        }
    }
}

/// Build the `ldap://` URL for a host, bracketing bare IPv6 literals
pub(crate) fn ldap_url(host: &str, port: u16) -> Result<Url, BoxError> {
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    };

    let url = Url::parse(&format!("ldap://{}:{}", host, port))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(format!("invalid LDAP host: {:?}", host).into());
    }

    Ok(url)
}
