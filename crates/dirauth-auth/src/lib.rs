//! Directory authentication for Dirauth

pub mod ldap;
pub mod probe;

#[cfg(test)]
pub(crate) mod testing;

pub use ldap::{
    classify_bind, AuthClient, BindOutcome, Directory, DirectoryHandle, Ldap3Directory,
    Ldap3Handle,
};
pub use probe::{Probe, ProbeOutcome, TcpProbe};

pub use dirauth_core::{AuthConfig, Error, ErrorKind, Result};
