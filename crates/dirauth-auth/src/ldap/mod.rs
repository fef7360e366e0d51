//! LDAP bind authentication module
//!
//! Verifies a DN and password against a directory server in four steps:
//! - TCP reachability probe
//! - Connection handle setup
//! - Protocol version negotiation
//! - Simple bind
//!
//! Each step maps to its own error kind so callers can tell an outage from
//! a bad password.

mod client;
mod directory;

pub use client::{classify_bind, AuthClient};
pub use directory::{BindOutcome, Directory, DirectoryHandle, Ldap3Directory, Ldap3Handle};
