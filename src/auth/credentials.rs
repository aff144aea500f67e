//! Credential table and basic-auth header parsing.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::HashMap;

/// Fixed username -> password table.
///
/// Built once at startup and shared read-only.
#[derive(Clone, Default)]
pub struct CredentialTable {
    accounts: HashMap<String, String>,
}

// Passwords stay out of debug output.
impl std::fmt::Debug for CredentialTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialTable")
            .field("users", &self.accounts.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CredentialTable {
    /// Create a table from username/password pairs.
    pub fn new<I, U, P>(accounts: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            accounts: accounts
                .into_iter()
                .map(|(u, p)| (u.into(), p.into()))
                .collect(),
        }
    }

    /// A table that rejects everyone.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Exact match on both username and password.
    pub fn verify(&self, username: &str, password: &str) -> Option<Identity> {
        match self.accounts.get(username) {
            Some(expected) if expected == password => Some(Identity(username.to_string())),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Authenticated username, attached to a request after the gate passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub String);

impl Identity {
    pub fn username(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse an `Authorization` header value of the form `Basic <base64(user:pass)>`.
///
/// Returns `None` for any other scheme, bad base64, non-UTF-8 payloads, or a
/// payload without a `:` separator. The password may itself contain `:`.
pub fn parse_basic_auth(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// Build an `Authorization` header value for the given pair.
pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}
