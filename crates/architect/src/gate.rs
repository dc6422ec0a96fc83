// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Shared-secret access gate.
//!
//! A session starts locked. [`AccessGate::attempt`] unlocks it when the
//! credential check passes; a wrong secret leaves it locked and may be
//! retried any number of times.
//!
//! ```
//! use architect::gate::{AccessGate, StaticSecret};
//!
//! let mut gate = AccessGate::new(StaticSecret::new("letmein"));
//! assert!(gate.attempt("guess").is_err());
//! assert!(!gate.is_authenticated());
//! gate.attempt("letmein").unwrap();
//! assert!(gate.is_authenticated());
//! ```

use crate::error::{Error, Result};

/// Secret used when none is configured.
pub const DEFAULT_SECRET: &str = "password123";

/// Decides whether a presented secret grants access.
pub trait CredentialCheck: Send + Sync {
    /// True when `presented` is acceptable.
    fn verify(&self, presented: &str) -> bool;
}

/// Compares against one fixed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSecret {
    secret: String,
}

impl StaticSecret {
    /// Accept exactly `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Default for StaticSecret {
    fn default() -> Self {
        Self::new(DEFAULT_SECRET)
    }
}

impl CredentialCheck for StaticSecret {
    fn verify(&self, presented: &str) -> bool {
        presented == self.secret
    }
}

impl<F> CredentialCheck for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn verify(&self, presented: &str) -> bool {
        self(presented)
    }
}

/// Authentication state for one session.
pub struct AccessGate {
    check: Option<Box<dyn CredentialCheck>>,
    authenticated: bool,
}

impl AccessGate {
    /// A locked gate guarded by `check`.
    pub fn new(check: impl CredentialCheck + 'static) -> Self {
        Self {
            check: Some(Box::new(check)),
            authenticated: false,
        }
    }

    /// A gate that is always open.
    pub fn open() -> Self {
        Self {
            check: None,
            authenticated: true,
        }
    }

    /// Guard with a static secret; an empty secret opens the gate.
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret {
            Some("") => Self::open(),
            Some(s) => Self::new(StaticSecret::new(s)),
            None => Self::new(StaticSecret::default()),
        }
    }

    /// Present a secret. Fails with [`Error::Auth`] and stays locked when
    /// it is wrong.
    pub fn attempt(&mut self, presented: &str) -> Result<()> {
        let Some(check) = &self.check else {
            return Ok(());
        };

        if check.verify(presented) {
            self.authenticated = true;
            tracing::debug!("access granted");
            Ok(())
        } else {
            tracing::debug!("access denied");
            Err(Error::auth("wrong password"))
        }
    }

    /// Whether the session may use the tools.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Whether a secret is required at all.
    pub fn is_guarded(&self) -> bool {
        self.check.is_some()
    }

    /// Fail with [`Error::Auth`] unless authenticated.
    pub fn require(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(Error::auth("login required"))
        }
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("guarded", &self.is_guarded())
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secret() {
        let mut gate = AccessGate::from_secret(None);
        assert!(!gate.is_authenticated());
        gate.attempt(DEFAULT_SECRET).unwrap();
        assert!(gate.is_authenticated());
    }

    #[test]
    fn test_wrong_secret_has_no_retry_limit() {
        let mut gate = AccessGate::new(StaticSecret::new("s3cret"));
        for _ in 0..100 {
            let err = gate.attempt("nope").unwrap_err();
            assert!(matches!(err, Error::Auth(_)));
            assert!(!gate.is_authenticated());
        }
        gate.attempt("s3cret").unwrap();
        assert!(gate.is_authenticated());
    }

    #[test]
    fn test_near_misses_rejected() {
        let check = StaticSecret::new("abc");
        assert!(!check.verify("abc "));
        assert!(!check.verify("ABC"));
        assert!(!check.verify(""));
        assert!(check.verify("abc"));
    }

    #[test]
    fn test_empty_secret_opens_gate() {
        let gate = AccessGate::from_secret(Some(""));
        assert!(gate.is_authenticated());
        assert!(!gate.is_guarded());
        gate.require().unwrap();
    }

    #[test]
    fn test_require_when_locked() {
        let gate = AccessGate::from_secret(Some("x"));
        assert!(matches!(gate.require(), Err(Error::Auth(_))));
    }

    #[test]
    fn test_closure_check() {
        let mut gate = AccessGate::new(|s: &str| s.len() == 4);
        gate.attempt("abcd").unwrap();
        assert!(gate.is_authenticated());
    }
}
