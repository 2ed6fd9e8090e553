// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Shared-secret gate in front of the tracker. It keeps honest users out of
//! each other's lists and nothing more; state lives only in process memory.

pub trait CredentialCheck {
    fn verify(&self, secret: &str) -> bool;
}

/// Accepts everything. Used when no password is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAccess;

impl CredentialCheck for OpenAccess {
    fn verify(&self, _secret: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

impl SessionToken {
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    EmptySecret,
    Rejected,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySecret => f.write_str("password is required -- type it and press enter"),
            Self::Rejected => f.write_str("incorrect password -- try again"),
        }
    }
}

impl std::error::Error for AuthError {}

#[derive(Debug)]
pub struct SessionGate<C> {
    check: C,
    required: bool,
    token: Option<SessionToken>,
    issued: u64,
}

impl<C: CredentialCheck> SessionGate<C> {
    pub fn new(check: C) -> Self {
        Self {
            check,
            required: true,
            token: None,
            issued: 0,
        }
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_authenticated(&self) -> bool {
        !self.required || self.token.is_some()
    }

    pub fn token(&self) -> Option<SessionToken> {
        self.token
    }

    pub fn authenticate(&mut self, secret: &str) -> Result<SessionToken, AuthError> {
        if let Some(token) = self.token {
            return Ok(token);
        }
        if self.required && secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }
        if !self.check.verify(secret) {
            return Err(AuthError::Rejected);
        }
        self.issued += 1;
        let token = SessionToken(self.issued);
        self.token = Some(token);
        Ok(token)
    }

    pub fn sign_out(&mut self) {
        self.token = None;
    }
}

impl SessionGate<OpenAccess> {
    /// Gate that never asks for a password.
    pub fn open() -> Self {
        Self {
            check: OpenAccess,
            required: false,
            token: None,
            issued: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthError, CredentialCheck, SessionGate};

    struct Fixed(&'static str);

    impl CredentialCheck for Fixed {
        fn verify(&self, secret: &str) -> bool {
            secret == self.0
        }
    }

    #[test]
    fn wrong_secret_is_rejected_and_gate_stays_closed() {
        let mut gate = SessionGate::new(Fixed("hunter2"));
        assert!(!gate.is_authenticated());
        assert_eq!(gate.authenticate("nope"), Err(AuthError::Rejected));
        assert_eq!(gate.authenticate(""), Err(AuthError::EmptySecret));
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn correct_secret_opens_session_until_sign_out() -> anyhow::Result<()> {
        let mut gate = SessionGate::new(Fixed("hunter2"));
        let token = gate.authenticate("hunter2")?;
        assert!(gate.is_authenticated());
        assert_eq!(gate.authenticate("anything")?, token);

        gate.sign_out();
        assert!(!gate.is_authenticated());
        let next = gate.authenticate("hunter2")?;
        assert_ne!(next, token);
        Ok(())
    }

    #[test]
    fn open_gate_is_always_authenticated() {
        let gate = SessionGate::open();
        assert!(!gate.is_required());
        assert!(gate.is_authenticated());
    }
}
