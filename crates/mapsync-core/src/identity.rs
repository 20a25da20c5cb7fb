use crate::error::AuthError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Display;

/// The verified identity behind a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject(String);

impl Subject {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self(user_id.into())
    }

    pub fn user_id(&self) -> &str {
        &self.0
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Verifies bearer tokens issued by an external identity provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync + 'static {
    async fn verify(&self, token: &str) -> Result<Subject, AuthError>;
}

/// A verifier backed by a fixed token table.
///
/// Stands in for the identity provider in development and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityVerifier {
    tokens: HashMap<String, Subject>,
}

impl StaticIdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` as belonging to `user_id`.
    pub fn with_token(mut self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), Subject::new(user_id));
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Subject, AuthError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| AuthError::InvalidToken("token is not recognized".to_string()))
    }
}

/// Used when no identity provider is configured; rejects every token.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledIdentityVerifier;

#[async_trait]
impl IdentityVerifier for DisabledIdentityVerifier {
    async fn verify(&self, _token: &str) -> Result<Subject, AuthError> {
        Err(AuthError::Unavailable(
            "no identity provider configured".to_string(),
        ))
    }
}
