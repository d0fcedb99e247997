use std::env;

/// Resolves the bearer token attached to each battle service request.
pub trait CredentialSource: Send + Sync {
    fn resolve(&self) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialSource for NoCredentials {
    fn resolve(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl CredentialSource for StaticToken {
    fn resolve(&self) -> Option<String> {
        non_empty(&self.0)
    }
}

/// Reads the token from an environment variable at request time, so a token
/// refreshed by another process is picked up without rebuilding the client.
#[derive(Debug, Clone)]
pub struct EnvToken {
    pub var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvToken {
    fn resolve(&self) -> Option<String> {
        env::var(&self.var).ok().and_then(|token| non_empty(&token))
    }
}

fn non_empty(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
