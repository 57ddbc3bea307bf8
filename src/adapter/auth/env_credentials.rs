//! Environment Credentials
//!
//! 環境変数から認証情報を読み込む

use anyhow::Result;

use crate::domain::repositories::credential_provider::{CredentialProvider, Credentials};

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads the username/password pair from environment variables
pub struct EnvCredentialProvider {
    user_var: String,
    password_var: String,
    lookup: Lookup,
}

impl EnvCredentialProvider {
    pub fn new(user_var: &str, password_var: &str) -> Self {
        Self::with_lookup(user_var, password_var, |name| std::env::var(name).ok())
    }

    /// Use a custom variable lookup instead of the process environment
    pub fn with_lookup<F>(user_var: &str, password_var: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            user_var: user_var.to_string(),
            password_var: password_var.to_string(),
            lookup: Box::new(lookup),
        }
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn credentials(&self) -> Result<Option<Credentials>> {
        let Some(username) = (self.lookup)(&self.user_var) else {
            return Ok(None);
        };
        let password = (self.lookup)(&self.password_var);
        Ok(Some(Credentials::new(username, password)))
    }
}
