//! Chained Credentials
//!
//! 複数のプロバイダを順に試し、最初に得た認証情報を保持する

use anyhow::Result;
use std::sync::Mutex;

use crate::domain::repositories::credential_provider::{CredentialProvider, Credentials};

/// Tries each provider in order and caches the first hit for the rest of the run
pub struct ChainedCredentialProvider {
    providers: Vec<Box<dyn CredentialProvider>>,
    cached: Mutex<Option<Credentials>>,
}

impl ChainedCredentialProvider {
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self {
            providers,
            cached: Mutex::new(None),
        }
    }
}

impl CredentialProvider for ChainedCredentialProvider {
    fn credentials(&self) -> Result<Option<Credentials>> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| anyhow::anyhow!("credential cache lock poisoned"))?;
        if let Some(creds) = cached.as_ref() {
            return Ok(Some(creds.clone()));
        }

        for provider in &self.providers {
            if let Some(creds) = provider.credentials()? {
                *cached = Some(creds.clone());
                return Ok(Some(creds));
            }
        }

        Ok(None)
    }
}
