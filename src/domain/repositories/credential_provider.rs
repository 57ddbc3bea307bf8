//! # Credential Provider Trait
//!
//! データベース認証情報の取得を抽象化

use std::fmt;

use anyhow::Result;

/// データベース認証情報
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// 認証情報プロバイダ
pub trait CredentialProvider: Send + Sync {
    /// 認証情報を返す。見つからない場合は `None`
    fn credentials(&self) -> Result<Option<Credentials>>;
}
