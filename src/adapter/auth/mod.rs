//! Authentication Module
//!
//! データベース認証情報の取得

pub mod chained;
pub mod env_credentials;
pub mod prompt_credentials;

pub use chained::ChainedCredentialProvider;
pub use env_credentials::EnvCredentialProvider;
pub use prompt_credentials::PromptCredentialProvider;
