//! Interactive Credentials
//!
//! 対話的に認証情報を入力する

use anyhow::{bail, Context, Result};
use std::io::{BufRead, BufReader, Stderr, Stdin, Write};
use std::sync::Mutex;

use crate::domain::repositories::credential_provider::{CredentialProvider, Credentials};

/// Prompts for a username and password on a terminal-like stream pair
pub struct PromptCredentialProvider<R, W> {
    label: String,
    input: Mutex<R>,
    output: Mutex<W>,
}

impl PromptCredentialProvider<BufReader<Stdin>, Stderr> {
    /// Prompt on stderr, read from stdin
    pub fn stdio(label: &str) -> Self {
        Self::new(label, BufReader::new(std::io::stdin()), std::io::stderr())
    }
}

impl<R: BufRead + Send, W: Write + Send> PromptCredentialProvider<R, W> {
    pub fn new(label: &str, input: R, output: W) -> Self {
        Self {
            label: label.to_string(),
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    fn ask(&self, prompt: &str) -> Result<String> {
        {
            let mut output = self
                .output
                .lock()
                .map_err(|_| anyhow::anyhow!("prompt output lock poisoned"))?;
            write!(output, "{} {}:", self.label, prompt)?;
            output.flush()?;
        }

        let mut line = String::new();
        self.input
            .lock()
            .map_err(|_| anyhow::anyhow!("prompt input lock poisoned"))?
            .read_line(&mut line)
            .context("Failed to read from prompt")?;

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead + Send, W: Write + Send> CredentialProvider for PromptCredentialProvider<R, W> {
    fn credentials(&self) -> Result<Option<Credentials>> {
        let username = self.ask("username")?;
        if username.trim().is_empty() {
            bail!("No username entered");
        }

        let password = self.ask("password")?;
        let password = (!password.is_empty()).then_some(password);

        Ok(Some(Credentials::new(username.trim(), password)))
    }
}
