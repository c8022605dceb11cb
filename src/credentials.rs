//! App id / secret key pair and its `config.json` file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CREDENTIALS_FILE: &str = "config.json";

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub app_id: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.app_id.is_empty() && !self.secret_key.is_empty()
    }

    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(Error::InvalidCredentials)
        }
    }
}

// keep the secret out of logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("secret_key", &"***")
            .finish()
    }
}

pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(CREDENTIALS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file yields empty credentials.
    pub fn load(&self) -> Result<Credentials> {
        if !self.path.exists() {
            tracing::debug!("No credentials file at {}", self.path.display());
            return Ok(Credentials::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        let creds: Credentials = serde_json::from_str(&contents)?;
        tracing::info!("Loaded credentials from {}", self.path.display());
        Ok(creds)
    }

    /// Trims both fields and overwrites the file. Returns what was written.
    pub fn save(&self, creds: &Credentials) -> Result<Credentials> {
        let creds = Credentials::new(creds.app_id.trim(), creds.secret_key.trim());
        creds.ensure_complete()?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let s = serde_json::to_string_pretty(&creds)?;
        fs::write(&self.path, s)?;
        tracing::info!("Saved credentials to {}", self.path.display());
        Ok(creds)
    }
}
