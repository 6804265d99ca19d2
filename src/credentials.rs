//! Plaintext storage for the endpoint credential.
//!
//! The whole content of one file is the trimmed secret. There is no locking:
//! the store assumes one user and one process.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::observability::CREDENTIAL_SAVES;

/// Default file holding the credential, relative to the working directory.
pub const DEFAULT_CREDENTIAL_FILE: &str = ".delulu_config";

/// Reads and writes the credential file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saves `secret`, trimmed, replacing whatever the file held.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the trimmed secret is empty and
    /// [`Error::Io`] when the file cannot be written.
    pub fn save(&self, secret: &str) -> Result<()> {
        let cleaned = secret.trim();
        if cleaned.is_empty() {
            return Err(Error::validation(
                "API key cannot be empty.",
                Some("api_key".to_string()),
            ));
        }
        fs::write(&self.path, cleaned)
            .map_err(|err| Error::io("failed to write credential file", err))?;
        CREDENTIAL_SAVES.click();
        Ok(())
    }

    /// Loads the trimmed secret.
    ///
    /// Returns `Ok(None)` when the file does not exist or holds only whitespace.
    pub fn load(&self) -> Result<Option<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Error::io("failed to read credential file", err)),
        };
        let secret = content.trim();
        if secret.is_empty() {
            Ok(None)
        } else {
            Ok(Some(secret.to_string()))
        }
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIAL_FILE)
    }
}
