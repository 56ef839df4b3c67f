use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use super::AuthSession;

/// JSON file holding the signed-in session between CLI invocations.
pub struct IdentityFile {
    path: PathBuf,
}

impl IdentityFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// A missing or unreadable file means nobody is signed in.
    pub fn load(&self) -> Option<AuthSession> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(session) => Some(session),
            Err(err) => {
                log::warn!(
                    "Ignoring unreadable identity file {}: {err}",
                    self.path.display()
                );
                None
            }
        }
    }

    pub fn save(&self, session: &AuthSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write identity to {}", self.path.display()))
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}
