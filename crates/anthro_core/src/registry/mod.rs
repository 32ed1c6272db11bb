//! Trainer registry backed by a JSON file
//!
//! A flat map of registered trainer emails to their registration timestamp.
//! A missing file reads as an empty registry; registration is idempotent.
//! Only a minimal sanity check is applied to the email itself.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Registry file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid email: {email}")]
    InvalidEmail { email: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredTrainer {
    pub registered_at: String,
}

/// File-backed allow-list of trainer emails
#[derive(Debug)]
pub struct TrainerRegistry {
    path: PathBuf,
    entries: BTreeMap<String, RegisteredTrainer>,
}

impl TrainerRegistry {
    /// Load from `path`; a missing file yields an empty registry.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn is_registered(&self, email: &str) -> bool {
        self.entries.contains_key(email)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register an email and persist the registry.
    ///
    /// Returns false when the email was already present (the file is left
    /// untouched in that case).
    pub fn register(&mut self, email: &str) -> Result<bool, RegistryError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(RegistryError::InvalidEmail {
                email: email.to_string(),
            });
        }
        if self.entries.contains_key(email) {
            return Ok(false);
        }
        self.entries.insert(
            email.to_string(),
            RegisteredTrainer {
                registered_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            },
        );
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<(), RegistryError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
