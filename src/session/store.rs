//! Persisted client state
//!
//! Holds the single active [`Credential`] and a small key/value map of other
//! local state (last looked-up symbol and the like). Both live in one YAML
//! file next to the config file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::credential::Credential;
use crate::error::{Result, StoreError};

/// Storage for the credential and other client-persisted state.
///
/// Reads never fail: a missing, unreadable or expired credential reads as
/// absent. Writes replace the previous value as a whole.
pub trait ClientStore: Send + Sync {
    /// The active credential, if one is stored and not expired
    fn credential(&self) -> Option<Credential>;

    /// Replace the active credential
    fn set_credential(&self, credential: Credential) -> Result<()>;

    fn clear_credential(&self) -> Result<()>;

    fn local_item(&self, key: &str) -> Option<String>;

    fn set_local_item(&self, key: &str, value: &str) -> Result<()>;

    /// Drop every local item; the credential is left alone
    fn clear_local(&self) -> Result<()>;
}

/// On-disk layout of the client store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreContents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credential: Option<Credential>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    local: BTreeMap<String, String>,
}

/// YAML-file backed client store
pub struct FileClientStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileClientStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<StoreContents> {
        if !self.path.exists() {
            return Ok(StoreContents::default());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| StoreError::Read {
            path: self.display_path(),
            message: e.to_string(),
        })?;

        let parsed = serde_yaml::from_str::<Option<StoreContents>>(&contents).map_err(|e| {
            StoreError::Corrupt {
                path: self.display_path(),
                message: e.to_string(),
            }
        })?;

        Ok(parsed.unwrap_or_default())
    }

    /// Load, falling back to empty contents (with a warning) when the file
    /// can't be read
    fn load_or_default(&self) -> StoreContents {
        self.load().unwrap_or_else(|err| {
            log::warn!("{}; treating client store as empty", err);
            StoreContents::default()
        })
    }

    fn write_error(&self, err: impl std::fmt::Display) -> StoreError {
        StoreError::Write {
            path: self.display_path(),
            message: err.to_string(),
        }
    }

    /// Write via a temp file and rename so readers never see a partial file
    fn save(&self, contents: &StoreContents) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let serialized = serde_yaml::to_string(contents).map_err(|e| self.write_error(e))?;

        let tmp_path = self.path.with_extension("yaml.tmp");
        std::fs::write(&tmp_path, serialized).map_err(|e| self.write_error(e))?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&tmp_path)
                .map_err(|e| self.write_error(e))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&tmp_path, perms).map_err(|e| self.write_error(e))?;
        }

        std::fs::rename(&tmp_path, &self.path).map_err(|e| self.write_error(e))?;
        Ok(())
    }

    fn update(&self, mutate: impl FnOnce(&mut StoreContents)) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut contents = self.load_or_default();
        mutate(&mut contents);
        self.save(&contents)
    }
}

impl ClientStore for FileClientStore {
    fn credential(&self) -> Option<Credential> {
        self.load_or_default()
            .credential
            .filter(|credential| !credential.is_expired())
    }

    fn set_credential(&self, credential: Credential) -> Result<()> {
        self.update(|contents| contents.credential = Some(credential))
    }

    fn clear_credential(&self) -> Result<()> {
        self.update(|contents| contents.credential = None)
    }

    fn local_item(&self, key: &str) -> Option<String> {
        self.load_or_default().local.get(key).cloned()
    }

    fn set_local_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|contents| {
            contents.local.insert(key.to_string(), value.to_string());
        })
    }

    fn clear_local(&self) -> Result<()> {
        self.update(|contents| contents.local.clear())
    }
}

/// In-memory client store
#[cfg(test)]
#[derive(Default)]
pub struct MemoryClientStore {
    contents: Mutex<StoreContents>,
}

#[cfg(test)]
impl MemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a credential regardless of its expiry
    pub fn with_credential(self, credential: Credential) -> Self {
        self.lock().credential = Some(credential);
        self
    }

    /// Raw stored credential, expired or not
    pub fn stored_credential(&self) -> Option<Credential> {
        self.lock().credential.clone()
    }

    pub fn local_len(&self) -> usize {
        self.lock().local.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreContents> {
        self.contents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
impl ClientStore for MemoryClientStore {
    fn credential(&self) -> Option<Credential> {
        self.lock()
            .credential
            .clone()
            .filter(|credential| !credential.is_expired())
    }

    fn set_credential(&self, credential: Credential) -> Result<()> {
        self.lock().credential = Some(credential);
        Ok(())
    }

    fn clear_credential(&self) -> Result<()> {
        self.lock().credential = None;
        Ok(())
    }

    fn local_item(&self, key: &str) -> Option<String> {
        self.lock().local.get(key).cloned()
    }

    fn set_local_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock().local.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear_local(&self) -> Result<()> {
        self.lock().local.clear();
        Ok(())
    }
}
