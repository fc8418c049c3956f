//! Persistent storage for the identity token and the cached account record.
//!
//! Tiers, in load order: OS keychain, `VINVENTORY_AUTH__TOKEN` (token slot
//! only), then a file under `~/.vinventory/`.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::AuthError;

/// Slot holding the bearer token the request pipeline attaches.
pub const ID_TOKEN_KEY: &str = "id_token";

/// Environment variable consulted when the keychain has no token.
pub const TOKEN_ENV_VAR: &str = "VINVENTORY_AUTH__TOKEN";

pub const DEFAULT_KEYRING_SERVICE: &str = "vinventory-cli";

/// Where a loaded token came from (for `vin auth status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
    Memory,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read/write access to the single `id_token` slot.
///
/// Writes are last-writer-wins; two concurrent refreshes storing tokens is
/// harmless.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if no tier accepted the token.
    fn store(&self, token: &str) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if a stored copy could not be removed.
    fn delete(&self) -> Result<(), AuthError>;

    /// Which tier currently supplies the token.
    fn source(&self) -> Option<TokenSource>;
}

/// Keychain-backed store with an env var and file fallback.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    service: String,
    root: Option<PathBuf>,
    use_keyring: bool,
    env_var: Option<&'static str>,
}

impl CredentialStore {
    /// Store rooted at `~/.vinventory`, using the given keychain service.
    #[must_use]
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
            root: dirs::home_dir().map(|h| h.join(".vinventory")),
            use_keyring: true,
            env_var: Some(TOKEN_ENV_VAR),
        }
    }

    /// File-only store under `root`; no keychain and no env lookup.
    #[must_use]
    pub fn file_only(root: impl Into<PathBuf>) -> Self {
        Self {
            service: DEFAULT_KEYRING_SERVICE.to_string(),
            root: Some(root.into()),
            use_keyring: false,
            env_var: None,
        }
    }

    /// Load a slot from the keychain, falling back to its file.
    #[must_use]
    pub fn load_slot(&self, key: &str) -> Option<String> {
        if let Some(entry) = self.keyring_entry(key)
            && let Ok(value) = entry.get_password()
            && !value.is_empty()
        {
            return Some(value);
        }
        self.load_file(key)
    }

    /// Write a slot to the keychain, falling back to a 0600 file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if both keychain and file fail.
    pub fn store_slot(&self, key: &str, value: &str) -> Result<(), AuthError> {
        if let Some(entry) = self.keyring_entry(key) {
            match entry.set_password(value) {
                Ok(()) => return Ok(()),
                Err(error) => {
                    tracing::warn!(%error, slot = key, "keyring store failed; falling back to file");
                }
            }
        }
        self.store_file(key, value)
    }

    /// Remove a slot from the keychain and disk.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the slot file cannot be removed.
    pub fn delete_slot(&self, key: &str) -> Result<(), AuthError> {
        if let Some(entry) = self.keyring_entry(key) {
            let _ = entry.delete_credential();
        }

        let path = self.slot_path(key)?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    fn keyring_entry(&self, key: &str) -> Option<keyring::Entry> {
        if !self.use_keyring {
            return None;
        }
        match keyring::Entry::new(&self.service, key) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, slot = key, "keyring unavailable");
                None
            }
        }
    }

    fn env_token(&self) -> Option<String> {
        self.env_var
            .and_then(|name| std::env::var(name).ok())
            .filter(|t| !t.is_empty())
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, AuthError> {
        self.root.as_ref().map(|root| root.join(key)).ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found, cannot store credentials".into())
        })
    }

    fn store_file(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let path = self.slot_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(&path, value)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    fn load_file(&self, key: &str) -> Option<String> {
        let path = self.slot_path(key).ok()?;
        fs::read_to_string(&path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

impl TokenStore for CredentialStore {
    fn load(&self) -> Option<String> {
        if let Some(entry) = self.keyring_entry(ID_TOKEN_KEY)
            && let Ok(token) = entry.get_password()
            && !token.is_empty()
        {
            return Some(token);
        }
        if let Some(token) = self.env_token() {
            return Some(token);
        }
        self.load_file(ID_TOKEN_KEY)
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        self.store_slot(ID_TOKEN_KEY, token)
    }

    fn delete(&self) -> Result<(), AuthError> {
        self.delete_slot(ID_TOKEN_KEY)
    }

    fn source(&self) -> Option<TokenSource> {
        if let Some(entry) = self.keyring_entry(ID_TOKEN_KEY)
            && entry.get_password().is_ok_and(|t| !t.is_empty())
        {
            return Some(TokenSource::Keyring);
        }
        if self.env_token().is_some() {
            return Some(TokenSource::Env);
        }
        if self.load_file(ID_TOKEN_KEY).is_some() {
            return Some(TokenSource::File);
        }
        None
    }
}

/// Process-local store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        let mut slot = self
            .token
            .lock()
            .map_err(|e| AuthError::TokenStoreError(format!("token lock poisoned: {e}")))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), AuthError> {
        let mut slot = self
            .token
            .lock()
            .map_err(|e| AuthError::TokenStoreError(format!("token lock poisoned: {e}")))?;
        *slot = None;
        Ok(())
    }

    fn source(&self) -> Option<TokenSource> {
        self.load().map(|_| TokenSource::Memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_root_is_under_home() {
        let store = CredentialStore::new(DEFAULT_KEYRING_SERVICE);
        let path = store.slot_path(ID_TOKEN_KEY).expect("should resolve");
        assert!(path.ends_with(".vinventory/id_token"));
    }

    #[test]
    fn file_store_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = CredentialStore::file_only(tmp.path().join("creds"));

        assert!(store.load().is_none());
        assert!(store.source().is_none());

        store.store("header.payload.sig").expect("store");
        assert_eq!(store.load().as_deref(), Some("header.payload.sig"));
        assert_eq!(store.source(), Some(TokenSource::File));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let file_mode = fs::metadata(tmp.path().join("creds/id_token"))
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(file_mode, 0o600, "token file should be 0600");
            let dir_mode = fs::metadata(tmp.path().join("creds"))
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(dir_mode, 0o700, "credential dir should be 0700");
        }

        store.delete().expect("delete");
        assert!(store.load().is_none());
        assert!(!tmp.path().join("creds/id_token").exists());
    }

    #[test]
    fn slots_are_independent() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = CredentialStore::file_only(tmp.path());

        store.store_slot("account", r#"{"username":"a"}"#).expect("store");
        store.store("token").expect("store");
        store.delete_slot("account").expect("delete");

        assert!(store.load_slot("account").is_none());
        assert_eq!(store.load().as_deref(), Some("token"));
    }

    #[test]
    fn whitespace_only_file_is_ignored() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        fs::write(tmp.path().join(ID_TOKEN_KEY), "   \n  ").expect("write");
        let store = CredentialStore::file_only(tmp.path());
        assert!(store.load().is_none());
    }

    #[test]
    fn deleting_missing_slot_is_ok() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = CredentialStore::file_only(tmp.path());
        assert!(store.delete().is_ok());
    }

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryTokenStore::with_token("first");
        store.store("second").expect("store");
        assert_eq!(store.load().as_deref(), Some("second"));
        assert_eq!(store.source(), Some(TokenSource::Memory));

        store.delete().expect("delete");
        assert!(store.load().is_none());
        assert!(store.source().is_none());
    }
}
