// Bearer token persistence

use anyhow::Result;
use std::sync::{Mutex, PoisonError};

use crate::config::Config;

/// Persistent client-side storage for the session token
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> Result<()>;
    fn remove(&self) -> Result<()>;
}

/// Token store backed by the `[auth]` section of the config file
pub struct ConfigTokenStore {
    config: Mutex<Config>,
}

impl ConfigTokenStore {
    pub fn new(config: Config) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }

    fn with_config<T>(&self, f: impl FnOnce(&mut Config) -> T) -> T {
        let mut config = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut config)
    }
}

impl TokenStore for ConfigTokenStore {
    fn get(&self) -> Option<String> {
        self.with_config(|config| {
            config
                .is_authenticated()
                .then(|| config.auth.token.clone())
        })
    }

    fn set(&self, token: &str) -> Result<()> {
        self.with_config(|config| {
            config.set_token(token.to_string());
            config.save()
        })?;
        tracing::debug!("Stored session token");
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        self.with_config(|config| {
            if !config.is_authenticated() {
                return Ok(());
            }
            config.clear_token();
            config.save()
        })?;
        tracing::debug!("Removed session token");
        Ok(())
    }
}

/// Token store that lives only as long as the process
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_store_persists_token() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");

        let store = ConfigTokenStore::new(Config::load_from(&path)?);
        assert_eq!(store.get(), None);

        store.set("secret")?;
        assert_eq!(store.get().as_deref(), Some("secret"));

        // A fresh store sees the saved token
        let reopened = ConfigTokenStore::new(Config::load_from(&path)?);
        assert_eq!(reopened.get().as_deref(), Some("secret"));

        reopened.remove()?;
        let reopened = ConfigTokenStore::new(Config::load_from(&path)?);
        assert_eq!(reopened.get(), None);

        Ok(())
    }

    #[test]
    fn test_remove_without_token_does_not_write() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");

        let store = ConfigTokenStore::new(Config::load_from(&path)?);
        store.remove()?;
        assert!(!path.exists());

        Ok(())
    }

    #[test]
    fn test_memory_store() -> Result<()> {
        let store = MemoryTokenStore::default();
        assert_eq!(store.get(), None);
        store.set("t1")?;
        assert_eq!(store.get().as_deref(), Some("t1"));
        store.remove()?;
        assert_eq!(store.get(), None);
        Ok(())
    }
}
