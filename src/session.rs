//! Session Token Storage
//!
//! The session token is an opaque string issued by the backend at login.
//! It is attached to every outgoing request and deleted once the backend
//! reports the session is over.

use std::sync::RwLock;

use crate::error::{ApiError, ApiResult};

/// Storage for the session token
pub trait TokenStore: Send + Sync {
    /// Current token, if any
    fn get(&self) -> Option<String>;

    /// Replace the stored token
    fn set(&self, token: &str) -> ApiResult<()>;

    /// Delete the stored token
    fn clear(&self) -> ApiResult<()>;
}

/// `Authorization` header value for the stored token, if one is present
pub fn bearer_header(store: &dyn TokenStore) -> Option<String> {
    store
        .get()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .map(|t| format!("Bearer {}", t))
}

/// In-memory token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn set(&self, token: &str) -> ApiResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|e| ApiError::Session(e.to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|e| ApiError::Session(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(feature = "client")]
pub use file::FileTokenStore;

#[cfg(feature = "client")]
mod file {
    use std::path::{Path, PathBuf};

    use super::TokenStore;
    use crate::error::{ApiError, ApiResult};

    /// Token persisted in a single file, shared between CLI invocations
    #[derive(Debug, Clone)]
    pub struct FileTokenStore {
        path: PathBuf,
    }

    impl FileTokenStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl TokenStore for FileTokenStore {
        fn get(&self) -> Option<String> {
            match std::fs::read_to_string(&self.path) {
                Ok(contents) => {
                    let token = contents.trim();
                    (!token.is_empty()).then(|| token.to_string())
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => {
                    tracing::warn!("Failed to read token file {:?}: {}", self.path, e);
                    None
                }
            }
        }

        fn set(&self, token: &str) -> ApiResult<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ApiError::Session(e.to_string()))?;
            }
            std::fs::write(&self.path, token.trim())
                .map_err(|e| ApiError::Session(e.to_string()))?;
            tracing::debug!("Stored session token in {:?}", self.path);
            Ok(())
        }

        fn clear(&self) -> ApiResult<()> {
            match std::fs::remove_file(&self.path) {
                Ok(()) => {
                    tracing::debug!("Removed session token {:?}", self.path);
                    Ok(())
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(ApiError::Session(e.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(store.get().is_none());
        assert!(bearer_header(&store).is_none());

        store.set("abc123").unwrap();
        assert_eq!(bearer_header(&store).as_deref(), Some("Bearer abc123"));

        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_blank_token_has_no_header() {
        let store = MemoryTokenStore::with_token("   ");
        assert!(bearer_header(&store).is_none());
    }

    #[cfg(feature = "client")]
    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));

        assert!(store.get().is_none());
        store.clear().unwrap();

        store.set("tok-1\n").unwrap();
        assert_eq!(store.get().as_deref(), Some("tok-1"));

        let second = FileTokenStore::new(store.path());
        assert_eq!(second.get().as_deref(), Some("tok-1"));

        store.clear().unwrap();
        assert!(second.get().is_none());
    }
}
