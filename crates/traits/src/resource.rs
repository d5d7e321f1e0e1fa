//! Loading of card assets (background images, logos, font files).
//!
//! Configuration refers to assets by paths relative to the site's base
//! directory. The renderer only ever sees bytes; where they come from is the
//! provider's business.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },
}

impl ResourceError {
    /// The asset path this error refers to.
    pub fn path(&self) -> Option<&str> {
        match self {
            ResourceError::NotFound(path) => Some(path),
            ResourceError::LoadFailed { path, .. } => Some(path),
        }
    }
}

pub type SharedResourceData = Arc<Vec<u8>>;

/// Source of raw asset bytes.
///
/// Implementations must be shareable across render workers.
pub trait ResourceProvider: Send + Sync + Debug {
    /// Loads the asset stored under `path`.
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    fn exists(&self, path: &str) -> bool;

    /// Directory relative paths are resolved against, if any.
    fn base_path(&self) -> Option<&str> {
        None
    }

    fn name(&self) -> &'static str;
}

/// Assets held in memory, keyed by the path configuration uses for them.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    assets: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `path`, replacing any previous entry.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        self.add_shared(path, Arc::new(data))
    }

    pub fn add_shared(
        &self,
        path: impl Into<String>,
        data: SharedResourceData,
    ) -> Result<(), ResourceError> {
        let path = path.into();
        let mut assets = self.assets.write().map_err(|_| ResourceError::LoadFailed {
            path: path.clone(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets.insert(path, data);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.assets.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let assets = self.assets.read().map_err(|_| ResourceError::LoadFailed {
            path: path.to_string(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.assets
            .read()
            .map(|a| a.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_load_logo_bytes() {
        let provider = InMemoryResourceProvider::new();
        provider.add("images/logo.png", vec![0x89, b'P', b'N', b'G']).unwrap();

        let data = provider.load("images/logo.png").unwrap();
        assert_eq!(&data[1..], b"PNG");
        assert!(provider.exists("images/logo.png"));
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_missing_asset_reports_its_path() {
        let provider = InMemoryResourceProvider::new();
        let err = provider.load("bg.jpg").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
        assert_eq!(err.path(), Some("bg.jpg"));
    }

    #[test]
    fn test_add_overwrites_existing_entry() {
        let provider = InMemoryResourceProvider::new();
        assert!(provider.is_empty());
        provider.add("font.ttf", b"old".to_vec()).unwrap();
        provider.add("font.ttf", b"new".to_vec()).unwrap();
        assert_eq!(&*provider.load("font.ttf").unwrap(), b"new");
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_shared_data_is_not_copied() {
        let provider = InMemoryResourceProvider::new();
        let shared = Arc::new(vec![1, 2, 3]);
        provider.add_shared("a.bin", shared.clone()).unwrap();
        assert!(Arc::ptr_eq(&provider.load("a.bin").unwrap(), &shared));
    }
}
