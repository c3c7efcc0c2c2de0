//! Images (and anything else a generator needs to inline) are fetched by
//! relative path through this trait, so the core never touches the filesystem
//! directly.

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },
}

pub type SharedResourceData = Arc<Vec<u8>>;

pub trait ResourceProvider: Send + Sync + Debug {
    /// Load a resource by its relative path.
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    /// Like [`load`](Self::load), but treats any failure as absence.
    fn fetch(&self, path: &str) -> Option<SharedResourceData> {
        match self.load(path) {
            Ok(data) => Some(data),
            Err(e) => {
                log::debug!("{} could not provide '{}': {}", self.name(), path, e);
                None
            }
        }
    }

    /// Provider name used in log output.
    fn name(&self) -> &'static str;
}

/// Resources held in memory, keyed by path. Useful for tests and for callers
/// that already have their assets loaded.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `path`, replacing any previous entry.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let path = path.into();
        let mut resources = self.resources.write().map_err(|_| ResourceError::LoadFailed {
            path: path.clone(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources.insert(path, Arc::new(data));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self.resources.read().map_err(|_| ResourceError::LoadFailed {
            path: path.to_string(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}

/// Reads resources from a base directory. Paths escaping the base are refused.
#[derive(Debug, Clone)]
pub struct FileResourceProvider {
    base: PathBuf,
}

impl FileResourceProvider {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl ResourceProvider for FileResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let relative = std::path::Path::new(path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(ResourceError::LoadFailed {
                path: path.to_string(),
                message: "path must stay inside the resource directory".to_string(),
            });
        }
        let full = self.base.join(relative);
        match std::fs::read(&full) {
            Ok(bytes) => Ok(Arc::new(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ResourceError::NotFound(path.to_string()))
            }
            Err(e) => Err(ResourceError::LoadFailed {
                path: path.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "FileResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_add_and_load() {
        let provider = InMemoryResourceProvider::new();
        provider.add("img/a.png", b"PNG".to_vec()).unwrap();
        assert_eq!(&*provider.load("img/a.png").unwrap(), b"PNG");
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn missing_resource_is_absent() {
        let provider = InMemoryResourceProvider::new();
        assert!(matches!(provider.load("nope"), Err(ResourceError::NotFound(_))));
        assert!(provider.fetch("nope").is_none());
        assert!(provider.is_empty());
    }

    #[test]
    fn overwrite_replaces_data() {
        let provider = InMemoryResourceProvider::new();
        provider.add("a", b"old".to_vec()).unwrap();
        provider.add("a", b"new".to_vec()).unwrap();
        assert_eq!(&*provider.fetch("a").unwrap(), b"new");
    }

    #[test]
    fn file_provider_refuses_parent_paths() {
        let provider = FileResourceProvider::new(std::env::temp_dir());
        assert!(matches!(
            provider.load("../etc/passwd"),
            Err(ResourceError::LoadFailed { .. })
        ));
        assert!(matches!(
            provider.load("folio-definitely-missing.bin"),
            Err(ResourceError::NotFound(_))
        ));
    }
}
