//! Assets read from the site's base directory.
//!
//! Configured paths such as `source/images/logo.png` are joined to the base
//! directory. A leading `/` means "from the site root", not the filesystem
//! root. Resolved paths must stay inside the base directory.

use log::debug;
use ogcard_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct SiteResourceProvider {
    base_dir: PathBuf,
    canonical_base: Option<PathBuf>,
}

impl SiteResourceProvider {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let canonical_base = base_dir.canonicalize().ok();
        Self {
            base_dir,
            canonical_base,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Joins `path` to the base directory, or `None` if it would escape it.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative.is_absolute() || relative.as_os_str().is_empty() {
            return None;
        }
        if relative.components().any(|c| matches!(c, Component::ParentDir)) {
            return None;
        }

        let joined = self.base_dir.join(relative);
        // Symlinks may still point outside; check the real location when it exists.
        if let Ok(canonical) = joined.canonicalize()
            && let Some(base) = &self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }
        Some(joined)
    }
}

impl ResourceProvider for SiteResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve(path).ok_or_else(|| ResourceError::LoadFailed {
            path: path.to_string(),
            message: "path escapes the site directory".to_string(),
        })?;
        debug!("Reading asset '{}' from {}", path, full_path.display());

        std::fs::read(&full_path).map(Arc::new).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ResourceError::NotFound(path.to_string()),
            _ => ResourceError::LoadFailed {
                path: path.to_string(),
                message: e.to_string(),
            },
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(|p| p.is_file())
    }

    fn base_path(&self) -> Option<&str> {
        self.base_dir.to_str()
    }

    fn name(&self) -> &'static str {
        "SiteResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn site() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("source/images")).unwrap();
        fs::write(dir.path().join("source/images/logo.png"), b"logo").unwrap();
        dir
    }

    #[test]
    fn test_loads_relative_asset() {
        let dir = site();
        let provider = SiteResourceProvider::new(dir.path());
        assert_eq!(&*provider.load("source/images/logo.png").unwrap(), b"logo");
        assert!(provider.exists("source/images/logo.png"));
        assert!(provider.base_path().is_some());
    }

    #[test]
    fn test_leading_slash_is_site_relative() {
        let dir = site();
        let provider = SiteResourceProvider::new(dir.path());
        assert_eq!(&*provider.load("/source/images/logo.png").unwrap(), b"logo");
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let dir = site();
        let provider = SiteResourceProvider::new(dir.path());
        let err = provider.load("source/images/bg.jpg").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(ref p) if p == "source/images/bg.jpg"));
        assert!(!provider.exists("source/images/bg.jpg"));
    }

    #[test]
    fn test_directories_do_not_exist_as_assets() {
        let dir = site();
        let provider = SiteResourceProvider::new(dir.path());
        assert!(!provider.exists("source/images"));
        assert!(provider.load("").is_err());
    }

    #[test]
    fn test_traversal_is_rejected() {
        let dir = site();
        let provider = SiteResourceProvider::new(dir.path().join("source"));
        for path in ["../source/images/logo.png", "images/../../x", ".."] {
            assert!(!provider.exists(path), "{} should be rejected", path);
            let err = provider.load(path).unwrap_err();
            assert_eq!(err.path(), Some(path));
        }
    }
}
