//! Image assets referenced by the dashboard pages

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{DashboardError, Result};

pub const OPORTO_LOGO: &str = "oporto_logo.png";
pub const SHEBA_LOGO: &str = "sheba_logo.png";
pub const FLOW_DIAGRAM: &str = "data_processing_diagram1.svg";

pub const REQUIRED: [&str; 3] = [OPORTO_LOGO, SHEBA_LOGO, FLOW_DIAGRAM];

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "svg", "jpg", "jpeg"];

/// Directory that relative image names are resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRoot {
    dir: PathBuf,
}

impl AssetRoot {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DashboardError::AssetRoot(dir));
        }
        Ok(Self { dir })
    }

    /// Directory holding the running executable, falling back to the
    /// current directory
    pub fn beside_executable() -> Result<Self> {
        let exe = std::env::current_exe()?;
        match exe.parent() {
            Some(dir) => Self::new(dir),
            None => Self::new(std::env::current_dir()?),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Resolved path for display; logs when the file is absent
    pub fn image_path(&self, name: &str) -> String {
        let path = self.resolve(name);
        if !path.is_file() {
            warn!(asset = %path.display(), "image asset not found");
        }
        path.display().to_string()
    }

    /// All image files below the root, sorted
    pub fn discover(&self) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = WalkDir::new(&self.dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                p.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.to_ascii_lowercase())
                    .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
            })
            .collect();
        found.sort();
        found
    }

    /// Required assets that are not present directly under the root
    pub fn missing(&self) -> Vec<&'static str> {
        REQUIRED
            .iter()
            .copied()
            .filter(|name| !self.resolve(name).is_file())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn rejects_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = AssetRoot::new(tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, DashboardError::AssetRoot(_)));
    }

    #[test]
    fn discovers_images_and_reports_missing() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(SHEBA_LOGO), b"png").unwrap();
        fs::create_dir(tmp.path().join("extra")).unwrap();
        fs::write(tmp.path().join("extra").join("chart.SVG"), b"<svg/>").unwrap();
        fs::write(tmp.path().join("notes.txt"), b"text").unwrap();

        let root = AssetRoot::new(tmp.path()).unwrap();
        let found: Vec<String> = root
            .discover()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(found, vec!["chart.SVG", SHEBA_LOGO]);
        assert_eq!(root.missing(), vec![OPORTO_LOGO, FLOW_DIAGRAM]);
    }
}
