//! Doctor portrait resolution.

use std::path::{Path, PathBuf};

/// A displayable image, or the placeholder when the asset is unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// `file://` URI for egui's image loaders.
    File(String),
    Placeholder,
}

/// Maps `/images/...` references to files under an asset root.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, reference: &str) -> ImageRef {
        let relative = reference.trim().trim_start_matches('/');
        if relative.is_empty() || relative.split('/').any(|part| part == "..") {
            return ImageRef::Placeholder;
        }

        let path = self.root.join(relative);
        if !path.is_file() {
            tracing::debug!("Asset {:?} missing, using placeholder", path);
            return ImageRef::Placeholder;
        }
        ImageRef::File(format!("file://{}", path.display()))
    }
}
