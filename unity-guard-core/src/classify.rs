//! Decide whether a path names a Unity YAML file

use crate::constants::UNITY_FILE_EXTENSIONS;
use std::path::Path;

/// Maps a file extension to "is this a Unity structural file"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnityFileClassifier {
    extensions: Vec<String>,
}

impl UnityFileClassifier {
    /// Classifier for `.unity`, `.prefab` and `.asset`
    pub fn new() -> Self {
        Self::with_extensions(UNITY_FILE_EXTENSIONS.iter().copied())
    }

    /// Classifier for a custom extension set (leading dots are ignored)
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Check the extension of `path`, ignoring case
    pub fn is_unity_file<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|known| *known == ext)
            })
            .unwrap_or(false)
    }
}

impl Default for UnityFileClassifier {
    fn default() -> Self {
        Self::new()
    }
}
