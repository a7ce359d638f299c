//! Local filesystem adapters for the file-source and input ports.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use walkdir::WalkDir;

use super::ports::{AssetProbe, BrowseResult, FolderBrowser, InputDocument, InputSource, SourceError};

// =============================================================================
// Asset Probe
// =============================================================================

/// Probes paths relative to a fixed data root, like a HEAD request against the host's data folder.
pub struct LocalAssetProbe {
    root: PathBuf,
}

impl LocalAssetProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetProbe for LocalAssetProbe {
    async fn probe_exists(&self, path: &str) -> bool {
        let Some(relative) = safe_relative(path) else {
            tracing::debug!(path, "Rejected probe outside the data root");
            return false;
        };
        let full = self.root.join(relative);
        match tokio::fs::metadata(&full).await {
            Ok(meta) => meta.is_file(),
            Err(_) => false,
        }
    }
}

/// Only plain relative paths without `..` stay inside the root.
fn safe_relative(path: &str) -> Option<&Path> {
    let path = Path::new(path);
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        .then_some(path)
}

// =============================================================================
// Folder Browser
// =============================================================================

/// Lists every file below a folder of the data root.
pub struct LocalFolderBrowser {
    data_root: PathBuf,
}

impl LocalFolderBrowser {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }
}

#[async_trait]
impl FolderBrowser for LocalFolderBrowser {
    async fn browse(&self, root: &str) -> Result<BrowseResult, SourceError> {
        let relative =
            safe_relative(root).ok_or_else(|| SourceError::InvalidPath(root.to_string()))?;
        let base = self.data_root.join(relative);
        if !base.is_dir() {
            return Err(SourceError::NotFound(base.display().to_string()));
        }

        let data_root = self.data_root.clone();
        let walk_base = base.clone();
        let files = tokio::task::spawn_blocking(move || list_files(&data_root, &walk_base))
            .await
            .map_err(|e| SourceError::io(base.display(), e))??;

        tracing::debug!(root, count = files.len(), "Browsed image folder");
        Ok(BrowseResult {
            root: slash_join(relative),
            files,
        })
    }
}

/// Files under `base`, as `/`-joined paths relative to `data_root`, sorted for stable output.
fn list_files(data_root: &Path, base: &Path) -> Result<Vec<String>, SourceError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(base).follow_links(true) {
        let entry = entry.map_err(|e| SourceError::io(base.display(), e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(data_root).unwrap_or(entry.path());
        files.push(slash_join(relative));
    }
    files.sort();
    Ok(files)
}

/// `/`-joined normal components of `path`; `.` segments are dropped, so `"."` becomes `""`.
fn slash_join(path: &Path) -> String {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// =============================================================================
// Input Source
// =============================================================================

/// Reads a characters document from a UTF-8 file.
pub struct FileInputSource {
    path: PathBuf,
}

impl FileInputSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl InputSource for FileInputSource {
    async fn read_text(&self) -> Result<InputDocument, SourceError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    SourceError::NotFound(self.path.display().to_string())
                }
                _ => SourceError::io(self.path.display(), e),
            })?;
        let label = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        Ok(InputDocument { label, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, relative: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, b"x").expect("write file");
    }

    #[tokio::test]
    async fn probe_finds_existing_files_only() {
        let dir = TempDir::new().expect("tempdir");
        touch(dir.path(), "assets/chars/mira.png");
        let probe = LocalAssetProbe::new(dir.path());

        assert!(probe.probe_exists("assets/chars/mira.png").await);
        assert!(!probe.probe_exists("assets/chars/adrian.png").await);
        assert!(!probe.probe_exists("assets/chars").await);
    }

    #[tokio::test]
    async fn probe_rejects_escaping_paths() {
        let dir = TempDir::new().expect("tempdir");
        touch(dir.path(), "inside.png");
        let probe = LocalAssetProbe::new(dir.path().join("sub"));

        assert!(!probe.probe_exists("../inside.png").await);
        assert!(!probe.probe_exists("/etc/passwd").await);
    }

    #[tokio::test]
    async fn browse_lists_nested_files_relative_to_data_root() {
        let dir = TempDir::new().expect("tempdir");
        touch(dir.path(), "images/mira.png");
        touch(dir.path(), "images/tokens/mira token.png");
        touch(dir.path(), "other/ignored.png");
        let browser = LocalFolderBrowser::new(dir.path());

        let result = browser.browse("images").await.expect("browse");

        assert_eq!(result.root, "images");
        assert_eq!(
            result.files,
            vec![
                "images/mira.png".to_string(),
                "images/tokens/mira token.png".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn browse_root_is_normalized_like_listed_paths() {
        let dir = TempDir::new().expect("tempdir");
        touch(dir.path(), "portraits/mira.png");
        let browser = LocalFolderBrowser::new(dir.path());

        let dotted = browser.browse("./portraits").await.expect("browse");
        assert_eq!(dotted.root, "portraits");
        assert_eq!(dotted.files, vec!["portraits/mira.png".to_string()]);

        let current = browser.browse(".").await.expect("browse");
        assert_eq!(current.root, "");
        assert_eq!(current.files, vec!["portraits/mira.png".to_string()]);

        let trailing = browser.browse("portraits/").await.expect("browse");
        assert_eq!(trailing.root, "portraits");
    }

    #[tokio::test]
    async fn browse_missing_folder_is_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let browser = LocalFolderBrowser::new(dir.path());
        let err = browser.browse("nope").await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn input_source_reads_text_and_label() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("characters.json");
        fs::write(&path, "[]").expect("write");

        let doc = FileInputSource::new(&path).read_text().await.expect("read");

        assert_eq!(doc.label, "characters.json");
        assert_eq!(doc.text, "[]");
    }
}
