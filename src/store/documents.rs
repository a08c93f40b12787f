// src/store/documents.rs
// =============================================================================
// A flat directory of markdown files, one per harvested page.
//
// Opening the store creates the directory (idempotently); nothing else does.
// Call DocumentStore::open once before scraping and hand the store to the
// pipeline.
//
// Files are written as UTF-8 and named "<name>.md". Writing a name that
// already exists replaces the old file.
//
// Writes are atomic: content goes to a temp file inside the store directory,
// which is then renamed over "<name>.md". A failed write leaves the previous
// copy (or nothing) in place, never a truncated file.
// =============================================================================

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

const EXTENSION: &str = "md";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not create document directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    // Makes sure `dir` exists and returns a store rooted there
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: dir.clone(),
                source,
            })?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // Where a document called `name` lives
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, EXTENSION))
    }

    // Writes `content` under `name`, returning the file path
    pub async fn persist(&self, name: &str, content: &str) -> Result<PathBuf, StorageError> {
        let path = self.path_for(name);

        let dir = self.dir.clone();
        let target = path.clone();
        let content = content.to_owned();
        let written = tokio::task::spawn_blocking(move || write_atomic(&dir, &target, &content))
            .await
            .unwrap_or_else(|e| Err(io::Error::new(io::ErrorKind::Other, e)));

        written.map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Saved markdown file");
        Ok(path)
    }
}

// Temp file in the same directory, so the final rename never crosses
// filesystems. Dropping an unpersisted NamedTempFile deletes it.
fn write_atomic(dir: &Path, path: &Path, content: &str) -> io::Result<()> {
    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out").join("docs");

        let store = DocumentStore::open(&dir).await.unwrap();

        assert!(dir.is_dir());
        assert_eq!(store.dir(), dir.as_path());
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        DocumentStore::open(tmp.path()).await.unwrap();
        DocumentStore::open(tmp.path()).await.unwrap();
    }

    #[tokio::test]
    async fn test_persist_writes_markdown_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(tmp.path()).await.unwrap();

        let path = store.persist("doc_intro", "# Intro\n").await.unwrap();

        assert_eq!(path, tmp.path().join("doc_intro.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Intro\n");
    }

    #[tokio::test]
    async fn test_persist_overwrites_existing_document() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(tmp.path()).await.unwrap();

        store.persist("page", "old").await.unwrap();
        let path = store.persist("page", "new").await.unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_persist_leaves_no_temp_files_behind() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(tmp.path()).await.unwrap();

        store.persist("a", "one").await.unwrap();
        store.persist("a", "two").await.unwrap();
        store.persist("b", "three").await.unwrap();

        let mut names: Vec<String> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[tokio::test]
    async fn test_failed_persist_leaves_no_partial_state() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(tmp.path()).await.unwrap();
        // A directory squatting on the target name makes the final rename fail
        let blocker = tmp.path().join("page.md");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep.txt"), "kept").unwrap();

        let err = store.persist("page", "new content").await.unwrap_err();

        assert!(matches!(err, StorageError::Write { .. }));
        let names: Vec<String> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["page.md"]);
        assert!(blocker.is_dir());
        assert_eq!(std::fs::read_to_string(blocker.join("keep.txt")).unwrap(), "kept");
    }

    #[tokio::test]
    async fn test_persist_into_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("docs");
        let store = DocumentStore::open(&dir).await.unwrap();
        std::fs::remove_dir(&dir).unwrap();

        let err = store.persist("page", "text").await.unwrap_err();

        assert!(matches!(err, StorageError::Write { .. }));
    }

    #[tokio::test]
    async fn test_open_fails_when_path_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let err = DocumentStore::open(&file).await.unwrap_err();

        assert!(matches!(err, StorageError::CreateDir { .. }));
    }
}
