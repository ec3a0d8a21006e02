use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::StoreError;
use crate::models::{FileId, FileItem, fold_case};
use crate::rename_engine::{RenameConfig, RenameEngine};

/// Read access to the ordered file collection.
pub trait FileSource {
    fn files(&self) -> &[FileItem];
}

/// Intents the file list sends back to whoever owns the collection.
pub trait FileCommands {
    fn remove_file(&mut self, id: FileId) -> Result<(), StoreError>;
    fn clear_files(&mut self) -> Result<(), StoreError>;
    fn reorder_files(&mut self, old_index: usize, new_index: usize) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenameOutcome {
    Renamed { id: FileId, from: String, to: String },
    Skipped(FileId),
    AlreadyExists(FileId),
    NoPermission(FileId),
    SourceNotFound(FileId),
    Failed { id: FileId, message: String },
}

impl RenameOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RenameOutcome::Renamed { .. })
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, RenameOutcome::Renamed { .. } | RenameOutcome::Skipped(_))
    }
}

/// Owns the loaded files and keeps their rename preview current.
#[derive(Debug)]
pub struct FileStore {
    files: Vec<FileItem>,
    engine: RenameEngine,
    next_id: u64,
}

impl FileStore {
    pub fn new(config: RenameConfig) -> Result<Self> {
        Ok(Self {
            files: Vec::new(),
            engine: RenameEngine::new(config)?,
            next_id: 1,
        })
    }

    pub fn rename_config(&self) -> &RenameConfig {
        self.engine.config()
    }

    pub fn set_config(&mut self, config: RenameConfig) -> Result<()> {
        self.engine = RenameEngine::new(config)?;
        self.refresh();
        Ok(())
    }

    /// Load files; directories contribute their regular files, sorted by name.
    pub fn add_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        let mut known: HashSet<PathBuf> = self.files.iter().map(|f| f.path.clone()).collect();
        let mut added = 0;

        for path in paths {
            for file_path in expand_path(path.as_ref()) {
                if !known.insert(file_path.clone()) {
                    tracing::warn!("Skipping already loaded file {}", file_path.display());
                    continue;
                }

                let id = FileId(self.next_id);
                self.next_id += 1;
                self.files.push(FileItem::new(id, file_path));
                added += 1;
            }
        }

        if added > 0 {
            tracing::info!("Loaded {} file(s), {} total", added, self.files.len());
            self.refresh();
        }
        added
    }

    pub fn position(&self, id: FileId) -> Option<usize> {
        self.files.iter().position(|f| f.id == id)
    }

    /// Rename every valid, changed file on disk.
    pub async fn apply_renames(&mut self) -> Vec<RenameOutcome> {
        let mut outcomes = Vec::with_capacity(self.files.len());

        for file in self.files.iter_mut() {
            if !file.is_valid() || !file.has_changed() {
                outcomes.push(RenameOutcome::Skipped(file.id));
                continue;
            }

            let target = file
                .path
                .parent()
                .map(|dir| dir.join(&file.new_name))
                .unwrap_or_else(|| PathBuf::from(&file.new_name));

            let outcome = rename_on_disk(file, &target).await;
            if outcome.is_success() {
                tracing::info!("Renamed {} -> {}", file.original_name, file.new_name);
                *file = FileItem::new(file.id, target);
            } else {
                tracing::warn!("Rename of {} failed: {:?}", file.original_name, outcome);
            }
            outcomes.push(outcome);
        }

        self.refresh();
        outcomes
    }

    fn refresh(&mut self) {
        self.engine.preview(&mut self.files);
    }
}

impl FileSource for FileStore {
    fn files(&self) -> &[FileItem] {
        &self.files
    }
}

impl FileCommands for FileStore {
    fn remove_file(&mut self, id: FileId) -> Result<(), StoreError> {
        let index = self.position(id).ok_or(StoreError::UnknownFile(id))?;
        let removed = self.files.remove(index);
        tracing::debug!("Removed {} ({})", removed.original_name, id);
        self.refresh();
        Ok(())
    }

    fn clear_files(&mut self) -> Result<(), StoreError> {
        tracing::debug!("Cleared {} file(s)", self.files.len());
        self.files.clear();
        Ok(())
    }

    fn reorder_files(&mut self, old_index: usize, new_index: usize) -> Result<(), StoreError> {
        let len = self.files.len();
        for index in [old_index, new_index] {
            if index >= len {
                return Err(StoreError::IndexOutOfRange { index, len });
            }
        }

        if old_index == new_index {
            return Ok(());
        }

        let item = self.files.remove(old_index);
        self.files.insert(new_index, item);
        tracing::debug!("Moved file from {} to {}", old_index, new_index);
        self.refresh();
        Ok(())
    }
}

fn expand_path(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    if !path.is_dir() {
        tracing::warn!("Skipping missing path {}", path.display());
        return Vec::new();
    }

    match fs::read_dir(path) {
        Ok(entries) => {
            let mut files: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
                .map(|entry| entry.path())
                .collect();
            files.sort();
            files
        }
        Err(e) => {
            tracing::warn!("Failed to read directory {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

async fn rename_on_disk(file: &FileItem, target: &Path) -> RenameOutcome {
    if tokio::fs::try_exists(target).await.unwrap_or(false) {
        // On case-insensitive filesystems a case-only target resolves to the source itself.
        let case_only = fold_case(&file.original_name) == fold_case(&file.new_name);
        if !case_only || !is_same_file(&file.path, target).await {
            return RenameOutcome::AlreadyExists(file.id);
        }
    }

    match tokio::fs::rename(&file.path, target).await {
        Ok(()) => RenameOutcome::Renamed {
            id: file.id,
            from: file.original_name.clone(),
            to: file.new_name.clone(),
        },
        Err(e) => match e.kind() {
            IoErrorKind::NotFound => RenameOutcome::SourceNotFound(file.id),
            IoErrorKind::PermissionDenied => RenameOutcome::NoPermission(file.id),
            _ => RenameOutcome::Failed {
                id: file.id,
                message: e.to_string(),
            },
        },
    }
}

#[cfg(unix)]
async fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (tokio::fs::metadata(a).await, tokio::fs::metadata(b).await) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
async fn is_same_file(a: &Path, b: &Path) -> bool {
    match (tokio::fs::canonicalize(a).await, tokio::fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
