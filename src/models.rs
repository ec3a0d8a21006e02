use std::fmt;
use std::path::{Path, PathBuf};

/// Stable identifier of a loaded file. Never reused while the item is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Duplicate,
    InvalidChars,
    Other,
}

impl ErrorKind {
    /// Classify a plain-text validation message.
    ///
    /// Producers that only hand out text tag duplicates with "Duplicate" and
    /// malformed names with "invalid"; anything else is a generic error.
    pub fn classify(message: &str) -> Self {
        if message.contains("Duplicate") {
            ErrorKind::Duplicate
        } else if message.contains("invalid") {
            ErrorKind::InvalidChars
        } else {
            ErrorKind::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl RenameError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        let detail = message.into();
        Self {
            kind: ErrorKind::classify(&detail),
            detail,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.kind == ErrorKind::Duplicate
    }
}

impl fmt::Display for RenameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileItem {
    pub id: FileId,
    pub path: PathBuf,
    pub original_name: String,
    pub new_name: String,
    pub extension: String,
    pub error: Option<RenameError>,
    stem: String,
    spelled_extension: String,
}

impl FileItem {
    pub fn new(id: FileId, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let original_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = extension_of(&path);
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        let spelled_extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        Self {
            id,
            path,
            new_name: original_name.clone(),
            original_name,
            extension,
            error: None,
            stem,
            spelled_extension,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn has_changed(&self) -> bool {
        self.new_name != self.original_name
    }

    pub fn is_duplicate(&self) -> bool {
        self.error.as_ref().is_some_and(RenameError::is_duplicate)
    }

    /// Original name without its extension.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Extension as spelled in the original name, dot included.
    pub fn original_extension(&self) -> &str {
        &self.spelled_extension
    }
}

/// Case folding shared by duplicate detection and case-only rename checks.
pub fn fold_case(name: &str) -> String {
    name.to_lowercase()
}

/// Lowercased extension with its leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
