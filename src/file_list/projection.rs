use crate::models::{ErrorKind, FileId, FileItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconCategory {
    Image,
    Video,
    Audio,
    Document,
    Code,
    Archive,
    Generic,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "ico"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "flv", "wmv"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "aac", "m4a", "wma"];
const DOCUMENT_EXTENSIONS: &[&str] = &["txt", "md", "doc", "docx", "pdf", "rtf"];
const CODE_EXTENSIONS: &[&str] = &[
    "js", "ts", "jsx", "tsx", "html", "css", "json", "py", "java", "cpp", "c", "h",
];
const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "tar", "gz"];

impl IconCategory {
    /// Case-insensitive lookup; the leading dot is optional.
    pub fn from_extension(extension: &str) -> Self {
        let ext = extension.trim_start_matches('.').to_lowercase();
        let table = [
            (IMAGE_EXTENSIONS, IconCategory::Image),
            (VIDEO_EXTENSIONS, IconCategory::Video),
            (AUDIO_EXTENSIONS, IconCategory::Audio),
            (DOCUMENT_EXTENSIONS, IconCategory::Document),
            (CODE_EXTENSIONS, IconCategory::Code),
            (ARCHIVE_EXTENSIONS, IconCategory::Archive),
        ];

        table
            .iter()
            .find(|(extensions, _)| extensions.contains(&ext.as_str()))
            .map(|(_, category)| *category)
            .unwrap_or(IconCategory::Generic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Duplicate,
    InvalidName,
    Error,
    Confirmed,
}

/// Row styling class, from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTone {
    Duplicate,
    Invalid,
    Changed,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowDisplay<'a> {
    pub id: FileId,
    pub position: String,
    pub icon: IconCategory,
    pub original_name: &'a str,
    pub strikethrough_original: bool,
    pub highlighted_new: Option<&'a str>,
    pub status: Option<StatusIcon>,
    pub tone: RowTone,
    pub tooltip: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BadgeCounts {
    pub changed: usize,
    pub duplicates: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListView<'a> {
    Empty,
    Populated {
        total: usize,
        counts: BadgeCounts,
        rows: Vec<RowDisplay<'a>>,
    },
}

impl ListView<'_> {
    pub fn counts(&self) -> Option<BadgeCounts> {
        match self {
            ListView::Empty => None,
            ListView::Populated { counts, .. } => Some(*counts),
        }
    }
}

pub fn project(files: &[FileItem]) -> ListView<'_> {
    if files.is_empty() {
        return ListView::Empty;
    }

    ListView::Populated {
        total: files.len(),
        counts: badge_counts(files),
        rows: files
            .iter()
            .enumerate()
            .map(|(index, file)| project_row(index, file))
            .collect(),
    }
}

pub fn project_row(index: usize, file: &FileItem) -> RowDisplay<'_> {
    let changed = file.has_changed();

    RowDisplay {
        id: file.id,
        position: format_position(index),
        icon: IconCategory::from_extension(&file.extension),
        original_name: &file.original_name,
        strikethrough_original: changed,
        highlighted_new: changed.then_some(file.new_name.as_str()),
        status: status_icon(file),
        tone: row_tone(file),
        tooltip: file.error.as_ref().map(|e| e.detail.as_str()),
    }
}

pub fn badge_counts(files: &[FileItem]) -> BadgeCounts {
    BadgeCounts {
        changed: files.iter().filter(|f| f.has_changed()).count(),
        duplicates: files.iter().filter(|f| f.is_duplicate()).count(),
        errors: files
            .iter()
            .filter(|f| !f.is_valid() && !f.is_duplicate())
            .count(),
    }
}

pub fn format_position(index: usize) -> String {
    format!("{:02}", index + 1)
}

fn status_icon(file: &FileItem) -> Option<StatusIcon> {
    match &file.error {
        Some(error) => Some(match error.kind {
            ErrorKind::Duplicate => StatusIcon::Duplicate,
            ErrorKind::InvalidChars => StatusIcon::InvalidName,
            ErrorKind::Other => StatusIcon::Error,
        }),
        None if file.has_changed() => Some(StatusIcon::Confirmed),
        None => None,
    }
}

fn row_tone(file: &FileItem) -> RowTone {
    match &file.error {
        Some(error) if error.is_duplicate() => RowTone::Duplicate,
        Some(_) => RowTone::Invalid,
        None if file.has_changed() => RowTone::Changed,
        None => RowTone::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_padding() {
        assert_eq!(format_position(0), "01");
        assert_eq!(format_position(9), "10");
        assert_eq!(format_position(99), "100");
    }

    #[test]
    fn test_icon_lookup_ignores_case_and_dot() {
        assert_eq!(IconCategory::from_extension(".PNG"), IconCategory::Image);
        assert_eq!(IconCategory::from_extension("mkv"), IconCategory::Video);
        assert_eq!(IconCategory::from_extension(".Flac"), IconCategory::Audio);
        assert_eq!(IconCategory::from_extension(".md"), IconCategory::Document);
        assert_eq!(IconCategory::from_extension(".h"), IconCategory::Code);
        assert_eq!(IconCategory::from_extension(".7z"), IconCategory::Archive);
        assert_eq!(IconCategory::from_extension(".exe"), IconCategory::Generic);
        assert_eq!(IconCategory::from_extension(""), IconCategory::Generic);
    }
}
