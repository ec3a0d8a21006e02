use std::collections::HashMap;

use anyhow::Result;
use regex::Regex;

use crate::models::{ErrorKind, FileItem, RenameError, fold_case};

#[derive(Debug, Clone, PartialEq)]
pub struct RenameConfig {
    pub pattern: String,
    pub start_number: u32,
    pub pad_width: Option<usize>,
    pub sanitize: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            start_number: 1,
            pad_width: None,
            sanitize: false,
        }
    }
}

/// Computes new names for an ordered batch and validates them.
#[derive(Debug)]
pub struct RenameEngine {
    config: RenameConfig,
    invalid_chars: Regex,
}

impl RenameEngine {
    pub fn new(config: RenameConfig) -> Result<Self> {
        let invalid_chars = Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#)?;

        Ok(Self {
            config,
            invalid_chars,
        })
    }

    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    /// Recompute `new_name` and `error` for every file, in collection order.
    pub fn preview(&self, files: &mut [FileItem]) {
        let width = self.number_width(files.len());

        for (index, file) in files.iter_mut().enumerate() {
            file.new_name = self.render_name(file, index, width);
            file.error = self.validate_name(&file.new_name, file.original_extension());
        }

        self.flag_duplicates(files);
    }

    pub fn render_name(&self, file: &FileItem, index: usize, width: usize) -> String {
        if self.config.pattern.is_empty() {
            return file.original_name.clone();
        }

        let number = u64::from(self.config.start_number) + index as u64;
        let extension = file.original_extension();
        let bare_extension = extension.trim_start_matches('.');

        let mut name = self
            .config
            .pattern
            .replace("{name}", file.stem())
            .replace("{n}", &format!("{:0width$}", number, width = width))
            .replace("{ext}", bare_extension);

        if !self.config.pattern.contains("{ext}") {
            name.push_str(extension);
        }

        if self.config.sanitize {
            name = sanitize_filename(&name);
        }

        name
    }

    pub fn validate_name(&self, name: &str, extension: &str) -> Option<RenameError> {
        if self.invalid_chars.is_match(name) {
            return Some(RenameError::new(
                ErrorKind::InvalidChars,
                "Name contains invalid characters",
            ));
        }

        let stem = name.strip_suffix(extension).unwrap_or(name);
        if stem.trim().is_empty() {
            return Some(RenameError::new(ErrorKind::Other, "Name cannot be empty"));
        }

        if name.ends_with('.') || name.ends_with(' ') {
            return Some(RenameError::new(
                ErrorKind::Other,
                "Name cannot end with a dot or space",
            ));
        }

        None
    }

    fn number_width(&self, count: usize) -> usize {
        if let Some(width) = self.config.pad_width {
            return width;
        }

        let last = u64::from(self.config.start_number) + count.saturating_sub(1) as u64;
        last.to_string().len().max(2)
    }

    // Files that already carry an error keep it; the rest collide case-insensitively.
    fn flag_duplicates(&self, files: &mut [FileItem]) {
        let mut seen: HashMap<String, usize> = HashMap::new();
        for file in files.iter().filter(|f| f.is_valid()) {
            *seen.entry(fold_case(&file.new_name)).or_default() += 1;
        }

        for file in files.iter_mut().filter(|f| f.is_valid()) {
            if seen.get(&fold_case(&file.new_name)).copied().unwrap_or(0) > 1 {
                file.error = Some(RenameError::new(
                    ErrorKind::Duplicate,
                    format!("Duplicate name: {}", file.new_name),
                ));
            }
        }
    }
}

// Helper function to sanitize filenames
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect()
}

pub struct ConfigBuilder {
    pattern: String,
    start_number: u32,
    pad_width: Option<usize>,
    sanitize: bool,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            pattern: String::new(),
            start_number: 1,
            pad_width: None,
            sanitize: false,
        }
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn start_number(mut self, start_number: u32) -> Self {
        self.start_number = start_number;
        self
    }

    pub fn pad_width(mut self, pad_width: Option<usize>) -> Self {
        self.pad_width = pad_width;
        self
    }

    pub fn sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    pub fn build(self) -> Result<RenameConfig> {
        if self.pad_width.is_some_and(|width| width > 12) {
            return Err(anyhow::anyhow!("Pad width must be at most 12 digits"));
        }

        Ok(RenameConfig {
            pattern: self.pattern,
            start_number: self.start_number,
            pad_width: self.pad_width,
            sanitize: self.sanitize,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Test: File/Name"), "Test_ File_Name");
        assert_eq!(sanitize_filename("Normal_File.Name"), "Normal_File.Name");
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .pattern("photo_{n}")
            .start_number(5)
            .pad_width(Some(3))
            .build()
            .unwrap();

        assert_eq!(config.pattern, "photo_{n}");
        assert_eq!(config.start_number, 5);
        assert_eq!(config.pad_width, Some(3));
        assert!(!config.sanitize);
    }

    #[test]
    fn test_config_builder_rejects_wide_padding() {
        assert!(ConfigBuilder::new().pad_width(Some(40)).build().is_err());
    }

    #[test]
    fn test_number_width_grows_with_batch() {
        let engine = RenameEngine::new(RenameConfig::default()).unwrap();
        assert_eq!(engine.number_width(5), 2);
        assert_eq!(engine.number_width(100), 3);
        assert_eq!(engine.number_width(0), 2);
    }
}
