//! Configuration constants and validation functions for the converter.

use std::fs;
use std::path::{Path, PathBuf};

use wordcards_segmenter::{create_default_rules, RuleSet};

use crate::error::{ConverterError, Result};

/// Deck name used when none is given and the input has no usable stem.
pub const DEFAULT_DECK_NAME: &str = "学习卡片";

/// Path of the main document part inside a .docx container.
pub const DOCX_DOCUMENT_PART: &str = "word/document.xml";

/// WordprocessingML main namespace.
pub const WORDPROCESSINGML_NS: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Number of sections shown by `preview` unless overridden.
pub const DEFAULT_PREVIEW_ITEMS: usize = 10;

/// Content lines shown per section in a preview.
pub const PREVIEW_CONTENT_LINES: usize = 3;

/// Display width for preview lines; longer lines are truncated.
pub const PREVIEW_TEXT_WIDTH: usize = 100;

/// Validate that the input path exists and is a regular file.
///
/// # Examples
/// ```
/// use wordcards_converter::config::validate_input_path;
///
/// assert!(validate_input_path(std::path::Path::new("does/not/exist.docx")).is_err());
/// ```
pub fn validate_input_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ConverterError::InputNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ConverterError::InputNotAFile(path.to_path_buf()));
    }
    Ok(())
}

/// Load the rule table: the built-in one, or a YAML rule file.
pub fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    let Some(path) = path else {
        return Ok(create_default_rules());
    };

    validate_input_path(path)?;
    let yaml = fs::read_to_string(path)?;
    let rules = RuleSet::from_yaml_str(&yaml)?;
    tracing::info!(path = %path.display(), rules = rules.len(), "Loaded rule file");
    Ok(rules)
}

/// Derive a deck name from the input file stem.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use wordcards_converter::config::deck_name_from_path;
///
/// assert_eq!(deck_name_from_path(Path::new("notes/政治复习.docx")), "政治复习");
/// assert_eq!(deck_name_from_path(Path::new("")), "学习卡片");
/// ```
#[must_use]
pub fn deck_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| DEFAULT_DECK_NAME.to_string())
}

/// Default output path: the input path with the given extension.
#[must_use]
pub fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}
