//! Error types for the converter.
//!
//! Segmentation itself is infallible; everything here comes from reading
//! input documents, loading rule files or writing decks.

use std::path::PathBuf;

use thiserror::Error;
use wordcards_segmenter::RuleError;

/// Main error type for the converter library.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Input path exists but is not a regular file.
    #[error("Input path is not a file: {}", .0.display())]
    InputNotAFile(PathBuf),

    /// Input extension has no reader.
    #[error("Unsupported input format: '{0}'. Expected .docx, .txt, .text or .md")]
    UnsupportedInput(String),

    /// Output extension has no writer.
    #[error("Unsupported output format: '{0}'. Expected csv, json or yaml")]
    UnsupportedOutput(String),

    /// The .docx container could not be read.
    #[error("Invalid .docx container: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A required part is missing from the .docx container.
    #[error("Missing required part in .docx: {0}")]
    MissingPart(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Text was not valid UTF-8.
    #[error("Invalid UTF-8 in {context}: {source}")]
    Utf8 {
        context: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Rule file could not be loaded.
    #[error("Invalid rule table: {0}")]
    Rules(#[from] RuleError),

    /// No section produced any card.
    #[error("No cards found in {}: no numbered heading was followed by content", .0.display())]
    NoCards(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConverterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConverterError::UnsupportedInput("pdf".to_string());
        assert!(err.to_string().contains("pdf"));
        assert!(err.to_string().contains(".docx"));
    }

    #[test]
    fn test_no_cards_display() {
        let err = ConverterError::NoCards(PathBuf::from("notes.docx"));
        assert_eq!(
            err.to_string(),
            "No cards found in notes.docx: no numbered heading was followed by content"
        );
    }

    #[test]
    fn test_rule_error_converts() {
        let err: ConverterError = RuleError::EmptyRuleSet.into();
        assert_eq!(err.to_string(), "Invalid rule table: Rule table is empty");
    }
}
