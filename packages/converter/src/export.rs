//! Deck export to CSV, JSON and YAML.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::cards::Deck;
use crate::error::{ConverterError, Result};

/// UTF-8 byte order mark, written so spreadsheet apps detect the encoding.
const UTF8_BOM: &str = "\u{feff}";

/// Supported deck output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Two-column CSV (front, back), importable by Anki.
    Csv,
    /// Pretty-printed JSON with tags.
    Json,
    /// YAML with tags.
    Yaml,
}

impl ExportFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Infer the format from an output path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = ConverterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(ConverterError::UnsupportedOutput(other.to_string())),
        }
    }
}

/// Deck representation for JSON and YAML serialization.
#[derive(Debug, Serialize)]
struct DeckDocument<'a> {
    deck: &'a str,
    card_count: usize,
    cards: Vec<CardDocument<'a>>,
}

#[derive(Debug, Serialize)]
struct CardDocument<'a> {
    front: &'a str,
    back: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    tags: &'a [String],
}

fn document(deck: &Deck) -> DeckDocument<'_> {
    DeckDocument {
        deck: &deck.name,
        card_count: deck.cards.len(),
        cards: deck
            .cards
            .iter()
            .map(|card| CardDocument {
                front: &card.front,
                back: &card.back,
                tags: &card.tags,
            })
            .collect(),
    }
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Generate CSV: BOM, no header, one `front,back` row per card.
///
/// # Examples
/// ```
/// use wordcards_converter::cards::{Card, Deck};
/// use wordcards_converter::export::generate_csv;
///
/// let deck = Deck {
///     name: "demo".to_string(),
///     cards: vec![Card {
///         front: "一、引言".to_string(),
///         back: "第一行\n第二行".to_string(),
///         tags: Vec::new(),
///     }],
/// };
/// assert_eq!(generate_csv(&deck), "\u{feff}一、引言,\"第一行\n第二行\"\r\n");
/// ```
#[must_use]
pub fn generate_csv(deck: &Deck) -> String {
    let mut out = String::from(UTF8_BOM);
    for card in &deck.cards {
        out.push_str(&csv_field(&card.front));
        out.push(',');
        out.push_str(&csv_field(&card.back));
        out.push_str("\r\n");
    }
    out
}

/// Generate pretty-printed JSON.
pub fn generate_json(deck: &Deck) -> Result<String> {
    Ok(serde_json::to_string_pretty(&document(deck))?)
}

/// Generate YAML.
pub fn generate_yaml(deck: &Deck) -> Result<String> {
    Ok(serde_yaml_ng::to_string(&document(deck))?)
}

/// Render a deck in the given format.
pub fn render(deck: &Deck, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => Ok(generate_csv(deck)),
        ExportFormat::Json => generate_json(deck),
        ExportFormat::Yaml => generate_yaml(deck),
    }
}

/// Write a deck to disk.
///
/// Appends the format's extension when `path` has none. Returns the path
/// actually written.
pub fn save_deck(deck: &Deck, format: ExportFormat, path: &Path) -> Result<PathBuf> {
    let output_path = if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(ConverterError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory does not exist: {}", parent.display()),
            )));
        }
    }

    let content = render(deck, format)?;
    fs::write(&output_path, content)?;

    tracing::info!(
        path = %output_path.display(),
        cards = deck.len(),
        format = format.extension(),
        "Saved deck"
    );
    Ok(output_path)
}
