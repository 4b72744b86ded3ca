//! Wordcards Converter - Turn numbered Word documents into flashcard decks.
//!
//! Reads a `.docx` (or plain text) document, splits it into sections with
//! [`wordcards_segmenter`], and writes one card per section: the numbered
//! heading on the front, the section's content on the back.
//!
//! # Example
//!
//! ```
//! use wordcards_converter::cards::{build_deck, AnswerStyle};
//! use wordcards_converter::export::generate_csv;
//! use wordcards_segmenter::{segment, Line};
//!
//! let sections = segment(&Line::from_paragraphs(["一、引言", "内容"]));
//! let deck = build_deck("demo", &sections, AnswerStyle::Html);
//!
//! assert_eq!(generate_csv(&deck), "\u{feff}一、引言,内容\r\n");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants, validation and rule loading
//! - [`error`]: Error types and Result alias
//! - [`reader`]: Paragraph extraction from .docx and text files
//! - [`cards`]: Cards and decks built from sections
//! - [`export`]: CSV, JSON and YAML output
//! - [`converter`]: End-to-end conversion of one document
//! - [`cli`]: Command-line interface

pub mod cards;
pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod export;
pub mod reader;

// Re-export main functions
pub use converter::{convert_file, load_sections};

// Re-export commonly used items
pub use cards::{build_deck, AnswerStyle, Card, Deck};
pub use error::{ConverterError, Result};
pub use export::{save_deck, ExportFormat};
pub use reader::{read_lines, InputFormat};
