//! Conversion service that ties reading, segmentation and card building together.

use std::path::Path;

use wordcards_segmenter::{Section, Segmenter};

use crate::cards::{build_deck, AnswerStyle, Deck};
use crate::config::deck_name_from_path;
use crate::error::{ConverterError, Result};
use crate::reader::read_lines;

/// Read a document and split it into sections.
pub fn load_sections(path: &Path, segmenter: &Segmenter) -> Result<Vec<Section>> {
    let lines = read_lines(path)?;
    let sections = segmenter.segment(&lines);
    tracing::info!(
        path = %path.display(),
        lines = lines.len(),
        sections = sections.len(),
        "Segmented document"
    );
    Ok(sections)
}

/// Convert a document into a flashcard deck.
///
/// # Arguments
/// * `path` - Input .docx or text file
/// * `segmenter` - Segmenter with the rule table and options to use
/// * `deck_name` - Deck name; the file stem when `None`
/// * `style` - How content lines are joined on the answer side
///
/// # Returns
/// The deck, or `ConverterError::NoCards` when no section had content.
pub fn convert_file(
    path: &Path,
    segmenter: &Segmenter,
    deck_name: Option<&str>,
    style: AnswerStyle,
) -> Result<Deck> {
    let sections = load_sections(path, segmenter)?;
    if sections.is_empty() {
        return Err(ConverterError::NoCards(path.to_path_buf()));
    }

    let name = deck_name
        .map(String::from)
        .unwrap_or_else(|| deck_name_from_path(path));
    Ok(build_deck(name, &sections, style))
}
