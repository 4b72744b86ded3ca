//! Paragraph readers for input documents.
//!
//! A reader turns a file into an ordered list of paragraph strings, keeping
//! leading whitespace and dropping trailing whitespace. Empty paragraphs are
//! kept so that line positions match the source document.

use std::fs::{self, File};
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use roxmltree::{Document, Node};
use wordcards_segmenter::Line;
use zip::ZipArchive;

use crate::config::{validate_input_path, DOCX_DOCUMENT_PART, WORDPROCESSINGML_NS};
use crate::error::{ConverterError, Result};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Office Open XML word processing document.
    Docx,
    /// UTF-8 text, one paragraph per line.
    Text,
}

impl InputFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "docx" => Ok(Self::Docx),
            "txt" | "text" | "md" => Ok(Self::Text),
            _ => Err(ConverterError::UnsupportedInput(extension)),
        }
    }
}

/// Read an input file into numbered lines.
pub fn read_lines(path: &Path) -> Result<Vec<Line>> {
    let paragraphs = read_paragraphs(path)?;
    Ok(Line::from_paragraphs(paragraphs))
}

/// Read an input file into paragraphs, choosing the reader by extension.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>> {
    validate_input_path(path)?;
    let paragraphs = match InputFormat::from_path(path)? {
        InputFormat::Docx => read_docx_paragraphs(path)?,
        InputFormat::Text => read_text_paragraphs(path)?,
    };
    tracing::info!(
        path = %path.display(),
        paragraphs = paragraphs.len(),
        "Read input document"
    );
    Ok(paragraphs)
}

/// Read paragraphs from a .docx file.
pub fn read_docx_paragraphs(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    read_docx_from_reader(BufReader::new(file))
}

/// Read paragraphs from any seekable .docx byte source.
pub fn read_docx_from_reader<R: Read + Seek>(reader: R) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(reader)?;

    let mut bytes = Vec::new();
    match archive.by_name(DOCX_DOCUMENT_PART) {
        Ok(mut part) => {
            part.read_to_end(&mut bytes)?;
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ConverterError::MissingPart(DOCX_DOCUMENT_PART.to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    let xml = decode_utf8(bytes, DOCX_DOCUMENT_PART)?;
    parse_document_xml(&xml)
}

/// Extract body paragraphs from a WordprocessingML main document.
///
/// Only paragraphs directly under `w:body` are returned, which leaves out
/// table cells, headers, footers and text boxes.
///
/// # Examples
/// ```
/// use wordcards_converter::reader::parse_document_xml;
///
/// let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
///   <w:body>
///     <w:p><w:r><w:t>一、</w:t></w:r><w:r><w:t>引言</w:t></w:r></w:p>
///     <w:p><w:r><w:t xml:space="preserve">  内容</w:t></w:r></w:p>
///   </w:body>
/// </w:document>"#;
///
/// let paragraphs = parse_document_xml(xml).unwrap();
/// assert_eq!(paragraphs, vec!["一、引言", "  内容"]);
/// ```
pub fn parse_document_xml(xml: &str) -> Result<Vec<String>> {
    let doc = Document::parse(xml)?;
    let body = find_w_child(doc.root_element(), "body")
        .ok_or_else(|| ConverterError::MissingPart("w:body".to_string()))?;

    let paragraphs = body
        .children()
        .filter(|child| is_w(*child, "p"))
        .map(|p| {
            let mut text = String::new();
            collect_paragraph_text(p, &mut text);
            text.trim_end().to_string()
        })
        .collect();

    Ok(paragraphs)
}

/// Read paragraphs from a UTF-8 text file, one per line.
pub fn read_text_paragraphs(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path)?;
    let text = decode_utf8(bytes, &path.display().to_string())?;
    Ok(text.lines().map(|line| line.trim_end().to_string()).collect())
}

/// Decode UTF-8, dropping a leading byte order mark.
fn decode_utf8(mut bytes: Vec<u8>, context: &str) -> Result<String> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        bytes.drain(..3);
    }
    String::from_utf8(bytes).map_err(|source| ConverterError::Utf8 {
        context: context.to_string(),
        source,
    })
}

/// Whether a node is a WordprocessingML element with the given local name.
fn is_w(node: Node<'_, '_>, local: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == local
        && node.tag_name().namespace() == Some(WORDPROCESSINGML_NS)
}

fn find_w_child<'a, 'input>(node: Node<'a, 'input>, local: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_w(*child, local))
}

/// Append the visible text of a paragraph subtree.
///
/// Text boxes carry their own paragraphs and are skipped.
fn collect_paragraph_text(node: Node<'_, '_>, out: &mut String) {
    for child in node.children() {
        if !child.is_element() {
            continue;
        }
        if is_w(child, "t") {
            out.push_str(child.text().unwrap_or_default());
        } else if is_w(child, "tab") {
            out.push('\t');
        } else if is_w(child, "br") || is_w(child, "cr") {
            out.push('\n');
        } else if is_w(child, "txbxContent") {
            continue;
        } else {
            collect_paragraph_text(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn document(body: &str) -> String {
        format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{WORDPROCESSINGML_NS}"><w:body>{body}</w:body></w:document>"#)
    }

    fn docx_bytes(part: &str, xml: &str) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(part, options).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(
            InputFormat::from_path(Path::new("a.DOCX")).unwrap(),
            InputFormat::Docx
        );
        assert_eq!(
            InputFormat::from_path(Path::new("a.txt")).unwrap(),
            InputFormat::Text
        );
        assert!(matches!(
            InputFormat::from_path(Path::new("a.doc")),
            Err(ConverterError::UnsupportedInput(ext)) if ext == "doc"
        ));
    }

    #[test]
    fn test_runs_are_joined() {
        let xml = document(
            "<w:p><w:r><w:t>（一）</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>第一项</w:t></w:r></w:p>",
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["（一）第一项"]);
    }

    #[test]
    fn test_tabs_breaks_and_trailing_whitespace() {
        let xml = document(
            r#"<w:p><w:r><w:tab/><w:t>甲</w:t><w:br/><w:t xml:space="preserve">乙  </w:t></w:r></w:p>"#,
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["\t甲\n乙"]);
    }

    #[test]
    fn test_empty_paragraphs_kept() {
        let xml = document("<w:p/><w:p><w:r><w:t>内容</w:t></w:r></w:p><w:p><w:pPr/></w:p>");
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["", "内容", ""]);
    }

    #[test]
    fn test_tables_and_text_boxes_ignored() {
        let xml = document(concat!(
            "<w:p><w:r><w:t>正文</w:t></w:r></w:p>",
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>表格</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
            "<w:p><w:r><w:drawing><w:txbxContent><w:p><w:r><w:t>文本框</w:t></w:r></w:p></w:txbxContent></w:drawing><w:t>尾</w:t></w:r></w:p>",
        ));
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["正文", "尾"]);
    }

    #[test]
    fn test_hyperlink_runs_included() {
        let xml = document(
            "<w:p><w:r><w:t>见</w:t></w:r><w:hyperlink><w:r><w:t>链接</w:t></w:r></w:hyperlink></w:p>",
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["见链接"]);
    }

    #[test]
    fn test_missing_body() {
        let xml = format!(r#"<w:document xmlns:w="{WORDPROCESSINGML_NS}"/>"#);
        assert!(matches!(
            parse_document_xml(&xml),
            Err(ConverterError::MissingPart(_))
        ));
    }

    #[test]
    fn test_read_docx_from_reader() {
        let xml = document("<w:p><w:r><w:t>一、标题</w:t></w:r></w:p>");
        let bytes = docx_bytes(DOCX_DOCUMENT_PART, &xml);
        let paragraphs = read_docx_from_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(paragraphs, vec!["一、标题"]);
    }

    #[test]
    fn test_read_docx_missing_document_part() {
        let bytes = docx_bytes("word/styles.xml", "<styles/>");
        assert!(matches!(
            read_docx_from_reader(Cursor::new(bytes)),
            Err(ConverterError::MissingPart(part)) if part == DOCX_DOCUMENT_PART
        ));
    }

    #[test]
    fn test_read_docx_not_a_zip() {
        let bytes = b"definitely not a zip".to_vec();
        assert!(matches!(
            read_docx_from_reader(Cursor::new(bytes)),
            Err(ConverterError::Zip(_))
        ));
    }

    #[test]
    fn test_read_text_strips_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "\u{feff}一、标题\r\n  内容  \n").unwrap();

        let paragraphs = read_paragraphs(&path).unwrap();
        assert_eq!(paragraphs, vec!["一、标题", "  内容"]);
    }

    #[test]
    fn test_read_lines_positions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "a\n\nb\n").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].position(), 2);
        assert_eq!(lines[2].text(), "b");
    }
}
