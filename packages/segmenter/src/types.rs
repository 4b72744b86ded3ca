//! Core data types for heading segmentation.

use serde::{Deserialize, Serialize, Serializer};

/// Leading whitespace characters per nesting level.
pub const INDENT_WIDTH: usize = 2;

/// One paragraph of source text.
///
/// Produced by the document reader and never mutated afterwards. Trailing
/// whitespace is removed; leading whitespace is kept and determines the
/// indent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    text: String,
    indent: usize,
    position: usize,
}

impl Line {
    /// Create a line, trimming trailing whitespace and deriving the indent.
    ///
    /// # Examples
    /// ```
    /// use wordcards_segmenter::Line;
    ///
    /// let line = Line::new(3, "\u{3000}\u{3000}细节  ");
    /// assert_eq!(line.text(), "\u{3000}\u{3000}细节");
    /// assert_eq!(line.indent(), 2);
    /// assert_eq!(line.level(), 1);
    /// assert_eq!(line.position(), 3);
    /// ```
    #[must_use]
    pub fn new(position: usize, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let text = raw.trim_end().to_string();
        let indent = text.chars().take_while(|c| c.is_whitespace()).count();
        Self {
            text,
            indent,
            position,
        }
    }

    /// Number paragraphs in iteration order, starting at 0.
    #[must_use]
    pub fn from_paragraphs<I, S>(paragraphs: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paragraphs
            .into_iter()
            .enumerate()
            .map(|(position, raw)| Self::new(position, raw))
            .collect()
    }

    /// Text with trailing whitespace removed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of leading whitespace characters.
    #[must_use]
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Nesting level: every [`INDENT_WIDTH`] leading characters is one level.
    #[must_use]
    pub fn level(&self) -> usize {
        self.indent / INDENT_WIDTH
    }

    /// 0-based position in the source document.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Text with leading and trailing whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether the line has no visible text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

/// How a numeral string is turned into an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumeralSystem {
    /// 一 .. 十 composites.
    Chinese,
    /// ASCII digits.
    Arabic,
    /// A single ASCII letter, a = 1.
    Latin,
}

/// Lexical style of a heading's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumeralKind {
    /// `（一）标题` or `(一)标题`.
    ChineseBracketed,
    /// `一、标题`.
    ChineseBare,
    /// `（1）标题`.
    ArabicBracketed,
    /// `1、标题` or `1. 标题`.
    ArabicBare,
    /// `a) 标题` or `（a）标题`.
    LetterBracketed,
    /// `a、标题`.
    LetterDot,
    /// `第一章 标题`, also 节 and 课.
    Chapter,
}

impl NumeralKind {
    /// All kinds in default priority order.
    pub const ALL: [Self; 7] = [
        Self::ChineseBracketed,
        Self::ChineseBare,
        Self::ArabicBracketed,
        Self::ArabicBare,
        Self::LetterBracketed,
        Self::LetterDot,
        Self::Chapter,
    ];

    /// Snake-case name, also used as a card tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChineseBracketed => "chinese_bracketed",
            Self::ChineseBare => "chinese_bare",
            Self::ArabicBracketed => "arabic_bracketed",
            Self::ArabicBare => "arabic_bare",
            Self::LetterBracketed => "letter_bracketed",
            Self::LetterDot => "letter_dot",
            Self::Chapter => "chapter",
        }
    }

    /// Numeral system used to value the captured numeral.
    #[must_use]
    pub fn system(&self) -> NumeralSystem {
        match self {
            Self::ChineseBracketed | Self::ChineseBare | Self::Chapter => NumeralSystem::Chinese,
            Self::ArabicBracketed | Self::ArabicBare => NumeralSystem::Arabic,
            Self::LetterBracketed | Self::LetterDot => NumeralSystem::Latin,
        }
    }
}

impl std::fmt::Display for NumeralKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingMatch {
    /// Content line.
    NotAHeading,

    /// Heading line.
    Heading {
        /// Numbering style of the rule that matched.
        kind: NumeralKind,
        /// Canonical value of the numeral.
        value: u32,
        /// The numeral as written (e.g. "十一", "3", "b").
        numeral: String,
        /// Remainder after the numeral and its separator.
        text: String,
    },
}

impl HeadingMatch {
    /// Whether this is a heading.
    #[must_use]
    pub fn is_heading(&self) -> bool {
        matches!(self, Self::Heading { .. })
    }
}

/// The heading half of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Title text after the numeral.
    pub text: String,

    /// The whole trimmed heading line, numeral included.
    pub full_text: String,

    /// Numbering style.
    pub kind: NumeralKind,

    /// Canonical numeral value.
    pub value: u32,

    /// Indent of the heading line.
    pub indent: usize,

    /// Position of the heading line in the source document.
    pub position: usize,
}

impl Heading {
    /// Nesting level of the heading line.
    #[must_use]
    pub fn level(&self) -> usize {
        self.indent / INDENT_WIDTH
    }
}

/// A heading plus the content lines that followed it.
///
/// Content is never empty for sections returned by the segmenter, and every
/// content line lies strictly between this heading and the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The heading that opened this section.
    pub heading: Heading,

    /// Content lines in document order.
    pub content: Vec<Line>,
}

impl Section {
    /// Create a section with no content yet.
    #[must_use]
    pub fn new(heading: Heading) -> Self {
        Self {
            heading,
            content: Vec::new(),
        }
    }

    /// Title text after the numeral.
    #[must_use]
    pub fn heading_text(&self) -> &str {
        &self.heading.text
    }

    /// Numbering style of the heading.
    #[must_use]
    pub fn numeral_kind(&self) -> NumeralKind {
        self.heading.kind
    }

    /// Canonical numeral value of the heading.
    #[must_use]
    pub fn numeral_value(&self) -> u32 {
        self.heading.value
    }

    /// Trimmed content lines in order.
    pub fn content_lines(&self) -> impl Iterator<Item = &str> {
        self.content.iter().map(Line::trimmed)
    }

    /// Trimmed content lines paired with their nesting level.
    pub fn nested_content(&self) -> impl Iterator<Item = (usize, &str)> {
        self.content.iter().map(|line| (line.level(), line.trimmed()))
    }
}

/// Flat record form of a section for serialization.
#[derive(Serialize)]
struct SectionRecord<'a> {
    heading_text: &'a str,
    full_text: &'a str,
    numeral_kind: NumeralKind,
    numeral_value: u32,
    position: usize,
    indent: usize,
    content_lines: Vec<&'a str>,
    content_indents: Vec<usize>,
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SectionRecord {
            heading_text: &self.heading.text,
            full_text: &self.heading.full_text,
            numeral_kind: self.heading.kind,
            numeral_value: self.heading.value,
            position: self.heading.position,
            indent: self.heading.indent,
            content_lines: self.content_lines().collect(),
            content_indents: self.content.iter().map(Line::indent).collect(),
        }
        .serialize(serializer)
    }
}
