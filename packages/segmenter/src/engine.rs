//! Segment engine that groups content lines under numbered headings.

use std::sync::LazyLock;

use regex::Regex;

use crate::numeral::chinese_to_arabic;
use crate::rules::{create_default_rules, RuleSet};
use crate::types::{Heading, HeadingMatch, Line, NumeralKind, Section};

/// A line made only of one to three Chinese numerals, e.g. "三".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[一二三四五六七八九十]{1,3}$").expect("valid regex"));

/// Behavioral switches for segmentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Treat a lone numeral line as a heading that borrows the next line
    /// as its title. Off by default.
    pub title_markers: bool,
}

impl SegmentOptions {
    /// Enable or disable title markers.
    #[must_use]
    pub fn with_title_markers(mut self, enabled: bool) -> Self {
        self.title_markers = enabled;
        self
    }
}

/// Engine for splitting a line sequence into sections.
///
/// Holds an immutable rule table and options; a single engine can be shared
/// across threads and reused for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    rules: RuleSet,
    options: SegmentOptions,
}

impl Segmenter {
    /// Create a new segmenter.
    #[must_use]
    pub fn new(rules: RuleSet, options: SegmentOptions) -> Self {
        Self { rules, options }
    }

    /// Segmenter with the built-in rules and the given options.
    #[must_use]
    pub fn with_options(options: SegmentOptions) -> Self {
        Self::new(create_default_rules(), options)
    }

    /// The rule table in use.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The options in use.
    #[must_use]
    pub fn options(&self) -> SegmentOptions {
        self.options
    }

    /// Classify a line as heading or content.
    ///
    /// Matching runs on the trimmed text, so indentation never decides the
    /// outcome. Title markers are not considered here; they need the next
    /// line and are handled by [`Segmenter::segment`].
    #[must_use]
    pub fn classify(&self, line: &Line) -> HeadingMatch {
        let text = line.trimmed();
        if text.is_empty() {
            return HeadingMatch::NotAHeading;
        }
        self.rules.first_match(text)
    }

    /// Split lines into sections in a single forward pass.
    ///
    /// - A heading closes the open section, which is emitted only if it has
    ///   at least one content line.
    /// - Non-blank content lines attach to the open section; before the
    ///   first heading they are dropped.
    /// - Sections come back in document order.
    ///
    /// # Examples
    /// ```
    /// use wordcards_segmenter::{Line, Segmenter};
    ///
    /// let lines = Line::from_paragraphs(["一、引言", "第一行", "二、空标题"]);
    /// let sections = Segmenter::default().segment(&lines);
    ///
    /// assert_eq!(sections.len(), 1);
    /// assert_eq!(sections[0].heading_text(), "引言");
    /// ```
    #[must_use]
    pub fn segment(&self, lines: &[Line]) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut current: Option<Section> = None;

        let mut i = 0;
        while i < lines.len() {
            let line = &lines[i];
            i += 1;

            if line.is_blank() {
                continue;
            }

            let heading = if self.options.title_markers && self.is_title_marker(line) {
                let (heading, consumed) = self.title_marker_heading(line, lines.get(i));
                if consumed {
                    i += 1;
                }
                Some(heading)
            } else {
                match self.classify(line) {
                    HeadingMatch::Heading {
                        kind, value, text, ..
                    } => Some(Heading {
                        text,
                        full_text: line.trimmed().to_string(),
                        kind,
                        value,
                        indent: line.indent(),
                        position: line.position(),
                    }),
                    HeadingMatch::NotAHeading => None,
                }
            };

            if let Some(heading) = heading {
                flush(&mut sections, current.take());
                current = Some(Section::new(heading));
            } else if let Some(section) = current.as_mut() {
                section.content.push(line.clone());
            } else {
                tracing::trace!(
                    position = line.position(),
                    "Content before first heading, dropping"
                );
            }
        }

        flush(&mut sections, current);

        tracing::debug!(
            lines = lines.len(),
            sections = sections.len(),
            "Segmentation complete"
        );
        sections
    }

    fn is_title_marker(&self, line: &Line) -> bool {
        TITLE_MARKER_PATTERN.is_match(line.trimmed())
    }

    /// Build a heading from a lone numeral, borrowing the next line's text
    /// when it is non-blank content. Returns whether the next line was used.
    fn title_marker_heading(&self, marker: &Line, next: Option<&Line>) -> (Heading, bool) {
        let numeral = marker.trimmed();
        let borrowed = next
            .filter(|next| !next.is_blank())
            .filter(|next| !self.is_title_marker(next) && !self.classify(next).is_heading())
            .map(Line::trimmed);

        let (text, full_text) = match borrowed {
            Some(title) => (title.to_string(), format!("{numeral} {title}")),
            None => (numeral.to_string(), numeral.to_string()),
        };

        let heading = Heading {
            text,
            full_text,
            kind: NumeralKind::ChineseBare,
            value: chinese_to_arabic(numeral),
            indent: marker.indent(),
            position: marker.position(),
        };
        (heading, borrowed.is_some())
    }
}

/// Emit a finished section if it has content.
fn flush(sections: &mut Vec<Section>, section: Option<Section>) {
    let Some(section) = section else {
        return;
    };

    if section.content.is_empty() {
        tracing::debug!(
            position = section.heading.position,
            heading = %section.heading.full_text,
            "Heading without content, discarding"
        );
        return;
    }

    sections.push(section);
}

/// Classify a line with the built-in rules.
#[must_use]
pub fn classify(line: &Line) -> HeadingMatch {
    Segmenter::default().classify(line)
}

/// Segment lines with the built-in rules and default options.
#[must_use]
pub fn segment(lines: &[Line]) -> Vec<Section> {
    Segmenter::default().segment(lines)
}
