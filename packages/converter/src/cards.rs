//! Flashcard construction from segmented sections.

use serde::Serialize;
use wordcards_segmenter::Section;

/// How content lines are joined into the answer side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerStyle {
    /// Lines separated by `<br>`, for HTML-rendering card apps.
    #[default]
    Html,
    /// Lines separated by newlines.
    Plain,
}

impl AnswerStyle {
    /// Separator placed between content lines.
    #[must_use]
    pub fn separator(&self) -> &'static str {
        match self {
            Self::Html => "<br>",
            Self::Plain => "\n",
        }
    }

    /// Prefix repeated once per nesting level of a content line.
    #[must_use]
    pub fn indent_unit(&self) -> &'static str {
        match self {
            Self::Html => "&nbsp;&nbsp;",
            Self::Plain => "  ",
        }
    }

    /// Render one content line at its nesting level.
    #[must_use]
    pub fn render_line(&self, level: usize, text: &str) -> String {
        format!("{}{text}", self.indent_unit().repeat(level))
    }
}

/// One flashcard: heading as prompt, content as answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Prompt side (the full heading line).
    pub front: String,

    /// Answer side (joined content lines).
    pub back: String,

    /// Tags: numeral kind, `number_<value>` and `level_<heading level>`.
    pub tags: Vec<String>,
}

impl Card {
    /// Build a card from a section.
    ///
    /// Content lines keep their nesting level (two leading whitespace
    /// characters per level) as a prefix in the answer.
    ///
    /// # Examples
    /// ```
    /// use wordcards_converter::cards::{AnswerStyle, Card};
    /// use wordcards_segmenter::{segment, Line};
    ///
    /// let sections = segment(&Line::from_paragraphs(["二、方法", "步骤一", "  细节"]));
    /// let card = Card::from_section(&sections[0], AnswerStyle::Html);
    ///
    /// assert_eq!(card.front, "二、方法");
    /// assert_eq!(card.back, "步骤一<br>&nbsp;&nbsp;细节");
    /// assert_eq!(card.tags, vec!["chinese_bare", "number_2", "level_0"]);
    /// ```
    #[must_use]
    pub fn from_section(section: &Section, style: AnswerStyle) -> Self {
        let back = section
            .nested_content()
            .map(|(level, text)| style.render_line(level, text))
            .collect::<Vec<_>>()
            .join(style.separator());

        Self {
            front: section.heading.full_text.clone(),
            back,
            tags: vec![
                section.numeral_kind().as_str().to_string(),
                format!("number_{}", section.numeral_value()),
                format!("level_{}", section.heading.level()),
            ],
        }
    }
}

/// A named, ordered collection of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck {
    /// Deck name shown by the card app.
    pub name: String,

    /// Cards in document order.
    pub cards: Vec<Card>,
}

impl Deck {
    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Build a deck with one card per section, preserving section order.
#[must_use]
pub fn build_deck(name: impl Into<String>, sections: &[Section], style: AnswerStyle) -> Deck {
    Deck {
        name: name.into(),
        cards: sections
            .iter()
            .map(|section| Card::from_section(section, style))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wordcards_segmenter::{segment, Line};

    #[test]
    fn test_plain_style() {
        let sections = segment(&Line::from_paragraphs(["（一）第一项", "细节A", "  细节B"]));
        let card = Card::from_section(&sections[0], AnswerStyle::Plain);
        assert_eq!(card.front, "（一）第一项");
        assert_eq!(card.back, "细节A\n  细节B");
        assert_eq!(card.tags, vec!["chinese_bracketed", "number_1", "level_0"]);
    }

    #[test]
    fn test_deck_preserves_order() {
        let sections = segment(&Line::from_paragraphs([
            "第一章 总论",
            "概述",
            "a、定义",
            "释义",
            "3. 结论",
            "总结",
        ]));
        let deck = build_deck("复习", &sections, AnswerStyle::Html);

        let fronts: Vec<_> = deck.cards.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["第一章 总论", "a、定义", "3. 结论"]);
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.cards[1].tags, vec!["letter_dot", "number_1", "level_0"]);
    }

    #[test]
    fn test_nested_content_levels() {
        let sections = segment(&Line::from_paragraphs(["一、标题", "  子项甲", "    孙项"]));

        let html = Card::from_section(&sections[0], AnswerStyle::Html);
        assert_eq!(html.back, "&nbsp;&nbsp;子项甲<br>&nbsp;&nbsp;&nbsp;&nbsp;孙项");

        let plain = Card::from_section(&sections[0], AnswerStyle::Plain);
        assert_eq!(plain.back, "  子项甲\n    孙项");
    }

    #[test]
    fn test_heading_level_tag() {
        let sections = segment(&Line::from_paragraphs(["    (b) 说明", "内容"]));
        let card = Card::from_section(&sections[0], AnswerStyle::Html);
        assert_eq!(card.front, "(b) 说明");
        assert_eq!(card.tags, vec!["letter_bracketed", "number_2", "level_2"]);
    }

    #[test]
    fn test_empty_deck() {
        let deck = build_deck("空", &[], AnswerStyle::default());
        assert!(deck.is_empty());
    }
}
