//! Wordcards Segmenter - Split numbered-heading documents into sections.
//!
//! Takes the paragraphs of a document as [`Line`]s, recognizes numbered
//! headings such as `一、引言`, `（二）方法`, `3. 结果`, `a、定义` or
//! `第四章 总结`, and groups the lines that follow each heading into a
//! [`Section`]. Sections feed flashcard generation: heading as prompt,
//! content as answer.
//!
//! # Example
//!
//! ```
//! use wordcards_segmenter::{segment, Line, NumeralKind};
//!
//! let lines = Line::from_paragraphs([
//!     "一、引言",
//!     "这是内容第一行",
//!     "二、方法",
//!     "这是内容第二行",
//!     "这是内容第三行",
//! ]);
//! let sections = segment(&lines);
//!
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[1].heading_text(), "方法");
//! assert_eq!(sections[1].numeral_kind(), NumeralKind::ChineseBare);
//! assert_eq!(sections[1].content_lines().count(), 2);
//! ```
//!
//! # Architecture
//!
//! - [`types`]: lines, headings, sections and numeral kinds
//! - [`rules`]: ordered, immutable heading rule tables
//! - [`numeral`]: numeral to integer conversion
//! - [`engine`]: classification and the segmentation pass
//! - [`error`]: rule table errors
//!
//! Segmentation never fails. Unresolvable numerals fall back to 1, content
//! before the first heading and headings without content are dropped.

pub mod engine;
pub mod error;
pub mod numeral;
pub mod rules;
pub mod types;

pub use engine::{classify, segment, SegmentOptions, Segmenter};
pub use error::RuleError;
pub use numeral::chinese_to_arabic;
pub use rules::{create_default_rules, Rule, RuleSet, RuleSpec};
pub use types::{Heading, HeadingMatch, Line, NumeralKind, NumeralSystem, Section, INDENT_WIDTH};
