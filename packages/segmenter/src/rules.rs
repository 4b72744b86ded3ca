//! Ordered heading rule tables.
//!
//! A rule table is an immutable value: it is built once, either from the
//! built-in defaults or from a YAML rule file, and handed to the segmenter.
//! Rule order matters. The first rule whose pattern matches a line decides
//! the heading kind, so earlier rules shadow later ones on overlapping input.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::types::{HeadingMatch, NumeralKind};

/// Declarative description of one heading rule.
///
/// The pattern must capture the numeral in group 1 and the remaining title
/// text in group 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Numbering style this rule recognizes.
    pub kind: NumeralKind,

    /// Regular expression applied to the trimmed line.
    pub pattern: String,
}

impl RuleSpec {
    /// Create a new rule specification.
    #[must_use]
    pub fn new(kind: NumeralKind, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
        }
    }
}

/// On-disk layout of a rule file.
#[derive(Debug, Serialize, Deserialize)]
struct RuleFile {
    rules: Vec<RuleSpec>,
}

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct Rule {
    spec: RuleSpec,
    regex: Regex,
}

impl Rule {
    /// Compile a rule, checking that it has both capture groups.
    pub fn compile(spec: RuleSpec) -> Result<Self, RuleError> {
        let regex = Regex::new(&spec.pattern).map_err(|source| RuleError::InvalidPattern {
            kind: spec.kind,
            source,
        })?;

        // captures_len counts the implicit whole-match group
        let found = regex.captures_len() - 1;
        if found < 2 {
            return Err(RuleError::MissingCaptureGroups {
                kind: spec.kind,
                pattern: spec.pattern,
                found,
            });
        }

        Ok(Self { spec, regex })
    }

    /// The specification this rule was compiled from.
    #[must_use]
    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    /// Numbering style of this rule.
    #[must_use]
    pub fn kind(&self) -> NumeralKind {
        self.spec.kind
    }

    /// Match trimmed text against this rule.
    ///
    /// Returns `None` when the pattern does not match, either capture
    /// group did not participate, or the text is a bare numeral with no
    /// title (a lone `十二` must not split into numeral `十` and title `二`).
    #[must_use]
    pub fn apply(&self, text: &str) -> Option<HeadingMatch> {
        if self.spec.kind.system().is_bare_numeral(text) {
            return None;
        }
        let caps = self.regex.captures(text)?;
        let numeral = caps.get(1)?.as_str();
        let remainder = caps.get(2)?.as_str().trim();

        Some(HeadingMatch::Heading {
            kind: self.spec.kind,
            value: self.spec.kind.system().value_of(numeral),
            numeral: numeral.to_string(),
            text: remainder.to_string(),
        })
    }
}

/// Built-in rule specifications in priority order.
#[must_use]
pub fn default_rule_specs() -> Vec<RuleSpec> {
    vec![
        RuleSpec::new(
            NumeralKind::ChineseBracketed,
            r"^[（(]([一二三四五六七八九十]+)[）)]\s*(.+)$",
        ),
        RuleSpec::new(
            NumeralKind::ChineseBare,
            r"^([一二三四五六七八九十]+)[、，,．.。）)]?\s*(.+)$",
        ),
        RuleSpec::new(NumeralKind::ArabicBracketed, r"^[（(]([0-9]+)[）)]\s*(.+)$"),
        RuleSpec::new(NumeralKind::ArabicBare, r"^([0-9]+)[、，,．.。）)]?\s*(.+)$"),
        RuleSpec::new(
            NumeralKind::LetterBracketed,
            r"^[（(]?([a-zA-Z])[）)]\s*(.+)$",
        ),
        RuleSpec::new(NumeralKind::LetterDot, r"^([a-zA-Z])[、．]\s*(.+)$"),
        RuleSpec::new(
            NumeralKind::Chapter,
            r"^第([一二三四五六七八九十]+)[章节课]\s*(.+)$",
        ),
    ]
}

#[allow(clippy::expect_used)] // Static patterns that are guaranteed to be valid
static DEFAULT_RULES: LazyLock<RuleSet> =
    LazyLock::new(|| RuleSet::compile(default_rule_specs()).expect("valid default rules"));

/// Create the built-in rule table.
///
/// ```text
/// 1. chinese_bracketed   （一）标题
/// 2. chinese_bare        一、标题
/// 3. arabic_bracketed    （1）标题
/// 4. arabic_bare         1. 标题
/// 5. letter_bracketed    a) 标题
/// 6. letter_dot          a、标题
/// 7. chapter             第一章 标题
/// ```
#[must_use]
pub fn create_default_rules() -> RuleSet {
    DEFAULT_RULES.clone()
}

/// Ordered, compiled rule table.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile rule specifications, preserving their order.
    pub fn compile(specs: impl IntoIterator<Item = RuleSpec>) -> Result<Self, RuleError> {
        let rules = specs
            .into_iter()
            .map(Rule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        if rules.is_empty() {
            return Err(RuleError::EmptyRuleSet);
        }

        Ok(Self { rules })
    }

    /// Load a rule table from YAML.
    ///
    /// # Examples
    /// ```
    /// use wordcards_segmenter::{NumeralKind, RuleSet};
    ///
    /// let yaml = r#"
    /// rules:
    ///   - kind: chapter
    ///     pattern: '^第([一二三四五六七八九十]+)[章节课]\s*(.+)$'
    /// "#;
    /// let rules = RuleSet::from_yaml_str(yaml).unwrap();
    /// assert_eq!(rules.len(), 1);
    /// assert_eq!(rules.iter().next().unwrap().kind(), NumeralKind::Chapter);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RuleError> {
        let file: RuleFile = serde_yaml_ng::from_str(yaml)?;
        Self::compile(file.rules)
    }

    /// Render the rule table as YAML in the rule-file layout.
    pub fn to_yaml(&self) -> Result<String, RuleError> {
        let file = RuleFile {
            rules: self.specs().cloned().collect(),
        };
        Ok(serde_yaml_ng::to_string(&file)?)
    }

    /// Rules in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Rule specifications in priority order.
    pub fn specs(&self) -> impl Iterator<Item = &RuleSpec> {
        self.rules.iter().map(Rule::spec)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a compiled table; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classify trimmed text: the first matching rule wins.
    #[must_use]
    pub fn first_match(&self, text: &str) -> HeadingMatch {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(text))
            .unwrap_or(HeadingMatch::NotAHeading)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        create_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn heading(kind: NumeralKind, value: u32, numeral: &str, text: &str) -> HeadingMatch {
        HeadingMatch::Heading {
            kind,
            value,
            numeral: numeral.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_default_order() {
        let kinds: Vec<_> = create_default_rules().iter().map(Rule::kind).collect();
        assert_eq!(kinds, NumeralKind::ALL.to_vec());
    }

    #[test]
    fn test_chinese_bracketed() {
        let rules = create_default_rules();
        assert_eq!(
            rules.first_match("（一）第一项"),
            heading(NumeralKind::ChineseBracketed, 1, "一", "第一项")
        );
        assert_eq!(
            rules.first_match("(十二) 半角括号"),
            heading(NumeralKind::ChineseBracketed, 12, "十二", "半角括号")
        );
    }

    #[test]
    fn test_chinese_bare_separators() {
        let rules = create_default_rules();
        assert_eq!(
            rules.first_match("一、引言"),
            heading(NumeralKind::ChineseBare, 1, "一", "引言")
        );
        assert_eq!(
            rules.first_match("三. 方法"),
            heading(NumeralKind::ChineseBare, 3, "三", "方法")
        );
        assert_eq!(
            rules.first_match("二）结果"),
            heading(NumeralKind::ChineseBare, 2, "二", "结果")
        );
    }

    #[test]
    fn test_bare_numerals_are_not_headings() {
        let rules = create_default_rules();
        for text in ["十二", "二十三", "一", "12", "2024"] {
            assert_eq!(rules.first_match(text), HeadingMatch::NotAHeading, "{text}");
        }
        assert_eq!(
            rules.first_match("十二条"),
            heading(NumeralKind::ChineseBare, 12, "十二", "条")
        );
    }

    #[test]
    fn test_arabic() {
        let rules = create_default_rules();
        assert_eq!(
            rules.first_match("（3）细则"),
            heading(NumeralKind::ArabicBracketed, 3, "3", "细则")
        );
        assert_eq!(
            rules.first_match("12. 第十二条"),
            heading(NumeralKind::ArabicBare, 12, "12", "第十二条")
        );
    }

    #[test]
    fn test_letters() {
        let rules = create_default_rules();
        assert_eq!(
            rules.first_match("(B) 说明"),
            heading(NumeralKind::LetterBracketed, 2, "B", "说明")
        );
        assert_eq!(
            rules.first_match("c) 第三点"),
            heading(NumeralKind::LetterBracketed, 3, "c", "第三点")
        );
        assert_eq!(
            rules.first_match("a、定义"),
            heading(NumeralKind::LetterDot, 1, "a", "定义")
        );
    }

    #[test]
    fn test_plain_words_are_not_letter_headings() {
        let rules = create_default_rules();
        assert_eq!(rules.first_match("Hello world"), HeadingMatch::NotAHeading);
        assert_eq!(rules.first_match("abc、def"), HeadingMatch::NotAHeading);
    }

    #[test]
    fn test_chapter() {
        let rules = create_default_rules();
        assert_eq!(
            rules.first_match("第三章 总则"),
            heading(NumeralKind::Chapter, 3, "三", "总则")
        );
        assert_eq!(
            rules.first_match("第十一课课文"),
            heading(NumeralKind::Chapter, 11, "十一", "课文")
        );
    }

    #[test]
    fn test_content_lines() {
        let rules = create_default_rules();
        for text in ["这是内容第一行", "细节A", "内容", "第一章", "（一）"] {
            assert_eq!(rules.first_match(text), HeadingMatch::NotAHeading, "{text}");
        }
    }

    #[test]
    fn test_yaml_round_trip_preserves_order() {
        let rules = create_default_rules();
        let yaml = rules.to_yaml().unwrap();
        let reloaded = RuleSet::from_yaml_str(&yaml).unwrap();
        let original: Vec<_> = rules.specs().cloned().collect();
        let loaded: Vec<_> = reloaded.specs().cloned().collect();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_custom_order_changes_winner() {
        let rules = RuleSet::compile([
            RuleSpec::new(NumeralKind::ArabicBare, r"^(\d+)\s*(.+)$"),
            RuleSpec::new(NumeralKind::ArabicBracketed, r"^(\d+)[）)]\s*(.+)$"),
        ])
        .unwrap();
        match rules.first_match("1) 标题") {
            HeadingMatch::Heading { kind, .. } => assert_eq!(kind, NumeralKind::ArabicBare),
            HeadingMatch::NotAHeading => panic!("expected heading"),
        }
    }

    #[test]
    fn test_rejects_missing_groups() {
        let err = RuleSet::compile([RuleSpec::new(NumeralKind::ArabicBare, r"^(\d+)")])
            .unwrap_err();
        assert!(matches!(
            err,
            RuleError::MissingCaptureGroups { found: 1, .. }
        ));
    }

    #[test]
    fn test_rejects_invalid_regex() {
        let err = RuleSet::compile([RuleSpec::new(NumeralKind::Chapter, r"^(第")]).unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            RuleSet::compile(Vec::new()),
            Err(RuleError::EmptyRuleSet)
        ));
        assert!(matches!(
            RuleSet::from_yaml_str("rules: []"),
            Err(RuleError::EmptyRuleSet)
        ));
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let yaml = "rules:\n  - kind: roman\n    pattern: '^(I+)(.+)$'\n";
        assert!(matches!(
            RuleSet::from_yaml_str(yaml),
            Err(RuleError::Yaml(_))
        ));
    }
}
