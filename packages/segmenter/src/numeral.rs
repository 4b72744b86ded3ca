//! Conversion of heading numerals to integers.
//!
//! Every conversion is best-effort: input that cannot be resolved yields
//! [`FALLBACK_VALUE`] instead of an error. Callers that need to tell a real
//! "1" from a fallback must inspect the numeral text themselves.

use crate::types::NumeralSystem;

/// Value returned for numerals that cannot be resolved.
pub const FALLBACK_VALUE: u32 = 1;

/// Exact values for single characters and the whole tens.
fn table_value(numeral: &str) -> Option<u32> {
    let value = match numeral {
        "一" => 1,
        "二" => 2,
        "三" => 3,
        "四" => 4,
        "五" => 5,
        "六" => 6,
        "七" => 7,
        "八" => 8,
        "九" => 9,
        "十" => 10,
        "二十" => 20,
        "三十" => 30,
        _ => return None,
    };
    Some(value)
}

/// Convert a Chinese numeral (一 .. 三十 and similar composites) to an integer.
///
/// Composite forms are resolved by the position of 十:
/// - leading 十: ten plus the ones digit (十一 = 11)
/// - trailing 十: tens digit times ten (四十 = 40)
/// - inner 十: tens times ten plus ones (二十三 = 23)
///
/// Anything else returns [`FALLBACK_VALUE`].
///
/// # Examples
/// ```
/// use wordcards_segmenter::numeral::chinese_to_arabic;
///
/// assert_eq!(chinese_to_arabic("三"), 3);
/// assert_eq!(chinese_to_arabic("十一"), 11);
/// assert_eq!(chinese_to_arabic("二十"), 20);
/// assert_eq!(chinese_to_arabic("二十三"), 23);
/// assert_eq!(chinese_to_arabic("百"), 1); // fallback
/// ```
#[must_use]
pub fn chinese_to_arabic(numeral: &str) -> u32 {
    if let Some(value) = table_value(numeral) {
        return value;
    }

    if numeral.contains('十') {
        if let Some(ones) = numeral.strip_prefix('十') {
            return 10 + table_value(ones).unwrap_or(0);
        }

        if let Some(tens) = numeral.strip_suffix('十') {
            let tens = table_value(tens).unwrap_or(0);
            return if tens == 0 { 10 } else { tens * 10 };
        }

        let parts: Vec<&str> = numeral.split('十').collect();
        if let [tens, ones] = parts.as_slice() {
            return table_value(tens).unwrap_or(0) * 10 + table_value(ones).unwrap_or(0);
        }
    }

    tracing::debug!(numeral = %numeral, "Unresolvable Chinese numeral, using fallback value");
    FALLBACK_VALUE
}

/// Parse an ASCII decimal numeral. Overflow falls back to [`FALLBACK_VALUE`].
#[must_use]
pub fn arabic_to_number(numeral: &str) -> u32 {
    numeral.parse().unwrap_or_else(|_| {
        tracing::debug!(numeral = %numeral, "Unparseable Arabic numeral, using fallback value");
        FALLBACK_VALUE
    })
}

/// Position of an ASCII letter in the alphabet, case-insensitive (a = 1).
#[must_use]
pub fn letter_to_number(letter: char) -> u32 {
    let lower = letter.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        u32::from(lower) - u32::from('a') + 1
    } else {
        FALLBACK_VALUE
    }
}

/// Characters that make up a Chinese numeral.
const CHINESE_DIGITS: &str = "一二三四五六七八九十";

impl NumeralSystem {
    /// Whether `text` is nothing but a numeral in this system.
    ///
    /// # Examples
    /// ```
    /// use wordcards_segmenter::NumeralSystem;
    ///
    /// assert!(NumeralSystem::Chinese.is_bare_numeral("十二"));
    /// assert!(NumeralSystem::Arabic.is_bare_numeral("12"));
    /// assert!(!NumeralSystem::Chinese.is_bare_numeral("十分"));
    /// ```
    #[must_use]
    pub fn is_bare_numeral(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        match self {
            Self::Chinese => text.chars().all(|c| CHINESE_DIGITS.contains(c)),
            Self::Arabic => text.chars().all(|c| c.is_ascii_digit()),
            Self::Latin => {
                let mut chars = text.chars();
                matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
            }
        }
    }

    /// Value a numeral written in this system.
    #[must_use]
    pub fn value_of(&self, numeral: &str) -> u32 {
        match self {
            Self::Chinese => chinese_to_arabic(numeral),
            Self::Arabic => arabic_to_number(numeral),
            Self::Latin => numeral
                .chars()
                .next()
                .map_or(FALLBACK_VALUE, letter_to_number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_characters_match_table() {
        let expected = [
            ("一", 1),
            ("二", 2),
            ("三", 3),
            ("四", 4),
            ("五", 5),
            ("六", 6),
            ("七", 7),
            ("八", 8),
            ("九", 9),
            ("十", 10),
        ];
        for (numeral, value) in expected {
            assert_eq!(chinese_to_arabic(numeral), value, "numeral {numeral}");
        }
    }

    #[test]
    fn test_leading_ten() {
        assert_eq!(chinese_to_arabic("十一"), 11);
        assert_eq!(chinese_to_arabic("十九"), 19);
    }

    #[test]
    fn test_whole_tens() {
        assert_eq!(chinese_to_arabic("二十"), 20);
        assert_eq!(chinese_to_arabic("三十"), 30);
        assert_eq!(chinese_to_arabic("四十"), 40);
        assert_eq!(chinese_to_arabic("九十"), 90);
    }

    #[test]
    fn test_tens_and_ones() {
        assert_eq!(chinese_to_arabic("二十一"), 21);
        assert_eq!(chinese_to_arabic("二十九"), 29);
        assert_eq!(chinese_to_arabic("三十五"), 35);
    }

    #[test]
    fn test_unresolvable_falls_back_to_one() {
        assert_eq!(chinese_to_arabic(""), FALLBACK_VALUE);
        assert_eq!(chinese_to_arabic("二三"), FALLBACK_VALUE);
        assert_eq!(chinese_to_arabic("百"), FALLBACK_VALUE);
        // Two inner 十 split into three parts
        assert_eq!(chinese_to_arabic("二十三十四"), FALLBACK_VALUE);
    }

    #[test]
    fn test_arabic() {
        assert_eq!(arabic_to_number("7"), 7);
        assert_eq!(arabic_to_number("012"), 12);
        assert_eq!(arabic_to_number("99999999999999"), FALLBACK_VALUE);
    }

    #[test]
    fn test_letters() {
        assert_eq!(letter_to_number('a'), 1);
        assert_eq!(letter_to_number('B'), 2);
        assert_eq!(letter_to_number('z'), 26);
        assert_eq!(letter_to_number('中'), FALLBACK_VALUE);
    }

    #[test]
    fn test_numeral_system_dispatch() {
        assert_eq!(NumeralSystem::Chinese.value_of("十二"), 12);
        assert_eq!(NumeralSystem::Arabic.value_of("42"), 42);
        assert_eq!(NumeralSystem::Latin.value_of("c"), 3);
        assert_eq!(NumeralSystem::Latin.value_of(""), FALLBACK_VALUE);
    }

    #[test]
    fn test_is_bare_numeral() {
        assert!(NumeralSystem::Chinese.is_bare_numeral("二十三"));
        assert!(!NumeralSystem::Chinese.is_bare_numeral("十二条"));
        assert!(!NumeralSystem::Chinese.is_bare_numeral(""));
        assert!(NumeralSystem::Arabic.is_bare_numeral("2024"));
        assert!(!NumeralSystem::Arabic.is_bare_numeral("２"));
        assert!(NumeralSystem::Latin.is_bare_numeral("b"));
        assert!(!NumeralSystem::Latin.is_bare_numeral("ab"));
    }
}
