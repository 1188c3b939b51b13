use crate::format::{SEPARATORS, is_separator, strip_separators};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static HEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F{}:\-]+$").expect("valid hex pattern")
});
static ALNUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-z_\-]+$").expect("valid alnum pattern")
});
static ALNUM_STRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-z]+$").expect("valid strict alnum pattern")
});

/// Character-set family of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    /// Hex digits plus separators.
    Hexadecimal,
    /// Letters, digits, `_` and `-`.
    Alphanumeric,
    /// Letters and digits once separators are removed.
    AlphanumericNoSpecial,
    Unknown,
}

/// Letter case of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStyle {
    Upper,
    Lower,
    Mixed,
}

/// Layout facts about a value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureAnalysis {
    pub total_length: usize,
    /// Length with separators removed.
    pub data_length: usize,
    pub segment_count: usize,
    pub segment_lengths: Vec<usize>,
    pub has_hyphens: bool,
    pub has_braces: bool,
    pub charset: Charset,
    pub case: CaseStyle,
}

/// Classifies the character set. The checks run in a fixed order and the
/// first match wins.
pub fn classify_charset(value: &str) -> Charset {
    if HEX.is_match(value) {
        Charset::Hexadecimal
    } else if ALNUM.is_match(value) {
        Charset::Alphanumeric
    } else if ALNUM_STRICT.is_match(&strip_separators(value)) {
        Charset::AlphanumericNoSpecial
    } else {
        Charset::Unknown
    }
}

/// Classifies case by comparing the value with its upper- and lower-cased
/// forms. Values without letters count as upper case.
pub fn classify_case(value: &str) -> CaseStyle {
    if value == value.to_uppercase() {
        CaseStyle::Upper
    } else if value == value.to_lowercase() {
        CaseStyle::Lower
    } else {
        CaseStyle::Mixed
    }
}

pub fn analyze_structure(value: &str) -> StructureAnalysis {
    let segment_lengths: Vec<usize> = value
        .split(SEPARATORS)
        .filter(|s| !s.is_empty())
        .map(|s| s.chars().count())
        .collect();

    StructureAnalysis {
        total_length: value.chars().count(),
        data_length: value.chars().filter(|&c| !is_separator(c)).count(),
        segment_count: segment_lengths.len(),
        segment_lengths,
        has_hyphens: value.contains('-'),
        has_braces: value.contains('{') || value.contains('}'),
        charset: classify_charset(value),
        case: classify_case(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_structure() {
        let s = analyze_structure("0193abcd-ef01-4a2b-8c3d-0123456789ab");
        assert_eq!(s.total_length, 36);
        assert_eq!(s.data_length, 32);
        assert_eq!(s.segment_lengths, vec![8, 4, 4, 4, 12]);
        assert!(s.has_hyphens);
        assert!(!s.has_braces);
        assert_eq!(s.charset, Charset::Hexadecimal);
        assert_eq!(s.case, CaseStyle::Lower);
    }

    #[test]
    fn braced_value_counts_braces_as_separators() {
        let s = analyze_structure("{ABCD-1234}");
        assert!(s.has_braces);
        assert_eq!(s.data_length, 8);
        assert_eq!(s.segment_count, 2);
        assert_eq!(s.case, CaseStyle::Upper);
    }

    #[test]
    fn charset_checks_run_in_order() {
        assert_eq!(classify_charset("deadbeef"), Charset::Hexadecimal);
        assert_eq!(classify_charset("V1StGXR8_Z5jdHi6B-myT"), Charset::Alphanumeric);
        assert_eq!(
            classify_charset("urn:uuid:0193abcd"),
            Charset::AlphanumericNoSpecial
        );
        assert_eq!(classify_charset("id with space"), Charset::Unknown);
        assert_eq!(classify_charset(""), Charset::Unknown);
    }

    #[test]
    fn case_detection() {
        assert_eq!(classify_case("01ARZ3NDEK"), CaseStyle::Upper);
        assert_eq!(classify_case("abc123"), CaseStyle::Lower);
        assert_eq!(classify_case("aBc"), CaseStyle::Mixed);
        assert_eq!(classify_case("1234"), CaseStyle::Upper);
    }
}
