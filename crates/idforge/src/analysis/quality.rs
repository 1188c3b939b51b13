use crate::{
    IdKind,
    format::{is_separator, strip_separators},
};
use regex::Regex;
use serde::Serialize;
use std::{collections::HashMap, sync::LazyLock};

static UUID_V4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("valid uuid v4 pattern")
});

/// Data length at which uniqueness saturates.
const FULL_UNIQUENESS_LENGTH: f64 = 32.0;
const ISSUE_BELOW: f64 = 70.0;
const STRONG_UNIQUENESS: f64 = 90.0;
const STRONG_RANDOMNESS: f64 = 80.0;
const STRONG_COMPLIANCE: f64 = 90.0;
const STRONG_READABILITY: f64 = 80.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAnalysis {
    pub uniqueness_score: f64,
    pub randomness_score: f64,
    pub format_compliance: f64,
    pub readability: f64,
    /// Mean of the four scores above.
    pub overall_score: f64,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

/// Returns `true` if `value` has the canonical v4 layout, ignoring case.
pub fn is_uuid_v4(value: &str) -> bool {
    UUID_V4.is_match(value)
}

/// `min(100, data_length / 32 * 100)`.
pub fn uniqueness_score(data_length: usize) -> f64 {
    (data_length as f64 / FULL_UNIQUENESS_LENGTH * 100.0).min(100.0)
}

/// `100 - most_frequent / total * 100` over the data characters, clamped at
/// zero. A character-frequency skew measure, not a statistical test. An empty
/// value scores zero.
pub fn randomness_score(value: &str) -> f64 {
    let data = strip_separators(value);
    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in data.chars() {
        *counts.entry(c).or_default() += 1;
    }
    let total: usize = counts.values().sum();
    let Some(&max) = counts.values().max() else {
        return 0.0;
    };
    (100.0 - max as f64 / total as f64 * 100.0).max(0.0)
}

/// 50 when a value claims to be `uuid_v4` without matching its layout,
/// otherwise 100.
pub fn format_compliance(value: &str, kind: IdKind) -> f64 {
    if kind == IdKind::UuidV4 && !is_uuid_v4(value) {
        50.0
    } else {
        100.0
    }
}

/// 90 when the value is visually segmented, 70 otherwise.
pub fn readability(value: &str) -> f64 {
    if value.chars().any(is_separator) {
        90.0
    } else {
        70.0
    }
}

pub fn analyze_quality(value: &str, data_length: usize, kind: IdKind) -> QualityAnalysis {
    let uniqueness_score = uniqueness_score(data_length);
    let randomness_score = randomness_score(value);
    let format_compliance = format_compliance(value, kind);
    let readability = readability(value);
    let overall_score =
        (uniqueness_score + randomness_score + format_compliance + readability) / 4.0;

    let mut issues = Vec::new();
    let mut strengths = Vec::new();

    if uniqueness_score < ISSUE_BELOW {
        issues.push("Low uniqueness: too few data characters".to_string());
    } else if uniqueness_score >= STRONG_UNIQUENESS {
        strengths.push("High uniqueness potential".to_string());
    }

    if randomness_score < ISSUE_BELOW {
        issues.push("Uneven character distribution".to_string());
    } else if randomness_score >= STRONG_RANDOMNESS {
        strengths.push("Good character distribution".to_string());
    }

    if format_compliance < ISSUE_BELOW {
        issues.push("Does not match the expected format for its kind".to_string());
    } else if format_compliance >= STRONG_COMPLIANCE {
        strengths.push("Follows its format".to_string());
    }

    if readability < ISSUE_BELOW {
        issues.push("Hard to read".to_string());
    } else if readability >= STRONG_READABILITY {
        strengths.push("Segmented for readability".to_string());
    }

    QualityAnalysis {
        uniqueness_score,
        randomness_score,
        format_compliance,
        readability,
        overall_score,
        issues,
        strengths,
    }
}
