use crate::{GenerationSettings, IdKind, MAX_COUNT, MAX_CUSTOM_LENGTH};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Count above which analysis is flagged as expensive.
const LARGE_ANALYZED_BATCH: usize = 10_000;
/// Chunk size above which cancellation latency becomes noticeable.
const LARGE_CHUNK: usize = 5_000;
/// Smallest custom alphabet that can produce distinct values.
const MIN_CUSTOM_ALPHABET: usize = 2;
/// Shortest custom identifier accepted.
const MIN_CUSTOM_LENGTH: usize = 4;
/// Custom lengths below this produce a warning.
const RECOMMENDED_CUSTOM_LENGTH: usize = 8;

/// The settings field an issue refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationField {
    Count,
    ChunkSize,
    CustomAlphabet,
    CustomLength,
    Affixes,
}

impl ValidationField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::ChunkSize => "chunk_size",
            Self::CustomAlphabet => "custom_alphabet",
            Self::CustomLength => "custom_length",
            Self::Affixes => "affixes",
        }
    }
}

impl fmt::Display for ValidationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation finding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: ValidationField,
    pub message: String,
}

/// Outcome of validating [`GenerationSettings`].
///
/// Errors block a job from starting. Warnings and suggestions are
/// informational only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` if any error refers to `field`.
    pub fn has_error(&self, field: ValidationField) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// All error messages joined into one line.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub(crate) fn error(&mut self, field: ValidationField, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            field,
            message: message.into(),
        });
    }

    fn warn(&mut self, field: ValidationField, message: impl Into<String>, suggestion: &str) {
        self.warnings.push(ValidationIssue {
            field,
            message: message.into(),
        });
        self.suggestions.push(suggestion.to_string());
    }
}

/// Validates settings before a job is created.
pub fn validate(settings: &GenerationSettings) -> ValidationResult {
    let mut result = ValidationResult::default();

    if settings.count == 0 {
        result.error(ValidationField::Count, "Count must be greater than 0");
    } else if settings.count > MAX_COUNT {
        result.error(
            ValidationField::Count,
            format!(
                "Count {} exceeds maximum allowed ({MAX_COUNT})",
                settings.count
            ),
        );
    }

    if settings.chunk_size == 0 {
        result.error(ValidationField::ChunkSize, "Chunk size must be greater than 0");
    } else {
        if settings.count > 0 && settings.chunk_size > settings.count {
            result.warn(
                ValidationField::ChunkSize,
                format!(
                    "Chunk size {} is larger than count {}",
                    settings.chunk_size, settings.count
                ),
                "The whole batch will run as a single chunk; lower the chunk size to keep it pausable",
            );
        }
        if settings.chunk_size > LARGE_CHUNK {
            result.warn(
                ValidationField::ChunkSize,
                format!("Chunk size {} delays pause and cancel", settings.chunk_size),
                "Use a chunk size of 1000 or less for responsive cancellation",
            );
        }
    }

    if settings.kind == IdKind::Custom {
        let distinct = settings.custom_charset().len();
        if distinct < MIN_CUSTOM_ALPHABET {
            result.error(
                ValidationField::CustomAlphabet,
                format!(
                    "Custom alphabet needs at least {MIN_CUSTOM_ALPHABET} distinct characters, found {distinct}"
                ),
            );
        }
        match settings.custom_length {
            Some(len) if len > MAX_CUSTOM_LENGTH => result.error(
                ValidationField::CustomLength,
                format!("Custom length must be at most {MAX_CUSTOM_LENGTH}, got {len}"),
            ),
            Some(len) if len >= MIN_CUSTOM_LENGTH => {
                if len < RECOMMENDED_CUSTOM_LENGTH {
                    result.warn(
                        ValidationField::CustomLength,
                        format!("Custom length {len} gives little collision headroom"),
                        "Use a custom length of 8 or more",
                    );
                }
            }
            Some(len) => result.error(
                ValidationField::CustomLength,
                format!("Custom length must be at least {MIN_CUSTOM_LENGTH}, got {len}"),
            ),
            None => result.error(
                ValidationField::CustomLength,
                "Custom kind requires a custom length",
            ),
        }
    }

    if matches!(settings.kind, IdKind::NanoId | IdKind::ShortId) {
        match settings.custom_length {
            Some(0) => result.error(
                ValidationField::CustomLength,
                "Length override must be greater than 0",
            ),
            Some(len) if len > MAX_CUSTOM_LENGTH => result.error(
                ValidationField::CustomLength,
                format!("Length override must be at most {MAX_CUSTOM_LENGTH}, got {len}"),
            ),
            _ => {}
        }
    }

    if settings.count > LARGE_ANALYZED_BATCH && settings.include_analysis {
        result.warn(
            ValidationField::Count,
            format!(
                "Analyzing {} identifiers will take noticeably longer",
                settings.count
            ),
            "Disable analysis for very large batches",
        );
    }

    if settings.prefix.chars().chain(settings.suffix.chars()).any(char::is_whitespace) {
        result.warn(
            ValidationField::Affixes,
            "Prefix or suffix contains whitespace",
            "Avoid whitespace in identifiers that will be copied or embedded in URLs",
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_a_count_error() {
        let result = validate(&GenerationSettings::new(IdKind::UuidV4, 0));
        assert!(!result.is_valid());
        assert!(result.has_error(ValidationField::Count));
        assert_eq!(result.errors[0].field.as_str(), "count");
    }

    #[test]
    fn count_above_bound_is_rejected() {
        let result = validate(&GenerationSettings::new(IdKind::UuidV4, MAX_COUNT + 1));
        assert!(result.has_error(ValidationField::Count));
        assert!(validate(&GenerationSettings::new(IdKind::UuidV4, MAX_COUNT)).is_valid());
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let settings = GenerationSettings {
            chunk_size: 0,
            ..GenerationSettings::default()
        };
        assert!(validate(&settings).has_error(ValidationField::ChunkSize));
    }

    #[test]
    fn oversized_chunk_only_warns() {
        let settings = GenerationSettings {
            count: 5,
            chunk_size: 50,
            ..GenerationSettings::default()
        };
        let result = validate(&settings);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn custom_kind_needs_two_distinct_characters() {
        let settings = GenerationSettings {
            kind: IdKind::Custom,
            custom_alphabet: Some("aaaa".into()),
            custom_length: Some(8),
            ..GenerationSettings::default()
        };
        assert!(validate(&settings).has_error(ValidationField::CustomAlphabet));
    }

    #[test]
    fn custom_kind_needs_length_of_four() {
        let mut settings = GenerationSettings {
            kind: IdKind::Custom,
            custom_alphabet: Some("01".into()),
            custom_length: Some(3),
            ..GenerationSettings::default()
        };
        assert!(validate(&settings).has_error(ValidationField::CustomLength));

        settings.custom_length = None;
        assert!(validate(&settings).has_error(ValidationField::CustomLength));

        settings.custom_length = Some(4);
        let result = validate(&settings);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == ValidationField::CustomLength));
        assert!(!result.warnings.iter().any(|w| w.field == ValidationField::ChunkSize));
    }

    #[test]
    fn default_settings_have_no_findings() {
        let result = validate(&GenerationSettings::default());
        assert!(result.is_valid());
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn length_overrides_are_capped() {
        for kind in [IdKind::NanoId, IdKind::ShortId] {
            let mut settings = GenerationSettings {
                custom_length: Some(MAX_CUSTOM_LENGTH + 1),
                ..GenerationSettings::default()
            };
            settings.kind = kind;
            assert!(validate(&settings).has_error(ValidationField::CustomLength));
            settings.custom_length = Some(MAX_CUSTOM_LENGTH);
            assert!(validate(&settings).is_valid());
        }

        let settings = GenerationSettings {
            custom_alphabet: Some("01".into()),
            custom_length: Some(usize::MAX),
            ..GenerationSettings::new(IdKind::Custom, 10)
        };
        assert!(validate(&settings).has_error(ValidationField::CustomLength));
    }

    #[test]
    fn custom_fields_are_ignored_for_other_kinds() {
        let settings = GenerationSettings {
            custom_alphabet: Some(String::new()),
            custom_length: Some(1),
            ..GenerationSettings::default()
        };
        assert!(validate(&settings).is_valid());
    }

    #[test]
    fn short_code_length_override_must_be_positive() {
        let settings = GenerationSettings {
            kind: IdKind::NanoId,
            custom_length: Some(0),
            ..GenerationSettings::default()
        };
        assert!(validate(&settings).has_error(ValidationField::CustomLength));
    }

    #[test]
    fn summary_joins_errors() {
        let settings = GenerationSettings {
            count: 0,
            chunk_size: 0,
            ..GenerationSettings::default()
        };
        let summary = validate(&settings).summary();
        assert!(summary.contains("count:"));
        assert!(summary.contains("chunk_size:"));
    }
}
