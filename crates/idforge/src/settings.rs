use crate::IdKind;
use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// Hard upper bound on identifiers per job.
pub const MAX_COUNT: usize = 100_000;

/// Default number of identifiers generated between two yield points.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Default number of identifiers per job. Never below [`DEFAULT_CHUNK_SIZE`],
/// so default settings validate without warnings.
pub const DEFAULT_COUNT: usize = DEFAULT_CHUNK_SIZE;

/// Longest length override accepted for the custom and short-code kinds.
pub const MAX_CUSTOM_LENGTH: usize = 1_024;

/// Structural output format applied by the formatter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdFormat {
    /// Raw value, unchanged.
    #[default]
    Standard,
    /// Separators removed.
    Compact,
    /// Wrapped in `{` and `}`.
    Braced,
    /// Prefixed with `urn:uuid:`.
    Urn,
    /// Re-encoded into URL-safe base64, truncated to a fixed width.
    Base64,
    /// Separators removed, lower-cased.
    Hex,
}

/// Case transform applied before the structural format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePolicy {
    Upper,
    Lower,
    #[default]
    Preserve,
}

/// Orderings accepted when selecting items for export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Generation order (index ascending).
    #[default]
    Generated,
    ValueAsc,
    ValueDesc,
    QualityDesc,
    SecurityDesc,
    LengthAsc,
}

/// External representations understood by the exporter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// One JSON document with a job summary and every identifier.
    #[default]
    Json,
    /// RFC-4180 CSV with a fixed column order.
    Csv,
    /// XML with CDATA-escaped text nodes.
    Xml,
    /// Human-readable report.
    Text,
}

/// Optional filter applied before export.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Minimum overall quality score (0-100).
    pub min_quality: Option<f64>,
    /// Minimum security score (0-100).
    pub min_security: Option<u32>,
    /// Restrict to these kinds. Empty means all kinds.
    pub kinds: Vec<IdKind>,
    /// Drop items whose generation failed.
    pub valid_only: bool,
}

impl FilterCriteria {
    /// `true` when the criteria would keep every item.
    pub fn is_empty(&self) -> bool {
        self.min_quality.is_none()
            && self.min_security.is_none()
            && self.kinds.is_empty()
            && !self.valid_only
    }
}

/// Immutable configuration of one generation job.
///
/// Use [`crate::validate`] before starting a job; the orchestrator refuses
/// settings that produce validation errors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationSettings {
    pub kind: IdKind,
    pub count: usize,
    pub format: IdFormat,
    pub case: CasePolicy,
    pub chunk_size: usize,
    /// Alphabet for [`IdKind::Custom`].
    pub custom_alphabet: Option<String>,
    /// Length for [`IdKind::Custom`]; also overrides the default length of the
    /// short-code kinds.
    pub custom_length: Option<usize>,
    /// Namespace for [`IdKind::UuidV5`]. Either a UUID or any string.
    pub namespace: Option<String>,
    pub include_metadata: bool,
    pub include_analysis: bool,
    /// Check every value against its kind's layout and mark mismatches
    /// invalid.
    pub validate: bool,
    /// Count distinct values in the final statistics.
    pub track_duplicates: bool,
    pub prefix: String,
    pub suffix: String,
    pub filter: FilterCriteria,
    pub sort: SortOrder,
    pub export_format: ExportFormat,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            kind: IdKind::UuidV4,
            count: DEFAULT_COUNT,
            format: IdFormat::Standard,
            case: CasePolicy::Preserve,
            chunk_size: DEFAULT_CHUNK_SIZE,
            custom_alphabet: None,
            custom_length: None,
            namespace: None,
            include_metadata: true,
            include_analysis: true,
            validate: true,
            track_duplicates: true,
            prefix: String::new(),
            suffix: String::new(),
            filter: FilterCriteria::default(),
            sort: SortOrder::Generated,
            export_format: ExportFormat::Json,
        }
    }
}

impl GenerationSettings {
    /// Settings for `count` identifiers of `kind`, everything else default.
    pub fn new(kind: IdKind, count: usize) -> Self {
        Self {
            kind,
            count,
            ..Self::default()
        }
    }

    /// Number of chunks the run loop will execute.
    pub const fn total_chunks(&self) -> usize {
        if self.chunk_size == 0 {
            0
        } else {
            self.count.div_ceil(self.chunk_size)
        }
    }

    /// Distinct characters of the custom alphabet, in first-seen order.
    pub fn custom_charset(&self) -> Vec<char> {
        let mut seen = Vec::new();
        for c in self.custom_alphabet.as_deref().unwrap_or_default().chars() {
            if !seen.contains(&c) {
                seen.push(c);
            }
        }
        seen
    }
}

macro_rules! impl_tag {
    ($ty:ty { $($variant:ident => $tag:literal),+ $(,)? }) => {
        impl $ty {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
                    $($tag => Ok(Self::$variant),)+
                    other => Err(format!("unrecognised value `{other}`")),
                }
            }
        }
    };
}

impl_tag!(IdFormat {
    Standard => "standard",
    Compact => "compact",
    Braced => "braced",
    Urn => "urn",
    Base64 => "base64",
    Hex => "hex",
});

impl_tag!(CasePolicy {
    Upper => "upper",
    Lower => "lower",
    Preserve => "preserve",
});

impl_tag!(SortOrder {
    Generated => "generated",
    ValueAsc => "value_asc",
    ValueDesc => "value_desc",
    QualityDesc => "quality_desc",
    SecurityDesc => "security_desc",
    LengthAsc => "length_asc",
});

impl_tag!(ExportFormat {
    Json => "json",
    Csv => "csv",
    Xml => "xml",
    Text => "text",
});
