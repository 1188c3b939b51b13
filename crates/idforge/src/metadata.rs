use crate::{GenerationSettings, IdFormat, IdKind, randomness_score};
use core::fmt;
use serde::Serialize;

/// Coarse classification of a value's estimated entropy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl SecurityLevel {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    /// `< 64` low, `< 100` medium, `< 122` high, otherwise very high.
    pub fn from_entropy(bits: f64) -> Self {
        if bits < 64.0 {
            Self::Low
        } else if bits < 100.0 {
            Self::Medium
        } else if bits < 122.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived facts about one formatted value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub length: usize,
    pub format: IdFormat,
    /// Random bits the kind's rule draws for one value.
    pub entropy_bits: f64,
    pub randomness_score: f64,
    /// Birthday-bound probability of any collision across the requested
    /// count.
    pub collision_probability: f64,
    pub security_level: SecurityLevel,
    pub use_cases: &'static [&'static str],
    pub standards: &'static [&'static str],
}

/// Random bits behind one value of `kind` under `settings`.
///
/// The RFC kinds lose their fixed version and variant bits; `uuid_v5` is only
/// as unpredictable as its generated 64-bit name.
pub fn entropy_bits(kind: IdKind, settings: &GenerationSettings) -> f64 {
    let chars = |default: usize| settings.custom_length.unwrap_or(default) as f64;
    match kind {
        IdKind::UuidV4 => 122.0,
        IdKind::UuidV1 => 74.0,
        IdKind::UuidV5 => 64.0,
        IdKind::NanoId => chars(crate::NANOID_LENGTH) * 6.0,
        IdKind::ShortId => chars(crate::SHORTID_LENGTH) * 62_f64.log2(),
        IdKind::Ulid => 80.0,
        IdKind::Custom => {
            let symbols = settings.custom_charset().len();
            if symbols < 2 {
                0.0
            } else {
                chars(0) * (symbols as f64).log2()
            }
        }
    }
}

/// `1 - exp(-n(n-1) / 2^(bits+1))`.
pub fn collision_probability(count: usize, bits: f64) -> f64 {
    if count < 2 {
        return 0.0;
    }
    let n = count as f64;
    let exponent = n * (n - 1.0) / 2_f64.powf(bits + 1.0);
    (-(-exponent).exp_m1()).clamp(0.0, 1.0)
}

const fn use_cases(kind: IdKind) -> &'static [&'static str] {
    match kind {
        IdKind::UuidV4 => &["Primary keys", "Session identifiers", "Distributed systems"],
        IdKind::UuidV1 => &["Time-ordered records", "Audit trails"],
        IdKind::UuidV5 => &["Deterministic identifiers", "Content addressing"],
        IdKind::NanoId => &["URL slugs", "Client-side identifiers"],
        IdKind::ShortId => &["Short links", "Human-facing codes"],
        IdKind::Ulid => &["Sortable primary keys", "Event logs"],
        IdKind::Custom => &["Domain-specific codes"],
    }
}

const fn standards(kind: IdKind) -> &'static [&'static str] {
    match kind {
        IdKind::UuidV1 | IdKind::UuidV4 | IdKind::UuidV5 => &["RFC 4122", "RFC 9562"],
        IdKind::Ulid => &["ULID"],
        IdKind::NanoId | IdKind::ShortId | IdKind::Custom => &[],
    }
}

/// Computes metadata for a formatted value.
pub fn metadata(value: &str, kind: IdKind, settings: &GenerationSettings) -> Metadata {
    let entropy_bits = entropy_bits(kind, settings);
    Metadata {
        length: value.chars().count(),
        format: settings.format,
        entropy_bits,
        randomness_score: randomness_score(value),
        collision_probability: collision_probability(settings.count, entropy_bits),
        security_level: SecurityLevel::from_entropy(entropy_bits),
        use_cases: use_cases(kind),
        standards: standards(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_buckets() {
        assert_eq!(SecurityLevel::from_entropy(0.0), SecurityLevel::Low);
        assert_eq!(SecurityLevel::from_entropy(64.0), SecurityLevel::Medium);
        assert_eq!(SecurityLevel::from_entropy(100.0), SecurityLevel::High);
        assert_eq!(SecurityLevel::from_entropy(122.0), SecurityLevel::VeryHigh);
    }

    #[test]
    fn kind_entropy() {
        let settings = GenerationSettings::default();
        assert_eq!(entropy_bits(IdKind::UuidV4, &settings), 122.0);
        assert_eq!(entropy_bits(IdKind::NanoId, &settings), 126.0);
        let custom = GenerationSettings {
            kind: IdKind::Custom,
            custom_alphabet: Some("01".into()),
            custom_length: Some(8),
            ..settings
        };
        assert_eq!(entropy_bits(IdKind::Custom, &custom), 8.0);
    }

    #[test]
    fn collision_probability_grows_with_count() {
        assert_eq!(collision_probability(1, 8.0), 0.0);
        let small = collision_probability(10, 8.0);
        let large = collision_probability(100, 8.0);
        assert!(small > 0.0 && small < large);
        assert!(large <= 1.0);
        assert!(collision_probability(100_000, 122.0) < 1e-20);
    }

    #[test]
    fn metadata_for_uuid() {
        let settings = GenerationSettings::new(IdKind::UuidV4, 1_000);
        let meta = metadata("0193abcd-ef01-4a2b-8c3d-0123456789ab", IdKind::UuidV4, &settings);
        assert_eq!(meta.length, 36);
        assert_eq!(meta.security_level, SecurityLevel::VeryHigh);
        assert_eq!(meta.standards, &["RFC 4122", "RFC 9562"]);
        assert_eq!(meta.format, IdFormat::Standard);
    }
}
