use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// The identifier family being generated.
///
/// Parsing is lossy on purpose: any unrecognised tag resolves to
/// [`IdKind::UuidV4`]. Consumers that persisted older or foreign tags rely on
/// that fallback, so [`FromStr`] never fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum IdKind {
    /// Time-derived RFC-4122 layout, version nibble `1`.
    UuidV1,
    /// Random RFC-4122 layout, version nibble `4`.
    UuidV4,
    /// Name-based (SHA-1) RFC-4122 layout, version nibble `5`.
    UuidV5,
    /// 21-character URL-safe random code.
    NanoId,
    /// 10-character base-62 random code.
    ShortId,
    /// 26-character Crockford base32 time-sortable code.
    Ulid,
    /// Caller-supplied alphabet and length.
    Custom,
}

impl IdKind {
    pub const ALL: [Self; 7] = [
        Self::UuidV1,
        Self::UuidV4,
        Self::UuidV5,
        Self::NanoId,
        Self::ShortId,
        Self::Ulid,
        Self::Custom,
    ];

    /// Canonical tag used in settings and exports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UuidV1 => "uuid_v1",
            Self::UuidV4 => "uuid_v4",
            Self::UuidV5 => "uuid_v5",
            Self::NanoId => "nanoid",
            Self::ShortId => "shortid",
            Self::Ulid => "ulid",
            Self::Custom => "custom",
        }
    }

    /// Position of this kind in [`IdKind::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Resolves a tag, falling back to [`IdKind::UuidV4`] for anything
    /// unrecognised. Matching ignores ASCII case and accepts `-` for `_`.
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .unwrap_or(Self::UuidV4)
    }

    /// The RFC-4122 version tag, for the kinds that carry one.
    pub const fn version(self) -> Option<u8> {
        match self {
            Self::UuidV1 => Some(1),
            Self::UuidV4 => Some(4),
            Self::UuidV5 => Some(5),
            _ => None,
        }
    }

    /// Kinds whose value embeds the generation time.
    pub const fn is_time_based(self) -> bool {
        matches!(self, Self::UuidV1 | Self::Ulid)
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdKind {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<String> for IdKind {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<IdKind> for &'static str {
    fn from(kind: IdKind) -> Self {
        kind.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip() {
        for kind in IdKind::ALL {
            assert_eq!(IdKind::from_tag(kind.as_str()), kind);
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_uuid_v4() {
        assert_eq!(IdKind::from_tag("snowflake"), IdKind::UuidV4);
        assert_eq!(IdKind::from_tag(""), IdKind::UuidV4);
        assert_eq!("ksuid".parse::<IdKind>(), Ok(IdKind::UuidV4));
    }

    #[test]
    fn tags_are_case_and_dash_insensitive() {
        assert_eq!(IdKind::from_tag("UUID-V1"), IdKind::UuidV1);
        assert_eq!(IdKind::from_tag(" NanoId "), IdKind::NanoId);
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, kind) in IdKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn serde_uses_lossy_tags() {
        let kind: IdKind = serde_json::from_str("\"made_up\"").unwrap();
        assert_eq!(kind, IdKind::UuidV4);
        assert_eq!(serde_json::to_string(&IdKind::Ulid).unwrap(), "\"ulid\"");
    }

    #[test]
    fn only_rfc_kinds_have_versions() {
        assert_eq!(IdKind::UuidV5.version(), Some(5));
        assert_eq!(IdKind::NanoId.version(), None);
    }
}
