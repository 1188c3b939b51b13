//! RFC-4122 style layouts.
//!
//! All three rules produce the canonical lower-case `8-4-4-4-12` form with the
//! variant nibble in `{8, 9, a, b}`; only the source of the 128 bits differs.

use crate::{RandSource, TimeSource};
use uuid::{Builder, Uuid, Variant, Version};

/// Mask selecting the low 80 bits of a `u128`.
const LOW_80: u128 = (1 << 80) - 1;

/// 128 random bits with the version nibble fixed to `4`.
pub fn uuid_v4<R>(rng: &R) -> String
where
    R: RandSource<u128> + ?Sized,
{
    Builder::from_random_bytes(rng.rand().to_be_bytes())
        .into_uuid()
        .to_string()
}

/// The current Unix millisecond timestamp as the leading 12 hex characters,
/// followed by 20 random hex characters, with the version nibble fixed to `1`.
///
/// This is not the Gregorian-epoch, node-based v1 layout: it keeps the
/// "time first" property so values generated later sort later in their first
/// twelve characters.
pub fn uuid_v1<T, R>(time: &T, rng: &R) -> String
where
    T: TimeSource<u64> + ?Sized,
    R: RandSource<u128> + ?Sized,
{
    let millis = u128::from(time.current_millis() & 0xFFFF_FFFF_FFFF);
    let raw = (millis << 80) | (rng.rand() & LOW_80);
    Builder::from_u128(raw)
        .with_version(Version::Mac)
        .with_variant(Variant::RFC4122)
        .into_uuid()
        .to_string()
}

/// SHA-1 name-based layout over `namespace` and a generated 16-hex-char name.
pub fn uuid_v5<R>(namespace: &Uuid, rng: &R) -> String
where
    R: RandSource<u64> + ?Sized,
{
    let name = format!("{:016x}", rng.rand());
    Uuid::new_v5(namespace, name.as_bytes()).to_string()
}

/// Resolves a caller-supplied namespace.
///
/// A string that parses as a UUID is used as-is; anything else is hashed under
/// the URL namespace so arbitrary labels still map to a stable namespace.
/// `None` selects the DNS namespace.
pub fn resolve_namespace(namespace: Option<&str>) -> Uuid {
    match namespace {
        None => Uuid::NAMESPACE_DNS,
        Some(raw) => Uuid::parse_str(raw.trim())
            .unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_URL, raw.as_bytes())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRand(u128);

    impl RandSource<u128> for FixedRand {
        fn rand(&self) -> u128 {
            self.0
        }
    }

    impl RandSource<u64> for FixedRand {
        fn rand(&self) -> u64 {
            self.0 as u64
        }
    }

    struct FixedTime(u64);

    impl TimeSource<u64> for FixedTime {
        fn current_millis(&self) -> u64 {
            self.0
        }
    }

    fn nibble(value: &str, index: usize) -> char {
        value.chars().nth(index).unwrap()
    }

    #[test]
    fn v4_sets_version_and_variant() {
        for seed in [0, u128::MAX, 0x0123_4567_89ab_cdef_0123_4567_89ab_cdef] {
            let value = uuid_v4(&FixedRand(seed));
            assert_eq!(value.len(), 36);
            assert_eq!(nibble(&value, 14), '4');
            assert!(matches!(nibble(&value, 19), '8' | '9' | 'a' | 'b'));
        }
    }

    #[test]
    fn v1_leads_with_timestamp_hex() {
        let value = uuid_v1(&FixedTime(0x0193_abcd_ef01), &FixedRand(0));
        assert!(value.starts_with("0193abcd-ef01-1"));
        assert!(matches!(nibble(&value, 19), '8' | '9' | 'a' | 'b'));
    }

    #[test]
    fn v1_later_timestamps_sort_later() {
        let early = uuid_v1(&FixedTime(1_000), &FixedRand(u128::MAX));
        let late = uuid_v1(&FixedTime(1_001), &FixedRand(0));
        assert!(early[..13] < late[..13]);
    }

    #[test]
    fn v5_is_deterministic_for_same_name() {
        let ns = resolve_namespace(None);
        let a = uuid_v5(&ns, &FixedRand(42));
        let b = uuid_v5(&ns, &FixedRand(42));
        assert_eq!(a, b);
        assert_eq!(nibble(&a, 14), '5');
        assert_ne!(a, uuid_v5(&ns, &FixedRand(43)));
    }

    #[test]
    fn namespace_accepts_uuid_or_label() {
        let url = "6ba7b811-9dad-11d1-80b4-00c04fd430c8";
        assert_eq!(resolve_namespace(Some(url)), Uuid::NAMESPACE_URL);
        let label = resolve_namespace(Some("orders"));
        assert_eq!(label, resolve_namespace(Some("orders")));
        assert_ne!(label, Uuid::NAMESPACE_DNS);
    }
}
