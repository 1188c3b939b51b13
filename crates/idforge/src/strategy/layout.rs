use super::{
    code::{BASE62_ALPHABET, NANOID_LENGTH, SHORTID_LENGTH, URL_SAFE_ALPHABET},
    sortable::{RANDOM_CHARS, TIME_CHARS},
};
use crate::{GenerationSettings, IdKind, base32::is_canonical_base32};
use uuid::{Uuid, Variant};

/// Checks an unformatted value against the layout its kind promises.
///
/// Returns a human-readable reason on mismatch. Used when
/// [`GenerationSettings::validate`] is on; a mismatch marks the item invalid
/// without failing the batch.
pub fn check_layout(kind: IdKind, raw: &str, settings: &GenerationSettings) -> Result<(), String> {
    match kind {
        IdKind::UuidV1 | IdKind::UuidV4 | IdKind::UuidV5 => {
            let uuid = Uuid::try_parse(raw).map_err(|e| format!("not an RFC-4122 value: {e}"))?;
            let expected = kind.version().map(usize::from);
            if Some(uuid.get_version_num()) != expected {
                return Err(format!(
                    "version nibble is {}, expected {}",
                    uuid.get_version_num(),
                    expected.unwrap_or_default()
                ));
            }
            if uuid.get_variant() != Variant::RFC4122 {
                return Err("variant is not RFC-4122".to_string());
            }
            Ok(())
        }
        IdKind::NanoId => check_code(
            raw,
            URL_SAFE_ALPHABET,
            settings.custom_length.unwrap_or(NANOID_LENGTH),
        ),
        IdKind::ShortId => check_code(
            raw,
            BASE62_ALPHABET,
            settings.custom_length.unwrap_or(SHORTID_LENGTH),
        ),
        IdKind::Ulid => {
            if raw.len() != TIME_CHARS + RANDOM_CHARS {
                return Err(format!(
                    "length is {}, expected {}",
                    raw.len(),
                    TIME_CHARS + RANDOM_CHARS
                ));
            }
            if !is_canonical_base32(raw) {
                return Err("contains characters outside Crockford base32".to_string());
            }
            Ok(())
        }
        IdKind::Custom => {
            let charset = settings.custom_charset();
            let expected = settings.custom_length.unwrap_or_default();
            let length = raw.chars().count();
            if length != expected {
                return Err(format!("length is {length}, expected {expected}"));
            }
            match raw.chars().find(|c| !charset.contains(c)) {
                Some(c) => Err(format!("character `{c}` is not in the custom alphabet")),
                None => Ok(()),
            }
        }
    }
}

fn check_code(raw: &str, alphabet: &str, expected: usize) -> Result<(), String> {
    let length = raw.chars().count();
    if length != expected {
        return Err(format!("length is {length}, expected {expected}"));
    }
    match raw.chars().find(|&c| !alphabet.contains(c)) {
        Some(c) => Err(format!("character `{c}` is outside the kind's alphabet")),
        None => Ok(()),
    }
}
