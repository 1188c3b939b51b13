//! Output formatting.
//!
//! The pipeline order is fixed: case transform, then structural transform,
//! then prefix and suffix. Every step is total; nothing here can fail.

use crate::{CasePolicy, GenerationSettings, IdFormat};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Characters treated as structural separators rather than data.
pub const SEPARATORS: [char; 4] = ['-', '{', '}', ':'];

/// Scheme prepended by [`IdFormat::Urn`].
pub const URN_SCHEME: &str = "urn:uuid:";

/// Width of [`IdFormat::Base64`] output.
pub const BASE64_WIDTH: usize = 22;

/// Returns `true` if `c` is one of [`SEPARATORS`].
pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Removes every separator character.
pub fn strip_separators(value: &str) -> String {
    value.chars().filter(|&c| !is_separator(c)).collect()
}

/// Formats a raw value with the case policy and affixes from `settings`.
///
/// # Example
///
/// ```
/// use idforge::{CasePolicy, GenerationSettings, IdFormat, format_identifier};
///
/// let settings = GenerationSettings {
///     case: CasePolicy::Upper,
///     prefix: "ord_".into(),
///     ..GenerationSettings::default()
/// };
/// let out = format_identifier("ab-cd", IdFormat::Braced, &settings);
/// assert_eq!(out, "ord_{AB-CD}");
/// ```
pub fn format_identifier(raw: &str, format: IdFormat, settings: &GenerationSettings) -> String {
    let cased = apply_case(raw, settings.case);
    let body = apply_structure(&cased, format);

    let mut out = String::with_capacity(settings.prefix.len() + body.len() + settings.suffix.len());
    out.push_str(&settings.prefix);
    out.push_str(&body);
    out.push_str(&settings.suffix);
    out
}

/// Step 1: case transform.
pub fn apply_case(value: &str, case: CasePolicy) -> String {
    match case {
        CasePolicy::Upper => value.to_uppercase(),
        CasePolicy::Lower => value.to_lowercase(),
        CasePolicy::Preserve => value.to_string(),
    }
}

/// Step 2: structural transform.
pub fn apply_structure(value: &str, format: IdFormat) -> String {
    match format {
        IdFormat::Standard => value.to_string(),
        IdFormat::Compact => strip_separators(value),
        IdFormat::Braced => format!("{{{value}}}"),
        IdFormat::Urn => format!("{URN_SCHEME}{value}"),
        IdFormat::Base64 => to_base64_like(value),
        IdFormat::Hex => strip_separators(value).to_lowercase(),
    }
}

/// Re-encodes hex data as URL-safe base64. Values that are not whole-byte hex
/// keep only their alphanumeric characters instead.
fn to_base64_like(value: &str) -> String {
    let data = strip_separators(value);
    let encoded = match decode_hex(&data) {
        Some(bytes) => URL_SAFE_NO_PAD.encode(bytes),
        None => data.chars().filter(char::is_ascii_alphanumeric).collect(),
    };
    encoded.chars().take(BASE64_WIDTH).collect()
}

fn decode_hex(data: &str) -> Option<Vec<u8>> {
    if data.is_empty() || data.len() % 2 != 0 || !data.is_ascii() {
        return None;
    }
    (0..data.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&data[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "0193abcd-ef01-4a2b-8c3d-0123456789ab";

    fn plain() -> GenerationSettings {
        GenerationSettings::default()
    }

    #[test]
    fn standard_is_identity() {
        assert_eq!(format_identifier(RAW, IdFormat::Standard, &plain()), RAW);
    }

    #[test]
    fn standard_reapplication_is_idempotent() {
        for case in [CasePolicy::Upper, CasePolicy::Lower, CasePolicy::Preserve] {
            let settings = GenerationSettings {
                case,
                ..plain()
            };
            for raw in [RAW, "AbC-123", "{x:y}", ""] {
                let once = format_identifier(raw, IdFormat::Standard, &settings);
                let twice = format_identifier(&once, IdFormat::Standard, &settings);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn compact_strips_separators() {
        assert_eq!(
            format_identifier(RAW, IdFormat::Compact, &plain()),
            "0193abcdef014a2b8c3d0123456789ab"
        );
    }

    #[test]
    fn braced_and_urn_wrap_value() {
        assert_eq!(
            format_identifier("abc", IdFormat::Braced, &plain()),
            "{abc}"
        );
        assert_eq!(
            format_identifier("abc", IdFormat::Urn, &plain()),
            "urn:uuid:abc"
        );
    }

    #[test]
    fn hex_forces_lowercase_even_after_upper_case() {
        let settings = GenerationSettings {
            case: CasePolicy::Upper,
            ..plain()
        };
        assert_eq!(
            format_identifier(RAW, IdFormat::Hex, &settings),
            "0193abcdef014a2b8c3d0123456789ab"
        );
    }

    #[test]
    fn base64_reencodes_hex_bytes() {
        let out = format_identifier(RAW, IdFormat::Base64, &plain());
        assert_eq!(out.len(), BASE64_WIDTH);
        assert_eq!(out, "AZOrze8BSiuMPQEjRWeJqw");
    }

    #[test]
    fn base64_falls_back_to_alphanumerics() {
        let out = format_identifier("not_hex-value!", IdFormat::Base64, &plain());
        assert_eq!(out, "nothexvalue");
        let long = "Z".repeat(40);
        assert_eq!(
            format_identifier(&long, IdFormat::Base64, &plain()).len(),
            BASE64_WIDTH
        );
    }

    #[test]
    fn affixes_are_concatenated_after_structure() {
        let settings = GenerationSettings {
            prefix: "id_".into(),
            suffix: "_x".into(),
            ..plain()
        };
        assert_eq!(
            format_identifier("ab-cd", IdFormat::Compact, &settings),
            "id_abcd_x"
        );
    }
}
