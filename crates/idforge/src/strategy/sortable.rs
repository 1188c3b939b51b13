use crate::{RandSource, TimeSource, base32::encode_base32};

/// Characters used by the timestamp component.
pub const TIME_CHARS: usize = 10;
/// Characters used by the random component.
pub const RANDOM_CHARS: usize = 16;

/// A 26-character Crockford base32 code: 48 bits of Unix milliseconds
/// followed by 80 random bits.
///
/// Codes generated in later milliseconds compare greater lexicographically.
pub fn sortable_code<T, R>(time: &T, rng: &R) -> String
where
    T: TimeSource<u64> + ?Sized,
    R: RandSource<u128> + ?Sized,
{
    let millis = time.current_millis() & 0xFFFF_FFFF_FFFF;
    let random = rng.rand();

    let mut out = encode_base32(&millis.to_be_bytes()[2..], TIME_CHARS);
    out.push_str(&encode_base32(&random.to_be_bytes()[6..], RANDOM_CHARS));
    out
}

/// Recovers the millisecond timestamp from a sortable code.
pub fn sortable_timestamp(code: &str) -> Option<u64> {
    code.get(..TIME_CHARS)
        .and_then(crate::base32::decode_base32_u64)
}
