use crate::{Error, RandSource, Result, pick_index};

/// URL-safe 64-character alphabet used by `nanoid`.
pub const URL_SAFE_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Base-62 alphabet used by `shortid`.
pub const BASE62_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const NANOID_LENGTH: usize = 21;
pub const SHORTID_LENGTH: usize = 10;

/// Draws `length` characters independently and uniformly from `alphabet`.
///
/// # Errors
///
/// Returns [`Error::Generation`] if the alphabet is empty.
pub fn random_code<R>(rng: &R, alphabet: &[char], length: usize) -> Result<String>
where
    R: RandSource<u64> + ?Sized,
{
    if alphabet.is_empty() {
        return Err(Error::generation("alphabet is empty"));
    }
    Ok((0..length)
        .map(|_| alphabet[pick_index(rng, alphabet.len())])
        .collect())
}
