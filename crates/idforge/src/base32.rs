//! Crockford base32 helpers used by the time-sortable strategy.

pub(crate) const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;

/// Lookup table for Crockford base32 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    // Main alphabet, allow lower-case
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i; // lowercase letter
        }
        i += 1;
    }
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Encodes a byte slice into exactly `output_chars` Crockford base32
/// characters.
///
/// When `output_chars * 5` exceeds the input bit count, the difference is
/// treated as leading zero bits, so a 48-bit timestamp encodes to 10
/// characters with the first character carrying only 3 bits.
///
/// `output_chars * 5` must be at least `input.len() * 8`.
pub fn encode_base32(input: &[u8], output_chars: usize) -> String {
    let input_bits = input.len() * 8;
    let total_bits = output_chars * BITS_PER_CHAR;
    debug_assert!(total_bits >= input_bits, "output too short for input");

    let mut bits = total_bits.saturating_sub(input_bits);
    let mut acc = 0_u16;
    let mask = 0x1F;

    let mut out = String::with_capacity(output_chars);
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            // `(acc >> bits) & mask` is always in 0..=31.
            out.push(char::from(ALPHABET[((acc >> bits) & mask) as usize]));
        }
    }
    out
}

/// Decodes a Crockford base32 string into a `u64`.
///
/// Returns `None` if the input contains a character outside the alphabet or
/// encodes more than 64 bits.
pub fn decode_base32_u64(encoded: &str) -> Option<u64> {
    if encoded.len() * BITS_PER_CHAR > 64 + BITS_PER_CHAR - 1 {
        return None;
    }
    let mut acc = 0_u64;
    for b in encoded.bytes() {
        let val = LOOKUP[b as usize];
        if val == NO_VALUE {
            return None;
        }
        acc = acc.checked_mul(32)? | u64::from(val);
    }
    Some(acc)
}

/// Returns `true` when every character is a canonical, upper-case Crockford
/// base32 digit.
pub fn is_canonical_base32(value: &str) -> bool {
    value.bytes().all(|b| ALPHABET.contains(&b))
}
