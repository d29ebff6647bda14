//! Variable-length printable integer codec
//!
//! Integers are split into 5-bit chunks, least significant first. Every chunk
//! except the last carries the 0x20 continuation bit, and each chunk is offset
//! by 63 so the output stays within `?`..=`~`.

use crate::{EncodeError, Result};

/// Scale applied to degrees before truncating to an integer
pub const COORDINATE_SCALE: f64 = 1e5;

/// Largest magnitude of a scaled coordinate. Deltas of two such values and
/// their zig-zag form still fit in 128 bits.
pub const MAX_SCALED_COORDINATE: f64 = (1u128 << 124) as f64;

const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: u128 = 0x1f;
const CONTINUATION: u128 = 0x20;
const CHAR_OFFSET: u128 = 63;

/// Append the unsigned varint encoding of `n` to `out`
#[inline]
pub fn write_unsigned(mut n: u128, out: &mut String) {
    while n >= CONTINUATION {
        out.push(chunk_char((n & CHUNK_MASK) | CONTINUATION));
        n >>= CHUNK_BITS;
    }
    out.push(chunk_char(n));
}

/// Append the zig-zag encoding of `n` to `out`
///
/// `n` must lie within `i128::MIN / 2..=i128::MAX / 2` for the mapping to be
/// reversible.
#[inline]
pub fn write_signed(n: i128, out: &mut String) {
    let shifted = n << 1;
    let zigzag = if n < 0 { !shifted } else { shifted };
    write_unsigned(zigzag as u128, out);
}

/// Scale a coordinate to its integer value, truncating toward zero
///
/// # Errors
/// `InvalidInput` if the coordinate is not finite or too large to encode.
#[inline]
pub fn scale_coordinate(x: f64) -> Result<i128> {
    let scaled = x * COORDINATE_SCALE;
    if !scaled.is_finite() || scaled.abs() >= MAX_SCALED_COORDINATE {
        return Err(EncodeError::InvalidInput(format!(
            "coordinate {x} cannot be encoded"
        )));
    }
    Ok(scaled as i128)
}

/// Append the delta of coordinate `x` against `prev` and return the new
/// integer value for the axis
///
/// `prev` must come from a previous call (or be 0).
#[inline]
pub fn write_coordinate(x: f64, prev: i128, out: &mut String) -> Result<i128> {
    let value = scale_coordinate(x)?;
    write_signed(value - prev, out);
    Ok(value)
}

pub fn encode_unsigned(n: u128) -> String {
    let mut out = String::new();
    write_unsigned(n, &mut out);
    out
}

pub fn encode_signed(n: i128) -> String {
    let mut out = String::new();
    write_signed(n, &mut out);
    out
}

/// Encode one latitude or longitude relative to the previous value on the
/// same axis
///
/// # Returns
/// The encoded delta and the integer value to use as `prev` for the next
/// coordinate of this axis
pub fn encode_coordinate(x: f64, prev: i128) -> Result<(String, i128)> {
    let mut out = String::new();
    let value = write_coordinate(x, prev, &mut out)?;
    Ok((out, value))
}

#[inline(always)]
fn chunk_char(chunk: u128) -> char {
    // chunk <= 0x3f, so the result is at most '~'
    char::from((chunk + CHAR_OFFSET) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Independent reader for the chunk format, test-only
    fn decode_unsigned(encoded: &str) -> (u128, usize) {
        let mut result = 0u128;
        let mut shift = 0;
        for (consumed, byte) in encoded.bytes().enumerate() {
            let chunk = u128::from(byte) - 63;
            result |= (chunk & 0x1f) << shift;
            shift += 5;
            if chunk < 0x20 {
                return (result, consumed + 1);
            }
        }
        panic!("unterminated chunk sequence in {encoded:?}");
    }

    fn decode_signed(encoded: &str) -> i128 {
        let (raw, consumed) = decode_unsigned(encoded);
        assert_eq!(consumed, encoded.len(), "trailing data in {encoded:?}");
        let value = (raw >> 1) as i128;
        if raw & 1 == 1 { !value } else { value }
    }

    #[test]
    fn test_encode_unsigned_zero() {
        assert_eq!(encode_unsigned(0), "?");
        assert_eq!(encode_signed(0), "?");
    }

    #[test]
    fn test_encode_unsigned_chunk_boundaries() {
        assert_eq!(encode_unsigned(1), "@");
        assert_eq!(encode_unsigned(3), "B");
        assert_eq!(encode_unsigned(31), "^");
        // 32 needs a continuation chunk: (0 | 0x20) + 63, then 1 + 63
        assert_eq!(encode_unsigned(32), "_@");
    }

    #[test]
    fn test_encode_signed_small_values() {
        assert_eq!(encode_signed(1), "A");
        assert_eq!(encode_signed(-1), "@");
        assert_eq!(encode_signed(2), "C");
        assert_eq!(encode_signed(-2), "B");
    }

    #[test]
    fn test_encode_negative() {
        assert_eq!(
            encode_coordinate(-179.9832104, 0).unwrap(),
            ("`~oia@".to_string(), -17998321)
        );
        assert_eq!(
            encode_coordinate(-120.2, 0).unwrap(),
            ("~ps|U".to_string(), -12020000)
        );
    }

    #[test]
    fn test_encode_positive() {
        assert_eq!(
            encode_coordinate(38.5, 0).unwrap(),
            ("_p~iF".to_string(), 3850000)
        );
    }

    #[test]
    fn test_encode_coordinate_uses_delta() {
        let (first, prev) = encode_coordinate(38.5, 0).unwrap();
        let (second, next) = encode_coordinate(38.5, prev).unwrap();
        assert_eq!(first, "_p~iF");
        assert_eq!(second, "?");
        assert_eq!(next, prev);
    }

    #[test]
    fn test_truncates_toward_zero() {
        assert_eq!(encode_coordinate(0.000019, 0).unwrap().1, 1);
        assert_eq!(encode_coordinate(-0.000019, 0).unwrap().1, -1);
    }

    #[test]
    fn test_large_coordinate_deltas_do_not_overflow() {
        // Both values fit in 64 bits but their delta does not
        let (first, prev) = encode_coordinate(5e13, 0).unwrap();
        assert_eq!(prev, 5_000_000_000_000_000_000);
        assert_eq!(decode_signed(&first), prev);

        let (second, value) = encode_coordinate(-5e13, prev).unwrap();
        assert_eq!(value, -5_000_000_000_000_000_000);
        assert_eq!(decode_signed(&second), -10_000_000_000_000_000_000);

        // Beyond 64 bits the value is kept exactly instead of saturating
        let (_, value) = encode_coordinate(1e15, 0).unwrap();
        assert_eq!(value, 100_000_000_000_000_000_000);
    }

    #[test]
    fn test_unencodable_coordinates_are_rejected() {
        for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300, -1e40] {
            assert!(matches!(
                encode_coordinate(x, 0),
                Err(EncodeError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_output_is_printable() {
        for n in [0u128, 31, 32, 1023, 1 << 20, u128::from(u64::MAX), u128::MAX] {
            let encoded = encode_unsigned(n);
            assert!(encoded.bytes().all(|b| (63..=126).contains(&b)));
            assert_eq!(decode_unsigned(&encoded), (n, encoded.len()));
        }
    }

    #[test]
    fn test_signed_matches_independent_decoder() {
        let mut values: Vec<i128> = (-70_000..=70_000).step_by(7).collect();
        values.extend([
            i128::from(i32::MIN),
            i128::from(i32::MAX),
            -36_000_000,
            36_000_000,
            (1 << 40) + 12345,
            -(1 << 40) - 12345,
            i128::from(i64::MIN) * 2,
            i128::from(i64::MAX) * 2,
            1 << 125,
            -(1 << 125),
        ]);
        for n in values {
            assert_eq!(decode_signed(&encode_signed(n)), n, "value {n}");
        }
    }

    #[test]
    fn test_write_appends() {
        let mut out = String::from("x");
        write_unsigned(3, &mut out);
        write_signed(-1, &mut out);
        assert_eq!(out, "xB@");
    }
}
