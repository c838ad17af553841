//! Comparable encoding for constant payloads on the wire.
//!
//! Integers and floats are written as 8 big-endian bytes transformed so that
//! comparing the encoded bytes gives the same order as comparing the values:
//!
//! - signed integers flip the sign bit
//! - unsigned integers are written as-is
//! - non-negative floats flip the sign bit, negative floats flip every bit
//!
//! Remote engines decode column offsets and numeric constants with the
//! matching decoders.

use crate::error::{CoreError, CoreResult};

/// Constant for flipping the sign bit of signed integers.
const SIGN_MASK: u64 = 0x8000_0000_0000_0000;

/// Appends the comparable encoding of a signed integer.
pub fn encode_int(buf: &mut Vec<u8>, v: i64) {
    let encoded = (v as u64) ^ SIGN_MASK;
    buf.extend_from_slice(&encoded.to_be_bytes());
}

/// Appends the comparable encoding of an unsigned integer.
pub fn encode_uint(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// Appends the comparable encoding of a float.
pub fn encode_float(buf: &mut Vec<u8>, v: f64) {
    let bits = v.to_bits();
    let encoded = if bits & SIGN_MASK == 0 { bits ^ SIGN_MASK } else { !bits };
    buf.extend_from_slice(&encoded.to_be_bytes());
}

fn read_u64(bytes: &[u8]) -> CoreResult<u64> {
    let raw: [u8; 8] = bytes
        .get(..8)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| CoreError::Encoding(format!("expected 8 bytes, got {}", bytes.len())))?;
    Ok(u64::from_be_bytes(raw))
}

/// Decodes a value written by [`encode_int`].
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] if fewer than 8 bytes are available.
pub fn decode_int(bytes: &[u8]) -> CoreResult<i64> {
    Ok((read_u64(bytes)? ^ SIGN_MASK) as i64)
}

/// Decodes a value written by [`encode_uint`].
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] if fewer than 8 bytes are available.
pub fn decode_uint(bytes: &[u8]) -> CoreResult<u64> {
    read_u64(bytes)
}

/// Decodes a value written by [`encode_float`].
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] if fewer than 8 bytes are available.
pub fn decode_float(bytes: &[u8]) -> CoreResult<f64> {
    let encoded = read_u64(bytes)?;
    let bits = if encoded & SIGN_MASK != 0 { encoded ^ SIGN_MASK } else { !encoded };
    Ok(f64::from_bits(bits))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn int_bytes(v: i64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_int(&mut buf, v);
        buf
    }

    fn float_bytes(v: f64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_float(&mut buf, v);
        buf
    }

    #[test]
    fn int_boundaries_keep_order() {
        let values = [i64::MIN, -1000, -1, 0, 1, 1000, i64::MAX];
        let encoded: Vec<_> = values.iter().map(|v| int_bytes(*v)).collect();
        let mut sorted = encoded.clone();
        sorted.sort();
        assert_eq!(encoded, sorted, "integers should maintain sort order");
    }

    #[test]
    fn float_special_values_keep_order() {
        let values = [f64::NEG_INFINITY, -1.0, -f64::MIN_POSITIVE, 0.0, 1.0, f64::INFINITY];
        let encoded: Vec<_> = values.iter().map(|v| float_bytes(*v)).collect();
        let mut sorted = encoded.clone();
        sorted.sort();
        assert_eq!(encoded, sorted, "floats should maintain sort order");
    }

    #[test]
    fn column_offset_layout() {
        // Offset 1 encodes with the sign bit flipped.
        assert_eq!(int_bytes(1), vec![0x80, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn truncated_input_fails() {
        assert!(matches!(decode_int(&[0x80, 0]), Err(CoreError::Encoding(_))));
        assert!(matches!(decode_float(&[]), Err(CoreError::Encoding(_))));
    }

    proptest! {
        #[test]
        fn int_encoding_preserves_order(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(a.cmp(&b), int_bytes(a).cmp(&int_bytes(b)));
        }

        #[test]
        fn float_encoding_preserves_order(
            a in any::<f64>().prop_filter("not NaN", |f| !f.is_nan()),
            b in any::<f64>().prop_filter("not NaN", |f| !f.is_nan()),
        ) {
            prop_assume!(a != b);
            prop_assert_eq!(a < b, float_bytes(a) < float_bytes(b));
        }

        #[test]
        fn decode_inverts_encode(v in any::<i64>(), u in any::<u64>()) {
            prop_assert_eq!(decode_int(&int_bytes(v)).unwrap(), v);
            let mut buf = Vec::new();
            encode_uint(&mut buf, u);
            prop_assert_eq!(decode_uint(&buf).unwrap(), u);
        }
    }
}
