//! Compact-u16 ("short vec") length encoding.
//!
//! Seven data bits per byte with a continuation high bit; at most three
//! bytes, so the maximum encodable value is `u16::MAX`.

use crate::error::SolError;

/// Encode a length in compact-u16 form.
///
/// - `0..=0x7f` — 1 byte
/// - `0x80..=0x3fff` — 2 bytes
/// - `0x4000..=0xffff` — 3 bytes
pub fn encode_len(value: u16) -> Vec<u8> {
    let mut remaining = value as u32;
    let mut out = Vec::with_capacity(3);

    loop {
        let mut byte = (remaining & 0x7f) as u8;
        remaining >>= 7;
        if remaining > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if remaining == 0 {
            break;
        }
    }

    out
}

/// Decode a compact-u16 length from the front of `data`.
///
/// Returns `(value, bytes_consumed)`. Truncated input or a value exceeding
/// `u16::MAX` is an error.
pub fn decode_len(data: &[u8]) -> Result<(u16, usize), SolError> {
    let mut value: u32 = 0;
    let mut consumed = 0usize;

    loop {
        let byte = *data
            .get(consumed)
            .ok_or(SolError::InvalidData("compact-u16 truncated"))?;
        value |= ((byte & 0x7f) as u32) << (7 * consumed as u32);
        consumed += 1;

        if byte & 0x80 == 0 {
            break;
        }
        if consumed == 3 {
            return Err(SolError::InvalidData("compact-u16 longer than 3 bytes"));
        }
    }

    if value > u16::MAX as u32 {
        return Err(SolError::InvalidData("compact-u16 overflow"));
    }

    Ok((value as u16, consumed))
}

/// Append a length-prefixed sequence of fixed-size items to `out`.
pub fn encode_items<T: AsRef<[u8]>>(out: &mut Vec<u8>, items: &[T]) {
    out.extend_from_slice(&encode_len(items.len() as u16));
    for item in items {
        out.extend_from_slice(item.as_ref());
    }
}
