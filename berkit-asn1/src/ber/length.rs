//! BER definite-length encoding
//!
//! Length can be encoded in two forms:
//! - **Short form** (1 byte): for lengths 0-127, bit 8 clear
//! - **Long form**: first byte `0x80 | n`, followed by `n` big-endian octets
//!
//! Neither side handles more than 3 long-form octets, so the largest length
//! is `0xffffff`. `0x80` alone is the indefinite form, which is rejected.

use crate::error::{Asn1Error, Asn1Result};

/// Largest length that can be encoded or decoded
pub const MAX_LENGTH: usize = 0xff_ffff;

/// Largest number of long-form length octets
pub const MAX_LENGTH_OCTETS: usize = 3;

const LONG_FORM: u8 = 0x80;

/// An encoded length field, 1 to 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthOctets {
    bytes: [u8; 4],
    len: usize,
}

impl LengthOctets {
    /// Encode `length` using the shortest form
    ///
    /// # Error Handling
    /// Returns `LengthTooLong` above `MAX_LENGTH`.
    pub fn new(length: usize) -> Asn1Result<Self> {
        let [_, b2, b1, b0] = (length as u32).to_be_bytes();
        let (bytes, len) = match length {
            0..=0x7f => ([b0, 0, 0, 0], 1),
            0x80..=0xff => ([LONG_FORM | 1, b0, 0, 0], 2),
            0x100..=0xffff => ([LONG_FORM | 2, b1, b0, 0], 3),
            0x1_0000..=MAX_LENGTH => ([LONG_FORM | 3, b2, b1, b0], 4),
            _ => return Err(Asn1Error::LengthTooLong(length)),
        };
        Ok(Self { bytes, len })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of bytes in the length field
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Decode a length field from the start of `data`
///
/// # Returns
/// `Ok(Some((length, consumed)))` on success, `Ok(None)` if `data` ends
/// before the length field does.
///
/// # Error Handling
/// Returns `IndefiniteLength` for `0x80` and `LengthTooLong` when more than
/// `MAX_LENGTH_OCTETS` octets are announced.
pub fn decode(data: &[u8]) -> Asn1Result<Option<(usize, usize)>> {
    let Some(&first) = data.first() else {
        return Ok(None);
    };

    if first & LONG_FORM == 0 {
        return Ok(Some((first as usize, 1)));
    }

    let count = (first & 0x7f) as usize;
    if count == 0 {
        return Err(Asn1Error::IndefiniteLength);
    }
    if count > MAX_LENGTH_OCTETS {
        return Err(Asn1Error::LengthTooLong(count));
    }
    let Some(octets) = data.get(1..=count) else {
        return Ok(None);
    };

    let length = octets
        .iter()
        .fold(0usize, |acc, &octet| acc * 256 + octet as usize);
    Ok(Some((length, 1 + count)))
}
