//! BER reader
//!
//! Decodes primitive values from a fully materialized buffer, one TLV at a
//! time.
//!
//! # Usage Example
//!
//! ```rust
//! use berkit_asn1::ber::BerReader;
//!
//! let mut reader = BerReader::new(vec![0x30, 0x03, 0x02, 0x01, 0x07]);
//! assert_eq!(reader.read_sequence(None)?, Some(0x30));
//! assert_eq!(reader.read_int(None)?, Some(7));
//! # Ok::<(), berkit_asn1::Asn1Error>(())
//! ```

use crate::ber::length;
use crate::error::{Asn1Error, Asn1Result};
use berkit_core::tag;
use bytes::Bytes;

/// BER reader over an immutable buffer
///
/// # Position Tracking
///
/// The reader keeps a cursor that only advances when a read succeeds, and a
/// length register holding the length of the last decoded TLV value (see
/// [`BerReader::length`]).
///
/// # Error Handling
///
/// Every read returns `Ok(None)` when the buffer ends before the value does.
/// That is not an error: the caller may retry with a longer buffer.
/// Structurally invalid input is reported as `Err(Asn1Error)`:
/// - Tag mismatch
/// - Indefinite or oversized length field
/// - Zero-length integer
/// - Integer overflow
#[derive(Debug, Clone)]
pub struct BerReader {
    buffer: Bytes,
    offset: usize,
    length: usize,
}

impl BerReader {
    /// Create a new reader
    ///
    /// # Arguments
    /// * `buffer` - Buffer containing BER-encoded data
    pub fn new(buffer: impl Into<Bytes>) -> Self {
        Self {
            buffer: buffer.into(),
            offset: 0,
            length: 0,
        }
    }

    /// Total buffer length
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Length of the most recently decoded TLV value
    ///
    /// Only meaningful right after a successful length-bearing read.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Current cursor position
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of unread bytes
    pub fn remain(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// The whole underlying buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// The unread part of the buffer
    pub fn remaining(&self) -> &[u8] {
        &self.buffer[self.offset..]
    }

    /// Read a single byte
    ///
    /// With `peek` set the cursor stays where it is. Returns `None` at the end
    /// of the buffer.
    pub fn read_byte(&mut self, peek: bool) -> Option<u8> {
        let byte = *self.buffer.get(self.offset)?;
        if !peek {
            self.offset += 1;
        }
        Some(byte)
    }

    /// Byte at the cursor, without advancing
    pub fn peek(&self) -> Option<u8> {
        self.buffer.get(self.offset).copied()
    }

    /// Decode a length field
    ///
    /// # Arguments
    /// * `offset` - Where the length field starts; defaults to the cursor
    ///
    /// # Returns
    /// The offset right after the length field, i.e. where the value starts.
    /// The decoded length is stored in [`BerReader::length`]. The cursor is
    /// not moved.
    pub fn read_length(&mut self, offset: Option<usize>) -> Asn1Result<Option<usize>> {
        let offset = offset.unwrap_or(self.offset);
        if offset >= self.buffer.len() {
            return Ok(None);
        }

        let decoded = length::decode(&self.buffer[offset..]).map_err(|e| self.fail(e))?;
        Ok(decoded.map(|(length, consumed)| {
            self.length = length;
            offset + consumed
        }))
    }

    /// Enter a constructed value
    ///
    /// Moves the cursor to the first byte of the content, so the elements can
    /// be read one by one. [`BerReader::length`] holds the content length.
    ///
    /// # Returns
    /// The tag byte of the sequence.
    pub fn read_sequence(&mut self, expected: Option<u8>) -> Asn1Result<Option<u8>> {
        let Some(actual) = self.peek() else {
            return Ok(None);
        };
        if let Some(expected) = expected {
            self.check_tag(expected, actual)?;
        }

        let Some(value_start) = self.read_length(Some(self.offset + 1))? else {
            return Ok(None);
        };
        self.offset = value_start;
        Ok(Some(actual))
    }

    /// Decode an INTEGER (or any integer-shaped value under `tag`)
    pub fn read_int(&mut self, tag: Option<u8>) -> Asn1Result<Option<i64>> {
        self.read_tagged_int(tag.unwrap_or(tag::INTEGER))
    }

    /// Decode a BOOLEAN; any non-zero value is `true`
    pub fn read_boolean(&mut self, tag: Option<u8>) -> Asn1Result<Option<bool>> {
        Ok(self
            .read_tagged_int(tag.unwrap_or(tag::BOOLEAN))?
            .map(|value| value != 0))
    }

    /// Decode an ENUMERATED value
    pub fn read_enumeration(&mut self, tag: Option<u8>) -> Asn1Result<Option<i64>> {
        self.read_tagged_int(tag.unwrap_or(tag::ENUMERATION))
    }

    /// Decode an OCTET STRING as UTF-8 text
    pub fn read_string(&mut self, tag: Option<u8>) -> Asn1Result<Option<String>> {
        self.read_decoded(tag.unwrap_or(tag::OCTET_STRING), decode_utf8)
    }

    /// Decode an OCTET STRING as raw bytes
    ///
    /// The returned `Bytes` shares storage with the reader's buffer.
    pub fn read_raw_string(&mut self, tag: Option<u8>) -> Asn1Result<Option<Bytes>> {
        self.read_decoded(tag.unwrap_or(tag::OCTET_STRING), |raw| Ok(raw.clone()))
    }

    /// Decode an OBJECT IDENTIFIER into its dotted form
    ///
    /// # OID Decoding Rules
    /// - Every component is base-128, bit 8 set on all but its last octet
    /// - The first component holds the first two arcs as `40 * X + Y`
    pub fn read_oid(&mut self, tag: Option<u8>) -> Asn1Result<Option<String>> {
        self.read_decoded(tag.unwrap_or(tag::OID), decode_oid)
    }

    /// Decode a BIT STRING into a string of `'0'` and `'1'` digits
    ///
    /// The first value octet is the number of unused bits in the last octet;
    /// those bits are trimmed from the result.
    pub fn read_bit_string(&mut self, tag: Option<u8>) -> Asn1Result<Option<String>> {
        self.read_decoded(tag.unwrap_or(tag::BIT_STRING), decode_bit_string)
    }

    /// Step over one complete TLV
    ///
    /// # Returns
    /// The tag of the skipped element.
    pub fn skip(&mut self, expected: Option<u8>) -> Asn1Result<Option<u8>> {
        let Some(actual) = self.peek() else {
            return Ok(None);
        };
        if let Some(expected) = expected {
            self.check_tag(expected, actual)?;
        }

        let Some(value_start) = self.value_start()? else {
            return Ok(None);
        };
        self.offset = value_start + self.length;
        Ok(Some(actual))
    }

    /// Shared integer decoding behind INTEGER, BOOLEAN and ENUMERATED
    ///
    /// The first octet is sign-extended, every following octet is shifted in:
    /// `value = value * 256 + octet`.
    fn read_tagged_int(&mut self, expected: u8) -> Asn1Result<Option<i64>> {
        let Some(actual) = self.peek() else {
            return Ok(None);
        };
        self.check_tag(expected, actual)?;

        let Some(value_start) = self.read_length(Some(self.offset + 1))? else {
            return Ok(None);
        };
        if self.length == 0 {
            return Err(self.fail(Asn1Error::ZeroLengthInteger));
        }
        if self.length > self.buffer.len() - value_start {
            return Ok(None);
        }

        let octets = &self.buffer[value_start..value_start + self.length];
        let mut value = octets[0] as i8 as i64;
        for &octet in &octets[1..] {
            value = value
                .checked_mul(256)
                .and_then(|v| v.checked_add(octet as i64))
                .ok_or_else(|| self.fail(Asn1Error::IntegerOverflow))?;
        }

        self.offset = value_start + self.length;
        Ok(Some(value))
    }

    /// Tag-checked read of a whole primitive value, decoded by `decode`
    ///
    /// The cursor moves past the TLV only once `decode` accepted the value.
    fn read_decoded<T>(
        &mut self,
        expected: u8,
        decode: impl FnOnce(&Bytes) -> Asn1Result<T>,
    ) -> Asn1Result<Option<T>> {
        let Some((value_end, raw)) = self.peek_value(expected)? else {
            return Ok(None);
        };
        let value = decode(&raw).map_err(|e| self.fail(e))?;
        self.offset = value_end;
        Ok(Some(value))
    }

    /// Locate the value of the TLV at the cursor without consuming it
    ///
    /// # Returns
    /// The offset just past the value, and the value bytes.
    fn peek_value(&mut self, expected: u8) -> Asn1Result<Option<(usize, Bytes)>> {
        let Some(actual) = self.peek() else {
            return Ok(None);
        };
        self.check_tag(expected, actual)?;

        let Some(value_start) = self.value_start()? else {
            return Ok(None);
        };
        let value_end = value_start + self.length;
        if self.length == 0 {
            return Ok(Some((value_end, Bytes::new())));
        }
        Ok(Some((value_end, self.buffer.slice(value_start..value_end))))
    }

    /// Decode the length after the tag at the cursor and make sure the whole
    /// value is present
    fn value_start(&mut self) -> Asn1Result<Option<usize>> {
        let Some(value_start) = self.read_length(Some(self.offset + 1))? else {
            return Ok(None);
        };
        if self.length > self.buffer.len() - value_start {
            return Ok(None);
        }
        Ok(Some(value_start))
    }

    fn check_tag(&self, expected: u8, actual: u8) -> Asn1Result<()> {
        if expected != actual {
            return Err(self.fail(Asn1Error::TagMismatch { expected, actual }));
        }
        Ok(())
    }

    fn fail(&self, error: Asn1Error) -> Asn1Error {
        log::debug!("BER decode failed at offset {}: {}", self.offset, error);
        error
    }
}

fn decode_utf8(raw: &Bytes) -> Asn1Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|e| Asn1Error::InvalidEncoding(format!("String is not valid UTF-8: {}", e)))
}

fn decode_oid(raw: &Bytes) -> Asn1Result<String> {
    let mut components: Vec<u64> = Vec::new();
    let mut value = 0u64;
    let mut pending = false;
    for &byte in raw.iter() {
        value = value
            .checked_mul(128)
            .map(|v| v | (byte & 0x7f) as u64)
            .ok_or_else(|| Asn1Error::InvalidEncoding("OID component too large".to_string()))?;
        pending = byte & 0x80 != 0;
        if !pending {
            components.push(value);
            value = 0;
        }
    }

    if pending {
        return Err(Asn1Error::InvalidEncoding(
            "Truncated OID component".to_string(),
        ));
    }
    let Some((&first, rest)) = components.split_first() else {
        return Err(Asn1Error::InvalidEncoding(
            "Empty object identifier".to_string(),
        ));
    };

    let arcs = [first / 40, first % 40];
    Ok(arcs
        .iter()
        .chain(rest)
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join("."))
}

fn decode_bit_string(raw: &Bytes) -> Asn1Result<String> {
    let Some((&unused, octets)) = raw.split_first() else {
        return Ok(String::new());
    };

    if unused > 7 || (octets.is_empty() && unused != 0) {
        return Err(Asn1Error::InvalidEncoding(format!(
            "Invalid unused bits: {} for {} octet(s)",
            unused,
            octets.len()
        )));
    }

    let mut bits: String = octets
        .iter()
        .map(|octet| format!("{:08b}", octet))
        .collect();
    bits.truncate(bits.len() - unused as usize);
    Ok(bits)
}
