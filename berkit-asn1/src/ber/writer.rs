//! BER writer
//!
//! Appends TLV-encoded values to a growable buffer. Constructed values are
//! opened with [`BerWriter::start_sequence`] and closed with
//! [`BerWriter::end_sequence`], which patches in the length once the content
//! is known.
//!
//! # Usage Example
//!
//! ```rust
//! use berkit_asn1::ber::BerWriter;
//!
//! let mut writer = BerWriter::new();
//! writer.start_sequence(None);
//! writer.write_int(7, None)?;
//! writer.end_sequence()?;
//! assert_eq!(writer.buffer()?, &[0x30, 0x03, 0x02, 0x01, 0x07]);
//! # Ok::<(), berkit_asn1::Asn1Error>(())
//! ```

use crate::ber::length::{LengthOctets, MAX_LENGTH};
use crate::error::{Asn1Error, Asn1Result};
use berkit_core::WriterOptions;
use berkit_core::tag;
use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;

/// Bytes reserved for a sequence length until the sequence is closed
const SEQUENCE_RESERVE: usize = 3;

static OID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+\.)*[0-9]+$").expect("OID pattern is a valid regex"));

/// BER writer with deferred sequence lengths
///
/// # Memory Management
///
/// The buffer starts at `WriterOptions::initial_size` bytes and is multiplied
/// by `WriterOptions::growth_factor` whenever a write does not fit.
///
/// # Sequence Backpatching
///
/// `start_sequence` writes the tag and reserves 3 bytes for the length.
/// `end_sequence` computes the real length, moves the content left or right
/// when the length field needs fewer or more than 3 bytes, and writes the
/// length in place. Sequences nest; the open ones are kept on a stack.
#[derive(Debug, Clone)]
pub struct BerWriter {
    buffer: Vec<u8>,
    offset: usize,
    options: WriterOptions,
    sequences: Vec<usize>,
}

impl BerWriter {
    /// Create a new writer with default options
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    /// Create a new writer
    ///
    /// # Arguments
    /// * `options` - Initial size and growth factor of the buffer
    pub fn with_options(options: WriterOptions) -> Self {
        Self {
            buffer: vec![0; options.effective_initial_size()],
            offset: 0,
            options,
            sequences: Vec::new(),
        }
    }

    /// Encoded bytes
    ///
    /// # Error Handling
    /// Returns `UnendedSequences` while a sequence is still open.
    pub fn buffer(&self) -> Asn1Result<&[u8]> {
        self.check_closed()?;
        Ok(&self.buffer[..self.offset])
    }

    /// Consume the writer and return the encoded bytes
    pub fn into_bytes(mut self) -> Asn1Result<Bytes> {
        self.check_closed()?;
        self.buffer.truncate(self.offset);
        Ok(Bytes::from(self.buffer))
    }

    /// Number of bytes written
    pub fn len(&self) -> usize {
        self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.offset == 0
    }

    /// Current buffer capacity
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of open sequences
    pub fn depth(&self) -> usize {
        self.sequences.len()
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.ensure(1);
        self.buffer[self.offset] = byte;
        self.offset += 1;
    }

    /// Write a definite length field
    ///
    /// # Error Handling
    /// Returns `LengthTooLong` above `0xffffff`.
    pub fn write_length(&mut self, length: usize) -> Asn1Result<()> {
        let octets = LengthOctets::new(length)?;
        self.put(octets.as_slice());
        Ok(())
    }

    /// Write an INTEGER
    ///
    /// # Encoding Format
    /// Minimal two's complement, most significant byte first, so 128 becomes
    /// `02 02 00 80` and -129 becomes `02 02 ff 7f`.
    ///
    /// # Error Handling
    /// Returns `InvalidArgument` if `value` does not fit an `i64`; nothing is
    /// written in that case.
    pub fn write_int<T: TryInto<i64>>(&mut self, value: T, tag: Option<u8>) -> Asn1Result<()> {
        let mut value: i64 = value.try_into().map_err(|_| {
            Asn1Error::InvalidArgument("Argument must be an integer that fits in i64".to_string())
        })?;

        // least significant first
        let mut bytes = Vec::with_capacity(8);
        while !(-0x80..0x80).contains(&value) {
            bytes.push((value & 0xff) as u8);
            value >>= 8;
        }
        bytes.push((value & 0xff) as u8);

        self.ensure(2 + bytes.len());
        self.write_byte(tag.unwrap_or(tag::INTEGER));
        self.write_byte(bytes.len() as u8);
        for &byte in bytes.iter().rev() {
            self.write_byte(byte);
        }
        Ok(())
    }

    pub fn write_null(&mut self) {
        self.write_byte(tag::NULL);
        self.write_byte(0x00);
    }

    /// Write an ENUMERATED value, encoded like an INTEGER
    pub fn write_enumeration<T: TryInto<i64>>(
        &mut self,
        value: T,
        tag: Option<u8>,
    ) -> Asn1Result<()> {
        self.write_int(value, Some(tag.unwrap_or(tag::ENUMERATION)))
    }

    /// Write a BOOLEAN as `01 01 ff` or `01 01 00`
    pub fn write_boolean(&mut self, value: bool, tag: Option<u8>) {
        self.put(&[
            tag.unwrap_or(tag::BOOLEAN),
            0x01,
            if value { 0xff } else { 0x00 },
        ]);
    }

    /// Write UTF-8 text as an OCTET STRING
    pub fn write_string(&mut self, text: &str, tag: Option<u8>) -> Asn1Result<()> {
        self.write_buffer(text.as_bytes(), Some(tag.unwrap_or(tag::OCTET_STRING)))
    }

    /// Write every string with [`BerWriter::write_string`] under the same tag
    pub fn write_string_array<S: AsRef<str>>(
        &mut self,
        texts: &[S],
        tag: Option<u8>,
    ) -> Asn1Result<()> {
        for text in texts {
            self.write_string(text.as_ref(), tag)?;
        }
        Ok(())
    }

    /// Append raw bytes
    ///
    /// With a tag, the bytes become the value of a new TLV. Without one they
    /// are copied verbatim, which is how pre-encoded elements are embedded.
    pub fn write_buffer(&mut self, bytes: &[u8], tag: Option<u8>) -> Asn1Result<()> {
        if let Some(tag) = tag {
            let octets = LengthOctets::new(bytes.len())?;
            self.write_byte(tag);
            self.put(octets.as_slice());
        }
        self.put(bytes);
        Ok(())
    }

    /// Write an OBJECT IDENTIFIER given in dotted form, e.g. `1.2.840.113549`
    ///
    /// # OID Encoding Rules
    /// - The first two arcs are combined as `40 * X + Y`
    /// - Every component is base-128, bit 8 set on all but its last octet
    ///
    /// # Error Handling
    /// Returns `InvalidArgument` before writing anything if the text is not a
    /// dotted list of at least two arcs that fit in `u32`.
    pub fn write_oid(&mut self, oid: &str, tag: Option<u8>) -> Asn1Result<()> {
        let bytes = encode_oid(oid)?;
        self.write_buffer(&bytes, Some(tag.unwrap_or(tag::OID)))
    }

    /// Write a BIT STRING given as `'0'`/`'1'` digits
    ///
    /// The digits are packed most significant bit first and the last octet is
    /// padded with zero bits, whose count is written as the first value octet.
    pub fn write_bit_string(&mut self, bits: &str, tag: Option<u8>) -> Asn1Result<()> {
        let tag = tag.unwrap_or(tag::BIT_STRING);
        if bits.is_empty() {
            return self.write_buffer(&[], Some(tag));
        }

        let unused = (8 - bits.len() % 8) % 8;
        let mut value = vec![0u8; 1 + bits.len().div_ceil(8)];
        value[0] = unused as u8;
        for (i, digit) in bits.bytes().enumerate() {
            match digit {
                b'0' => {}
                b'1' => value[1 + i / 8] |= 0x80 >> (i % 8),
                _ => {
                    return Err(Asn1Error::InvalidArgument(format!(
                        "Invalid bit string digit {:?} at position {}",
                        digit as char, i
                    )));
                }
            }
        }
        self.write_buffer(&value, Some(tag))
    }

    /// Open a constructed value; the default tag is `0x30` (SEQUENCE)
    pub fn start_sequence(&mut self, tag: Option<u8>) {
        self.write_byte(tag.unwrap_or(tag::SEQUENCE_CONSTRUCTED));
        self.sequences.push(self.offset);
        self.ensure(SEQUENCE_RESERVE);
        self.offset += SEQUENCE_RESERVE;
        log::trace!("BER sequence opened at {} (depth {})", self.offset, self.depth());
    }

    /// Close the innermost open sequence and patch its length
    ///
    /// # Error Handling
    /// - `SequenceTooLong` if the content exceeds `0xffffff` bytes
    /// - `InvalidArgument` if no sequence is open
    pub fn end_sequence(&mut self) -> Asn1Result<()> {
        let Some(&seq) = self.sequences.last() else {
            return Err(Asn1Error::InvalidArgument("No open sequence to end".to_string()));
        };
        let start = seq + SEQUENCE_RESERVE;
        let length = self.offset - start;
        if length > MAX_LENGTH {
            return Err(Asn1Error::SequenceTooLong(length));
        }
        let octets = LengthOctets::new(length)?;
        self.sequences.pop();

        // 1 or 2 byte fields shrink the reservation, 4 byte fields grow it
        if octets.len() < SEQUENCE_RESERVE {
            let shift = SEQUENCE_RESERVE - octets.len();
            self.buffer.copy_within(start..self.offset, start - shift);
            self.offset -= shift;
        } else if octets.len() > SEQUENCE_RESERVE {
            let shift = octets.len() - SEQUENCE_RESERVE;
            self.ensure(shift);
            self.buffer.copy_within(start..self.offset, start + shift);
            self.offset += shift;
        }
        self.buffer[seq..seq + octets.len()].copy_from_slice(octets.as_slice());

        log::trace!(
            "BER sequence closed: {} content bytes, {} length bytes (depth {})",
            length,
            octets.len(),
            self.depth()
        );
        Ok(())
    }

    /// Make room for at least `len` more bytes
    fn ensure(&mut self, len: usize) {
        let size = self.buffer.len();
        if size - self.offset >= len {
            return;
        }

        let mut new_size = size * self.options.effective_growth_factor();
        if new_size - self.offset < len {
            new_size += len;
        }
        log::debug!("BER writer buffer grows from {} to {} bytes", size, new_size);
        self.buffer.resize(new_size, 0);
    }

    fn put(&mut self, bytes: &[u8]) {
        self.ensure(bytes.len());
        self.buffer[self.offset..self.offset + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
    }

    fn check_closed(&self) -> Asn1Result<()> {
        if !self.sequences.is_empty() {
            return Err(Asn1Error::UnendedSequences(self.sequences.len()));
        }
        Ok(())
    }
}

impl Default for BerWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode the value octets of a dotted OID
fn encode_oid(oid: &str) -> Asn1Result<Vec<u8>> {
    let invalid = || {
        Asn1Error::InvalidArgument(format!("argument is not a valid OID string: {:?}", oid))
    };

    if !OID_PATTERN.is_match(oid) {
        return Err(invalid());
    }
    let arcs = oid
        .split('.')
        .map(str::parse::<u32>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    let [first, second, rest @ ..] = arcs.as_slice() else {
        return Err(invalid());
    };
    if *first > 2 || (*first < 2 && *second >= 40) {
        return Err(invalid());
    }
    let head = first
        .checked_mul(40)
        .and_then(|v| v.checked_add(*second))
        .ok_or_else(invalid)?;

    let mut bytes = Vec::with_capacity(1 + rest.len() * 5);
    push_base128(&mut bytes, head);
    for &arc in rest {
        push_base128(&mut bytes, arc);
    }
    Ok(bytes)
}

/// Append one OID component in the fewest base-128 octets (1 to 5)
fn push_base128(bytes: &mut Vec<u8>, value: u32) {
    let groups = (u32::BITS - value.leading_zeros()).div_ceil(7).max(1);
    for i in (0..groups).rev() {
        let octet = ((value >> (7 * i)) & 0x7f) as u8;
        bytes.push(if i == 0 { octet } else { octet | 0x80 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ber::BerReader;

    fn written(writer: &BerWriter) -> Vec<u8> {
        writer.buffer().unwrap().to_vec()
    }

    #[test]
    fn test_write_byte() {
        let mut writer = BerWriter::new();
        writer.write_byte(0xc2);
        assert_eq!(written(&writer), vec![0xc2]);
    }

    #[test]
    fn test_write_int() {
        let cases: [(i64, &[u8]); 12] = [
            (0, &[0x02, 0x01, 0x00]),
            (0x7f, &[0x02, 0x01, 0x7f]),
            (0x80, &[0x02, 0x02, 0x00, 0x80]),
            (0x7fff, &[0x02, 0x02, 0x7f, 0xff]),
            (0x8000, &[0x02, 0x03, 0x00, 0x80, 0x00]),
            (0x7fffff, &[0x02, 0x03, 0x7f, 0xff, 0xff]),
            (0x7fffffff, &[0x02, 0x04, 0x7f, 0xff, 0xff, 0xff]),
            (0xffffffff, &[0x02, 0x05, 0x00, 0xff, 0xff, 0xff, 0xff]),
            (-1, &[0x02, 0x01, 0xff]),
            (-128, &[0x02, 0x01, 0x80]),
            (-129, &[0x02, 0x02, 0xff, 0x7f]),
            (-2147483648, &[0x02, 0x04, 0x80, 0x00, 0x00, 0x00]),
        ];
        for (value, expected) in cases {
            let mut writer = BerWriter::new();
            writer.write_int(value, None).unwrap();
            assert_eq!(written(&writer), expected, "value {}", value);
        }
    }

    #[test]
    fn test_write_int_round_trip() {
        let values = [
            0i64, 1, 127, 128, 255, 256, -1, -128, -129, 32767, -32769, 8388608,
            -8388609, 2147483648, 4294967295, -2147483649, i64::MAX, i64::MIN,
        ];
        let mut writer = BerWriter::new();
        for &value in &values {
            writer.write_int(value, None).unwrap();
        }

        let mut reader = BerReader::new(writer.into_bytes().unwrap());
        for &value in &values {
            assert_eq!(reader.read_int(None).unwrap(), Some(value));
        }
        assert_eq!(reader.remain(), 0);
    }

    #[test]
    fn test_write_int_rejects_out_of_range() {
        let mut writer = BerWriter::new();
        let err = writer.write_int(u64::MAX, None).unwrap_err();
        assert!(matches!(err, Asn1Error::InvalidArgument(_)));
        assert!(writer.is_empty());
    }

    #[test]
    fn test_write_int_with_tag() {
        let mut writer = BerWriter::new();
        writer.write_int(5, Some(0x81)).unwrap();
        assert_eq!(written(&writer), vec![0x81, 0x01, 0x05]);
    }

    #[test]
    fn test_write_null_boolean_enumeration() {
        let mut writer = BerWriter::new();
        writer.write_null();
        writer.write_boolean(true, None);
        writer.write_boolean(false, None);
        writer.write_enumeration(0x20, None).unwrap();
        assert_eq!(
            written(&writer),
            vec![0x05, 0x00, 0x01, 0x01, 0xff, 0x01, 0x01, 0x00, 0x0a, 0x01, 0x20]
        );
    }

    #[test]
    fn test_write_length_boundaries() {
        let cases: [(usize, &[u8]); 7] = [
            (127, &[0x7f]),
            (128, &[0x81, 0x80]),
            (255, &[0x81, 0xff]),
            (256, &[0x82, 0x01, 0x00]),
            (65535, &[0x82, 0xff, 0xff]),
            (65536, &[0x83, 0x01, 0x00, 0x00]),
            (16777215, &[0x83, 0xff, 0xff, 0xff]),
        ];
        for (length, expected) in cases {
            let mut writer = BerWriter::new();
            writer.write_length(length).unwrap();
            assert_eq!(written(&writer), expected, "length {}", length);

            let mut reader = BerReader::new(written(&writer));
            assert_eq!(reader.read_length(None).unwrap(), Some(expected.len()));
            assert_eq!(reader.length(), length);
        }

        let mut writer = BerWriter::new();
        assert_eq!(
            writer.write_length(16777216),
            Err(Asn1Error::LengthTooLong(16777216))
        );
    }

    #[test]
    fn test_write_string() {
        let mut writer = BerWriter::new();
        writer.write_string("hello world", None).unwrap();
        writer.write_string("", None).unwrap();
        let bytes = written(&writer);
        assert_eq!(bytes.len(), 15);
        assert_eq!(&bytes[..2], &[0x04, 0x0b]);
        assert_eq!(&bytes[2..13], b"hello world");
        assert_eq!(&bytes[13..], &[0x04, 0x00]);
    }

    #[test]
    fn test_write_string_array() {
        let mut writer = BerWriter::new();
        writer.write_string_array(&["hello world", "hello world"], None).unwrap();
        let bytes = written(&writer);
        assert_eq!(bytes.len(), 26);
        assert_eq!(bytes[13], 0x04);
        assert_eq!(bytes[14], 0x0b);
    }

    #[test]
    fn test_write_buffer() {
        let mut writer = BerWriter::new();
        writer.write_buffer(&[0x04, 0x01, 0x41], None).unwrap();
        writer.write_buffer(&[0xde, 0xad], Some(0x80)).unwrap();
        assert_eq!(written(&writer), vec![0x04, 0x01, 0x41, 0x80, 0x02, 0xde, 0xad]);
    }

    #[test]
    fn test_write_oid() {
        let oid = "1.3.6.1.4.1.14988.1.1.5.1.1.19.2887117176";
        let mut writer = BerWriter::new();
        writer.write_oid(oid, None).unwrap();
        assert_eq!(
            written(&writer),
            vec![6, 18, 43, 6, 1, 4, 1, 245, 12, 1, 1, 5, 1, 1, 19, 138, 224, 215, 210, 120]
        );

        let mut reader = BerReader::new(written(&writer));
        assert_eq!(reader.read_oid(None).unwrap().as_deref(), Some(oid));
    }

    #[test]
    fn test_write_oid_large_first_component() {
        let mut writer = BerWriter::new();
        writer.write_oid("2.999.3", None).unwrap();
        assert_eq!(written(&writer), vec![0x06, 0x03, 0x88, 0x37, 0x03]);
    }

    #[test]
    fn test_write_oid_invalid() {
        for oid in ["", "1", "1..2", "1.2.", "a.b", "1.2.-3", "3.1", "1.40", "1.2.4294967296"] {
            let mut writer = BerWriter::new();
            assert!(
                matches!(writer.write_oid(oid, None), Err(Asn1Error::InvalidArgument(_))),
                "{:?}",
                oid
            );
            assert!(writer.is_empty());
        }
    }

    #[test]
    fn test_write_bit_string() {
        let bits = "00001010001110110101111100101001000111001101";
        let mut writer = BerWriter::new();
        writer.write_bit_string(bits, None).unwrap();
        assert_eq!(
            written(&writer),
            vec![0x03, 0x07, 0x04, 0x0a, 0x3b, 0x5f, 0x29, 0x1c, 0xd0]
        );

        let mut reader = BerReader::new(written(&writer));
        assert_eq!(reader.read_bit_string(None).unwrap().as_deref(), Some(bits));
    }

    #[test]
    fn test_write_bit_string_invalid() {
        let mut writer = BerWriter::new();
        assert!(matches!(
            writer.write_bit_string("0120", None),
            Err(Asn1Error::InvalidArgument(_))
        ));
        assert!(writer.is_empty());
    }

    #[test]
    fn test_simple_sequence() {
        let mut writer = BerWriter::new();
        writer.start_sequence(None);
        writer.write_string("hello world", None).unwrap();
        writer.end_sequence().unwrap();

        let bytes = written(&writer);
        assert_eq!(bytes.len(), 15);
        assert_eq!(&bytes[..4], &[0x30, 0x0d, 0x04, 0x0b]);
        assert_eq!(&bytes[4..], b"hello world");
    }

    #[test]
    fn test_nested_sequence() {
        let mut writer = BerWriter::new();
        writer.start_sequence(Some(0x30));
        writer.write_string("hello world", None).unwrap();
        writer.start_sequence(Some(0x31));
        writer.write_string("hello world", None).unwrap();
        writer.end_sequence().unwrap();
        writer.end_sequence().unwrap();

        let bytes = written(&writer);
        assert_eq!(bytes.len(), 30);
        assert_eq!(&bytes[..4], &[0x30, 0x1c, 0x04, 0x0b]);
        assert_eq!(&bytes[15..19], &[0x31, 0x0d, 0x04, 0x0b]);
        assert_eq!(&bytes[19..], b"hello world");
    }

    #[test]
    fn test_sequence_length_forms() {
        let cases: [(usize, &[u8]); 7] = [
            (0, &[0x30, 0x00]),
            (127, &[0x30, 0x7f]),
            (128, &[0x30, 0x81, 0x80]),
            (255, &[0x30, 0x81, 0xff]),
            (256, &[0x30, 0x82, 0x01, 0x00]),
            (65535, &[0x30, 0x82, 0xff, 0xff]),
            (65536, &[0x30, 0x83, 0x01, 0x00, 0x00]),
        ];
        for (length, header) in cases {
            let content: Vec<u8> = (0..length).map(|i| (i % 251) as u8).collect();
            let mut writer = BerWriter::with_options(
                WriterOptions::new().with_initial_size(16).with_growth_factor(2),
            );
            writer.start_sequence(None);
            writer.write_buffer(&content, None).unwrap();
            writer.end_sequence().unwrap();

            let bytes = written(&writer);
            assert_eq!(&bytes[..header.len()], header, "length {}", length);
            assert_eq!(&bytes[header.len()..], &content[..], "length {}", length);
        }
    }

    #[test]
    fn test_sequence_long_form_decodes() {
        // 126 payload bytes plus tag and length: 128 bytes of content
        let payload = vec![0x41u8; 126];
        let mut writer = BerWriter::new();
        writer.start_sequence(None);
        writer.write_buffer(&payload, Some(tag::OCTET_STRING)).unwrap();
        writer.end_sequence().unwrap();
        writer.write_null();

        let mut reader = BerReader::new(writer.into_bytes().unwrap());
        assert_eq!(reader.read_sequence(Some(0x30)).unwrap(), Some(0x30));
        assert_eq!(reader.length(), 128);
        assert_eq!(reader.read_raw_string(None).unwrap().as_deref(), Some(&payload[..]));
        assert_eq!(reader.read_byte(false), Some(tag::NULL));
    }

    #[test]
    fn test_nested_long_form_sequences() {
        let mut writer = BerWriter::new();
        writer.start_sequence(None);
        writer.write_int(1, None).unwrap();
        writer.start_sequence(Some(tag::application(3, true)));
        writer.write_string(&"x".repeat(300), None).unwrap();
        writer.end_sequence().unwrap();
        writer.start_sequence(Some(tag::context(0, true)));
        writer.end_sequence().unwrap();
        writer.end_sequence().unwrap();

        let mut reader = BerReader::new(writer.into_bytes().unwrap());
        assert_eq!(reader.read_sequence(None).unwrap(), Some(0x30));
        assert_eq!(reader.length(), 3 + 4 + 4 + 300 + 2);
        assert_eq!(reader.read_int(None).unwrap(), Some(1));
        assert_eq!(reader.read_sequence(Some(0x63)).unwrap(), Some(0x63));
        assert_eq!(reader.length(), 304);
        assert_eq!(reader.read_string(None).unwrap().map(|s| s.len()), Some(300));
        assert_eq!(reader.read_sequence(Some(0xa0)).unwrap(), Some(0xa0));
        assert_eq!(reader.length(), 0);
        assert_eq!(reader.remain(), 0);
    }

    #[test]
    fn test_sequence_too_long() {
        let mut writer = BerWriter::new();
        writer.start_sequence(None);
        writer.write_buffer(&vec![0u8; MAX_LENGTH + 1], None).unwrap();
        assert_eq!(
            writer.end_sequence(),
            Err(Asn1Error::SequenceTooLong(MAX_LENGTH + 1))
        );
        assert_eq!(writer.depth(), 1);
    }

    #[test]
    fn test_unended_sequence() {
        let mut writer = BerWriter::new();
        writer.start_sequence(None);
        writer.write_null();
        assert_eq!(writer.buffer(), Err(Asn1Error::UnendedSequences(1)));
        assert_eq!(
            writer.buffer().unwrap_err().to_string(),
            "1 unended sequence(s)"
        );
        assert_eq!(writer.into_bytes(), Err(Asn1Error::UnendedSequences(1)));
    }

    #[test]
    fn test_end_sequence_without_start() {
        let mut writer = BerWriter::new();
        assert!(matches!(
            writer.end_sequence(),
            Err(Asn1Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_buffer_growth() {
        let mut writer = BerWriter::with_options(
            WriterOptions::new().with_initial_size(2).with_growth_factor(2),
        );
        for byte in 0..10u8 {
            writer.write_byte(byte);
        }
        assert_eq!(written(&writer), (0..10u8).collect::<Vec<_>>());
        assert!(writer.capacity() >= 10);

        let mut writer = BerWriter::new();
        assert_eq!(writer.capacity(), 1024);
        writer.write_buffer(&[0u8; 2000], None).unwrap();
        assert_eq!(writer.capacity(), 8192);

        let mut writer = BerWriter::with_options(WriterOptions::new().with_initial_size(4));
        writer.write_buffer(&[0u8; 100], None).unwrap();
        assert_eq!(writer.capacity(), 132);
    }
}
