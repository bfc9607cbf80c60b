//! BER (Basic Encoding Rules) reader and writer for ASN.1
//!
//! Each ASN.1 value is encoded as a TLV (Tag-Length-Value) triplet:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! ## Tag Encoding
//!
//! One byte. Multi-byte tags (tag number 31 and above) are not supported.
//! See `berkit_core::tag` for the constants.
//!
//! ## Length Encoding
//!
//! - **Short form** (1 byte): for lengths 0-127
//! - **Long form**: `0x81`..`0x83` followed by 1-3 big-endian length bytes
//!
//! Indefinite length (`0x80`) is rejected.
//!
//! ## Value Encoding
//!
//! - **Primitive types**: INTEGER, BOOLEAN, ENUMERATED, OCTET STRING, NULL,
//!   OBJECT IDENTIFIER, BIT STRING
//! - **Constructed types**: SEQUENCE and any tag with the constructed bit;
//!   the writer computes their length after the content is written
//!
//! # Implementation Notes
//!
//! 1. **Insufficient data**: `BerReader` returns `Ok(None)` when the buffer
//!    ends early, so the caller can retry with more bytes. Malformed data is
//!    always an `Err`.
//! 2. **Backpatching**: `BerWriter` reserves 3 length bytes per open
//!    sequence and moves the content once the real length is known.

pub mod length;
pub mod reader;
pub mod writer;

pub use length::LengthOctets;
pub use reader::BerReader;
pub use writer::BerWriter;
