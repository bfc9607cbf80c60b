//! berkit - ASN.1 BER codec
//!
//! A reader that decodes a BER buffer into primitive TLV values and a writer
//! that encodes them, with deferred lengths for nested constructed values.
//! It is meant as the bottom layer of protocols such as LDAP or SNMP, which
//! own the framing over their transport.
//!
//! # Architecture
//!
//! - `berkit-core`: error type, tag constants, writer options
//! - `berkit-asn1`: `BerReader` and `BerWriter`
//!
//! # Usage
//!
//! ```rust
//! use berkit::{BerReader, BerWriter, tag};
//!
//! let mut writer = BerWriter::new();
//! writer.start_sequence(None);
//! writer.write_int(1, None)?;
//! writer.write_oid("1.2.840.113549", None)?;
//! writer.end_sequence()?;
//!
//! let mut reader = BerReader::new(writer.into_bytes()?);
//! assert_eq!(reader.read_sequence(Some(tag::SEQUENCE_CONSTRUCTED))?, Some(0x30));
//! assert_eq!(reader.read_int(None)?, Some(1));
//! assert_eq!(reader.read_oid(None)?.as_deref(), Some("1.2.840.113549"));
//! # Ok::<(), berkit::Asn1Error>(())
//! ```
//!
//! # Errors
//!
//! A read that runs out of input returns `Ok(None)` and may be retried once
//! more bytes are available. Everything else is an [`Asn1Error`].

pub use berkit_core::tag;
pub use berkit_core::{Asn1Error, Asn1Result, WriterOptions};

pub use berkit_asn1::ber::{BerReader, BerWriter, LengthOctets};

pub mod length {
    pub use berkit_asn1::ber::length::*;
}
