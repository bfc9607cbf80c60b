//! ASN.1 BER codec
//!
//! This crate provides `BerReader`, which decodes a BER buffer into
//! primitive values, and `BerWriter`, which encodes them, including nested
//! constructed values.

pub mod ber;

pub use berkit_core::error;
pub use berkit_core::tag;
pub use berkit_core::{Asn1Error, Asn1Result, WriterOptions};

pub use ber::{BerReader, BerWriter};
