//! Core types for the berkit ASN.1 BER codec
//!
//! This crate provides the error type, the tag constants and the writer
//! configuration shared by the codec crates.

pub mod error;
pub mod options;
pub mod tag;

pub use error::{Asn1Error, Asn1Result};
pub use options::WriterOptions;
