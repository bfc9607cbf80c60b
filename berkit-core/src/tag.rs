//! Single-byte BER tag values
//!
//! Tags are plain `u8` values. Readers accept any byte and only compare it
//! against the tag the caller expects, so application and context-specific
//! tags work the same way as the universal ones below.
//!
//! # Tag Byte Layout
//!
//! ```text
//! Bits: 8 7 6 5 4 3 2 1
//!       C C P T T T T T
//! ```
//! - CC = class (00 universal, 01 application, 10 context-specific, 11 private)
//! - P = primitive (0) or constructed (1)
//! - TTTTT = tag number (0-30); extended multi-byte tags are not supported

pub const EOC: u8 = 0x00;
pub const BOOLEAN: u8 = 0x01;
pub const INTEGER: u8 = 0x02;
pub const BIT_STRING: u8 = 0x03;
pub const OCTET_STRING: u8 = 0x04;
pub const NULL: u8 = 0x05;
pub const OID: u8 = 0x06;
pub const OBJECT_DESCRIPTOR: u8 = 0x07;
pub const EXTERNAL: u8 = 0x08;
pub const REAL: u8 = 0x09;
pub const ENUMERATION: u8 = 0x0a;
pub const PDV: u8 = 0x0b;
pub const UTF8_STRING: u8 = 0x0c;
pub const RELATIVE_OID: u8 = 0x0d;
pub const SEQUENCE: u8 = 0x10;
pub const SET: u8 = 0x11;
pub const NUMERIC_STRING: u8 = 0x12;
pub const PRINTABLE_STRING: u8 = 0x13;
pub const T61_STRING: u8 = 0x14;
pub const VIDEOTEX_STRING: u8 = 0x15;
pub const IA5_STRING: u8 = 0x16;
pub const UTC_TIME: u8 = 0x17;
pub const GENERALIZED_TIME: u8 = 0x18;
pub const GRAPHIC_STRING: u8 = 0x19;
pub const VISIBLE_STRING: u8 = 0x1a;
pub const GENERAL_STRING: u8 = 0x1c;
pub const UNIVERSAL_STRING: u8 = 0x1d;
pub const CHARACTER_STRING: u8 = 0x1e;
pub const BMP_STRING: u8 = 0x1f;

/// Constructed bit
pub const CONSTRUCTOR: u8 = 0x20;
/// Application class bits
pub const APPLICATION: u8 = 0x40;
/// Context-specific class bits
pub const CONTEXT: u8 = 0x80;

/// Default tag written by `start_sequence` (SEQUENCE, constructed)
pub const SEQUENCE_CONSTRUCTED: u8 = SEQUENCE | CONSTRUCTOR;

const NUMBER_MASK: u8 = 0x1f;

/// Build a context-specific tag such as `[3]` or `[0] IMPLICIT SEQUENCE`
///
/// Only the low 5 bits of `number` are kept.
pub fn context(number: u8, constructed: bool) -> u8 {
    with_class(CONTEXT, number, constructed)
}

/// Build an application-class tag, e.g. an LDAP BindRequest is
/// `application(0, true) == 0x60`
pub fn application(number: u8, constructed: bool) -> u8 {
    with_class(APPLICATION, number, constructed)
}

/// Whether the constructed bit is set
pub fn is_constructed(tag: u8) -> bool {
    tag & CONSTRUCTOR != 0
}

fn with_class(class: u8, number: u8, constructed: bool) -> u8 {
    let constructed_bit = if constructed { CONSTRUCTOR } else { 0 };
    class | constructed_bit | (number & NUMBER_MASK)
}
