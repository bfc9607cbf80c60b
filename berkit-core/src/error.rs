use thiserror::Error;

/// Main error type for BER encoding and decoding
///
/// Running out of input is never an error: readers report it as `Ok(None)`
/// so the caller can retry once more bytes arrived. Every variant here aborts
/// the current operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Asn1Error {
    #[error("Expected 0x{expected:02x}: got 0x{actual:02x}")]
    TagMismatch { expected: u8, actual: u8 },

    #[error("Indefinite length not supported")]
    IndefiniteLength,

    #[error("Length too long: {0}")]
    LengthTooLong(usize),

    #[error("Zero-length integer")]
    ZeroLengthInteger,

    #[error("Integer not representable as i64")]
    IntegerOverflow,

    #[error("Invalid ASN.1 encoding: {0}")]
    InvalidEncoding(String),

    #[error("Sequence too long: {0} bytes")]
    SequenceTooLong(usize),

    #[error("{0} unended sequence(s)")]
    UnendedSequences(usize),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Asn1Error {
    /// Whether this error reports malformed data or a broken encode pass,
    /// as opposed to a rejected caller argument
    pub fn is_invalid_encoding(&self) -> bool {
        !matches!(self, Asn1Error::InvalidArgument(_))
    }
}

/// Result type alias for BER operations
pub type Asn1Result<T> = Result<T, Asn1Error>;
