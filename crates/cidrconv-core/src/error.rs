//! Error types shared by every cidrconv crate

use thiserror::Error;

/// Malformed CIDR or address text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input is not `<address>/<prefix>`
    #[error("Invalid CIDR notation: {0:?} (expected <address>/<prefix>)")]
    InvalidNotation(String),

    /// Prefix segment is not a decimal integer
    #[error("Invalid prefix length: {0:?}")]
    InvalidPrefix(String),

    /// Prefix length outside 0-32
    #[error("Prefix length out of range: {0} (must be 0-32)")]
    PrefixOutOfRange(String),

    /// Address does not have four dot-separated octets
    #[error("Invalid IP address: expected 4 octets, got {0}")]
    OctetCount(usize),

    /// Octet is not a decimal integer
    #[error("Invalid octet: {0:?}")]
    InvalidOctet(String),

    /// Octet outside 0-255
    #[error("Octet out of range: {0} (must be 0-255)")]
    OctetOutOfRange(String),
}

/// Malformed decimal or binary address representation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Address does not have four segments
    #[error("Expected 4 address segments, got {0}")]
    SegmentCount(usize),

    /// Decimal segment is not a decimal integer
    #[error("Non-numeric segment: {0:?}")]
    NonNumeric(String),

    /// Decimal segment outside 0-255
    #[error("Segment out of range: {0} (must be 0-255)")]
    OutOfRange(String),

    /// Binary group contains something other than '0' or '1'
    #[error("Invalid binary digit in {0:?} (only '0' and '1' allowed)")]
    InvalidBinaryDigit(String),

    /// Binary group is not 8 bits wide
    #[error("Binary group {0:?} must be exactly 8 bits")]
    GroupLength(String),

    /// Address bit string is not 32 bits wide
    #[error("Address bits must be exactly 32 characters, got {0}")]
    BitLength(usize),

    /// Unknown target base
    #[error("Invalid target format: {0:?} (expected one of: decimal, binary)")]
    UnsupportedBase(String),
}

/// Top-level error for cidrconv operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrconvError {
    /// CIDR string could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Address representation could not be converted
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Strict mode: the supplied address is not the network address
    #[error("Host bits set in {input} (network address is {network})")]
    HostBitsSet {
        /// CIDR as supplied
        input: String,
        /// CIDR with host bits cleared
        network: String,
    },
}

/// Result type alias for cidrconv operations
pub type Result<T> = std::result::Result<T, CidrconvError>;

/// Why a decimal segment was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentError {
    /// Empty, non-digit characters, or a redundant leading zero
    Malformed,
    /// Digits only, but larger than allowed
    OutOfRange,
}

/// Parse a canonical unsigned decimal segment no larger than `max`.
///
/// Only ASCII digits are accepted. Signs, whitespace and leading zeros
/// (other than `"0"` itself) are rejected so that the segment prints back
/// exactly as it was read.
///
/// ```
/// use cidrconv_core::{parse_decimal, SegmentError};
///
/// assert_eq!(parse_decimal("192", 255), Ok(192));
/// assert_eq!(parse_decimal("256", 255), Err(SegmentError::OutOfRange));
/// assert_eq!(parse_decimal("01", 255), Err(SegmentError::Malformed));
/// ```
pub fn parse_decimal(segment: &str, max: u32) -> std::result::Result<u32, SegmentError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SegmentError::Malformed);
    }
    if segment.len() > 1 && segment.starts_with('0') {
        return Err(SegmentError::Malformed);
    }

    // All digits at this point, so a u32 overflow is just a very large number
    match segment.parse::<u32>() {
        Ok(value) if value <= max => Ok(value),
        _ => Err(SegmentError::OutOfRange),
    }
}
