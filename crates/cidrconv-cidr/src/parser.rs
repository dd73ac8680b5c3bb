//! CIDR string parsing

use cidrconv_core::{parse_decimal, Address, CidrBlock, ParseError, SegmentError, MAX_PREFIX_LEN};
use tracing::debug;

/// Parse `"a.b.c.d/p"` into a [`CidrBlock`]
///
/// Surrounding whitespace is ignored. The address is kept exactly as
/// written, host bits included.
///
/// # Examples
///
/// ```
/// use cidrconv_cidr::parse_cidr;
///
/// let block = parse_cidr("192.168.1.10/24").unwrap();
/// assert_eq!(block.prefix_len(), 24);
/// assert_eq!(block.address().octets(), [192, 168, 1, 10]);
///
/// assert!(parse_cidr("10.0.0.0/33").is_err());
/// assert!(parse_cidr("300.1.1.1/24").is_err());
/// ```
pub fn parse_cidr(input: &str) -> Result<CidrBlock, ParseError> {
    let input = input.trim();
    let parts: Vec<&str> = input.split('/').collect();
    if parts.len() != 2 {
        return Err(ParseError::InvalidNotation(input.to_string()));
    }

    let prefix_len = parse_prefix(parts[1])?;
    let address = parse_address(parts[0])?;

    debug!(%address, prefix_len, "parsed CIDR block");
    CidrBlock::new(address, prefix_len)
}

/// Parse a bare dotted-decimal address
pub fn parse_address(input: &str) -> Result<Address, ParseError> {
    input.trim().parse()
}

fn parse_prefix(segment: &str) -> Result<u8, ParseError> {
    match parse_decimal(segment, MAX_PREFIX_LEN as u32) {
        Ok(value) => Ok(value as u8),
        Err(SegmentError::Malformed) => Err(ParseError::InvalidPrefix(segment.to_string())),
        Err(SegmentError::OutOfRange) => Err(ParseError::PrefixOutOfRange(segment.to_string())),
    }
}
