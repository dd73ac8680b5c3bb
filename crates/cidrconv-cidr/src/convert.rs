//! Decimal <-> binary address notation

use cidrconv_core::{parse_decimal, Address, AddressBits, Base, ConversionError, SegmentError};

const GROUP_BITS: usize = 8;
const SEPARATOR: char = '.';

/// Convert a dotted address into the `target` notation
///
/// Decimal input becomes four zero-padded 8-bit groups; binary input
/// (dotted groups, or one 32-bit run) becomes dotted decimal.
///
/// # Examples
///
/// ```
/// use cidrconv_cidr::convert_address;
/// use cidrconv_core::Base;
///
/// let bin = convert_address("192.168.1.10", Base::Binary).unwrap();
/// assert_eq!(bin, "11000000.10101000.00000001.00001010");
///
/// let dec = convert_address(&bin, Base::Decimal).unwrap();
/// assert_eq!(dec, "192.168.1.10");
/// ```
pub fn convert_address(address: &str, target: Base) -> Result<String, ConversionError> {
    let address = address.trim();
    match target {
        Base::Binary => decimal_to_binary(address),
        Base::Decimal => binary_to_decimal(address),
    }
}

/// Binary form of an address
pub fn to_bits(address: Address) -> AddressBits {
    let bits: String = address
        .octets()
        .iter()
        .map(|octet| format!("{:08b}", octet))
        .collect();
    AddressBits::from_validated(bits)
}

/// Decimal form of a binary address
pub fn from_bits(bits: &AddressBits) -> Result<Address, ConversionError> {
    let mut octets = [0u8; 4];
    for (octet, group) in octets.iter_mut().zip(bits.groups()) {
        *octet = parse_binary_group(group)?;
    }
    Ok(Address(octets))
}

fn decimal_to_binary(address: &str) -> Result<String, ConversionError> {
    let segments = split_segments(address)?;

    let mut groups = Vec::with_capacity(segments.len());
    for segment in segments {
        let value = match parse_decimal(segment, u8::MAX as u32) {
            Ok(value) => value,
            Err(SegmentError::Malformed) => {
                return Err(ConversionError::NonNumeric(segment.to_string()))
            }
            Err(SegmentError::OutOfRange) => {
                return Err(ConversionError::OutOfRange(segment.to_string()))
            }
        };
        groups.push(format!("{:08b}", value));
    }

    Ok(groups.join("."))
}

fn binary_to_decimal(address: &str) -> Result<String, ConversionError> {
    // An ungrouped 32-bit run is accepted too
    if !address.contains(SEPARATOR) {
        let bits = AddressBits::new(address)?;
        return Ok(from_bits(&bits)?.to_string());
    }

    let segments = split_segments(address)?;
    let octets = segments
        .into_iter()
        .map(|group| parse_binary_group(group).map(|octet| octet.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(octets.join("."))
}

fn split_segments(address: &str) -> Result<Vec<&str>, ConversionError> {
    let segments: Vec<&str> = address.split(SEPARATOR).collect();
    if segments.len() != 4 {
        return Err(ConversionError::SegmentCount(segments.len()));
    }
    Ok(segments)
}

fn parse_binary_group(group: &str) -> Result<u8, ConversionError> {
    if !group.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(ConversionError::InvalidBinaryDigit(group.to_string()));
    }
    if group.len() != GROUP_BITS {
        return Err(ConversionError::GroupLength(group.to_string()));
    }
    u8::from_str_radix(group, 2).map_err(|_| ConversionError::InvalidBinaryDigit(group.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_to_binary() {
        assert_eq!(
            convert_address("10.0.0.1", Base::Binary).unwrap(),
            "00001010.00000000.00000000.00000001"
        );
        assert_eq!(
            convert_address("255.255.255.255", Base::Binary).unwrap(),
            "11111111.11111111.11111111.11111111"
        );
    }

    #[test]
    fn test_binary_to_decimal() {
        assert_eq!(
            convert_address("00001010.00000000.00000000.00000001", Base::Decimal).unwrap(),
            "10.0.0.1"
        );
        assert_eq!(
            convert_address("11000000101010000000000100001010", Base::Decimal).unwrap(),
            "192.168.1.10"
        );
    }

    #[test]
    fn test_every_octet_survives_both_directions() {
        for value in 0..=255u8 {
            let decimal = format!("{value}.{value}.{value}.{value}");
            let binary = convert_address(&decimal, Base::Binary).unwrap();
            assert_eq!(convert_address(&binary, Base::Decimal).unwrap(), decimal);
        }
    }

    #[test]
    fn test_decimal_errors() {
        assert_eq!(
            convert_address("10.0.1", Base::Binary),
            Err(ConversionError::SegmentCount(3))
        );
        assert_eq!(
            convert_address("10.0.0.256", Base::Binary),
            Err(ConversionError::OutOfRange("256".to_string()))
        );
        assert_eq!(
            convert_address("10.0.zero.1", Base::Binary),
            Err(ConversionError::NonNumeric("zero".to_string()))
        );
    }

    #[test]
    fn test_binary_errors() {
        assert_eq!(
            convert_address("00001010.00000000.00000000.00000002", Base::Decimal),
            Err(ConversionError::InvalidBinaryDigit("00000002".to_string()))
        );
        assert_eq!(
            convert_address("1010.00000000.00000000.00000001", Base::Decimal),
            Err(ConversionError::GroupLength("1010".to_string()))
        );
        assert_eq!(
            convert_address("000000001.00000000.00000000.00000001", Base::Decimal),
            Err(ConversionError::GroupLength("000000001".to_string()))
        );
        assert_eq!(
            convert_address("00001010.00000000.00000001", Base::Decimal),
            Err(ConversionError::SegmentCount(3))
        );
        assert_eq!(
            convert_address("0101", Base::Decimal),
            Err(ConversionError::BitLength(4))
        );
    }

    #[test]
    fn test_to_bits_extremes() {
        assert_eq!(to_bits(Address::UNSPECIFIED).as_str(), "0".repeat(32));
        assert_eq!(to_bits(Address::BROADCAST).as_str(), "1".repeat(32));
        assert_eq!(
            to_bits(Address([1, 2, 4, 128])).grouped(),
            "00000001.00000010.00000100.10000000"
        );
    }

    #[test]
    fn test_bits_round_trip() {
        let addr = Address([172, 16, 254, 1]);
        let bits = to_bits(addr);
        assert_eq!(bits.as_str(), "10101100000100001111111000000001");
        assert_eq!(from_bits(&bits).unwrap(), addr);
    }
}
