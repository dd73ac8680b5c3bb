//! First/last address calculation on the binary form

use cidrconv_core::{AddressBits, BitRange, ParseError};

/// Compute the first and last address of the block `bits/prefix_len`
///
/// The first `prefix_len` bits are kept; the host bits are replaced with
/// all zeros (first) and all ones (last). Host bits already present in
/// `bits` are overwritten.
///
/// # Examples
///
/// ```
/// use cidrconv_cidr::{calculate_range, to_bits};
/// use cidrconv_core::Address;
///
/// let bits = to_bits(Address([10, 20, 30, 40]));
/// let range = calculate_range(&bits, 8).unwrap();
/// assert_eq!(range.first.grouped(), "00001010.00000000.00000000.00000000");
/// assert_eq!(range.last.grouped(), "00001010.11111111.11111111.11111111");
/// ```
pub fn calculate_range(bits: &AddressBits, prefix_len: u8) -> Result<BitRange, ParseError> {
    let (network_bits, host_bits) = bits
        .split_at(prefix_len)
        .ok_or_else(|| ParseError::PrefixOutOfRange(prefix_len.to_string()))?;

    let host_len = host_bits.len();
    let first = format!("{}{}", network_bits, "0".repeat(host_len));
    let last = format!("{}{}", network_bits, "1".repeat(host_len));

    Ok(BitRange {
        first: AddressBits::from_validated(first),
        last: AddressBits::from_validated(last),
    })
}
