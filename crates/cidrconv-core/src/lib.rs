//! Core types and errors for cidrconv
//!
//! This crate provides the value types shared by the cidrconv crates:
//! - [`Address`] - IPv4 address as four octets
//! - [`CidrBlock`] - address plus prefix length
//! - [`AddressBits`] - 32-character binary rendering of an address
//! - [`AddressRange`] / [`BitRange`] - first and last address of a block
//! - [`Base`] - textual notation to convert into
//! - [`ParseError`], [`ConversionError`], [`CidrconvError`] - error types
//!
//! ```
//! use cidrconv_core::{Address, CidrBlock};
//!
//! let block = CidrBlock::new(Address([192, 168, 1, 10]), 24).unwrap();
//! assert_eq!(block.to_string(), "192.168.1.10/24");
//! assert_eq!(block.network().to_string(), "192.168.1.0/24");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

mod error;

pub use error::{parse_decimal, CidrconvError, ConversionError, ParseError, Result, SegmentError};

/// Longest IPv4 prefix
pub const MAX_PREFIX_LEN: u8 = 32;

/// IPv4 address as four octets, most significant first
///
/// Serializes as dotted-decimal text.
///
/// ```
/// use cidrconv_core::Address;
///
/// let addr: Address = "10.1.2.3".parse().unwrap();
/// assert_eq!(addr.octets(), [10, 1, 2, 3]);
/// assert_eq!(u32::from(addr), 0x0A010203);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Address(pub [u8; 4]);

impl Address {
    /// 0.0.0.0
    pub const UNSPECIFIED: Address = Address([0, 0, 0, 0]);
    /// 255.255.255.255
    pub const BROADCAST: Address = Address([255, 255, 255, 255]);

    pub fn octets(&self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();
        if segments.len() != 4 {
            return Err(ParseError::OctetCount(segments.len()));
        }

        let mut octets = [0u8; 4];
        for (octet, segment) in octets.iter_mut().zip(segments) {
            *octet = match parse_decimal(segment, u8::MAX as u32) {
                Ok(value) => value as u8,
                Err(SegmentError::Malformed) => {
                    return Err(ParseError::InvalidOctet(segment.to_string()))
                }
                Err(SegmentError::OutOfRange) => {
                    return Err(ParseError::OctetOutOfRange(segment.to_string()))
                }
            };
        }

        Ok(Address(octets))
    }
}

impl From<[u8; 4]> for Address {
    fn from(octets: [u8; 4]) -> Self {
        Address(octets)
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Address(value.to_be_bytes())
    }
}

impl From<Address> for u32 {
    fn from(addr: Address) -> Self {
        u32::from_be_bytes(addr.0)
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Address(addr.octets())
    }
}

impl From<Address> for Ipv4Addr {
    fn from(addr: Address) -> Self {
        Ipv4Addr::from(addr.0)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_string()
    }
}

impl TryFrom<String> for Address {
    type Error = ParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// CIDR block: an address and the number of leading network bits
///
/// The address is kept as supplied; host bits are only cleared by
/// [`CidrBlock::network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "repr::CidrBlockRepr", try_from = "repr::CidrBlockRepr")]
pub struct CidrBlock {
    address: Address,
    prefix_len: u8,
}

mod repr {
    use super::Address;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    pub struct CidrBlockRepr {
        pub address: Address,
        pub prefix_len: u8,
    }
}

impl CidrBlock {
    /// Create a block, rejecting prefix lengths above 32
    pub fn new(address: Address, prefix_len: u8) -> std::result::Result<Self, ParseError> {
        if prefix_len > MAX_PREFIX_LEN {
            return Err(ParseError::PrefixOutOfRange(prefix_len.to_string()));
        }
        Ok(Self {
            address,
            prefix_len,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Network mask as u32
    pub fn mask(&self) -> u32 {
        u32::MAX
            .checked_shl((MAX_PREFIX_LEN - self.prefix_len) as u32)
            .unwrap_or(0)
    }

    /// Same block with host bits cleared
    pub fn network(&self) -> CidrBlock {
        CidrBlock {
            address: Address::from(u32::from(self.address) & self.mask()),
            prefix_len: self.prefix_len,
        }
    }

    /// Whether the supplied address has any bits set past the prefix
    pub fn has_host_bits(&self) -> bool {
        u32::from(self.address) & !self.mask() != 0
    }

    /// Number of addresses in the block
    pub fn size(&self) -> u64 {
        1u64 << (MAX_PREFIX_LEN - self.prefix_len)
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl From<CidrBlock> for repr::CidrBlockRepr {
    fn from(block: CidrBlock) -> Self {
        Self {
            address: block.address,
            prefix_len: block.prefix_len,
        }
    }
}

impl TryFrom<repr::CidrBlockRepr> for CidrBlock {
    type Error = ParseError;

    fn try_from(repr: repr::CidrBlockRepr) -> std::result::Result<Self, Self::Error> {
        CidrBlock::new(repr.address, repr.prefix_len)
    }
}

/// 32 '0'/'1' characters, most significant bit first
///
/// ```
/// use cidrconv_core::AddressBits;
///
/// let bits = AddressBits::new("11000000101010000000000100001010").unwrap();
/// assert_eq!(bits.grouped(), "11000000.10101000.00000001.00001010");
/// assert!(AddressBits::new("1100").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AddressBits(String);

impl AddressBits {
    /// Width of an IPv4 address in bits
    pub const LEN: usize = 32;

    pub fn new(bits: impl Into<String>) -> std::result::Result<Self, ConversionError> {
        let bits = bits.into();
        let width = bits.chars().count();
        if width != Self::LEN {
            return Err(ConversionError::BitLength(width));
        }
        if !bits.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(ConversionError::InvalidBinaryDigit(bits));
        }
        Ok(Self(bits))
    }

    /// Wrap a string the caller has already built from '0'/'1' only
    ///
    /// For converters that produce exactly 32 binary digits by construction.
    #[doc(hidden)]
    pub fn from_validated(bits: String) -> Self {
        debug_assert_eq!(bits.len(), Self::LEN);
        debug_assert!(bits.bytes().all(|b| b == b'0' || b == b'1'));
        Self(bits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into (network, host) at `index`; `None` past the end
    pub fn split_at(&self, index: u8) -> Option<(&str, &str)> {
        let index = index as usize;
        if index > Self::LEN {
            return None;
        }
        Some(self.0.split_at(index))
    }

    /// The four 8-bit groups
    pub fn groups(&self) -> [&str; 4] {
        [
            &self.0[0..8],
            &self.0[8..16],
            &self.0[16..24],
            &self.0[24..32],
        ]
    }

    /// Dot-separated 8-bit groups
    pub fn grouped(&self) -> String {
        self.groups().join(".")
    }
}

impl fmt::Display for AddressBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AddressBits> for String {
    fn from(bits: AddressBits) -> Self {
        bits.0
    }
}

impl TryFrom<String> for AddressBits {
    type Error = ConversionError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        AddressBits::new(value)
    }
}

/// First and last address of a block, in binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitRange {
    pub first: AddressBits,
    pub last: AddressBits,
}

/// First and last address of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRange {
    pub first: Address,
    pub last: Address,
}

impl AddressRange {
    /// Whether `addr` lies between first and last, inclusive
    pub fn contains(&self, addr: Address) -> bool {
        self.first <= addr && addr <= self.last
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.first, self.last)
    }
}

/// Textual notation for an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    /// Dotted decimal, e.g. `192.168.1.10`
    #[default]
    Decimal,
    /// Dotted 8-bit groups, e.g. `11000000.10101000.00000001.00001010`
    Binary,
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Base::Decimal => f.write_str("decimal"),
            Base::Binary => f.write_str("binary"),
        }
    }
}

impl FromStr for Base {
    type Err = ConversionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "decimal" => Ok(Base::Decimal),
            "binary" => Ok(Base::Binary),
            _ => Err(ConversionError::UnsupportedBase(s.to_string())),
        }
    }
}
