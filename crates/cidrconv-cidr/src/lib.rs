//! CIDR parsing, base conversion and range calculation
//!
//! Provides the conversion pipeline behind the `cidrconv` CLI:
//! - Parse CIDR notation (e.g., "192.168.1.10/24")
//! - Convert addresses between dotted decimal and dotted binary
//! - Compute the first and last address of a block
//! - Check whether an address falls inside a block
//!
//! # Examples
//!
//! ```
//! use cidrconv_cidr::{convert_cidr, HostBits};
//! use cidrconv_core::Address;
//!
//! let report = convert_cidr("192.168.1.10/24", true, HostBits::Discard).unwrap();
//! assert_eq!(report.first, Address([192, 168, 1, 0]));
//! assert_eq!(report.last, Address([192, 168, 1, 255]));
//! assert_eq!(
//!     report.last_binary.as_deref(),
//!     Some("11000000.10101000.00000001.11111111")
//! );
//! assert!(report.host_bits_discarded);
//! ```

use cidrconv_core::{Address, AddressRange, CidrBlock, CidrconvError, Result};
use serde::Serialize;
use tracing::{debug, warn};

mod convert;
mod parser;
mod range;

pub use convert::{convert_address, from_bits, to_bits};
pub use parser::{parse_address, parse_cidr};
pub use range::calculate_range;

/// What to do when the supplied address has bits set past the prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostBits {
    /// Compute the range of the enclosing network and log a warning
    #[default]
    Discard,
    /// Fail with [`CidrconvError::HostBitsSet`]
    Reject,
}

/// Result of converting one CIDR block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Input as parsed, e.g. "192.168.1.10/24"
    pub cidr: String,
    /// Input with host bits cleared
    pub network: CidrBlock,
    pub prefix_len: u8,
    pub first: Address,
    pub last: Address,
    /// Dotted 8-bit groups; only filled when binary output was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_binary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_binary: Option<String>,
    /// Number of addresses in the block
    pub size: u64,
    pub host_bits_discarded: bool,
}

impl ConversionReport {
    pub fn range(&self) -> AddressRange {
        AddressRange {
            first: self.first,
            last: self.last,
        }
    }
}

/// Result of a membership check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Membership {
    pub address: Address,
    pub cidr: String,
    pub first: Address,
    pub last: Address,
    pub member: bool,
}

/// Run the full pipeline on a CIDR string
///
/// parse -> decimal to binary -> range -> binary to decimal.
///
/// # Arguments
///
/// * `input` - CIDR string (e.g., "10.0.0.0/8")
/// * `show_binary` - also return the binary form of first/last
/// * `policy` - handling of host bits in the supplied address
pub fn convert_cidr(input: &str, show_binary: bool, policy: HostBits) -> Result<ConversionReport> {
    let block = parse_cidr(input)?;
    let network = block.network();
    let host_bits_discarded = block.has_host_bits();

    if host_bits_discarded {
        match policy {
            HostBits::Reject => {
                return Err(CidrconvError::HostBitsSet {
                    input: block.to_string(),
                    network: network.to_string(),
                })
            }
            HostBits::Discard => {
                warn!(input = %block, %network, "host bits set, using network address")
            }
        }
    }

    let bits = to_bits(block.address());
    debug!(bits = %bits.grouped(), "converted address to binary");

    let range = calculate_range(&bits, block.prefix_len())?;
    let first = from_bits(&range.first)?;
    let last = from_bits(&range.last)?;
    debug!(%first, %last, "computed address range");

    Ok(ConversionReport {
        cidr: block.to_string(),
        network,
        prefix_len: block.prefix_len(),
        first,
        last,
        first_binary: show_binary.then(|| range.first.grouped()),
        last_binary: show_binary.then(|| range.last.grouped()),
        size: block.size(),
        host_bits_discarded,
    })
}

/// Check whether `address` falls inside the block `cidr`
///
/// ```
/// use cidrconv_cidr::check_membership;
///
/// assert!(check_membership("10.1.2.3", "10.0.0.0/8").unwrap().member);
/// assert!(!check_membership("11.0.0.1", "10.0.0.0/8").unwrap().member);
/// ```
pub fn check_membership(address: &str, cidr: &str) -> Result<Membership> {
    let address = parse_address(address)?;
    let report = convert_cidr(cidr, false, HostBits::Discard)?;
    let member = report.range().contains(address);
    debug!(%address, cidr = %report.cidr, member, "checked membership");

    Ok(Membership {
        address,
        cidr: report.cidr,
        first: report.first,
        last: report.last,
        member,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cidrconv_core::ParseError;

    #[test]
    fn test_convert_cidr_slash_24() {
        let report = convert_cidr("192.168.1.10/24", false, HostBits::Discard).unwrap();
        assert_eq!(report.first, Address([192, 168, 1, 0]));
        assert_eq!(report.last, Address([192, 168, 1, 255]));
        assert_eq!(report.network.to_string(), "192.168.1.0/24");
        assert_eq!(report.size, 256);
        assert!(report.host_bits_discarded);
        assert!(report.first_binary.is_none());
        assert!(report.last_binary.is_none());
    }

    #[test]
    fn test_convert_cidr_slash_8_binary() {
        let report = convert_cidr("10.0.0.0/8", true, HostBits::Discard).unwrap();
        assert_eq!(report.first, Address([10, 0, 0, 0]));
        assert_eq!(report.last, Address([10, 255, 255, 255]));
        assert_eq!(
            report.first_binary.as_deref(),
            Some("00001010.00000000.00000000.00000000")
        );
        assert_eq!(
            report.last_binary.as_deref(),
            Some("00001010.11111111.11111111.11111111")
        );
        assert!(!report.host_bits_discarded);
    }

    #[test]
    fn test_convert_cidr_reject_host_bits() {
        let err = convert_cidr("192.168.1.10/24", false, HostBits::Reject).unwrap_err();
        assert_eq!(
            err,
            CidrconvError::HostBitsSet {
                input: "192.168.1.10/24".to_string(),
                network: "192.168.1.0/24".to_string(),
            }
        );

        // A clean network address passes strict mode
        assert!(convert_cidr("192.168.1.0/24", false, HostBits::Reject).is_ok());
    }

    #[test]
    fn test_convert_cidr_parse_errors() {
        assert_eq!(
            convert_cidr("10.0.0.0/33", false, HostBits::Discard),
            Err(CidrconvError::Parse(ParseError::PrefixOutOfRange(
                "33".to_string()
            )))
        );
        assert_eq!(
            convert_cidr("300.1.1.1/24", false, HostBits::Discard),
            Err(CidrconvError::Parse(ParseError::OctetOutOfRange(
                "300".to_string()
            )))
        );
    }

    #[test]
    fn test_report_serialization() {
        let report = convert_cidr("10.0.0.0/8", false, HostBits::Discard).unwrap();
        let json = serde_json::to_value(&report).expect("serialization failed");
        assert_eq!(json["first"], "10.0.0.0");
        assert_eq!(json["last"], "10.255.255.255");
        assert_eq!(json["network"]["prefix_len"], 8);
        assert!(json.get("first_binary").is_none());
    }

    #[test]
    fn test_check_membership() {
        let result = check_membership("192.168.1.200", "192.168.1.0/24").unwrap();
        assert!(result.member);
        assert_eq!(result.first, Address([192, 168, 1, 0]));
        assert_eq!(result.last, Address([192, 168, 1, 255]));

        assert!(!check_membership("192.168.2.1", "192.168.1.0/24").unwrap().member);
        assert!(check_membership("1.2.3.4", "0.0.0.0/0").unwrap().member);
        assert!(check_membership("8.8.8.8", "8.8.8.8/32").unwrap().member);
        assert!(check_membership("8.8.8.8", "10.0.0.0/33").is_err());
        assert!(check_membership("8.8.8", "10.0.0.0/8").is_err());
    }
}
