//! # Address Specifications
//!
//! Parses and formats the three address shapes an IP group understands:
//! * A single host (e.g., `192.168.1.5` or `192.168.1.5/32`).
//! * A CIDR network (e.g., `192.168.1.0/24`).
//! * An address range with its netmask (e.g., `10.0.0.1-10.0.0.50/255.255.255.0`).
//!
//! Every value is validated on construction and immutable afterwards.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::{IpGroupError, Result};

pub const HOST_LABEL: &str = "IPAddress";
pub const NETWORK_LABEL: &str = "IPNetwork";
pub const RANGE_LABEL: &str = "IPRange";

const HOST_PREFIX: u8 = 32;

/// The positional type tag carried by every wire record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Host,
    Network,
    Range,
}

impl AddressKind {
    pub fn label(self) -> &'static str {
        match self {
            AddressKind::Host => HOST_LABEL,
            AddressKind::Network => NETWORK_LABEL,
            AddressKind::Range => RANGE_LABEL,
        }
    }

    /// Case-insensitive lookup of a kind label.
    pub fn from_label(label: &str) -> Option<Self> {
        [AddressKind::Host, AddressKind::Network, AddressKind::Range]
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Number of data tokens a specification of this kind occupies in a record.
    pub fn arity(self) -> usize {
        match self {
            AddressKind::Host => 1,
            AddressKind::Network | AddressKind::Range => 2,
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated address specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSpec {
    /// A single address, conceptually a /32.
    Host { addr: Ipv4Addr },
    /// A CIDR block. The address is kept as given; host bits are not cleared.
    Network { network: Ipv4Network },
    /// An inclusive range, `start <= end`.
    Range {
        start: Ipv4Addr,
        end: Ipv4Addr,
        netmask: Ipv4Addr,
    },
}

impl AddressSpec {
    pub fn host(addr: Ipv4Addr) -> Self {
        AddressSpec::Host { addr }
    }

    /// Builds a network from an address and prefix length.
    ///
    /// A /32 collapses into a [`AddressSpec::Host`].
    pub fn network(addr: Ipv4Addr, prefix: u8) -> Result<Self> {
        if prefix == HOST_PREFIX {
            return Ok(AddressSpec::Host { addr });
        }
        let network = Ipv4Network::new(addr, prefix)
            .map_err(|e| IpGroupError::invalid_address(&format!("{addr}/{prefix}"), e))?;
        Ok(AddressSpec::Network { network })
    }

    pub fn range(start: Ipv4Addr, end: Ipv4Addr, netmask: Ipv4Addr) -> Result<Self> {
        if u32::from(start) > u32::from(end) {
            return Err(IpGroupError::InvalidRange { start, end });
        }
        Ok(AddressSpec::Range {
            start,
            end,
            netmask,
        })
    }

    /// Parses `a.b.c.d` or `a.b.c.d/prefix`.
    ///
    /// A missing prefix or a prefix of 32 yields a host, anything else a network.
    pub fn parse_network(text: &str) -> Result<Self> {
        let text = text.trim();
        let Some((addr_str, prefix_str)) = text.split_once('/') else {
            return Ok(AddressSpec::Host {
                addr: parse_addr(text)?,
            });
        };

        let addr = parse_addr(addr_str)?;
        let prefix = parse_prefix(text, prefix_str)?;
        Self::network(addr, prefix)
    }

    /// Same classification as [`AddressSpec::parse_network`]: the service
    /// sends CIDR text in `IPAddress` records, which stays a network.
    pub fn parse_host(text: &str) -> Result<Self> {
        Self::parse_network(text)
    }

    pub fn parse_range(start: &str, end: &str, netmask: &str) -> Result<Self> {
        let start = parse_addr(start)?;
        let end = parse_addr(end)?;
        let netmask = parse_addr(netmask)?;
        Self::range(start, end, netmask)
    }

    /// Parses a network given as separate address and dotted netmask tokens,
    /// the way the service reports `IPNetwork` members.
    pub fn parse_network_with_mask(addr: &str, netmask: &str) -> Result<Self> {
        let addr_v4 = parse_addr(addr)?;
        let mask_v4 = parse_addr(netmask)?;
        let network = Ipv4Network::with_netmask(addr_v4, mask_v4)
            .map_err(|e| IpGroupError::invalid_address(netmask, e))?;
        Self::network(addr_v4, network.prefix())
    }

    pub fn kind(&self) -> AddressKind {
        match self {
            AddressSpec::Host { .. } => AddressKind::Host,
            AddressSpec::Network { .. } => AddressKind::Network,
            AddressSpec::Range { .. } => AddressKind::Range,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        self.kind().label()
    }

    /// The data tokens this specification contributes to a wire record.
    pub fn to_wire_fields(&self) -> Vec<String> {
        match self {
            AddressSpec::Host { addr } => vec![addr.to_string()],
            AddressSpec::Network { network } => {
                vec![network.ip().to_string(), network.mask().to_string()]
            }
            AddressSpec::Range {
                start,
                end,
                netmask,
            } => vec![format!("{start} to {end}"), netmask.to_string()],
        }
    }

    /// Wire fields joined by commas, one `IPData` entry.
    pub fn api_format(&self) -> String {
        self.to_wire_fields().join(",")
    }
}

impl fmt::Display for AddressSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressSpec::Host { addr } => write!(f, "{addr}"),
            AddressSpec::Network { network } => {
                write!(f, "{}/{}", network.ip(), network.prefix())
            }
            AddressSpec::Range {
                start,
                end,
                netmask,
            } => write!(f, "{start}-{end}/{netmask}"),
        }
    }
}

impl FromStr for AddressSpec {
    type Err = IpGroupError;

    /// Parses the free-form notation used on the command line.
    ///
    /// Supported formats:
    /// * **Host**: `192.168.1.5` or `192.168.1.5/32`.
    /// * **Network**: `192.168.1.0/24`.
    /// * **Range**: `192.168.1.1-192.168.1.50/255.255.255.0` (netmask required).
    fn from_str(s: &str) -> Result<Self> {
        let Some((start_str, rest)) = s.split_once('-') else {
            return Self::parse_network(s);
        };

        let Some((end_str, netmask_str)) = rest.split_once('/') else {
            return Err(IpGroupError::invalid_address(
                s,
                "range requires a netmask, e.g. 10.0.0.1-10.0.0.9/255.255.255.0",
            ));
        };

        Self::parse_range(start_str, end_str, netmask_str)
    }
}

fn parse_addr(text: &str) -> Result<Ipv4Addr> {
    let text = text.trim();
    text.parse::<Ipv4Addr>()
        .map_err(|e| IpGroupError::invalid_address(text, e))
}

fn parse_prefix(input: &str, prefix_str: &str) -> Result<u8> {
    let prefix = prefix_str
        .trim()
        .parse::<u8>()
        .map_err(|e| IpGroupError::invalid_address(input, format!("bad prefix: {e}")))?;

    if prefix > HOST_PREFIX {
        return Err(IpGroupError::invalid_address(
            input,
            format!("prefix {prefix} > {HOST_PREFIX}"),
        ));
    }
    Ok(prefix)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_32_is_host() {
        for text in ["1.2.3.4/32", "255.255.255.255/32", "0.0.0.0/32", "10.0.0.1"] {
            let spec = AddressSpec::parse_network(text).unwrap();
            assert_eq!(spec.kind_label(), "IPAddress", "{text}");
        }
    }

    #[test]
    fn test_shorter_prefix_is_network() {
        for prefix in [0u8, 1, 8, 21, 24, 31] {
            let spec = AddressSpec::parse_network(&format!("10.1.2.3/{prefix}")).unwrap();
            assert_eq!(spec.kind_label(), "IPNetwork", "/{prefix}");
        }
    }

    #[test]
    fn test_network_keeps_host_bits() {
        let spec = AddressSpec::parse_network("192.168.1.77/24").unwrap();
        assert_eq!(
            spec.to_wire_fields(),
            vec!["192.168.1.77".to_string(), "255.255.255.0".to_string()]
        );
        assert_eq!(spec.to_string(), "192.168.1.77/24");
    }

    #[test]
    fn test_invalid_octets() {
        assert!(matches!(
            AddressSpec::parse_network("300.1.1.1/24"),
            Err(IpGroupError::InvalidAddress { .. })
        ));
        assert!(matches!(
            AddressSpec::parse_network("a.b.c.d"),
            Err(IpGroupError::InvalidAddress { .. })
        ));
        assert!(matches!(
            AddressSpec::parse_network("10.0.0"),
            Err(IpGroupError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_invalid_prefix() {
        assert!(matches!(
            AddressSpec::parse_network("10.0.0.0/33"),
            Err(IpGroupError::InvalidAddress { .. })
        ));
        assert!(matches!(
            AddressSpec::parse_network("10.0.0.0/x"),
            Err(IpGroupError::InvalidAddress { .. })
        ));
        assert!(matches!(
            AddressSpec::parse_network("10.0.0.0/-1"),
            Err(IpGroupError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_parse_host_classifies_like_network() {
        assert_eq!(
            AddressSpec::parse_host("10.0.0.0/8"),
            AddressSpec::network(Ipv4Addr::new(10, 0, 0, 0), 8)
        );
        assert_eq!(AddressSpec::parse_host("10.0.0.0/8").unwrap().kind_label(), "IPNetwork");
        assert_eq!(
            AddressSpec::parse_host("10.0.0.1/32"),
            Ok(AddressSpec::host(Ipv4Addr::new(10, 0, 0, 1)))
        );
        assert_eq!(
            AddressSpec::parse_host("8.8.8.8"),
            Ok(AddressSpec::host(Ipv4Addr::new(8, 8, 8, 8)))
        );
        assert!(matches!(
            AddressSpec::parse_host("8.8.8.8/33"),
            Err(IpGroupError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_range_order() {
        assert_eq!(
            AddressSpec::parse_range("10.0.0.10", "10.0.0.1", "255.255.255.0"),
            Err(IpGroupError::InvalidRange {
                start: Ipv4Addr::new(10, 0, 0, 10),
                end: Ipv4Addr::new(10, 0, 0, 1),
            })
        );

        // Degenerate single-address range
        let spec = AddressSpec::parse_range("10.0.0.1", "10.0.0.1", "255.255.255.0").unwrap();
        assert_eq!(spec.kind(), AddressKind::Range);
    }

    #[test]
    fn test_range_compares_numerically() {
        // "10.0.0.9" > "10.0.0.10" as text, but not as integers
        assert!(AddressSpec::parse_range("10.0.0.9", "10.0.0.10", "255.255.255.0").is_ok());
        assert!(AddressSpec::parse_range("9.255.255.255", "10.0.0.0", "255.0.0.0").is_ok());
    }

    #[test]
    fn test_range_bad_netmask() {
        assert!(matches!(
            AddressSpec::parse_range("10.0.0.1", "10.0.0.2", "255.255.255"),
            Err(IpGroupError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_wire_fields() {
        let host = AddressSpec::parse_network("8.8.4.4").unwrap();
        assert_eq!(host.to_wire_fields(), vec!["8.8.4.4"]);
        assert_eq!(host.api_format(), "8.8.4.4");

        let net = AddressSpec::parse_network("50.50.20.0/21").unwrap();
        assert_eq!(net.api_format(), "50.50.20.0,255.255.248.0");

        let range = AddressSpec::parse_range("1.1.1.1", "1.1.1.8", "255.255.255.0").unwrap();
        assert_eq!(
            range.to_wire_fields(),
            vec!["1.1.1.1 to 1.1.1.8", "255.255.255.0"]
        );
        assert_eq!(range.api_format(), "1.1.1.1 to 1.1.1.8,255.255.255.0");
    }

    #[test]
    fn test_network_with_mask() {
        let spec = AddressSpec::parse_network_with_mask("50.50.20.0", "255.255.248.0").unwrap();
        assert_eq!(spec, AddressSpec::network(Ipv4Addr::new(50, 50, 20, 0), 21).unwrap());

        let host = AddressSpec::parse_network_with_mask("1.2.3.4", "255.255.255.255").unwrap();
        assert_eq!(host.kind(), AddressKind::Host);

        // Non-contiguous mask
        assert!(matches!(
            AddressSpec::parse_network_with_mask("10.0.0.0", "255.0.255.0"),
            Err(IpGroupError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(AddressKind::from_label("ipaddress"), Some(AddressKind::Host));
        assert_eq!(AddressKind::from_label("IPNETWORK"), Some(AddressKind::Network));
        assert_eq!(AddressKind::from_label("IPRange"), Some(AddressKind::Range));
        assert_eq!(AddressKind::from_label("IPv6Network"), None);
        assert_eq!(AddressKind::Host.arity(), 1);
        assert_eq!(AddressKind::Range.arity(), 2);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "192.168.1.5".parse::<AddressSpec>().map(|s| s.kind()),
            Ok(AddressKind::Host)
        );
        assert_eq!(
            "192.168.1.0/24".parse::<AddressSpec>().map(|s| s.kind()),
            Ok(AddressKind::Network)
        );

        let range: AddressSpec = "10.0.0.1-10.0.0.50/255.255.255.0".parse().unwrap();
        assert_eq!(range.to_string(), "10.0.0.1-10.0.0.50/255.255.255.0");

        assert!("10.0.0.1-10.0.0.50".parse::<AddressSpec>().is_err());
        assert!("10.0.0.50-10.0.0.1/255.255.255.0".parse::<AddressSpec>().is_err());
        assert!("not-an-ip".parse::<AddressSpec>().is_err());
    }
}
