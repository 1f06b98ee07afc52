//! # Subnet Model
//!
//! An IPv4 subnet derived from an address assigned to a local interface, and
//! the expansion of that subnet into every candidate address it covers.
//!
//! Expansion deliberately keeps the network and broadcast addresses: a `/30`
//! yields four candidates, not two.

use std::fmt;
use std::iter::FusedIterator;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::{IpNetworkError, Ipv4Network};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subnet {
    network: Ipv4Network,
}

impl Subnet {
    /// Builds a subnet from any address inside it and its prefix length.
    ///
    /// Host bits in `ip` are kept (they identify the local address) but are
    /// masked away whenever the range is walked.
    pub fn new(ip: Ipv4Addr, prefix: u8) -> Result<Self, IpNetworkError> {
        Ok(Self {
            network: Ipv4Network::new(ip, prefix)?,
        })
    }

    /// The address the subnet was derived from.
    pub fn host_addr(&self) -> Ipv4Addr {
        self.network.ip()
    }

    /// The masked network address, i.e. the first candidate.
    pub fn network_addr(&self) -> Ipv4Addr {
        self.network.network()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    pub fn mask(&self) -> Ipv4Addr {
        self.network.mask()
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.network.contains(ip)
    }

    /// Number of candidates, `2^(32 - prefix)`.
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix()))
    }

    /// Walks every address of the subnet in ascending order.
    ///
    /// The returned iterator is lazy; call this again (or clone the iterator)
    /// to restart from the network address.
    pub fn addresses(&self) -> SubnetAddresses {
        SubnetAddresses {
            subnet: *self,
            next: Some(self.network_addr()),
            remaining: self.size(),
        }
    }
}

impl From<Ipv4Network> for Subnet {
    fn from(network: Ipv4Network) -> Self {
        Self { network }
    }
}

impl FromStr for Subnet {
    type Err = IpNetworkError;

    /// Parses CIDR notation, e.g. `192.168.1.0/24`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Ipv4Network>().map(Self::from)
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network_addr(), self.prefix())
    }
}

/// Iterator returned by [`Subnet::addresses`].
#[derive(Debug, Clone)]
pub struct SubnetAddresses {
    subnet: Subnet,
    next: Option<Ipv4Addr>,
    remaining: u64,
}

impl Iterator for SubnetAddresses {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = increment(current).filter(|ip| self.subnet.contains(*ip));
        self.remaining = self.remaining.saturating_sub(1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for SubnetAddresses {}

/// A `/0` holds 2^32 addresses, which only fits a 64-bit `usize`.
#[cfg(target_pointer_width = "64")]
impl ExactSizeIterator for SubnetAddresses {}

/// Adds one to `addr`, carrying from the least significant octet upwards.
///
/// Returns `None` for `255.255.255.255`, whose carry runs off the top octet.
pub fn increment(addr: Ipv4Addr) -> Option<Ipv4Addr> {
    let mut octets = addr.octets();
    for octet in octets.iter_mut().rev() {
        let (next, carried) = octet.overflowing_add(1);
        *octet = next;
        if !carried {
            return Some(Ipv4Addr::from(octets));
        }
    }
    None
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
