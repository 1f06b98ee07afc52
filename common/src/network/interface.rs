use std::io;
use std::net::IpAddr;

use anyhow::Context;
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

use crate::error::EnumerationError;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// The interface loops back to this host.
    IsLoopback,
}

/// Read access to the operating system's network interface table.
pub trait InterfaceTable: Send + Sync {
    /// Lists every interface the OS knows about.
    ///
    /// Failing here means nothing can be discovered at all.
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, EnumerationError>;

    /// Reads the networks currently assigned to `interface`.
    ///
    /// A failure only affects this one interface.
    fn addresses(&self, interface: &NetworkInterface) -> anyhow::Result<Vec<IpNetwork>>;
}

/// One row of the OS address table: an interface, its raw `IFF_*` flags and
/// at most one address with its netmask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRow {
    pub name: String,
    pub flags: u32,
    pub address: Option<IpAddr>,
    pub netmask: Option<IpAddr>,
}

pub type AddressSource = fn() -> io::Result<Vec<AddressRow>>;

/// The host's live interface table, read with `getifaddrs(3)`.
///
/// Every call queries the OS again, so `addresses` sees interfaces that went
/// away or changed since `interfaces` was called.
#[derive(Debug, Clone, Copy)]
pub struct SystemInterfaces {
    source: AddressSource,
}

impl SystemInterfaces {
    pub fn new() -> Self {
        Self::with_source(os::address_rows)
    }

    pub fn with_source(source: AddressSource) -> Self {
        Self { source }
    }
}

impl Default for SystemInterfaces {
    fn default() -> Self {
        Self::new()
    }
}

impl InterfaceTable for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, EnumerationError> {
        let rows = (self.source)()?;
        Ok(group_rows(&rows))
    }

    fn addresses(&self, interface: &NetworkInterface) -> anyhow::Result<Vec<IpNetwork>> {
        let rows = (self.source)()
            .with_context(|| format!("re-reading addresses of {}", interface.name))?;
        let mut seen = false;
        let mut networks = Vec::new();
        for row in rows.iter().filter(|row| row.name == interface.name) {
            seen = true;
            if let Some(address) = row.address {
                let netmask = row
                    .netmask
                    .with_context(|| format!("{address} on {} has no netmask", row.name))?;
                networks.push(network_of(address, netmask)?);
            }
        }
        anyhow::ensure!(seen, "interface {} is no longer present", interface.name);
        Ok(networks)
    }
}

/// Folds address rows into one interface per name, in first-seen order.
/// Rows whose address can't be turned into a network are left out here and
/// reported by [`InterfaceTable::addresses`].
fn group_rows(rows: &[AddressRow]) -> Vec<NetworkInterface> {
    let mut interfaces: Vec<NetworkInterface> = Vec::new();
    for row in rows {
        let position = match interfaces.iter().position(|i| i.name == row.name) {
            Some(position) => position,
            None => {
                interfaces.push(NetworkInterface {
                    name: row.name.clone(),
                    description: String::new(),
                    index: interfaces.len() as u32 + 1,
                    mac: None,
                    ips: Vec::new(),
                    flags: row.flags,
                });
                interfaces.len() - 1
            }
        };
        let interface = &mut interfaces[position];
        interface.flags |= row.flags;
        if let (Some(address), Some(netmask)) = (row.address, row.netmask) {
            if let Ok(network) = network_of(address, netmask) {
                interface.ips.push(network);
            }
        }
    }
    interfaces
}

/// Builds the network an address lives in from its netmask.
pub fn network_of(address: IpAddr, netmask: IpAddr) -> anyhow::Result<IpNetwork> {
    IpNetwork::with_netmask(address, netmask)
        .with_context(|| format!("invalid netmask {netmask} for {address}"))
}

/// Only interfaces that are up and not loopback are worth scanning.
pub fn check_viability(interface: &NetworkInterface) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    Ok(())
}

pub fn ipv4_networks(networks: &[IpNetwork]) -> impl Iterator<Item = Ipv4Network> + '_ {
    networks.iter().filter_map(|net| match net {
        IpNetwork::V4(v4) => Some(*v4),
        IpNetwork::V6(_) => None,
    })
}

#[cfg(unix)]
mod os {
    use std::io;
    use std::net::{IpAddr, SocketAddrV4, SocketAddrV6};

    use nix::ifaddrs::getifaddrs;
    use nix::sys::socket::SockaddrStorage;

    use super::AddressRow;

    pub fn address_rows() -> io::Result<Vec<AddressRow>> {
        let rows = getifaddrs()
            .map_err(io::Error::from)?
            .map(|ifa| AddressRow {
                name: ifa.interface_name,
                flags: ifa.flags.bits() as u32,
                address: ifa.address.as_ref().and_then(ip_of),
                netmask: ifa.netmask.as_ref().and_then(ip_of),
            })
            .collect();
        Ok(rows)
    }

    fn ip_of(storage: &SockaddrStorage) -> Option<IpAddr> {
        if let Some(sin) = storage.as_sockaddr_in() {
            return Some(IpAddr::V4(*SocketAddrV4::from(*sin).ip()));
        }
        storage
            .as_sockaddr_in6()
            .map(|sin6| IpAddr::V6(*SocketAddrV6::from(*sin6).ip()))
    }
}

#[cfg(not(unix))]
mod os {
    use std::io;

    use pnet::datalink;

    use super::AddressRow;

    pub fn address_rows() -> io::Result<Vec<AddressRow>> {
        let mut rows = Vec::new();
        for interface in datalink::interfaces() {
            rows.push(AddressRow {
                name: interface.name.clone(),
                flags: interface.flags,
                address: None,
                netmask: None,
            });
            rows.extend(interface.ips.iter().map(|net| AddressRow {
                name: interface.name.clone(),
                flags: interface.flags,
                address: Some(net.ip()),
                netmask: Some(net.mask()),
            }));
        }
        Ok(rows)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
