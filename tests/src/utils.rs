use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use rtsp_scout_common::error::EnumerationError;
use rtsp_scout_common::network::interface::InterfaceTable;
use std::net::Ipv4Addr;

pub const IFF_UP: u32 = 1;
pub const IFF_BROADCAST: u32 = 1 << 1;

pub fn ni(name: &str, index: u32, ips: &[IpNetwork], flags: u32) -> NetworkInterface {
    NetworkInterface {
        name: name.into(),
        description: "".into(),
        index,
        mac: None,
        ips: ips.to_vec(),
        flags,
    }
}

pub fn v4(a: u8, b: u8, c: u8, d: u8, p: u8) -> IpNetwork {
    IpNetwork::V4(Ipv4Network::new(Ipv4Addr::new(a, b, c, d), p).unwrap())
}

/// Interface table with a fixed content, or one that cannot be read at all.
pub enum FixedTable {
    Interfaces(Vec<NetworkInterface>),
    Broken,
}

impl InterfaceTable for FixedTable {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, EnumerationError> {
        match self {
            FixedTable::Interfaces(interfaces) => Ok(interfaces.clone()),
            FixedTable::Broken => Err(EnumerationError::InterfaceTable(
                std::io::Error::other("simulated getifaddrs failure"),
            )),
        }
    }

    fn addresses(&self, interface: &NetworkInterface) -> anyhow::Result<Vec<IpNetwork>> {
        Ok(interface.ips.clone())
    }
}

/// A non-loopback interface that owns `127.0.0.0/30`, so probes stay on this host.
pub fn loopback_lan() -> FixedTable {
    FixedTable::Interfaces(vec![ni(
        "eth0",
        2,
        &[v4(127, 0, 0, 1, 30)],
        IFF_UP | IFF_BROADCAST,
    )])
}
