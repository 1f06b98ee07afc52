//! # Camera Discovery Service
//!
//! Implements the "find every RTSP device" use case behind the HTTP endpoint.

use std::net::Ipv4Addr;
use std::sync::Arc;

use rtsp_scout_common::config::Config;
use rtsp_scout_common::error::EnumerationError;
use tracing::{debug, info};

use crate::enumerator::NetworkEnumerator;
use crate::network::tcp::TcpProbe;
use crate::scanner::ConcurrentScanner;

/// Reachable addresses, subnet by subnet in enumeration order.
pub type DeviceList = Vec<Ipv4Addr>;

/// Orchestrates one discovery pass:
/// 1. ask the [`NetworkEnumerator`] for the local subnets,
/// 2. expand each subnet and hand it to the [`ConcurrentScanner`],
/// 3. concatenate what every subnet scan found.
///
/// Nothing is kept between passes.
pub struct DiscoveryService {
    enumerator: NetworkEnumerator,
    scanner: ConcurrentScanner,
}

impl DiscoveryService {
    pub fn new(enumerator: NetworkEnumerator, scanner: ConcurrentScanner) -> Self {
        Self {
            enumerator,
            scanner,
        }
    }

    /// Scans the host's real interfaces with a TCP probe built from `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        let prober = Arc::new(TcpProbe::from_config(cfg));
        let scanner = ConcurrentScanner::new(prober, cfg.concurrency)
            .with_on_found(Arc::new(|addr: Ipv4Addr| info!("RTSP port open on {addr}")));
        Self::new(NetworkEnumerator::system(), scanner)
    }

    /// Subnets are scanned one after the other; addresses within a subnet
    /// are probed concurrently.
    pub async fn discover(&self) -> Result<DeviceList, EnumerationError> {
        let subnets = self.enumerator.local_subnets()?;

        let mut devices: DeviceList = Vec::new();
        for subnet in subnets {
            debug!(subnet = %subnet, candidates = subnet.size(), "Scanning subnet");
            let found = self.scanner.scan(subnet.addresses()).await;
            devices.extend(found);
        }

        Ok(devices)
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
