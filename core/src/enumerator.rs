use rtsp_scout_common::error::EnumerationError;
use rtsp_scout_common::network::interface::{
    InterfaceTable, SystemInterfaces, check_viability, ipv4_networks,
};
use rtsp_scout_common::network::subnet::Subnet;
use tracing::{debug, info, warn};

/// Derives the subnets this host sits on from its interface table.
pub struct NetworkEnumerator {
    table: Box<dyn InterfaceTable>,
}

impl NetworkEnumerator {
    pub fn new(table: Box<dyn InterfaceTable>) -> Self {
        Self { table }
    }

    pub fn system() -> Self {
        Self::new(Box::new(SystemInterfaces::new()))
    }

    /// Returns one subnet per IPv4 address on every up, non-loopback interface.
    ///
    /// Only a failure to list the interfaces is an error. An interface whose
    /// addresses cannot be read is logged and skipped, and an empty result is
    /// a perfectly valid answer.
    pub fn local_subnets(&self) -> Result<Vec<Subnet>, EnumerationError> {
        let interfaces = self.table.interfaces()?;
        let mut subnets: Vec<Subnet> = Vec::new();

        for interface in &interfaces {
            if let Err(reason) = check_viability(interface) {
                debug!(interface = %interface.name, ?reason, "Skipping interface");
                continue;
            }

            let addresses = match self.table.addresses(interface) {
                Ok(addresses) => addresses,
                Err(e) => {
                    warn!(
                        "Error getting addresses for interface {}: {e}",
                        interface.name
                    );
                    continue;
                }
            };

            for network in ipv4_networks(&addresses) {
                let subnet = Subnet::from(network);
                info!(
                    "Found network: Interface={} IP={} Network={subnet}",
                    interface.name,
                    network.ip()
                );
                subnets.push(subnet);
            }
        }

        if subnets.is_empty() {
            info!("No active networks found.");
        }

        Ok(subnets)
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
