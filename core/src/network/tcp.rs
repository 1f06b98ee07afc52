use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use rtsp_scout_common::config::Config;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use crate::scanner::ServiceProbe;

/// Liveness test by plain TCP connect, no protocol handshake.
#[derive(Debug, Clone, Copy)]
pub struct TcpProbe {
    port: u16,
    probe_timeout: Duration,
}

impl TcpProbe {
    pub fn new(port: u16, probe_timeout: Duration) -> Self {
        Self {
            port,
            probe_timeout,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.probe_port, cfg.probe_timeout)
    }
}

#[async_trait]
impl ServiceProbe for TcpProbe {
    async fn probe(&self, addr: Ipv4Addr) -> bool {
        handshake_probe(SocketAddr::from((addr, self.port)), self.probe_timeout).await
    }
}

/// Returns `true` only when the TCP handshake with `socket_addr` completes
/// within `probe_timeout`. The connection is closed right away.
pub async fn handshake_probe(socket_addr: SocketAddr, probe_timeout: Duration) -> bool {
    match timeout(probe_timeout, TcpStream::connect(socket_addr)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            true
        }
        Ok(Err(e)) => {
            trace!("Dial to {socket_addr} failed: {e}");
            false
        }
        Err(_elapsed) => false,
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
