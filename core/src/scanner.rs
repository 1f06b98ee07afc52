//! Concurrent fan-out of probes over a list of candidate addresses.
//!
//! At most `concurrency` probe tasks are alive at once. The scanner keeps
//! that window full and consumes each finished task as it arrives, so
//! memory stays bounded by the window and a found device is reported as
//! soon as its probe completes, not after the whole subnet is done.

use std::net::Ipv4Addr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tracing::debug;

/// A liveness test for one address.
///
/// Implementations collapse every failure into `false`.
#[async_trait]
pub trait ServiceProbe: Send + Sync {
    async fn probe(&self, addr: Ipv4Addr) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub addr: Ipv4Addr,
    pub reachable: bool,
}

pub type FoundCallback = Arc<dyn Fn(Ipv4Addr) + Send + Sync>;

pub struct ConcurrentScanner {
    prober: Arc<dyn ServiceProbe>,
    concurrency: usize,
    on_found: Option<FoundCallback>,
}

impl ConcurrentScanner {
    pub fn new(prober: Arc<dyn ServiceProbe>, concurrency: usize) -> Self {
        Self {
            prober,
            concurrency: concurrency.max(1),
            on_found: None,
        }
    }

    /// Calls `on_found` for every reachable address the moment it is collected.
    pub fn with_on_found(mut self, on_found: FoundCallback) -> Self {
        self.on_found = Some(on_found);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Probes every address and returns the reachable ones in completion order.
    pub async fn scan<I>(&self, addresses: I) -> Vec<Ipv4Addr>
    where
        I: IntoIterator<Item = Ipv4Addr>,
    {
        let mut pending = addresses.into_iter();
        let mut in_flight: JoinSet<ProbeOutcome> = JoinSet::new();
        let mut reachable: Vec<Ipv4Addr> = Vec::new();
        let mut probed: usize = 0;

        loop {
            while in_flight.len() < self.concurrency {
                let Some(addr) = pending.next() else {
                    break;
                };
                let prober = Arc::clone(&self.prober);
                in_flight.spawn(async move {
                    let reachable = prober.probe(addr).await;
                    ProbeOutcome { addr, reachable }
                });
                probed += 1;
            }

            match in_flight.join_next().await {
                Some(Ok(outcome)) if outcome.reachable => {
                    debug!("{} is reachable", outcome.addr);
                    if let Some(on_found) = &self.on_found {
                        on_found(outcome.addr);
                    }
                    reachable.push(outcome.addr);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => debug!("Probe task failed: {e}"),
                None => break,
            }
        }

        debug!(probed, reachable = reachable.len(), "Scan finished");
        reachable
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
