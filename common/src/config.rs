use std::time::Duration;

/// Port the HTTP endpoint listens on.
pub const LISTEN_PORT: u16 = 7654;

/// Standard RTSP port, the only port ever probed.
pub const RTSP_PORT: u16 = 554;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Default ceiling on probes in flight at the same time.
pub const DEFAULT_CONCURRENCY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TCP port a candidate must accept connections on.
    pub probe_port: u16,
    /// Budget for a single connection attempt.
    pub probe_timeout: Duration,
    /// Maximum number of concurrent probes within one scan. Never zero.
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_port: RTSP_PORT,
            probe_timeout: PROBE_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Config {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
