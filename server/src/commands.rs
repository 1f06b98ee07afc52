use clap::Parser;
use rtsp_scout_common::config::DEFAULT_CONCURRENCY;

#[derive(Parser)]
#[command(name = "rtsp-scout")]
#[command(about = "Finds RTSP devices on the local networks and lists them over HTTP.")]
pub struct CommandLine {
    /// Maximum number of probes in flight during a scan
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
