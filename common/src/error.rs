use thiserror::Error;

/// The interface table as a whole could not be read.
///
/// This is the only enumeration failure that aborts a discovery. Problems
/// with a single interface are logged and skipped instead.
#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("cannot read the network interface table: {0}")]
    InterfaceTable(#[from] std::io::Error),

    #[error("network interfaces unavailable: {0}")]
    Unavailable(String),
}
