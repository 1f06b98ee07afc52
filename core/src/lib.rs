//! Discovery engine for `rtsp-scout`.
//!
//! * [`enumerator`] turns the interface table into local subnets.
//! * [`network::tcp`] probes a single address for an open RTSP port.
//! * [`scanner`] fans probes out over a subnet and gathers the live ones.
//! * [`discovery`] ties the three together for one request.

pub mod discovery;
pub mod enumerator;
pub mod network;
pub mod scanner;
