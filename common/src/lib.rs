//! Shared models for `rtsp-scout`.
//!
//! Everything in here is free of network IO except for the interface table,
//! which only reads what the operating system already knows.

pub mod config;
pub mod error;
pub mod network;
