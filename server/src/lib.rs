//! HTTP front end for `rtsp-scout`.

pub mod commands;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;
