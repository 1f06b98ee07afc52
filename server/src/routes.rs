use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router, middleware};
use rtsp_scout_core::discovery::DiscoveryService;
use tracing::info;

use crate::error::ServerError;

/// The path name is kept for existing clients even though discovery is a
/// plain RTSP port probe.
pub const DISCOVERY_PATH: &str = "/get_all_onvif_cameras/";

pub type SharedService = Arc<DiscoveryService>;

pub fn create_router(service: SharedService) -> Router {
    Router::new()
        .route(DISCOVERY_PATH, get(get_all_cameras))
        .route(DISCOVERY_PATH.trim_end_matches('/'), get(get_all_cameras))
        .layer(middleware::from_fn(crate::middleware::log_request))
        .with_state(service)
}

async fn get_all_cameras(
    State(service): State<SharedService>,
) -> Result<Json<Vec<String>>, ServerError> {
    let devices: Vec<String> = service
        .discover()
        .await?
        .iter()
        .map(ToString::to_string)
        .collect();

    info!("Found cameras: {devices:?}");
    Ok(Json(devices))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
