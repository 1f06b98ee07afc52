use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use rtsp_scout_common::config::Config;
use rtsp_scout_core::discovery::DiscoveryService;
use rtsp_scout_core::enumerator::NetworkEnumerator;
use rtsp_scout_core::network::tcp::TcpProbe;
use rtsp_scout_core::scanner::ConcurrentScanner;
use rtsp_scout_server::routes::{self, DISCOVERY_PATH};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::utils::{self, FixedTable};

fn test_config(probe_port: u16) -> Config {
    Config {
        probe_port,
        probe_timeout: Duration::from_millis(500),
        ..Config::default()
    }
}

fn service(table: FixedTable, cfg: &Config) -> DiscoveryService {
    DiscoveryService::new(
        NetworkEnumerator::new(Box::new(table)),
        ConcurrentScanner::new(Arc::new(TcpProbe::from_config(cfg)), cfg.concurrency),
    )
}

/// Serves the router on an ephemeral loopback port and returns its address.
async fn spawn_server(service: DiscoveryService) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = routes::create_router(Arc::new(service));
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    addr
}

async fn http_get(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

/// One listener on `127.0.0.1`; `.0`, `.2` and `.3` of the `/30` must not show up.
#[tokio::test]
async fn discovery_finds_only_the_listening_address() {
    let camera = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let cfg = test_config(camera.local_addr().unwrap().port());

    let devices = service(utils::loopback_lan(), &cfg).discover().await.unwrap();

    assert_eq!(devices, vec![Ipv4Addr::LOCALHOST]);
}

#[tokio::test]
async fn endpoint_returns_listening_camera_as_json() {
    let camera = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let cfg = test_config(camera.local_addr().unwrap().port());
    let addr = spawn_server(service(utils::loopback_lan(), &cfg)).await;

    let response = http_get(addr, DISCOVERY_PATH).await;

    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    assert!(response.to_ascii_lowercase().contains("content-type: application/json"));
    assert!(response.ends_with(r#"["127.0.0.1"]"#), "{response}");
}

#[tokio::test]
async fn endpoint_reports_enumeration_failure() {
    let cfg = test_config(9);
    let addr = spawn_server(service(FixedTable::Broken, &cfg)).await;

    let response = http_get(addr, DISCOVERY_PATH).await;

    assert!(
        response.starts_with("HTTP/1.1 500 Internal Server Error"),
        "{response}"
    );
    assert!(response.contains("Error determining local networks"));
}

#[tokio::test]
async fn endpoint_returns_empty_array_without_networks() {
    let cfg = test_config(9);
    let addr = spawn_server(service(FixedTable::Interfaces(vec![]), &cfg)).await;

    let response = http_get(addr, DISCOVERY_PATH).await;

    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    assert!(response.ends_with("[]"), "{response}");
}

/// Linux routes all of `127.0.0.0/8` to loopback, so several hosts can listen at once.
#[tokio::test]
#[cfg(target_os = "linux")]
async fn discovery_is_stable_across_runs() {
    let first = TcpListener::bind("127.0.0.2:0").await.unwrap();
    let port = first.local_addr().unwrap().port();
    let mut cameras = vec![first];
    for last in [5u8, 9, 14] {
        cameras.push(
            TcpListener::bind((Ipv4Addr::new(127, 0, 0, last), port))
                .await
                .unwrap(),
        );
    }

    let table = FixedTable::Interfaces(vec![utils::ni(
        "eth0",
        2,
        &[utils::v4(127, 0, 0, 1, 28)],
        utils::IFF_UP | utils::IFF_BROADCAST,
    )]);
    let discovery = service(table, &test_config(port));

    for _ in 0..5 {
        let mut devices = discovery.discover().await.unwrap();
        devices.sort();
        assert_eq!(
            devices,
            vec![
                Ipv4Addr::new(127, 0, 0, 2),
                Ipv4Addr::new(127, 0, 0, 5),
                Ipv4Addr::new(127, 0, 0, 9),
                Ipv4Addr::new(127, 0, 0, 14),
            ]
        );
    }
    drop(cameras);
}
