#![allow(clippy::missing_errors_doc, dead_code)]
use std::net::{SocketAddr, TcpListener};

use http::uri::Scheme;
use rstest::fixture;
use tracing::info;
use wiremock::MockServer;

use shub_jobs::JobsClient;

pub const API_KEY: &str = "XXX";

/// `Basic base64("XXX:")`
pub const AUTHORIZATION: &str = "Basic WFhYOg==";

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

pub fn client_for(address: SocketAddr) -> anyhow::Result<JobsClient> {
    let client = JobsClient::builder()
        .with_api_key(API_KEY)
        .with_scheme(Scheme::HTTP)
        .with_host(address.ip().to_string())
        .with_port(address.port())
        .build()?;
    Ok(client)
}

/// An address nobody listens on.
pub fn closed_address() -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let address = listener.local_addr()?;
    drop(listener);
    Ok(address)
}

#[fixture]
pub async fn server() -> MockServer {
    init_tracing();
    MockServer::start().await
}
