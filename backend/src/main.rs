//! Backend entry-point: wires the GraphQL endpoint and health probes.

mod server;

use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    server::run(ServerConfig::from_env()).await
}
