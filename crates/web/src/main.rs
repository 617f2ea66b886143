use std::net::SocketAddr;
use std::path::Path;

use tracing::info;

use pgforge_common::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let addr: SocketAddr = std::env::var("PGFORGE_WEB_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()?;

    let cfg = match std::env::var("PGFORGE_CONFIG") {
        Ok(path) => ServiceConfig::load(Path::new(&path))?,
        Err(_) => ServiceConfig::default(),
    };

    info!(
        "Starting pgforge control plane on http://{} (terraform dir: {})",
        addr,
        cfg.terraform_dir.display()
    );

    pgforge_web::server::serve(addr, cfg).await
}
