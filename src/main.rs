use std::net::SocketAddr;
use std::process;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use mergington_activities::config::Config;
use mergington_activities::database::{seed, ActivityRegistry};
use mergington_activities::web;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Config + seed
    let config = Config::from_env();
    let catalog = match &config.seed_path {
        Some(path) => seed::load_seed_file(path),
        None => seed::default_seed(),
    };
    let catalog = match catalog {
        Ok(c) => c,
        Err(e) => {
            error!("Could not load activities: {}", e);
            process::exit(1);
        }
    };

    let registry = Arc::new(ActivityRegistry::new(catalog));
    info!(
        activities = registry.len(),
        version = env!("CARGO_PKG_VERSION"),
        "Activity registry ready"
    );

    // 3. Router
    let app = web::router(registry, &config.static_dir);

    // 4. Bind, with one fallback port
    let listener = match bind(&config.host, config.port).await {
        Some(l) => l,
        None => {
            error!("No usable address for {}", config.address());
            process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(addr) => info!("Server running on http://{}", addr),
        Err(e) => warn!("Could not read bound address: {}", e),
    }

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        process::exit(1);
    }

    info!("Server shut down");
}

async fn bind(host: &str, port: u16) -> Option<TcpListener> {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            error!("Cannot parse {}:{}: {}", host, port, e);
            return None;
        }
    };

    match TcpListener::bind(addr).await {
        Ok(l) => Some(l),
        Err(e) => {
            let fallback = SocketAddr::new(addr.ip(), port.checked_add(1)?);
            warn!("Could not bind {}: {}. Trying fallback {}", addr, e, fallback);
            match TcpListener::bind(fallback).await {
                Ok(l) => Some(l),
                Err(e) => {
                    error!("Could not bind fallback {}: {}", fallback, e);
                    None
                }
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
