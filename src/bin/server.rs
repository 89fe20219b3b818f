use std::{env, error::Error, fs::OpenOptions, net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::{Handle, tls_rustls::RustlsConfig};
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{AppState, build_router, graceful_shutdown, logging_middleware};

/// The REST API server for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// File path to a directory with an SSL certificate `cert.pem` and key `key.pem`.
    ///
    /// The server uses plain HTTP if this is not set.
    #[arg(long)]
    cert_path: Option<String>,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging()?;

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let secret = env::var("JWT_SECRET")
        .map_err(|_| "The environment variable 'JWT_SECRET' must be set")?;

    let conn = Connection::open(&args.db_path)?;
    let state = AppState::new(conn, &secret)?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    match args.cert_path {
        Some(cert_path) => {
            let tls_config = RustlsConfig::from_pem_file(
                PathBuf::from(&cert_path).join("cert.pem"),
                PathBuf::from(&cert_path).join("key.pem"),
            )
            .await?;

            tracing::info!("HTTPS server listening on {}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(router.into_make_service())
                .await?;
        }
        None => {
            tracing::info!("HTTP server listening on {}", addr);
            axum_server::bind(addr)
                .handle(handle)
                .serve(router.into_make_service())
                .await?;
        }
    }

    Ok(())
}

fn setup_logging() -> Result<(), std::io::Error> {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
