use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use time::Duration;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use user_directory::{
    AppState, DEFAULT_TOKEN_DURATION, InMemoryUserStore, PasswordHash, build_router,
    graceful_shutdown, logging_middleware,
};

/// The REST API server for the user directory.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The address to serve the API from.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The secret used to sign log-in tokens.
    #[arg(long, env = "SECRET", hide_env_values = true)]
    secret: String,

    /// How long log-in tokens stay valid for, in minutes.
    #[arg(long, default_value_t = DEFAULT_TOKEN_DURATION.whole_minutes(), value_parser = clap::value_parser!(i64).range(1..))]
    token_duration_minutes: i64,

    /// The bcrypt cost for hashing new passwords.
    #[arg(long, default_value_t = PasswordHash::DEFAULT_COST, value_parser = clap::value_parser!(u32).range(4..=31))]
    hash_cost: u32,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::new(args.host, args.port);

    let state = AppState::new(
        &args.secret,
        Arc::new(InMemoryUserStore::new()),
        Duration::minutes(args.token_duration_minutes),
        args.hash_cost,
    );

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
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
        // Errors are logged when they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
