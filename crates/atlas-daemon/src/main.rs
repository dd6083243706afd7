#![deny(unsafe_code)]
use anyhow::{Context, Result};
use atlas_canon::SignerConfig;
use atlas_daemon::auth::{AuthConfig, Principal};
use atlas_daemon::middleware::{request_id_middleware, CorsConfig, RateLimiter, RequestLogger};
use atlas_daemon::{build_app, AppState};
use atlas_store::GraphStoreConfig;
use axum::middleware as axum_middleware;
use clap::Parser;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "atlas-daemon", version, about = "Atlas UI-graph daemon")]
struct Args {
    /// Bind address.
    #[arg(long, env = "ATLAS_BIND", default_value = "127.0.0.1:8090")]
    bind: String,

    /// Maximum number of contexts the store will accept (unlimited if unset).
    #[arg(long, env = "ATLAS_MAX_CONTEXTS")]
    max_contexts: Option<usize>,

    /// Maximum number of states per context (unlimited if unset).
    #[arg(long, env = "ATLAS_MAX_STATES_PER_CONTEXT")]
    max_states_per_context: Option<usize>,

    /// Maximum number of transitions per context (unlimited if unset).
    #[arg(long, env = "ATLAS_MAX_TRANSITIONS_PER_CONTEXT")]
    max_transitions_per_context: Option<usize>,

    /// Accepted API keys, each as `id:key`. Repeat to register more than one,
    /// or set `ATLAS_API_KEYS` to a comma-separated list. When at least one
    /// is given, every route requires a matching `X-API-Key` header.
    #[arg(long = "api-key", env = "ATLAS_API_KEYS", value_delimiter = ',')]
    api_keys: Vec<String>,

    /// Shared secret used to HMAC-sign exported payloads. When unset,
    /// exports are not signed.
    #[arg(long, env = "ATLAS_HMAC_SECRET")]
    hmac_secret: Option<String>,

    /// Log level passed straight through to the tracing filter, e.g.
    /// `info`, `debug`, `atlas=trace`. Overrides `--debug` when set.
    #[arg(long, env = "ATLAS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable verbose request/response debug logging. Ignored if
    /// `--log-level` is also given.
    #[arg(long, env = "ATLAS_DEBUG")]
    debug: bool,

    /// Maximum requests accepted per `--rate-limit-window-secs` from the
    /// whole daemon (disabled if unset).
    #[arg(long, env = "ATLAS_RATE_LIMIT")]
    rate_limit: Option<u32>,

    /// Sliding window, in seconds, `--rate-limit` is measured over.
    #[arg(long, env = "ATLAS_RATE_LIMIT_WINDOW_SECS", default_value_t = 60)]
    rate_limit_window_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match &args.log_level {
        Some(level) => EnvFilter::new(level),
        None if args.debug => EnvFilter::new("atlas=debug"),
        None => EnvFilter::new("atlas=info"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store_config = GraphStoreConfig {
        max_contexts: args.max_contexts,
        max_states_per_context: args.max_states_per_context,
        max_transitions_per_context: args.max_transitions_per_context,
    };
    let mut state = AppState::new(store_config);

    if !args.api_keys.is_empty() {
        let mut api_keys = BTreeMap::new();
        for entry in &args.api_keys {
            let (id, key) = entry
                .split_once(':')
                .with_context(|| format!("--api-key {entry:?} is not of the form id:key"))?;
            api_keys.insert(key.to_string(), Principal { id: id.to_string() });
        }
        state = state.with_auth(AuthConfig::new(api_keys));
    }

    if let Some(secret) = &args.hmac_secret {
        state = state
            .with_signer(SignerConfig::new(secret.clone()))
            .map_err(|e| anyhow::anyhow!("{e}"))?;
    }

    let mut app = build_app(state)
        .layer(axum_middleware::from_fn(RequestLogger::layer))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(CorsConfig::permissive().to_cors_layer());

    if let Some(max_requests) = args.rate_limit {
        let window = Duration::from_secs(args.rate_limit_window_secs);
        app = app.layer(RateLimiter::new(max_requests, window).into_layer());
    }

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("bind {}", args.bind))?;
    info!(bind = %args.bind, "atlas-daemon listening");

    axum::serve(listener, app).await.context("serve")
}
