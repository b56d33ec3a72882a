use mimalloc::MiMalloc;
use restock::config::Config;
use restock::providers::GroqClient;
use restock::server::router::{RestockState, restock_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let groq_cfg = Arc::new(cfg.groq());

    info!(
        database_url = %cfg.basic.database_url,
        loglevel = %cfg.basic.loglevel,
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        access_key = if cfg.basic.access_key.is_some() { "<set>" } else { "<none>" },
        cors_allow_any_origin = cfg.basic.cors_allow_any_origin,
        "Basic config loaded"
    );
    info!(
        groq_api_url = %groq_cfg.api_url,
        groq_model = %groq_cfg.model,
        groq_api_key = if groq_cfg.api_key.is_some() { "<set>" } else { "<none>" },
        groq_proxy = %groq_cfg.proxy.as_ref().map_or("<none>", |u| u.as_str()),
        groq_enable_multiplexing = groq_cfg.enable_multiplexing,
        groq_retry_max_times = groq_cfg.retry_max_times,
        groq_history_context_limit = groq_cfg.history_context_limit,
        "Groq config (effective)"
    );
    if groq_cfg.api_key.is_none() {
        warn!("No Groq API key configured; chatWithGroq requests will fail.");
    }

    let store = restock::db::spawn(&cfg.basic.database_url).await;
    let completion = GroqClient::new(groq_cfg.clone());

    let state = RestockState::new(
        Arc::new(store),
        Arc::new(completion),
        groq_cfg.history_context_limit,
    )
    .with_access_key(cfg.basic.access_key.as_deref().map(Arc::from))
    .with_cors_allow_any_origin(cfg.basic.cors_allow_any_origin);
    let app = restock_router(state);

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
