use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use seo_brief_generator::{
    config::Config,
    api::routes::create_router,
    AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;
    info!(backend = %config.backend_url, "relaying brief requests to backend");

    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(server_addr).await?;
    info!(%server_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
