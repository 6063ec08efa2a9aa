use std::time::Duration;

use tracing::info;

use chitfund_api::config::ApiConfig;
use chitfund_api::infra::store::Store;
use chitfund_api::router::build_router;
use chitfund_api::state::AppState;

#[tokio::main]
async fn main() {
    chitfund_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let store = Store::connect(
        config.database_url.as_deref(),
        Duration::from_secs(config.db_connect_timeout_secs),
    )
    .await;

    let state = AppState::new(store);
    let router = build_router(state);

    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("chitfund api listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
