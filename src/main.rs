use sales_viz::{load_dataset, resolve_data_path, router, AppState};
use sales_viz::models::PRICE_INCREASE_DATE;
use std::{env, net::SocketAddr};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path();
    let records = load_dataset(&data_path).await;
    info!(
        "loaded {} sales records from {}",
        records.len(),
        data_path.display()
    );

    let state = AppState::new(records, PRICE_INCREASE_DATE);
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
