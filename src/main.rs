//! OpenSASE Storefront - view-model service for the storefront and admin pages

use anyhow::Result;
use opensase_storefront::{config::AppConfig, http, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    telemetry::init(config.log_format);

    let addr = config.bind_address();
    let app = http::router(http::AppState::new(config.clone()));

    tracing::info!(
        %addr,
        default_currency = %config.default_currency,
        max_line_quantity = config.max_line_quantity,
        "OpenSASE Storefront listening"
    );
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, app).await?;
    Ok(())
}
