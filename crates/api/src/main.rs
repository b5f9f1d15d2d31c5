use anyhow::Context;
use chrono::Duration;

use avatarforge_auth::AuthConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    avatarforge_observability::init();

    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let ttl_secs: i64 = std::env::var("TOKEN_TTL_SECS")
        .ok()
        .map(|v| v.parse())
        .transpose()
        .context("TOKEN_TTL_SECS must be an integer number of seconds")?
        .unwrap_or(86_400);

    let config = AuthConfig::new(secret, Duration::seconds(ttl_secs));
    let app = avatarforge_api::app::build_app(&config);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
