//! Task Manager authentication server

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use taskmanager_auth::{
    create_app, mail, store, AuthConfig, AuthService, MemoryResetTokenStore, MemoryUserStore,
    PgResetTokenStore, PgUserStore, ResetTokenStore, ServerConfig, UserStore,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,taskmanager_auth=debug")),
        )
        .init();

    let config = AuthConfig::from_env()?;
    config.validate()?;
    let server = ServerConfig::from_env();

    let (users, reset_tokens): (Arc<dyn UserStore>, Arc<dyn ResetTokenStore>) =
        match &server.database_url {
            Some(url) => {
                let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
                store::run_migrations(&pool).await?;
                (
                    Arc::new(PgUserStore::new(pool.clone())),
                    Arc::new(PgResetTokenStore::new(pool)),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, accounts are kept in memory");
                (
                    Arc::new(MemoryUserStore::new()),
                    Arc::new(MemoryResetTokenStore::new()),
                )
            }
        };

    let notifier = mail::notifier_from_config(&config)?;
    let auth = Arc::new(AuthService::new(config, users, reset_tokens, notifier));
    let app = create_app(auth, &server.cors_origin)?;

    let listener = tokio::net::TcpListener::bind(&server.bind_addr).await?;
    tracing::info!(addr = %server.bind_addr, "Authentication server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
