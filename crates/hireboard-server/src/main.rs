//! Hireboard Server — application entry point.

use hireboard_access::{AccessConfig, RoleResolver};
use hireboard_db::repository::SurrealMembershipRepository;
use hireboard_db::{DbConfig, DbManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("hireboard=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Hireboard server...");

    let db_config = DbConfig::from_env();
    let db = match DbManager::connect(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to SurrealDB");
            return;
        }
    };

    if let Err(e) = hireboard_db::run_migrations(db.client()).await {
        tracing::error!(error = %e, "migrations failed");
        return;
    }

    let staff_write_enabled = std::env::var("HIREBOARD_STAFF_WRITE_ENABLED")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let _access_config = AccessConfig {
        staff_write_enabled,
    };
    let _resolver = RoleResolver::new(SurrealMembershipRepository::new(db.client().clone()));

    // TODO: mount the HTTP route handlers once the web layer lands;
    // they consume RequestContext::resolve + authorize before every
    // data operation.

    tracing::info!("Hireboard server stopped.");
}
