//! Process-wide Postgres pool.

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::config::DatabaseConfig;

/// Build the pool without touching the network; connections are opened on
/// first use and returned to the pool after each query.
pub fn connect_lazy(config: &DatabaseConfig) -> PgPool {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database);

    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        max_connections = config.max_connections,
        "configured lazy postgres pool"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy_with(options)
}
