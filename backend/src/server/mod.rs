//! Server construction and wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::{info, warn};

#[cfg(debug_assertions)]
use backend::inbound::http::graphql::graphiql;
use backend::inbound::graphql::{build_schema, state::GqlPorts};
use backend::inbound::http::graphql::graphql;
use backend::inbound::http::health::{live, ready, HealthState};
use backend::outbound::persistence::{
    run_pending_migrations, DbPool, DieselPostRepository, DieselTodoRepository,
    DieselUserRepository, PoolConfig,
};
use backend::Trace;

/// Bundle ports for the schema based on configuration.
///
/// Uses the database-backed repositories when a pool is available and the
/// shared in-memory fixture store otherwise.
fn build_ports(pool: Option<DbPool>) -> GqlPorts {
    match pool {
        Some(pool) => GqlPorts {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            posts: Arc::new(DieselPostRepository::new(pool.clone())),
            todos: Arc::new(DieselTodoRepository::new(pool)),
        },
        None => {
            warn!("DATABASE_URL is not set; serving from in-memory fixture repositories");
            GqlPorts::fixture()
        }
    }
}

/// Apply migrations and build the connection pool when a database is
/// configured.
async fn init_pool(config: &ServerConfig) -> std::io::Result<Option<DbPool>> {
    let Some(database_url) = config.database_url() else {
        return Ok(None);
    };

    let migration_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(Some(pool))
}

/// Run the HTTP server until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let pool = init_pool(&config).await?;
    let schema = web::Data::new(build_schema(build_ports(pool)));

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(schema.clone())
            .wrap(Trace)
            .service(graphql)
            .service(ready)
            .service(live);
        #[cfg(debug_assertions)]
        let app = app.service(graphiql);
        app
    })
    .bind(config.bind_addr())?;

    info!(addr = %config.bind_addr(), "GraphQL server listening");
    health_state.mark_ready();
    server.run().await
}
