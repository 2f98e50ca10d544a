//! HTTP server configuration object and helpers.

use std::env;
use std::net::SocketAddr;

/// Port the GraphQL endpoint is served on. Fixed by the browser apps.
pub const GRAPHQL_PORT: u16 = 4000;

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database_url: Option<String>,
}

impl ServerConfig {
    /// Construct a configuration from the process environment.
    ///
    /// `DATABASE_URL` selects the PostgreSQL database; when unset the
    /// server falls back to in-memory fixture repositories.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], GRAPHQL_PORT)),
            database_url: env::var("DATABASE_URL").ok(),
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the configured database URL, if any.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}
