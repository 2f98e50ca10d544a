//! Inbound adapters translating transports into domain calls.

pub mod graphql;
pub mod http;
