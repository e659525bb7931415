mod auth;
mod client;
mod error;
mod graphql;
mod rate_limit;
#[cfg(test)]
pub(crate) mod test_support;

pub use client::{OctocrabClient, QueryClient};
pub use error::{RemoteQueryError, TransportError};
pub use graphql::PageInfo;
pub use rate_limit::RateLimitSnapshot;

pub use auth::{Token, TokenSource, fetch_token};
pub(crate) use graphql::{fetch_report, list_repositories};

pub mod prelude {
    pub use super::{OctocrabClient, QueryClient, fetch_token};
}
