use super::fetch::{Page, PagedQuery, fetch_first_page, traverse};
use super::queries::REPOSITORIES_QUERY;
use super::types::RepositoriesData;
use crate::github::client::QueryClient;
use crate::github::error::RemoteQueryError;
use crate::log_sink::LogSink;

pub(super) const FULL_PAGE_SIZE: u32 = 50;
pub(super) const SUBSET_PAGE_SIZE: u32 = 10;

struct RepositoriesQuery<'a> {
    organization: &'a str,
    size: u32,
}

impl PagedQuery for RepositoriesQuery<'_> {
    type Node = String;
    type Response = RepositoriesData;

    const NAME: &'static str = "repositories";

    fn query(&self) -> &'static str {
        REPOSITORIES_QUERY
    }

    fn variables(&self, cursor: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "organization": self.organization,
            "size": self.size,
            "cursor": cursor,
        })
    }

    fn into_page(response: RepositoriesData) -> Page<String> {
        let connection = response.organization.repositories;
        let page_info = connection.page_info.clone();
        Page {
            nodes: connection.into_nodes().map(|node| node.name).collect(),
            page_info,
            rate_limit: response.rate_limit,
        }
    }
}

/// Names of the repositories owned by `organization`, in the order GitHub
/// lists them.
///
/// Without `exhaustive` only one small page is requested, which keeps dry
/// runs cheap on large organizations.
pub(crate) async fn list_repositories<C: QueryClient>(
    client: &C,
    organization: &str,
    exhaustive: bool,
    log: &LogSink,
) -> Result<Vec<String>, RemoteQueryError> {
    let repositories = if exhaustive {
        let query = RepositoriesQuery {
            organization,
            size: FULL_PAGE_SIZE,
        };
        traverse(client, &query, log).await?
    } else {
        let query = RepositoriesQuery {
            organization,
            size: SUBSET_PAGE_SIZE,
        };
        fetch_first_page(client, &query, log).await?
    };

    tracing::debug!(organization, exhaustive, count = repositories.len(), "listed repositories");
    Ok(repositories)
}
