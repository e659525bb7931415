use serde::de::DeserializeOwned;

use super::types::*;
use crate::github::client::QueryClient;
use crate::github::error::{RemoteQueryError, TransportError};
use crate::github::rate_limit::{RateLimitSnapshot, observe};
use crate::log_sink::LogSink;

/// One page of a paginated connection, already mapped to domain nodes.
#[derive(Debug)]
pub(crate) struct Page<T> {
    pub nodes: Vec<T>,
    pub page_info: PageInfo,
    pub rate_limit: RateLimitSnapshot,
}

impl<T> Page<T> {
    /// Cursor for the following page, `None` on the last one.
    fn next_cursor(&self) -> Result<Option<String>, TransportError> {
        if !self.page_info.has_next_page {
            return Ok(None);
        }
        match self.page_info.end_cursor.as_deref() {
            Some(cursor) if !cursor.is_empty() => Ok(Some(cursor.to_string())),
            _ => Err(TransportError::MissingCursor),
        }
    }
}

/// A query over a single paginated connection.
pub(crate) trait PagedQuery {
    type Node;
    type Response: DeserializeOwned;

    /// Name used in logs and error context.
    const NAME: &'static str;

    fn query(&self) -> &'static str;

    fn variables(&self, cursor: Option<&str>) -> serde_json::Value;

    fn into_page(response: Self::Response) -> Page<Self::Node>;
}

pub(crate) fn graphql_data<T>(resp: GraphqlResponse<T>) -> Result<T, TransportError> {
    if let Some(errors) = resp.errors
        && !errors.is_empty()
    {
        return Err(TransportError::GraphQl {
            messages: errors.into_iter().map(|e| e.message).collect(),
        });
    }
    resp.data.ok_or(TransportError::MissingData)
}

pub(crate) fn decode_response<T>(
    resp: GraphqlResponse<serde_json::Value>,
) -> Result<T, TransportError>
where
    T: DeserializeOwned,
{
    let data = graphql_data(resp)?;
    if data.is_null() {
        return Err(TransportError::MissingData);
    }
    serde_json::from_value(data).map_err(|err| TransportError::Decode {
        message: err.to_string(),
    })
}

async fn fetch_page<C, Q>(
    client: &C,
    query: &Q,
    cursor: Option<&str>,
    log: &LogSink,
) -> Result<Page<Q::Node>, TransportError>
where
    C: QueryClient,
    Q: PagedQuery,
{
    tracing::debug!(query = Q::NAME, cursor, "fetching page");
    let resp: Q::Response = client
        .execute(query.query(), query.variables(cursor))
        .await?;
    let page = Q::into_page(resp);
    observe(&page.rate_limit, log);
    Ok(page)
}

/// Follows `endCursor` until the connection reports no further page.
///
/// Nodes are returned in remote order. The first failing page aborts the
/// traversal and whatever was collected so far is dropped.
pub(crate) async fn traverse<C, Q>(
    client: &C,
    query: &Q,
    log: &LogSink,
) -> Result<Vec<Q::Node>, RemoteQueryError>
where
    C: QueryClient,
    Q: PagedQuery,
{
    let mut cursor: Option<String> = None;
    let mut page_number = 0;
    let mut out = Vec::new();

    loop {
        page_number += 1;
        let step = async {
            let page = fetch_page(client, query, cursor.as_deref(), log).await?;
            let next = page.next_cursor()?;
            Ok::<_, TransportError>((page.nodes, next))
        };
        let (nodes, next) = step.await.map_err(|source| RemoteQueryError::Page {
            query: Q::NAME,
            page: page_number,
            cursor: cursor.clone(),
            source,
        })?;

        out.extend(nodes);
        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    tracing::debug!(query = Q::NAME, pages = page_number, nodes = out.len(), "traversal done");
    Ok(out)
}

/// Issues a single request and ignores any further pages.
pub(crate) async fn fetch_first_page<C, Q>(
    client: &C,
    query: &Q,
    log: &LogSink,
) -> Result<Vec<Q::Node>, RemoteQueryError>
where
    C: QueryClient,
    Q: PagedQuery,
{
    let page = fetch_page(client, query, None, log)
        .await
        .map_err(|source| RemoteQueryError::Page {
            query: Q::NAME,
            page: 1,
            cursor: None,
            source,
        })?;
    if page.page_info.has_next_page {
        tracing::debug!(query = Q::NAME, "more pages available, not following");
    }
    Ok(page.nodes)
}
