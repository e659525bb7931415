use super::queries::{ISO_FORMAT, REPOSITORY_REPORT_QUERY};
use super::types::RepositoryReportData;
use crate::github::client::QueryClient;
use crate::github::error::RemoteQueryError;
use crate::github::rate_limit::observe;
use crate::log_sink::LogSink;
use crate::report::RawRepoReport;

pub(super) const REPORT_PAGE_SIZE: u32 = 50;

/// Fetches merged PRs, open PRs and branch histories of one repository in a
/// single request.
///
/// Each connection is capped at [`REPORT_PAGE_SIZE`] nodes and is not
/// paginated further.
pub(crate) async fn fetch_report<C: QueryClient>(
    client: &C,
    organization: &str,
    repository: &str,
    since: chrono::DateTime<chrono::Utc>,
    log: &LogSink,
) -> Result<RawRepoReport, RemoteQueryError> {
    let since = since.format(ISO_FORMAT).to_string();
    let variables = serde_json::json!({
        "organization": organization,
        "repo": repository,
        "commitsSince": since,
        "activitySince": since,
        "size": REPORT_PAGE_SIZE,
    });

    tracing::debug!(organization, repository, "fetching repository report");
    let data: RepositoryReportData = client
        .execute(REPOSITORY_REPORT_QUERY, variables)
        .await
        .map_err(|source| RemoteQueryError::Report {
            repository: repository.to_string(),
            source,
        })?;
    observe(&data.rate_limit, log);

    let node = data.repository;
    for (connection, truncated) in [
        ("merged pull requests", node.merged_pr.page_info.has_next_page),
        ("open pull requests", node.open_pr.page_info.has_next_page),
        ("branches", node.refs.page_info.has_next_page),
    ] {
        if truncated {
            tracing::debug!(repository, connection, limit = REPORT_PAGE_SIZE, "result truncated");
        }
    }

    Ok(RawRepoReport {
        repository: repository.to_string(),
        merged: node
            .merged_pr
            .into_nodes()
            .map(|pr| pr.into_pull_request(repository))
            .collect(),
        open: node
            .open_pr
            .into_nodes()
            .map(|pr| pr.into_pull_request(repository))
            .collect(),
        branches: node
            .refs
            .into_nodes()
            .map(|r| r.into_branch_history())
            .collect(),
        rate_limit: data.rate_limit,
    })
}
