use crate::github::RateLimitSnapshot;
use crate::report::{BranchHistory, CommitRecord, PullRequest, PullRequestState, User};

#[derive(Debug, serde::Deserialize)]
pub(crate) struct GraphqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
    pub start_cursor: Option<String>,
    pub has_previous_page: bool,
}

/// A GraphQL connection. Null nodes are kept as `None` and skipped by callers.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub total_count: u64,
}

impl<T> Connection<T> {
    pub(crate) fn into_nodes(self) -> impl Iterator<Item = T> {
        self.nodes.into_iter().flatten()
    }
}

#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct TotalCount {
    #[serde(rename = "totalCount", default)]
    pub total_count: u64,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepositoriesData {
    pub organization: OrganizationNode,
    pub rate_limit: RateLimitSnapshot,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct OrganizationNode {
    pub repositories: Connection<RepositoryNameNode>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RepositoryNameNode {
    pub name: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepositoryReportData {
    pub repository: RepositoryReportNode,
    pub rate_limit: RateLimitSnapshot,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RepositoryReportNode {
    pub name: String,
    #[serde(rename = "mergedPR")]
    pub merged_pr: Connection<PullRequestNode>,
    #[serde(rename = "openPR")]
    pub open_pr: Connection<PullRequestNode>,
    pub refs: Connection<RefNode>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestNode {
    pub number: u64,
    pub title: String,
    pub created_at: String,
    pub merged_at: Option<String>,
    pub state: PullRequestState,
    pub participants: Connection<User>,
    #[serde(default)]
    pub timeline_items: TotalCount,
}

impl PullRequestNode {
    pub(crate) fn into_pull_request(self, repository: &str) -> PullRequest {
        let participant_count = self.participants.total_count;
        PullRequest {
            number: self.number,
            title: self.title,
            repository: repository.to_string(),
            created_at: self.created_at,
            merged_at: self.merged_at.filter(|merged_at| !merged_at.is_empty()),
            state: self.state,
            participants: self.participants.into_nodes().collect(),
            participant_count,
            activity_event_count: self.timeline_items.total_count,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RefNode {
    pub name: String,
    #[serde(default)]
    pub target: Option<RefTarget>,
}

/// Non-commit targets (annotated tags) come back as an empty object.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct RefTarget {
    #[serde(default)]
    pub history: Option<Connection<CommitNode>>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommitNode {
    pub oid: String,
    pub committed_date: String,
    pub author: Option<GitActor>,
    pub message: String,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct GitActor {
    pub name: Option<String>,
}

impl RefNode {
    pub(crate) fn into_branch_history(self) -> BranchHistory {
        let commits = self
            .target
            .and_then(|target| target.history)
            .map(|history| {
                history
                    .into_nodes()
                    .map(|commit| CommitRecord {
                        oid: commit.oid,
                        committed_date: commit.committed_date,
                        author_name: commit
                            .author
                            .and_then(|author| author.name)
                            .unwrap_or_default(),
                        message: commit.message,
                    })
                    .collect()
            })
            .unwrap_or_default();

        BranchHistory {
            name: self.name,
            commits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_info_tolerates_missing_fields() {
        let info: PageInfo = serde_json::from_value(json!({ "hasNextPage": true })).unwrap();
        assert!(info.has_next_page);
        assert_eq!(info.end_cursor, None);
        assert!(!info.has_previous_page);
    }

    #[test]
    fn connection_skips_null_nodes() {
        let connection: Connection<RepositoryNameNode> = serde_json::from_value(json!({
            "nodes": [{ "name": "a" }, null, { "name": "b" }],
            "pageInfo": { "hasNextPage": false, "endCursor": null },
            "totalCount": 3,
        }))
        .unwrap();

        let names: Vec<_> = connection.into_nodes().map(|node| node.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn pull_request_node_maps_counts_and_stamps_repository() {
        let node: PullRequestNode = serde_json::from_value(json!({
            "number": 7,
            "title": "Fix flaky test",
            "createdAt": "2025-01-01T00:00:00Z",
            "mergedAt": null,
            "state": "OPEN",
            "participants": {
                "nodes": [{ "login": "alice" }, { "login": "bob" }],
                "totalCount": 5,
            },
            "timelineItems": { "totalCount": 3 },
        }))
        .unwrap();

        let pr = node.into_pull_request("widgets");

        assert_eq!(pr.repository, "widgets");
        assert_eq!(pr.participant_count, 5);
        assert_eq!(pr.participants.len(), 2);
        assert_eq!(pr.activity_event_count, 3);
        assert_eq!(pr.merged_at, None);
    }

    #[test]
    fn empty_merged_at_is_treated_as_absent() {
        let node: PullRequestNode = serde_json::from_value(json!({
            "number": 1,
            "title": "t",
            "createdAt": "2025-01-01T00:00:00Z",
            "mergedAt": "",
            "state": "MERGED",
            "participants": { "nodes": [], "totalCount": 0 },
        }))
        .unwrap();

        let pr = node.into_pull_request("r");
        assert_eq!(pr.merged_at, None);
        assert_eq!(pr.activity_event_count, 0);
    }

    #[test]
    fn tag_refs_have_no_history() {
        let node: RefNode = serde_json::from_value(json!({ "name": "v1", "target": {} })).unwrap();
        let branch = node.into_branch_history();
        assert_eq!(branch.name, "v1");
        assert!(branch.commits.is_empty());
    }

    #[test]
    fn commit_without_author_name_gets_empty_author() {
        let node: RefNode = serde_json::from_value(json!({
            "name": "main",
            "target": { "history": {
                "nodes": [{
                    "oid": "abc123",
                    "committedDate": "2025-01-01T00:00:00Z",
                    "author": { "name": null },
                    "message": "Initial commit",
                }],
                "totalCount": 1,
            }},
        }))
        .unwrap();

        let branch = node.into_branch_history();
        assert_eq!(branch.commits.len(), 1);
        assert_eq!(branch.commits[0].author_name, "");
        assert_eq!(branch.commits[0].oid, "abc123");
    }
}
