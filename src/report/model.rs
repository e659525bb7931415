use crate::github::RateLimitSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestState {
    Open,
    Merged,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct User {
    pub login: String,
}

/// A pull request reduced to the fields the report needs.
///
/// `repository` is not part of the remote payload. It is filled in by the
/// fetcher before the record is handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub repository: String,
    pub created_at: String,
    pub merged_at: Option<String>,
    pub state: PullRequestState,
    pub participants: Vec<User>,
    pub participant_count: u64,
    /// Timeline events recorded after the report cutoff.
    pub activity_event_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub oid: String,
    pub committed_date: String,
    pub author_name: String,
    pub message: String,
}

/// Commits reachable from one branch head since the cutoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchHistory {
    pub name: String,
    pub commits: Vec<CommitRecord>,
}

/// Everything one combined report query returned for a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRepoReport {
    pub repository: String,
    pub merged: Vec<PullRequest>,
    pub open: Vec<PullRequest>,
    pub branches: Vec<BranchHistory>,
    pub rate_limit: RateLimitSnapshot,
}

/// The three buckets a run fills in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportResult {
    pub merged_prs: Vec<PullRequest>,
    pub open_prs_with_activity: Vec<PullRequest>,
    pub open_prs_without_activity: Vec<PullRequest>,
}

impl ReportResult {
    pub fn is_empty(&self) -> bool {
        self.merged_prs.is_empty()
            && self.open_prs_with_activity.is_empty()
            && self.open_prs_without_activity.is_empty()
    }
}

/// Lenient RFC 3339 parse; `None` on anything GitHub would not produce.
pub(crate) fn parse_datetime(value: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&chrono::Utc))
}
