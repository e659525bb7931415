pub(crate) const REPOSITORIES_QUERY: &str = include_str!("queries/repositories.graphql");
pub(crate) const REPOSITORY_REPORT_QUERY: &str =
    include_str!("queries/repository_report.graphql");

/// Timestamp layout GitHub accepts for both `GitTimestamp` and `DateTime`.
pub(crate) const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
