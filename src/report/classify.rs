use super::model::{PullRequestState, RawRepoReport, ReportResult, parse_datetime};

/// Sorts one repository's pull requests into the report buckets.
///
/// Records are appended in the order the remote returned them. A merged PR
/// whose `merged_at` is missing or unparseable is left out rather than
/// treated as an error.
pub(crate) fn classify(
    raw: RawRepoReport,
    repository: &str,
    since: chrono::DateTime<chrono::Utc>,
    into: &mut ReportResult,
) {
    let recent_commits: usize = raw.branches.iter().map(|b| b.commits.len()).sum();
    tracing::debug!(
        repository,
        branches = raw.branches.len(),
        recent_commits,
        "classifying repository report"
    );

    for mut pr in raw.merged {
        pr.repository = repository.to_string();
        let merged_recently = pr
            .merged_at
            .as_deref()
            .and_then(parse_datetime)
            .is_some_and(|merged_at| merged_at > since);
        if pr.state == PullRequestState::Merged && merged_recently {
            into.merged_prs.push(pr);
        }
    }

    for mut pr in raw.open {
        pr.repository = repository.to_string();
        if pr.state != PullRequestState::Open {
            tracing::debug!(
                repository,
                number = pr.number,
                state = ?pr.state,
                "skipping non-open pull request"
            );
            continue;
        }
        if pr.activity_event_count > 0 {
            into.open_prs_with_activity.push(pr);
        } else {
            into.open_prs_without_activity.push(pr);
        }
    }
}
