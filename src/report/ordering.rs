//! Presentation orderings over pull requests. Both sorts are stable.

use super::model::{PullRequest, parse_datetime};

/// Most active first.
pub fn sort_by_activity(prs: &mut [PullRequest]) {
    prs.sort_by(|a, b| b.activity_event_count.cmp(&a.activity_event_count));
}

/// Oldest first. Unparseable `created_at` values sort before everything else.
pub fn sort_by_age(prs: &mut [PullRequest]) {
    prs.sort_by_cached_key(|pr| parse_datetime(&pr.created_at));
}
