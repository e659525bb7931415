//! Organization-wide activity report.
//!
//! A run lists the organization's repositories, fetches one bounded report
//! per repository and classifies the pull requests into three buckets. The
//! buckets only become visible once every repository has been processed.

mod classify;
mod error;
mod model;
mod ordering;

use futures::{StreamExt, TryStreamExt};

use crate::github::{QueryClient, fetch_report, list_repositories};
use crate::log_sink::LogSink;

pub use error::{Phase, RunError};
pub use model::{
    BranchHistory, CommitRecord, PullRequest, PullRequestState, RawRepoReport, ReportResult, User,
};
pub use ordering::{sort_by_activity, sort_by_age};

pub(crate) use classify::classify;
pub(crate) use model::parse_datetime;

/// Which repositories a run covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepositoryScope {
    #[default]
    All,
    /// Only the first small page of repositories.
    Subset,
}

#[derive(Debug)]
pub struct ActivityReport {
    pub organization: String,
    pub window_days: u32,
    /// Set when a run completes.
    pub generated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub result: ReportResult,
    scope: RepositoryScope,
    concurrency: usize,
    log: LogSink,
}

impl ActivityReport {
    /// Creates an empty report for `organization` over the last `window_days`.
    ///
    /// No credentials are held here. The token goes into the [`QueryClient`]
    /// (for instance [`OctocrabClient::new`](crate::github::OctocrabClient::new)),
    /// which is then handed to [`run`](Self::run).
    pub fn new(organization: impl Into<String>, window_days: u32) -> Self {
        Self {
            organization: organization.into(),
            window_days,
            generated_at: None,
            result: ReportResult::default(),
            scope: RepositoryScope::default(),
            concurrency: 1,
            log: LogSink::default(),
        }
    }

    pub fn with_log(mut self, log: LogSink) -> Self {
        self.log = log;
        self
    }

    pub fn with_scope(mut self, scope: RepositoryScope) -> Self {
        self.scope = scope;
        self
    }

    /// Maximum number of repository reports fetched at once.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Start of the reporting window.
    ///
    /// A window reaching back past the Unix epoch is clamped to it, so an
    /// oversized `window_days` covers the whole history instead of overflowing.
    pub fn since(&self, now: chrono::DateTime<chrono::Utc>) -> chrono::DateTime<chrono::Utc> {
        let epoch = chrono::DateTime::UNIX_EPOCH;
        chrono::TimeDelta::try_days(i64::from(self.window_days))
            .and_then(|window| now.checked_sub_signed(window))
            .map_or(epoch, |since| since.max(epoch))
    }

    pub async fn run<C: QueryClient>(&mut self, client: &C) -> Result<(), RunError> {
        self.run_at(client, chrono::Utc::now()).await
    }

    /// Runs the report as if the current time were `now`.
    ///
    /// Up to `concurrency` repository reports are in flight at once and are
    /// classified in listing order once all of them arrived. The first failing
    /// fetch aborts the run and drops every outstanding request. On error
    /// `result` and `generated_at` keep their previous values.
    pub async fn run_at<C: QueryClient>(
        &mut self,
        client: &C,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), RunError> {
        let since = self.since(now);
        let organization = self.organization.as_str();
        let log = &self.log;

        let repositories = list_repositories(
            client,
            organization,
            self.scope == RepositoryScope::All,
            log,
        )
        .await
        .map_err(|source| RunError::RepositoryListing { source })?;
        tracing::info!(
            organization,
            repositories = repositories.len(),
            since = %since,
            "collecting repository reports"
        );

        let mut fetched: Vec<(usize, String, RawRepoReport)> =
            futures::stream::iter(repositories.into_iter().enumerate())
                .map(move |(index, repository)| async move {
                    match fetch_report(client, organization, &repository, since, log).await {
                        Ok(raw) => Ok((index, repository, raw)),
                        Err(source) => Err(RunError::RepositoryReport { repository, source }),
                    }
                })
                .buffer_unordered(self.concurrency)
                .try_collect()
                .await?;
        fetched.sort_unstable_by_key(|(index, _, _)| *index);

        let mut result = ReportResult::default();
        for (_, repository, raw) in fetched {
            classify(raw, &repository, since, &mut result);
        }

        log.log(&format!("Nb merged pr:{}", result.merged_prs.len()));
        log.log(&format!(
            "Nb open pr with activity:{}",
            result.open_prs_with_activity.len()
        ));
        log.log(&format!(
            "Nb open pr without activity:{}",
            result.open_prs_without_activity.len()
        ));

        self.result = result;
        self.generated_at = Some(now);
        Ok(())
    }
}
