use thiserror::Error;

use crate::github::RemoteQueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    RepositoryListing,
    RepositoryReport,
}

/// The first failure of a run. Nothing collected before it is published.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("an error occurred during repositories listing")]
    RepositoryListing {
        #[source]
        source: RemoteQueryError,
    },

    #[error("an error occurred during report for {repository}")]
    RepositoryReport {
        repository: String,
        #[source]
        source: RemoteQueryError,
    },
}

impl RunError {
    pub fn phase(&self) -> Phase {
        match self {
            Self::RepositoryListing { .. } => Phase::RepositoryListing,
            Self::RepositoryReport { .. } => Phase::RepositoryReport,
        }
    }

    pub fn repository(&self) -> Option<&str> {
        match self {
            Self::RepositoryListing { .. } => None,
            Self::RepositoryReport { repository, .. } => Some(repository),
        }
    }
}
