//! Error types surfaced by the GraphQL layer.

use thiserror::Error;

/// Failure reported by a [`QueryClient`](super::QueryClient).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The HTTP request failed or GitHub answered with a non-success status.
    #[error("GraphQL request failed: {message}")]
    Http { message: String },

    /// GitHub answered but reported query errors.
    #[error("GraphQL returned errors: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    /// The response carried neither data nor errors.
    #[error("GraphQL response missing data")]
    MissingData,

    /// The response data did not match the expected shape.
    #[error("GraphQL response could not be decoded: {message}")]
    Decode { message: String },

    /// A page announced a successor without giving a cursor for it.
    #[error("page reports a next page but no end cursor")]
    MissingCursor,
}

/// A transport failure annotated with what was in flight.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteQueryError {
    /// A page of a paginated traversal failed.
    #[error("{query} query failed on page {page}{}", cursor_suffix(.cursor))]
    Page {
        query: &'static str,
        page: usize,
        cursor: Option<String>,
        #[source]
        source: TransportError,
    },

    /// The combined report query for a single repository failed.
    #[error("report query for {repository} failed")]
    Report {
        repository: String,
        #[source]
        source: TransportError,
    },
}

impl RemoteQueryError {
    /// The underlying transport failure.
    pub fn transport(&self) -> &TransportError {
        match self {
            Self::Page { source, .. } | Self::Report { source, .. } => source,
        }
    }
}

fn cursor_suffix(cursor: &Option<String>) -> String {
    cursor
        .as_deref()
        .map(|cursor| format!(" (after {cursor})"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn graphql_errors_are_joined() {
        let err = TransportError::GraphQl {
            messages: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(err.to_string(), "GraphQL returned errors: first; second");
    }

    #[test]
    fn page_error_mentions_cursor_when_present() {
        let err = RemoteQueryError::Page {
            query: "repositories",
            page: 2,
            cursor: Some("c1".to_string()),
            source: TransportError::MissingData,
        };
        assert_eq!(err.to_string(), "repositories query failed on page 2 (after c1)");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("GraphQL response missing data")
        );

        let first = RemoteQueryError::Page {
            query: "repositories",
            page: 1,
            cursor: None,
            source: TransportError::MissingData,
        };
        assert_eq!(first.to_string(), "repositories query failed on page 1");
        assert_eq!(first.transport(), &TransportError::MissingData);
    }
}
