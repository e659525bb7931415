//! In-memory `QueryClient` with scripted answers, plus payload builders.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::client::QueryClient;
use super::error::TransportError;
use super::graphql::{GraphqlResponse, decode_response};

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub query: String,
    pub variables: Value,
}

/// Answers queries from a queue of canned GraphQL envelopes.
///
/// Report queries (those binding a `repo` variable) are answered from a
/// per-repository table when one was registered, so answers do not depend
/// on call order.
#[derive(Debug, Default)]
pub(crate) struct ScriptedClient {
    queue: Mutex<VecDeque<Result<Value, TransportError>>>,
    by_repo: Mutex<HashMap<String, Result<Value, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, envelope: Value) -> Self {
        self.queue.lock().unwrap().push_back(Ok(envelope));
        self
    }

    pub(crate) fn fail(self, err: TransportError) -> Self {
        self.queue.lock().unwrap().push_back(Err(err));
        self
    }

    pub(crate) fn respond_for(self, repo: &str, envelope: Value) -> Self {
        self.by_repo
            .lock()
            .unwrap()
            .insert(repo.to_string(), Ok(envelope));
        self
    }

    pub(crate) fn fail_for(self, repo: &str, err: TransportError) -> Self {
        self.by_repo
            .lock()
            .unwrap()
            .insert(repo.to_string(), Err(err));
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next_answer(&self, variables: &Value) -> Result<Value, TransportError> {
        if let Some(repo) = variables.get("repo").and_then(Value::as_str)
            && let Some(answer) = self.by_repo.lock().unwrap().get(repo)
        {
            return answer.clone();
        }
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Http {
                    message: "no scripted response left".to_string(),
                })
            })
    }
}

impl QueryClient for ScriptedClient {
    async fn execute<T>(&self, query: &str, variables: Value) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        let answer = self.next_answer(&variables);
        self.calls.lock().unwrap().push(RecordedCall {
            query: query.to_string(),
            variables,
        });

        let envelope: GraphqlResponse<Value> =
            serde_json::from_value(answer?).map_err(|err| TransportError::Decode {
                message: err.to_string(),
            })?;
        decode_response(envelope)
    }
}

pub(crate) fn rate_limit_json(remaining: u32) -> Value {
    json!({
        "limit": 5000,
        "cost": 1,
        "remaining": remaining,
        "resetAt": "2025-01-01T01:00:00Z",
    })
}

pub(crate) fn repositories_page(names: &[&str], end_cursor: Option<&str>) -> Value {
    let nodes: Vec<Value> = names
        .iter()
        .map(|name| json!({ "name": name, "owner": { "login": "acme" } }))
        .collect();
    json!({
        "data": {
            "organization": {
                "repositories": {
                    "nodes": nodes,
                    "pageInfo": {
                        "hasNextPage": end_cursor.is_some(),
                        "endCursor": end_cursor,
                        "startCursor": null,
                        "hasPreviousPage": false,
                    },
                    "totalCount": names.len(),
                }
            },
            "rateLimit": rate_limit_json(4999),
        }
    })
}

pub(crate) fn merged_pr_json(number: u64, merged_at: &str) -> Value {
    json!({
        "number": number,
        "title": format!("Merged change {number}"),
        "createdAt": "2024-12-01T00:00:00Z",
        "mergedAt": merged_at,
        "state": "MERGED",
        "participants": { "nodes": [{ "login": "alice" }], "totalCount": 1 },
    })
}

pub(crate) fn open_pr_json(number: u64, created_at: &str, activity: u64) -> Value {
    json!({
        "number": number,
        "title": format!("Open change {number}"),
        "createdAt": created_at,
        "mergedAt": null,
        "state": "OPEN",
        "participants": { "nodes": [{ "login": "bob" }], "totalCount": 1 },
        "timelineItems": { "totalCount": activity },
    })
}

pub(crate) fn report_envelope(repo: &str, merged: Vec<Value>, open: Vec<Value>) -> Value {
    json!({
        "data": {
            "repository": {
                "name": repo,
                "mergedPR": {
                    "nodes": merged,
                    "pageInfo": { "hasNextPage": false, "endCursor": null },
                    "totalCount": merged.len(),
                },
                "openPR": {
                    "nodes": open,
                    "pageInfo": { "hasNextPage": false, "endCursor": null },
                    "totalCount": open.len(),
                },
                "refs": {
                    "nodes": [{
                        "name": "main",
                        "target": { "history": {
                            "nodes": [{
                                "oid": "0123abcd",
                                "committedDate": "2025-01-01T00:00:00Z",
                                "author": { "name": "Alice" },
                                "message": "Bump version",
                            }],
                            "pageInfo": { "hasNextPage": false, "endCursor": null },
                            "totalCount": 1,
                        }},
                    }],
                    "pageInfo": { "hasNextPage": false, "endCursor": null },
                    "totalCount": 1,
                },
            },
            "rateLimit": rate_limit_json(4900),
        }
    })
}
