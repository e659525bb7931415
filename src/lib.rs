//! Pull request activity across every repository of a GitHub organization.
//!
//! [`report::ActivityReport`] drives a run: it pages through the
//! organization's repositories, issues one GraphQL report query per
//! repository and sorts the pull requests it finds into merged, active and
//! stale buckets.

pub mod formatter;
pub mod github;
mod log_sink;
pub mod report;

pub use log_sink::LogSink;
