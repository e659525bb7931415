mod fetch;
mod queries;
mod repositories;
mod repository_report;
mod types;

pub use types::PageInfo;

pub(crate) use fetch::decode_response;
pub(crate) use repositories::list_repositories;
pub(crate) use repository_report::fetch_report;
pub(crate) use types::GraphqlResponse;
