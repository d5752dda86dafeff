mod client;
mod error;

use std::future::Future;

pub use client::{HttpQuotaSource, QuotaListResponse};
pub use error::FetchError;

pub const QUOTAS_PATH: &str = "/get_quotas";
pub const COURSE_QUERY_PARAM: &str = "course";

/// Notice shown when the quota list cannot be loaded.
pub const FETCH_FAILURE_NOTICE: &str = "Could not load quotas. Please try again.";

/// Anything that can answer "which quotas does this course have".
pub trait QuotaSource: Send + Sync + 'static {
    /// Returns the quotas of `course` in the order the source lists them.
    fn fetch_quotas(
        &self,
        course: &str,
    ) -> impl Future<Output = Result<Vec<String>, FetchError>> + Send;
}
