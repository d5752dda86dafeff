pub mod config;
pub mod loader;
pub mod page;
pub mod quota;

pub use config::HelperConfig;
pub use loader::{LoadOutcome, LoadTicket, QuotaLoader};
pub use page::{CoursePredictorPage, PageCatalog, PageError, PageHandle};
pub use quota::{FetchError, HttpQuotaSource, QuotaSource, FETCH_FAILURE_NOTICE};
