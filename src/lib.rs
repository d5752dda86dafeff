//! Shared fixtures for the NEET PG Helper workflow tests.

pub mod test_support;

pub use neet_pg_course_predictor;
pub use neet_pg_page_model;

pub use test_support::{
    init_test_tracing, sample_catalog, QuotaGate, ScriptedQuotaSource, ScriptedResponse,
};
