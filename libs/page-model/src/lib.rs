//! Widget models for the NEET PG Helper pages.
//!
//! This crate holds the synchronous, network-free state of the page
//! widgets: dependent selection controls, the shared notice overlay, the
//! rank form submission gate, numeric input clamping, table hover styles
//! and the theme palette. The async quota loading lives in
//! `neet-pg-course-predictor`, which drives these models.

pub mod form;
pub mod hover;
pub mod notice;
pub mod number;
pub mod selection;
pub mod theme;

pub use form::{
    gate_submission, FormField, RankForm, RankSubmission, SubmitDecision, ValidationError,
};
pub use hover::{HoverStyle, TableHover};
pub use notice::{ClickTarget, NoticeOverlay, NoticeSurface, NoticeView};
pub use number::NumberBounds;
pub use selection::{SelectOption, SelectionControl, SelectionError};
pub use theme::Theme;

/// Placeholder label of the quota dropdown.
pub const QUOTA_PLACEHOLDER: &str = "-- choose quota --";
/// Placeholder label of the course dropdown.
pub const COURSE_PLACEHOLDER: &str = "-- choose course --";
/// Placeholder label of the category dropdown.
pub const CATEGORY_PLACEHOLDER: &str = "-- choose category --";
