use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::notice::NoticeSurface;

/// Fields checked by the submission gate, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Course,
    Quota,
    Category,
    Rank,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Course,
        FormField::Quota,
        FormField::Category,
        FormField::Rank,
    ];

    /// Name shown to the user when the field is missing.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Course => "course",
            FormField::Quota => "quota",
            FormField::Category => "category",
            FormField::Rank => "valid rank",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill: {}", .missing.iter().map(FormField::as_str).collect::<Vec<_>>().join(", "))]
pub struct ValidationError {
    pub missing: Vec<FormField>,
}

/// Raw values of the course predictor form, as typed or selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankForm {
    pub course: String,
    pub quota: String,
    pub category: String,
    pub rank: String,
}

/// A form that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankSubmission {
    pub course: String,
    pub quota: String,
    pub category: String,
    pub rank: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed(RankSubmission),
    Cancelled(ValidationError),
}

impl SubmitDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, SubmitDecision::Proceed(_))
    }
}

impl RankForm {
    pub fn new(
        course: impl Into<String>,
        quota: impl Into<String>,
        category: impl Into<String>,
        rank: impl Into<String>,
    ) -> Self {
        Self {
            course: course.into(),
            quota: quota.into(),
            category: category.into(),
            rank: rank.into(),
        }
    }

    pub fn validate(&self) -> Result<RankSubmission, ValidationError> {
        let rank = parse_rank(&self.rank);
        let missing: Vec<FormField> = FormField::ALL
            .into_iter()
            .filter(|field| match field {
                FormField::Course => self.course.is_empty(),
                FormField::Quota => self.quota.is_empty(),
                FormField::Category => self.category.is_empty(),
                FormField::Rank => rank.is_none(),
            })
            .collect();

        match rank {
            Some(rank) if missing.is_empty() => Ok(RankSubmission {
                course: self.course.clone(),
                quota: self.quota.clone(),
                category: self.category.clone(),
                rank,
            }),
            _ => Err(ValidationError { missing }),
        }
    }
}

/// A rank is a positive whole number; surrounding whitespace is ignored.
fn parse_rank(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|rank| *rank > 0)
}

/// Runs the submission gate: lets a valid form through untouched, or
/// cancels it and lists the offending fields on the notice surface.
pub fn gate_submission(form: &RankForm, notice: &dyn NoticeSurface) -> SubmitDecision {
    match form.validate() {
        Ok(submission) => {
            info!(
                course = %submission.course,
                quota = %submission.quota,
                category = %submission.category,
                rank = submission.rank,
                "rank form submitted"
            );
            SubmitDecision::Proceed(submission)
        }
        Err(err) => {
            debug!(missing = ?err.missing, "rank form submission cancelled");
            notice.notify(&err.to_string());
            SubmitDecision::Cancelled(err)
        }
    }
}
