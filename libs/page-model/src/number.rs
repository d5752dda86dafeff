use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN: i64 = 0;
pub const DEFAULT_MAX: i64 = 999_999;

/// Bounds of a numeric input. Inputs without explicit attributes fall
/// back to `DEFAULT_MIN..=DEFAULT_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberBounds {
    pub min: i64,
    pub max: i64,
}

impl Default for NumberBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

impl NumberBounds {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            min: min.unwrap_or(DEFAULT_MIN),
            max: max.unwrap_or(DEFAULT_MAX),
        }
    }

    /// Returns the replacement text when `raw` is a number outside the
    /// bounds. Text in range, empty text and non-numeric text are left
    /// alone.
    pub fn clamp_input(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let value: f64 = trimmed.parse().ok().filter(|v: &f64| v.is_finite())?;

        if value < self.min as f64 {
            Some(self.min.to_string())
        } else if value > self.max as f64 {
            Some(self.max.to_string())
        } else {
            None
        }
    }

    /// Applies [`clamp_input`](Self::clamp_input), returning the text the
    /// input should display afterwards.
    pub fn apply(&self, raw: &str) -> String {
        self.clamp_input(raw).unwrap_or_else(|| raw.to_string())
    }

    /// Numeric inputs never change value on scroll.
    pub fn accepts_wheel(&self) -> bool {
        false
    }
}
