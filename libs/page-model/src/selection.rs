use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CATEGORY_PLACEHOLDER, COURSE_PLACEHOLDER, QUOTA_PLACEHOLDER};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option whose value doubles as its display label.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("the placeholder option cannot be removed")]
    PlaceholderRemoval,

    #[error("option index {index} out of range (control has {len} options)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown option value: {0}")]
    UnknownOption(String),

    #[error("option value cannot be empty")]
    EmptyValue,
}

/// A dropdown holding an ordered option list and at most one chosen value.
///
/// Option 0 is always the placeholder: empty value, fixed label. It is
/// never removed; only the options after it change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionControl {
    options: Vec<SelectOption>,
    selected: usize,
}

impl SelectionControl {
    pub fn new(placeholder_label: impl Into<String>) -> Self {
        Self {
            options: vec![SelectOption::new("", placeholder_label)],
            selected: 0,
        }
    }

    pub fn quota() -> Self {
        Self::new(QUOTA_PLACEHOLDER)
    }

    pub fn course() -> Self {
        Self::new(COURSE_PLACEHOLDER)
    }

    pub fn category() -> Self {
        Self::new(CATEGORY_PLACEHOLDER)
    }

    /// Builds a control pre-filled with plain options.
    pub fn with_values<I, S>(placeholder_label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut control = Self::new(placeholder_label);
        control.extend_values(values);
        control
    }

    pub fn placeholder(&self) -> &SelectOption {
        &self.options[0]
    }

    /// All options, placeholder first.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Values of the non-placeholder options, in order.
    pub fn values(&self) -> Vec<&str> {
        self.options[1..].iter().map(|o| o.value.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// True when only the placeholder remains.
    pub fn is_empty(&self) -> bool {
        self.options.len() == 1
    }

    /// Drops every option after the placeholder and selects the placeholder.
    pub fn reset(&mut self) {
        self.options.truncate(1);
        self.selected = 0;
    }

    pub fn append(&mut self, option: SelectOption) -> Result<(), SelectionError> {
        if option.is_placeholder() {
            return Err(SelectionError::EmptyValue);
        }
        self.options.push(option);
        Ok(())
    }

    /// Appends one plain option per value, preserving order. Empty values
    /// are skipped since they would collide with the placeholder.
    pub fn extend_values<I, S>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.options.len();
        self.options.extend(
            values
                .into_iter()
                .map(SelectOption::plain)
                .filter(|option| !option.is_placeholder()),
        );
        self.options.len() - before
    }

    pub fn remove(&mut self, index: usize) -> Result<SelectOption, SelectionError> {
        if index == 0 {
            return Err(SelectionError::PlaceholderRemoval);
        }
        if index >= self.options.len() {
            return Err(SelectionError::IndexOutOfRange {
                index,
                len: self.options.len(),
            });
        }

        let removed = self.options.remove(index);
        if self.selected == index {
            self.selected = 0;
        } else if self.selected > index {
            self.selected -= 1;
        }
        Ok(removed)
    }

    /// Selects the first option carrying `value`; the empty string selects
    /// the placeholder.
    pub fn select(&mut self, value: &str) -> Result<(), SelectionError> {
        match self.options.iter().position(|o| o.value == value) {
            Some(index) => {
                self.selected = index;
                Ok(())
            }
            None => Err(SelectionError::UnknownOption(value.to_string())),
        }
    }

    /// Currently chosen value; empty while the placeholder is selected.
    pub fn value(&self) -> &str {
        &self.options[self.selected].value
    }

    pub fn selected_option(&self) -> &SelectOption {
        &self.options[self.selected]
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}
