use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;

const DEFAULT_COURSES: &[&str] = &[
    "MD ANAESTHESIOLOGY",
    "MD DERMATOLOGY",
    "MD GENERAL MEDICINE",
    "MD PAEDIATRICS",
    "MD RADIO DIAGNOSIS",
    "MS GENERAL SURGERY",
    "MS OBSTETRICS AND GYNAECOLOGY",
    "MS ORTHOPAEDICS",
];

const DEFAULT_CATEGORIES: &[&str] = &[
    "EWS", "EWS PwD", "OBC", "OBC PwD", "OPEN", "OPEN PwD", "SC", "SC PwD", "ST", "ST PwD",
];

#[derive(Debug, Clone)]
pub struct HelperConfig {
    /// Base URL of the NEET PG Helper web app serving `/get_quotas`
    pub base_url: String,

    /// Quota request timeout in seconds
    pub request_timeout_secs: u64,

    /// Courses offered in the course dropdown
    pub courses: Vec<String>,

    /// Categories offered in the category dropdown
    pub categories: Vec<String>,

    /// Log level
    pub log_level: String,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 10,
            courses: DEFAULT_COURSES.iter().map(|c| c.to_string()).collect(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            log_level: "info".to_string(),
        }
    }
}

impl HelperConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("HELPER_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(timeout) = env::var("HELPER_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout
                .parse()
                .context("HELPER_REQUEST_TIMEOUT_SECS must be a positive integer")?;
        }
        if let Ok(courses) = env::var("HELPER_COURSES") {
            config.courses = parse_list(&courses);
        }
        if let Ok(categories) = env::var("HELPER_CATEGORIES") {
            config.categories = parse_list(&categories);
        }
        if let Ok(level) = env::var("LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .with_context(|| format!("HELPER_BASE_URL is not a valid URL: {}", self.base_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("HELPER_BASE_URL must use http or https, got {}", url.scheme());
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("HELPER_REQUEST_TIMEOUT_SECS must be greater than 0");
        }

        if self.courses.is_empty() {
            anyhow::bail!("HELPER_COURSES must list at least one course");
        }

        if self.categories.is_empty() {
            anyhow::bail!("HELPER_CATEGORIES must list at least one category");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
