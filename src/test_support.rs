use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use neet_pg_course_predictor::{FetchError, PageCatalog, QuotaSource};
use tokio::sync::Semaphore;
use tracing::debug;

/// Installs a test subscriber once per process; honours `RUST_LOG`.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A catalog resembling the counselling data.
pub fn sample_catalog() -> PageCatalog {
    PageCatalog {
        courses: [
            "MD GENERAL MEDICINE",
            "MD PAEDIATRICS",
            "MS GENERAL SURGERY",
            "MS ORTHOPAEDICS",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
        categories: ["EWS", "OBC", "OBC PwD", "OPEN", "SC", "ST"]
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    Quotas(Vec<String>),
    Fail(FetchError),
}

/// Holds a scripted response back until released.
#[derive(Debug, Clone)]
pub struct QuotaGate {
    permits: Arc<Semaphore>,
}

impl QuotaGate {
    fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(0)),
        }
    }

    /// Lets one pending (or future) request through.
    pub fn release(&self) {
        self.permits.add_permits(1);
    }
}

#[derive(Debug, Clone)]
struct Script {
    response: ScriptedResponse,
    gate: Option<QuotaGate>,
}

/// In-memory quota source with per-course responses, optional gates for
/// ordering tests, and a log of every course requested.
#[derive(Debug, Default)]
pub struct ScriptedQuotaSource {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedQuotaSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quotas(self, course: &str, quotas: &[&str]) -> Self {
        self.script(
            course,
            ScriptedResponse::Quotas(quotas.iter().map(|q| q.to_string()).collect()),
            None,
        );
        self
    }

    pub fn with_failure(self, course: &str, error: FetchError) -> Self {
        self.script(course, ScriptedResponse::Fail(error), None);
        self
    }

    /// Scripts `course` and returns the gate that must be released before
    /// its response is delivered.
    pub fn gated(&self, course: &str, response: ScriptedResponse) -> QuotaGate {
        let gate = QuotaGate::new();
        self.script(course, response, Some(gate.clone()));
        gate
    }

    fn script(&self, course: &str, response: ScriptedResponse, gate: Option<QuotaGate>) {
        self.scripts
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(course.to_string(), Script { response, gate });
    }

    /// Courses requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

impl QuotaSource for ScriptedQuotaSource {
    async fn fetch_quotas(&self, course: &str) -> Result<Vec<String>, FetchError> {
        self.calls
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(course.to_string());

        let script = self
            .scripts
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(course)
            .cloned();

        let Some(script) = script else {
            return Err(FetchError::Network(format!("no script for course {}", course)));
        };

        if let Some(gate) = script.gate {
            debug!(course, "scripted quota request waiting for release");
            let permit = gate
                .permits
                .acquire()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;
            permit.forget();
        }

        match script.response {
            ScriptedResponse::Quotas(quotas) => Ok(quotas),
            ScriptedResponse::Fail(error) => Err(error),
        }
    }
}
