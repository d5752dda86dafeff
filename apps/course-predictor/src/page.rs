use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use neet_pg_page_model::{
    gate_submission, ClickTarget, FormField, HoverStyle, NoticeOverlay, NumberBounds, RankForm,
    SelectionControl, SelectionError, SubmitDecision, TableHover, Theme,
};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info};

use crate::loader::{lock, LoadOutcome, QuotaLoader};
use crate::quota::QuotaSource;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("invalid {} selection: {source}", .field.as_str())]
    Selection {
        field: FormField,
        #[source]
        source: SelectionError,
    },

    #[error("page must be mounted inside a tokio runtime")]
    NoRuntime,

    #[error("page has been disposed")]
    Disposed,
}

/// Server-defined choices rendered into the course and category dropdowns.
#[derive(Debug, Clone, Default)]
pub struct PageCatalog {
    pub courses: Vec<String>,
    pub categories: Vec<String>,
}

pub struct CoursePredictorPage;

impl CoursePredictorPage {
    /// Wires the course predictor widgets together and returns the handle
    /// through which events reach them. Dropping the handle disposes it.
    pub fn mount<S: QuotaSource>(
        source: S,
        catalog: PageCatalog,
        notice: Arc<NoticeOverlay>,
    ) -> Result<PageHandle<S>, PageError> {
        let runtime = Handle::try_current().map_err(|_| PageError::NoRuntime)?;

        let quotas = Arc::new(Mutex::new(SelectionControl::quota()));
        let loader = QuotaLoader::new(source, quotas, notice.clone());

        info!(
            courses = catalog.courses.len(),
            categories = catalog.categories.len(),
            "course predictor page mounted"
        );

        Ok(PageHandle {
            runtime,
            loader: Arc::new(loader),
            notice,
            courses: Mutex::new(SelectionControl::with_values(
                neet_pg_page_model::COURSE_PLACEHOLDER,
                catalog.courses,
            )),
            categories: Mutex::new(SelectionControl::with_values(
                neet_pg_page_model::CATEGORY_PLACEHOLDER,
                catalog.categories,
            )),
            rank: Mutex::new(String::new()),
            rank_bounds: NumberBounds::default(),
            results: Mutex::new(TableHover::default()),
            theme: Theme::default(),
            pending: Mutex::new(Vec::new()),
            disposed: AtomicBool::new(false),
        })
    }
}

pub struct PageHandle<S> {
    runtime: Handle,
    loader: Arc<QuotaLoader<S>>,
    notice: Arc<NoticeOverlay>,
    courses: Mutex<SelectionControl>,
    categories: Mutex<SelectionControl>,
    rank: Mutex<String>,
    rank_bounds: NumberBounds,
    results: Mutex<TableHover>,
    theme: Theme,
    pending: Mutex<Vec<AbortHandle>>,
    disposed: AtomicBool,
}

impl<S: QuotaSource> PageHandle<S> {
    /// Course dropdown changed. The quota list is reloaded in the
    /// background; the returned handle resolves once it has been applied
    /// or dropped.
    pub fn select_course(&self, course: &str) -> Result<JoinHandle<LoadOutcome>, PageError> {
        self.ensure_mounted()?;
        lock(&self.courses)
            .select(course)
            .map_err(|source| PageError::Selection {
                field: FormField::Course,
                source,
            })?;

        let ticket = self.loader.begin(course);
        let loader = Arc::clone(&self.loader);
        let task = self
            .runtime
            .spawn(async move { loader.complete(ticket).await });

        let mut pending = lock(&self.pending);
        pending.retain(|handle| !handle.is_finished());
        pending.push(task.abort_handle());
        Ok(task)
    }

    pub fn select_quota(&self, quota: &str) -> Result<(), PageError> {
        self.ensure_mounted()?;
        lock(self.loader.control_mutex())
            .select(quota)
            .map_err(|source| PageError::Selection {
                field: FormField::Quota,
                source,
            })
    }

    pub fn select_category(&self, category: &str) -> Result<(), PageError> {
        self.ensure_mounted()?;
        lock(&self.categories)
            .select(category)
            .map_err(|source| PageError::Selection {
                field: FormField::Category,
                source,
            })
    }

    /// Rank input changed; out-of-range numbers are clamped. Returns the
    /// text the input now shows.
    pub fn input_rank(&self, raw: &str) -> Result<String, PageError> {
        self.ensure_mounted()?;
        let shown = self.rank_bounds.apply(raw);
        if shown != raw {
            debug!(raw, shown = %shown, "rank input clamped");
        }
        *lock(&self.rank) = shown.clone();
        Ok(shown)
    }

    /// Current form values as they would be submitted.
    pub fn form(&self) -> RankForm {
        RankForm {
            course: lock(&self.courses).value().to_string(),
            quota: lock(self.loader.control_mutex()).value().to_string(),
            category: lock(&self.categories).value().to_string(),
            rank: lock(&self.rank).clone(),
        }
    }

    pub fn submit(&self) -> Result<SubmitDecision, PageError> {
        self.ensure_mounted()?;
        Ok(gate_submission(&self.form(), self.notice.as_ref()))
    }

    /// Quota values currently offered, placeholder excluded.
    pub fn quota_options(&self) -> Vec<String> {
        lock(self.loader.control_mutex())
            .values()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn quota_control(&self) -> SelectionControl {
        self.loader.snapshot()
    }

    /// Pointer entered (`true`) or left the results table.
    pub fn hover_results(&self, inside: bool) -> HoverStyle {
        let mut table = lock(&self.results);
        if inside {
            table.enter()
        } else {
            table.leave()
        }
    }

    pub fn results_hovered(&self) -> bool {
        lock(&self.results).is_hovered()
    }

    /// Palette of the page as a `:root` block of CSS custom properties.
    pub fn stylesheet(&self) -> String {
        self.theme.to_css_variables()
    }

    pub fn notice(&self) -> Arc<NoticeOverlay> {
        Arc::clone(&self.notice)
    }

    pub fn click_notice(&self, target: ClickTarget) -> bool {
        self.notice.click(target)
    }

    pub fn loader(&self) -> &QuotaLoader<S> {
        &self.loader
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn ensure_mounted(&self) -> Result<(), PageError> {
        if self.is_disposed() {
            Err(PageError::Disposed)
        } else {
            Ok(())
        }
    }
}

impl<S> PageHandle<S> {
    /// Detaches the page: in-flight quota loads are aborted and further
    /// events are rejected.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        let pending = std::mem::take(&mut *lock(&self.pending));
        let aborted = pending.iter().filter(|h| !h.is_finished()).count();
        for handle in pending {
            handle.abort();
        }
        info!(aborted, "course predictor page disposed");
    }
}

impl<S> Drop for PageHandle<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
