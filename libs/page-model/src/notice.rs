use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::debug;

/// The page's single user-visible message channel.
pub trait NoticeSurface: Send + Sync {
    fn notify(&self, message: &str);
}

/// Where a click on the overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dismiss ("OK") button.
    DismissButton,
    /// The dimmed backdrop outside the content box.
    Backdrop,
    /// Anywhere inside the content box other than the button.
    Content,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoticeView {
    pub visible: bool,
    pub message: String,
    /// Number of times the overlay has been shown.
    pub shown: u64,
}

/// Modal overlay with a text slot and a dismiss control.
#[derive(Debug, Default)]
pub struct NoticeOverlay {
    state: RwLock<NoticeView>,
}

impl NoticeOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, message: &str) {
        let mut state = self.write();
        state.message = message.to_string();
        state.visible = true;
        state.shown += 1;
        debug!(shown = state.shown, "notice displayed");
    }

    pub fn dismiss(&self) {
        self.write().visible = false;
    }

    /// Hides the overlay on a dismiss-button or backdrop click. Returns
    /// whether the click closed it.
    pub fn click(&self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::DismissButton | ClickTarget::Backdrop => {
                let mut state = self.write();
                let was_visible = state.visible;
                state.visible = false;
                was_visible
            }
            ClickTarget::Content => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.read().visible
    }

    pub fn message(&self) -> String {
        self.read().message.clone()
    }

    pub fn shown_count(&self) -> u64 {
        self.read().shown
    }

    pub fn view(&self) -> NoticeView {
        self.read().clone()
    }

    // The state is plain data, so a poisoned lock is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, NoticeView> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, NoticeView> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NoticeSurface for NoticeOverlay {
    fn notify(&self, message: &str) {
        self.show(message);
    }
}
