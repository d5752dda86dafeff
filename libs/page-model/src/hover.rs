use serde::Serialize;

const HOVER_TRANSITION: &str = "transform 0.15s ease-in-out";

/// Inline style written to a result table on pointer enter/leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverStyle {
    pub transform: &'static str,
    pub transition: Option<&'static str>,
}

/// Slight zoom on result tables while hovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableHover {
    hovered: bool,
}

impl TableHover {
    pub fn enter(&mut self) -> HoverStyle {
        self.hovered = true;
        HoverStyle {
            transform: "scale(1.01)",
            transition: Some(HOVER_TRANSITION),
        }
    }

    /// Restores the scale; the transition set on enter stays in place.
    pub fn leave(&mut self) -> HoverStyle {
        self.hovered = false;
        HoverStyle {
            transform: "scale(1)",
            transition: None,
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}
