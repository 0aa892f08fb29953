//! Everything that can change UI state travels as an `Action`.

use serde_json::Value;

use congreso_core::CachedResource;

use crate::screen::ScreenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// One-line message shown in the status bar until replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,
    Resize(u16, u16),
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Carousel ──
    CarouselPrev,
    CarouselNext,
    CarouselPage(usize),
    /// Timer tick for the carousel on the given screen.
    AutoplayTick(ScreenId),

    // ── Data ──
    /// Refetch the active screen's content keys.
    Revalidate,
    FocusGained,
    ResourceUpdated(CachedResource<Value>),

    Notify(Notification),
}
