//! Top-level screens, one `Component` per tab.

mod home;
mod speakers;
mod workshops;

use std::sync::Arc;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::Span,
    widgets::Paragraph,
};
use serde_json::Value;
use url::Url;

use congreso_core::{CachedResource, ClassifiedError};

use crate::app::CarouselSettings;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

pub use home::HomeScreen;
pub use speakers::SpeakersScreen;
pub use workshops::WorkshopsScreen;

/// A screen's view of one content key.
#[derive(Debug, Default)]
pub struct KeyState {
    pub data: Option<Arc<Value>>,
    pub error: Option<ClassifiedError>,
    validating: bool,
    seen: bool,
}

impl KeyState {
    /// Take the latest resource state. The cache keeps the previous
    /// payload across failed revalidations, so data and error may coexist.
    pub fn apply(&mut self, resource: &CachedResource<Value>) {
        self.data.clone_from(&resource.data);
        self.error.clone_from(&resource.error);
        self.validating = resource.is_validating;
        self.seen |= resource.is_validating || resource.is_resolved;
    }

    /// What to show instead of content, if anything.
    pub fn placeholder(&self) -> Option<Span<'static>> {
        if self.data.is_some() {
            return None;
        }
        if let Some(ref err) = self.error {
            return Some(Span::styled(format!("Error: {err}"), theme::error()));
        }
        if self.validating || !self.seen {
            return Some(Span::styled("Cargando…", theme::key_hint()));
        }
        Some(Span::styled("Contenido no configurado", theme::key_hint()))
    }
}

pub fn render_placeholder(frame: &mut Frame, area: Rect, span: Span<'static>) {
    let y = area.y + area.height / 2;
    frame.render_widget(
        Paragraph::new(span).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, area.height.min(1)),
    );
}

pub fn create_screens(
    base: &Url,
    carousel: &CarouselSettings,
) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Home, Box::new(HomeScreen::new(base.clone()))),
        (
            ScreenId::Speakers,
            Box::new(SpeakersScreen::new(base.clone(), carousel)),
        ),
        (
            ScreenId::Workshops,
            Box::new(WorkshopsScreen::new(base.clone(), carousel)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(validating: bool, data: Option<Value>, failed: bool) -> CachedResource<Value> {
        CachedResource {
            key: "/api/talleres".into(),
            data: data.map(Arc::new),
            error: failed.then(|| ClassifiedError::new(500, "Internal Server Error")),
            is_loading: validating,
            is_validating: validating,
            is_resolved: !validating,
        }
    }

    fn placeholder_text(state: &KeyState) -> Option<String> {
        state.placeholder().map(|s| s.content.into_owned())
    }

    #[test]
    fn placeholder_tracks_fetch_lifecycle() {
        let mut state = KeyState::default();
        assert_eq!(placeholder_text(&state).as_deref(), Some("Cargando…"));

        state.apply(&resource(true, None, false));
        assert_eq!(placeholder_text(&state).as_deref(), Some("Cargando…"));

        state.apply(&resource(false, None, false));
        assert_eq!(
            placeholder_text(&state).as_deref(),
            Some("Contenido no configurado")
        );

        state.apply(&resource(false, None, true));
        assert_eq!(
            placeholder_text(&state).as_deref(),
            Some("Error: HTTP error! status: 500")
        );
    }

    #[test]
    fn stale_data_hides_the_error() {
        let mut state = KeyState::default();
        state.apply(&resource(false, Some(serde_json::json!({ "data": [] })), true));
        assert!(state.placeholder().is_none());
        assert!(state.error.is_some());
    }
}
