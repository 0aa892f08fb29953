//! Workshops screen: paged carousel over the workshop list.

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Line};
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

use congreso_api::endpoints;
use congreso_core::content::{Workshop, normalize};
use congreso_core::{CarouselOptions, ItemsPerView};

use crate::action::Action;
use crate::app::CarouselSettings;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::carousel::{Card, CarouselPane, navigation_key};

use super::{KeyState, render_placeholder};

impl Card for Workshop {
    fn card_title(&self) -> &str {
        &self.title
    }

    fn card_lines(&self) -> Vec<Line<'_>> {
        let mut lines = vec![Line::styled(format!("Taller #{}", self.id), theme::key_hint())];
        if let Some(ref name) = self.document_name {
            lines.push(Line::from(""));
            lines.push(Line::styled(format!("📄 {name}"), theme::body()));
        }
        if let Some(ref url) = self.document_url {
            lines.push(Line::styled(url.as_str(), theme::key_hint()));
        }
        lines
    }
}

pub struct WorkshopsScreen {
    base: Url,
    focused: bool,
    state: KeyState,
    pane: CarouselPane<Workshop>,
}

impl WorkshopsScreen {
    pub fn new(base: Url, settings: &CarouselSettings) -> Self {
        let options = CarouselOptions {
            items_per_view: ItemsPerView::responsive(1, 2, 3),
            ..settings.options()
        };
        Self {
            base,
            focused: false,
            state: KeyState::default(),
            pane: CarouselPane::new(ScreenId::Workshops, options),
        }
    }
}

impl Component for WorkshopsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.pane.start_autoplay(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(navigation_key(key))
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(self.pane.handle_mouse(mouse))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ResourceUpdated(resource) if resource.key == endpoints::WORKSHOPS => {
                self.state.apply(resource);
                let workshops = self
                    .state
                    .data
                    .as_deref()
                    .map(|json| normalize::workshops(json, &self.base))
                    .unwrap_or_default();
                self.pane.set_items(workshops);
                Ok(None)
            }
            other => Ok(self.pane.update(other)),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        match self.state.placeholder() {
            Some(placeholder) => render_placeholder(frame, area, placeholder),
            None => self.pane.render(frame, area, self.focused),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.pane.pointer_gone();
        }
    }
}
