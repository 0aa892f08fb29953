//! Speakers screen: section heading over a looping speaker carousel.

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

use congreso_api::endpoints;
use congreso_core::content::{Speaker, normalize};
use congreso_core::{CarouselOptions, ItemsPerView};

use crate::action::Action;
use crate::app::CarouselSettings;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::carousel::{Card, CarouselPane, navigation_key};

use super::{KeyState, render_placeholder};

impl Card for Speaker {
    fn card_title(&self) -> &str {
        &self.name
    }

    fn card_lines(&self) -> Vec<Line<'_>> {
        let mut lines = vec![Line::styled(self.subtitle.as_str(), theme::body())];
        if let Some(ref country) = self.country {
            lines.push(Line::styled(country.name.as_str(), theme::key_hint()));
        }
        if !self.description.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(self.description.as_str()));
        }
        lines
    }
}

pub struct SpeakersScreen {
    base: Url,
    focused: bool,
    heading: KeyState,
    list: KeyState,
    enabled: bool,
    title: String,
    subtitle: String,
    pane: CarouselPane<Speaker>,
}

impl SpeakersScreen {
    pub fn new(base: Url, settings: &CarouselSettings) -> Self {
        let options = CarouselOptions {
            items_per_view: ItemsPerView::responsive(1, 2, 4),
            infinite_loop: true,
            ..settings.options()
        };
        Self {
            base,
            focused: false,
            heading: KeyState::default(),
            list: KeyState::default(),
            enabled: true,
            title: String::new(),
            subtitle: String::new(),
            pane: CarouselPane::new(ScreenId::Speakers, options),
        }
    }

    /// Rebuild from whichever halves are available.
    fn refresh(&mut self) {
        let section = normalize::speakers(
            self.heading.data.as_deref(),
            self.list.data.as_deref(),
            &self.base,
        );
        self.enabled = section.enabled;
        self.title = section.title;
        self.subtitle = section.subtitle;
        self.pane.set_items(section.speakers);
    }
}

impl Component for SpeakersScreen {
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
        if let Action::ResourceUpdated(resource) = action {
            let state = match resource.key.as_str() {
                endpoints::SPEAKERS_SECTION => &mut self.heading,
                endpoints::SPEAKERS => &mut self.list,
                _ => return Ok(None),
            };
            state.apply(resource);
            self.refresh();
            return Ok(None);
        }
        Ok(self.pane.update(action))
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [heading_area, carousel_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(5)]).areas(area);

        let title = if self.title.is_empty() {
            "Disertantes"
        } else {
            self.title.as_str()
        };
        frame.render_widget(
            Paragraph::new(vec![
                Line::styled(title, theme::title_style()),
                Line::styled(self.subtitle.as_str(), theme::body()),
            ])
            .centered(),
            heading_area,
        );

        if !self.enabled {
            render_placeholder(
                frame,
                carousel_area,
                Span::styled("Sección deshabilitada", theme::key_hint()),
            );
            return;
        }
        // Only the list matters for the carousel itself
        if let Some(placeholder) = self.list.placeholder() {
            render_placeholder(frame, carousel_area, placeholder);
            return;
        }
        self.pane.render(frame, carousel_area, self.focused);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.pane.pointer_gone();
        }
    }
}
