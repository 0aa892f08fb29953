//! Home screen: hero block and the countdown to the event.

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use url::Url;

use congreso_api::endpoints;
use congreso_core::content::{HeroSection, normalize};
use congreso_core::{TimeLeft, parse_event_date};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

use super::{KeyState, render_placeholder};

pub struct HomeScreen {
    base: Url,
    focused: bool,
    state: KeyState,
    hero: Option<HeroSection>,
    /// `None` when the hero has no parseable event date.
    event_at: Option<DateTime<Utc>>,
}

impl HomeScreen {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            focused: false,
            state: KeyState::default(),
            hero: None,
            event_at: None,
        }
    }

    fn refresh(&mut self) {
        self.hero = self
            .state
            .data
            .as_deref()
            .and_then(|json| normalize::hero(json, &self.base));
        self.event_at = self
            .hero
            .as_ref()
            .and_then(|h| parse_event_date(&h.event_date).ok());
    }
}

/// The four countdown cells, value over label.
pub fn countdown_lines(left: TimeLeft) -> [Line<'static>; 2] {
    let parts = left.parts();
    let values = parts
        .iter()
        .flat_map(|(value, _)| {
            [
                Span::styled(format!("{value:>8}"), theme::countdown_value()),
                Span::raw("  "),
            ]
        })
        .collect::<Vec<_>>();
    let labels = parts
        .iter()
        .flat_map(|(_, label)| [Span::styled(format!("{label:>8}"), theme::key_hint()), Span::raw("  ")])
        .collect::<Vec<_>>();
    [Line::from(values), Line::from(labels)]
}

impl Component for HomeScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ResourceUpdated(resource) = action {
            if resource.key == endpoints::HOME_HERO {
                self.state.apply(resource);
                self.refresh();
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = self
            .hero
            .as_ref()
            .map_or_else(|| " Inicio ".to_owned(), |h| format!(" {} ", h.title));
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(hero) = self.hero.as_ref().filter(|h| h.enabled) else {
            let placeholder = self
                .state
                .placeholder()
                .unwrap_or_else(|| Span::styled("Sección deshabilitada", theme::key_hint()));
            render_placeholder(frame, inner, placeholder);
            return;
        };

        let [text_area, countdown_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(5)]).areas(inner);

        let mut lines = Vec::new();
        if let Some(ref subtitle) = hero.subtitle {
            lines.push(Line::styled(subtitle.clone(), theme::card_title()));
        }
        lines.push(Line::from(""));
        lines.push(Line::styled(hero.description.clone(), theme::body()));
        if let Some(ref err) = self.state.error {
            lines.push(Line::from(""));
            lines.push(Line::styled(format!("(datos previos) {err}"), theme::error()));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            text_area,
        );

        let mut countdown = vec![Line::styled(
            hero.next_edition_title.clone(),
            theme::title_style(),
        )];
        match self.event_at {
            Some(at) => countdown.extend(countdown_lines(TimeLeft::until(at, Utc::now()))),
            None => countdown.push(Line::styled("Fecha del evento no disponible", theme::key_hint())),
        }
        frame.render_widget(
            Paragraph::new(countdown).alignment(Alignment::Center),
            countdown_area,
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use congreso_core::CachedResource;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn hero_resource(date: &str) -> CachedResource<serde_json::Value> {
        CachedResource {
            key: endpoints::HOME_HERO.into(),
            data: Some(Arc::new(json!({
                "data": { "HomeSection": {
                    "titulo": "Congreso de Pediatría",
                    "descripcion": "Tres días de actualización",
                    "FechaEvento": date
                } }
            }))),
            error: None,
            is_loading: false,
            is_validating: false,
            is_resolved: true,
        }
    }

    #[test]
    fn countdown_cells_line_up() {
        let left = TimeLeft::until(
            Utc.with_ymd_and_hms(2026, 11, 12, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 11, 10, 8, 30, 15).unwrap(),
        );
        let [values, labels] = countdown_lines(left);
        let values: String = values.spans.iter().map(|s| s.content.as_ref()).collect();
        let labels: String = labels.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(values.split_whitespace().collect::<Vec<_>>(), ["2", "0", "29", "45"]);
        assert_eq!(values.chars().count(), labels.chars().count());
        assert!(labels.contains("Días"));
    }

    #[test]
    fn hero_update_sets_event_date() {
        let mut screen = HomeScreen::new("https://cms.example.org".parse().unwrap());
        screen
            .update(&Action::ResourceUpdated(hero_resource("2026-11-12")))
            .unwrap();
        assert_eq!(screen.hero.as_ref().unwrap().title, "Congreso de Pediatría");
        assert_eq!(
            screen.event_at,
            Some(Utc.with_ymd_and_hms(2026, 11, 12, 0, 0, 0).unwrap())
        );

        screen
            .update(&Action::ResourceUpdated(hero_resource("pronto")))
            .unwrap();
        assert!(screen.hero.is_some());
        assert_eq!(screen.event_at, None);
    }

    #[test]
    fn ignores_other_keys() {
        let mut screen = HomeScreen::new("https://cms.example.org".parse().unwrap());
        let mut other = hero_resource("2026-11-12");
        other.key = endpoints::WORKSHOPS.into();
        screen.update(&Action::ResourceUpdated(other)).unwrap();
        assert!(screen.hero.is_none());
    }
}
