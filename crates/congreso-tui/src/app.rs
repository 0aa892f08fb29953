//! Application core: event loop, screen switching, action dispatch.

use std::collections::HashMap;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use congreso_core::{Breakpoints, CarouselOptions, ContentService, RevalidateSignal};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::data_bridge::spawn_data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Carousel settings shared by every carousel screen.
#[derive(Debug, Clone)]
pub struct CarouselSettings {
    pub breakpoints: Breakpoints,
    pub autoplay: bool,
    pub interval: Duration,
}

impl CarouselSettings {
    /// Base options; screens set their own items per view and loop mode.
    pub fn options(&self) -> CarouselOptions {
        CarouselOptions {
            breakpoints: self.breakpoints,
            autoplay: self.autoplay,
            interval: self.interval,
            ..CarouselOptions::default()
        }
    }
}

pub struct App {
    service: ContentService,
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Shown in the status bar while autoplay is on.
    autoplay_interval: Option<Duration>,
    notification: Option<Notification>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(service: ContentService, carousel: &CarouselSettings) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens = create_screens(service.base_url(), carousel)
            .into_iter()
            .collect();

        Self {
            service,
            active_screen: ScreenId::default(),
            screens,
            running: true,
            help_visible: false,
            autoplay_interval: carousel.autoplay.then_some(carousel.interval),
            notification: None,
            action_tx,
            action_rx,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        // Size the carousels before the first frame
        let (cols, rows) = tui.size().unwrap_or((80, 24));
        self.action_tx.send(Action::Resize(cols, rows))?;

        let cancel = CancellationToken::new();
        let bridge = tokio::spawn(spawn_data_bridge(
            self.service.clone(),
            self.action_tx.clone(),
            cancel.clone(),
        ));

        let mut events = EventReader::new(
            Duration::from_secs(1),   // countdown tick
            Duration::from_millis(33), // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::FocusGained => self.action_tx.send(Action::FocusGained)?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        cancel.cancel();
        events.stop();
        let _ = bridge.await;
        info!("TUI event loop ended");
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (KeyModifiers::NONE, KeyCode::Char('q')) => {
                return Ok(Some(Action::Quit));
            }
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('r')) => return Ok(Some(Action::Revalidate)),

            (KeyModifiers::NONE, KeyCode::Char(c)) if c.is_ascii_digit() => {
                let n = c.to_digit(10).and_then(|d| u8::try_from(d).ok());
                if let Some(screen) = n.and_then(ScreenId::from_number) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return Ok(None);
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Revalidate => {
                let keys = self.active_screen.content_keys();
                for key in keys {
                    self.service.revalidate_section(key);
                }
                self.notification = Some(Notification::info(format!(
                    "recargando {} ({} claves)",
                    self.active_screen,
                    keys.len()
                )));
            }

            Action::FocusGained => {
                let count = self.service.cache().notify(RevalidateSignal::Focus);
                debug!(count, "focus gained");
            }

            Action::Notify(notification) => self.notification = Some(notification.clone()),

            // Every screen keeps its own carousel sized and its own data current
            Action::Resize(..) => self.broadcast(action)?,

            Action::ResourceUpdated(resource) => {
                if let Some(ref err) = resource.error {
                    self.notification = Some(Notification {
                        message: format!("{}: {err}", resource.key),
                        level: NotificationLevel::Error,
                    });
                }
                self.broadcast(action)?;
            }

            Action::AutoplayTick(target) => {
                if let Some(screen) = self.screens.get_mut(target) {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::Render | Action::Tick => {}

            other => {
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    if let Some(follow_up) = screen.update(other)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let [content_area, tab_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }
        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        if self.help_visible {
            render_help_overlay(frame, frame.area());
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(self.active_screen.position());
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ")];

        match self.notification {
            Some(ref n) => {
                let color = match n.level {
                    NotificationLevel::Info => theme::SUCCESS_GREEN,
                    NotificationLevel::Warning => theme::SUNNY_YELLOW,
                    NotificationLevel::Error => theme::ERROR_RED,
                };
                spans.push(Span::styled(n.message.clone(), Style::default().fg(color)));
            }
            None => spans.push(Span::styled(
                self.service.base_url().to_string(),
                theme::key_hint(),
            )),
        }

        if let Some(interval) = self.autoplay_interval {
            spans.push(Span::styled(
                format!(" │ autoplay {}", humantime::format_duration(interval)),
                theme::key_hint(),
            ));
        }
        spans.push(Span::styled(" │ ←/→ mover  r recargar  ? ayuda  q salir", theme::key_hint()));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 48u16.min(area.width.saturating_sub(4));
    let height = 13u16.min(area.height.saturating_sub(2));
    let help_area = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, help_area);
    let block = Block::default()
        .title(" Atajos ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let rows = [
        ("1-3 / Tab", "Cambiar de pantalla"),
        ("←/→ h/l", "Carrusel anterior / siguiente"),
        ("clic", "Flechas y puntos del carrusel"),
        ("r", "Recargar contenido"),
        ("?", "Esta ayuda"),
        ("q", "Salir"),
    ];
    let mut lines = vec![Line::from("")];
    lines.extend(rows.iter().map(|(key, what)| {
        Line::from(vec![
            Span::styled(format!("  {key:<11}"), theme::key_hint_key()),
            Span::styled(*what, theme::key_hint()),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::styled("            Esc o ? para cerrar", theme::key_hint()));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use congreso_api::TransportConfig;
    use congreso_core::FetchPolicy;
    use pretty_assertions::assert_eq;

    use super::*;

    fn app() -> App {
        let service = ContentService::connect(
            "http://127.0.0.1:9".parse().unwrap(),
            &TransportConfig::default(),
            FetchPolicy::section(),
        )
        .unwrap();
        App::new(
            service,
            &CarouselSettings {
                breakpoints: Breakpoints::default(),
                autoplay: false,
                interval: Duration::from_secs(5),
            },
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn global_keys() {
        let mut app = app();
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::Quit)
        ));
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('3'))).unwrap(),
            Some(Action::SwitchScreen(ScreenId::Workshops))
        ));
        assert!(app.handle_key_event(key(KeyCode::Char('9'))).unwrap().is_none());
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('r'))).unwrap(),
            Some(Action::Revalidate)
        ));
    }

    #[test]
    fn arrows_reach_the_carousel_screen() {
        let mut app = app();
        assert!(app.handle_key_event(key(KeyCode::Left)).unwrap().is_none());

        app.process_action(&Action::SwitchScreen(ScreenId::Speakers)).unwrap();
        assert_eq!(app.active_screen, ScreenId::Speakers);
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Left)).unwrap(),
            Some(Action::CarouselPrev)
        ));
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Right)).unwrap(),
            Some(Action::CarouselNext)
        ));
    }

    #[test]
    fn help_swallows_other_keys() {
        let mut app = app();
        app.process_action(&Action::ToggleHelp).unwrap();
        assert!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap().is_none());
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::ToggleHelp)
        ));
    }

    #[test]
    fn page_errors_surface_as_notifications() {
        let mut app = app();
        app.process_action(&Action::SwitchScreen(ScreenId::Workshops)).unwrap();
        app.process_action(&Action::CarouselPage(4)).unwrap();

        let follow_up = app.action_rx.try_recv().unwrap();
        app.process_action(&follow_up).unwrap();
        assert_eq!(
            app.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Warning)
        );
    }

    #[tokio::test]
    async fn revalidate_targets_the_active_screen() {
        let mut app = app();
        app.process_action(&Action::SwitchScreen(ScreenId::Speakers)).unwrap();
        app.process_action(&Action::Revalidate).unwrap();

        let message = app.notification.as_ref().unwrap().message.clone();
        assert!(message.contains("2 claves"), "{message}");
        for key in ScreenId::Speakers.content_keys() {
            assert!(app.service.cache().get(key).is_some());
        }
    }
}
