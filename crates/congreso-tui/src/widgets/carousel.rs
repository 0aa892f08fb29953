//! Carousel pane: a card track with side arrows, page dots and an
//! autoplay progress bar, wired to the core `Carousel` state machine.
//!
//! The pane remembers where it was last drawn so mouse events can be
//! hit-tested against the same geometry the user saw.

use std::cell::Cell;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, LineGauge, Paragraph, Wrap},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use congreso_core::{AutoplayTimer, Carousel, CarouselOptions};

use crate::action::{Action, Notification};
use crate::screen::ScreenId;
use crate::theme;

/// Terminal cells are treated as 8 px wide when picking a breakpoint.
pub const PX_PER_COLUMN: u32 = 8;

const ARROW_WIDTH: u16 = 3;
const DOT_WIDTH: u16 = 2;

pub fn columns_to_px(cols: u16) -> u32 {
    u32::from(cols) * PX_PER_COLUMN
}

/// Content of one carousel card.
pub trait Card {
    fn card_title(&self) -> &str;
    fn card_lines(&self) -> Vec<Line<'_>>;
}

// ── Geometry ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Prev,
    Next,
    Dot(usize),
    Track,
}

/// Where each part of the carousel sits inside its area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselLayout {
    pub area: Rect,
    pub track: Rect,
    pub prev: Option<Rect>,
    pub next: Option<Rect>,
    pub dots: Vec<Rect>,
    pub progress: Option<Rect>,
}

impl CarouselLayout {
    pub fn compute<T>(area: Rect, carousel: &Carousel<T>) -> Self {
        let mut body = area;

        let progress = (carousel.options().autoplay && !carousel.is_empty() && body.height > 1)
            .then(|| take_bottom_row(&mut body));

        let dot_row = (carousel.dots_visible() && body.height > 1).then(|| take_bottom_row(&mut body));

        let (prev, next, track) =
            if carousel.arrows_visible() && body.width > ARROW_WIDTH * 2 {
                let [prev, track, next] = Layout::horizontal([
                    Constraint::Length(ARROW_WIDTH),
                    Constraint::Min(1),
                    Constraint::Length(ARROW_WIDTH),
                ])
                .areas(body);
                (Some(prev), Some(next), track)
            } else {
                (None, None, body)
            };

        let dots = dot_row
            .map(|row| dot_rects(row, carousel.dot_count()))
            .unwrap_or_default();

        Self {
            area,
            track,
            prev,
            next,
            dots,
            progress,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position::new(column, row))
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let pos = Position::new(column, row);
        if self.prev.is_some_and(|r| r.contains(pos)) {
            return Some(Hit::Prev);
        }
        if self.next.is_some_and(|r| r.contains(pos)) {
            return Some(Hit::Next);
        }
        if let Some(page) = self.dots.iter().position(|r| r.contains(pos)) {
            return Some(Hit::Dot(page));
        }
        self.track.contains(pos).then_some(Hit::Track)
    }
}

fn take_bottom_row(area: &mut Rect) -> Rect {
    area.height -= 1;
    Rect::new(area.x, area.y + area.height, area.width, 1)
}

/// Centered dot cells; dots that do not fit are dropped.
fn dot_rects(row: Rect, count: usize) -> Vec<Rect> {
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    let max_fit = row.width / DOT_WIDTH;
    let shown = count.min(max_fit);
    let start = row.x + (row.width - shown * DOT_WIDTH) / 2;
    (0..shown)
        .map(|i| Rect::new(start + i * DOT_WIDTH, row.y, DOT_WIDTH, 1))
        .collect()
}

/// ←/→ (and h/l) map to the arrow buttons.
pub fn navigation_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::CarouselPrev),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::CarouselNext),
        _ => None,
    }
}

// ── Pane ─────────────────────────────────────────────────────────────

pub struct CarouselPane<T> {
    screen: ScreenId,
    carousel: Carousel<T>,
    interval: Duration,
    /// Set once the host wants autoplay; the timer itself only runs while
    /// there are items.
    autoplay_tx: Option<UnboundedSender<Action>>,
    autoplay: Option<AutoplayTimer>,
    /// Inner area of the last render.
    area: Cell<Rect>,
    hovered: bool,
}

impl<T: Card> CarouselPane<T> {
    pub fn new(screen: ScreenId, options: CarouselOptions) -> Self {
        let interval = options.interval;
        Self {
            screen,
            carousel: Carousel::new(Vec::new(), options),
            interval,
            autoplay_tx: None,
            autoplay: None,
            area: Cell::new(Rect::default()),
            hovered: false,
        }
    }

    /// Start the autoplay timer when the options ask for it. Ticks come
    /// back through the action channel tagged with this pane's screen.
    pub fn start_autoplay(&mut self, action_tx: UnboundedSender<Action>) {
        if !self.carousel.options().autoplay {
            return;
        }
        self.autoplay_tx = Some(action_tx);
        self.sync_autoplay();
    }

    /// Run the timer exactly while autoplay is wanted and there are items.
    fn sync_autoplay(&mut self) {
        if self.carousel.is_empty() {
            self.autoplay = None;
            return;
        }
        let Some(ref action_tx) = self.autoplay_tx else {
            return;
        };
        if self.autoplay.is_some() {
            return;
        }
        let screen = self.screen;
        let action_tx = action_tx.clone();
        let timer = AutoplayTimer::start(self.interval, move || {
            let _ = action_tx.send(Action::AutoplayTick(screen));
        });
        if self.hovered {
            timer.pause();
        }
        self.autoplay = Some(timer);
    }

    pub fn carousel(&self) -> &Carousel<T> {
        &self.carousel
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.carousel.set_items(items);
        self.sync_autoplay();
    }

    fn layout(&self) -> CarouselLayout {
        CarouselLayout::compute(self.area.get(), &self.carousel)
    }

    fn set_hovered(&mut self, inside: bool) {
        if inside == self.hovered {
            return;
        }
        self.hovered = inside;
        if inside {
            self.carousel.pointer_enter();
            if let Some(ref timer) = self.autoplay {
                timer.pause();
            }
        } else {
            self.carousel.pointer_leave();
            if let Some(ref timer) = self.autoplay {
                timer.resume();
            }
        }
    }

    /// The pointer can no longer be over the pane, e.g. on screen switch.
    pub fn pointer_gone(&mut self) {
        self.set_hovered(false);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::Moved => {
                let inside = self.layout().contains(mouse.column, mouse.row);
                self.set_hovered(inside);
                None
            }
            MouseEventKind::Down(MouseButton::Left) => {
                match self.layout().hit(mouse.column, mouse.row)? {
                    Hit::Prev => Some(Action::CarouselPrev),
                    Hit::Next => Some(Action::CarouselNext),
                    Hit::Dot(page) => Some(Action::CarouselPage(page)),
                    Hit::Track => None,
                }
            }
            _ => None,
        }
    }

    pub fn update(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::CarouselPrev => self.carousel.prev(),
            Action::CarouselNext => self.carousel.next(),
            Action::CarouselPage(page) => {
                if let Err(e) = self.carousel.go_to_page(*page) {
                    return Some(Action::Notify(Notification::warning(e.to_string())));
                }
            }
            Action::AutoplayTick(screen) if *screen == self.screen => {
                self.carousel.autoplay_tick();
            }
            Action::Resize(cols, _) => {
                if self.carousel.resize(columns_to_px(*cols)) {
                    debug!(
                        screen = %self.screen,
                        per_view = self.carousel.items_per_view(),
                        "carousel resized"
                    );
                }
            }
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let title = format!(
            " {}/{} · {} ",
            self.carousel.active_page() + 1,
            self.carousel.total_pages().max(1),
            self.carousel.mode()
        );
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.area.set(inner);

        let layout = CarouselLayout::compute(inner, &self.carousel);
        self.render_track(frame, layout.track);

        let arrows = [(layout.prev, "‹"), (layout.next, "›")]
            .into_iter()
            .filter_map(|(rect, glyph)| Some((rect?, glyph)));
        for (rect, glyph) in arrows {
            let mid = Rect::new(rect.x, rect.y + rect.height / 2, rect.width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(glyph, theme::arrow())).alignment(Alignment::Center),
                mid,
            );
        }

        let active = self.carousel.active_page();
        for (page, rect) in layout.dots.iter().enumerate() {
            let (glyph, style) = if page == active {
                ("●", theme::dot_active())
            } else {
                ("○", theme::dot_inactive())
            };
            frame.render_widget(Span::styled(glyph, style), *rect);
        }

        if let Some(rect) = layout.progress {
            if self.carousel.is_auto_playing() {
                frame.render_widget(
                    LineGauge::default()
                        .filled_style(theme::progress())
                        .ratio(self.carousel.progress().clamp(0.0, 1.0)),
                    rect,
                );
            } else {
                frame.render_widget(
                    Paragraph::new(Span::styled("autoplay paused", theme::key_hint()))
                        .alignment(Alignment::Center),
                    rect,
                );
            }
        }
    }

    fn render_track(&self, frame: &mut Frame, track: Rect) {
        let visible = self.carousel.visible_items();
        if visible.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No items", theme::key_hint()))
                    .alignment(Alignment::Center),
                track,
            );
            return;
        }

        let per_view = u32::try_from(self.carousel.items_per_view().max(1)).unwrap_or(1);
        let slots = Layout::horizontal(
            (0..per_view).map(|_| Constraint::Ratio(1, per_view)),
        )
        .split(track);

        for (item, slot) in visible.iter().zip(slots.iter()) {
            let card = Block::default()
                .title(Span::styled(item.card_title(), theme::card_title()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default());
            frame.render_widget(
                Paragraph::new(item.card_lines())
                    .style(theme::body())
                    .wrap(Wrap { trim: true })
                    .block(card),
                *slot,
            );
        }
    }
}
