// ── Carousel state machine ──
//
// Pure navigation state for a horizontally paged list. The host owns the
// carousel, feeds it viewport widths and pointer events, and renders the
// items it reports as visible. Nothing here fetches or draws.

mod autoplay;
mod breakpoints;

use std::ops::Range;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

pub use autoplay::{AutoplayTimer, MIN_INTERVAL};
pub use breakpoints::{Breakpoints, ItemsPerView, ResponsiveItems, ViewportTier};

/// Whether navigation moves one item at a time or a page at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Index counts pages; the track moves a full viewport per step.
    Paged,
    /// Index counts items; the track moves one slot per step and wraps.
    Looping,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("page {page} is out of range (carousel has {total_pages} pages)")]
    PageOutOfRange { page: usize, total_pages: usize },
}

/// Construction options. Defaults mirror the site's carousel component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselOptions {
    pub items_per_view: ItemsPerView,
    pub breakpoints: Breakpoints,
    pub infinite_loop: bool,
    pub show_arrows: bool,
    pub show_dots: bool,
    pub autoplay: bool,
    #[serde(with = "millis")]
    pub interval: Duration,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            items_per_view: ItemsPerView::default(),
            breakpoints: Breakpoints::default(),
            infinite_loop: false,
            show_arrows: true,
            show_dots: true,
            autoplay: false,
            interval: Duration::from_millis(5000),
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// Navigation state over an owned item list.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    options: CarouselOptions,
    items_per_view: usize,
    current_index: usize,
    hovered: bool,
}

impl<T> Carousel<T> {
    /// Create a carousel at index 0, sized for the mobile tier until the
    /// first `resize`.
    pub fn new(items: Vec<T>, options: CarouselOptions) -> Self {
        let items_per_view = options.items_per_view.for_tier(ViewportTier::Mobile);
        Self {
            items,
            options,
            items_per_view,
            current_index: 0,
            hovered: false,
        }
    }

    /// Create a carousel already sized for `width_px`.
    pub fn with_width(items: Vec<T>, options: CarouselOptions, width_px: u32) -> Self {
        let mut carousel = Self::new(items, options);
        carousel.resize(width_px);
        carousel
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn mode(&self) -> Mode {
        if self.options.infinite_loop {
            Mode::Looping
        } else {
            Mode::Paged
        }
    }

    pub fn items_per_view(&self) -> usize {
        self.items_per_view
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.items_per_view)
    }

    /// Upper bound (exclusive) of `current_index`.
    fn modulus(&self) -> usize {
        match self.mode() {
            Mode::Looping => self.items.len(),
            Mode::Paged => self.total_pages(),
        }
    }

    pub fn active_page(&self) -> usize {
        match self.mode() {
            Mode::Paged => self.current_index,
            Mode::Looping => self.current_index / self.items_per_view,
        }
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn next(&mut self) {
        let m = self.modulus();
        if m > 0 {
            self.current_index = (self.current_index + 1) % m;
        }
    }

    pub fn prev(&mut self) {
        let m = self.modulus();
        if m > 0 {
            self.current_index = (self.current_index + m - 1) % m;
        }
    }

    /// Jump to the first slot of `page`.
    pub fn go_to_page(&mut self, page: usize) -> Result<(), CarouselError> {
        let total_pages = self.total_pages();
        if page >= total_pages {
            return Err(CarouselError::PageOutOfRange { page, total_pages });
        }
        self.current_index = match self.mode() {
            Mode::Paged => page,
            Mode::Looping => page * self.items_per_view,
        };
        Ok(())
    }

    /// Recompute items per view for a new viewport width.
    ///
    /// The index survives when still valid and is wrapped otherwise.
    /// Returns whether items per view changed.
    pub fn resize(&mut self, width_px: u32) -> bool {
        let items_per_view = self
            .options
            .items_per_view
            .resolve(width_px, &self.options.breakpoints);
        if items_per_view == self.items_per_view {
            return false;
        }
        self.items_per_view = items_per_view;
        self.clamp_index(|index, m| index % m);
        true
    }

    /// Replace the item list. An index that no longer fits resets to 0.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp_index(|_, _| 0);
    }

    fn clamp_index(&mut self, wrap: impl FnOnce(usize, usize) -> usize) {
        let m = self.modulus();
        if m == 0 {
            self.current_index = 0;
        } else if self.current_index >= m {
            self.current_index = wrap(self.current_index, m);
        }
    }

    // ── Rendering queries ────────────────────────────────────────────

    /// Track translation as a percentage of the viewport width.
    pub fn offset_percent(&self) -> f64 {
        match self.mode() {
            Mode::Looping => to_f64(self.current_index) * (100.0 / to_f64(self.items_per_view)),
            Mode::Paged => to_f64(self.current_index) * 100.0,
        }
    }

    /// Range of item indices inside the viewport.
    pub fn visible_range(&self) -> Range<usize> {
        let start = match self.mode() {
            Mode::Looping => self.current_index,
            Mode::Paged => self.current_index * self.items_per_view,
        };
        let start = start.min(self.items.len());
        let end = (start + self.items_per_view).min(self.items.len());
        start..end
    }

    pub fn visible_items(&self) -> &[T] {
        &self.items[self.visible_range()]
    }

    pub fn dot_count(&self) -> usize {
        self.total_pages()
    }

    pub fn arrows_visible(&self) -> bool {
        self.options.show_arrows && self.items.len() > self.items_per_view
    }

    pub fn dots_visible(&self) -> bool {
        self.options.show_dots
            && match self.mode() {
                Mode::Looping => !self.items.is_empty(),
                Mode::Paged => self.total_pages() > 1,
            }
    }

    /// Fill ratio in `[0, 1]` of the autoplay progress bar.
    pub fn progress(&self) -> f64 {
        let m = self.modulus();
        if m == 0 {
            return 0.0;
        }
        to_f64(self.current_index + 1) / to_f64(m)
    }

    // ── Autoplay ─────────────────────────────────────────────────────

    pub fn is_auto_playing(&self) -> bool {
        self.options.autoplay && !self.hovered && !self.items.is_empty()
    }

    pub fn pointer_enter(&mut self) {
        if self.options.autoplay {
            self.hovered = true;
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.options.autoplay {
            self.hovered = false;
        }
    }

    /// Advance one step if autoplay is running. Returns whether it moved.
    pub fn autoplay_tick(&mut self) -> bool {
        if !self.is_auto_playing() {
            return false;
        }
        self.next();
        true
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn to_f64(n: usize) -> f64 {
    n as f64
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn paged(n: usize, ipv: usize) -> Carousel<usize> {
        Carousel::new(
            (0..n).collect(),
            CarouselOptions {
                items_per_view: ItemsPerView::Fixed(ipv),
                ..CarouselOptions::default()
            },
        )
    }

    fn looping(n: usize, ipv: usize) -> Carousel<usize> {
        Carousel::new(
            (0..n).collect(),
            CarouselOptions {
                items_per_view: ItemsPerView::Fixed(ipv),
                infinite_loop: true,
                ..CarouselOptions::default()
            },
        )
    }

    #[test]
    fn paged_next_wraps_over_pages() {
        let mut c = paged(10, 4);
        assert_eq!(c.total_pages(), 3);
        let mut seen = Vec::new();
        for _ in 0..3 {
            c.next();
            seen.push(c.current_index());
        }
        assert_eq!(seen, vec![1, 2, 0]);
    }

    #[test]
    fn looping_go_to_page_lands_on_first_slot() {
        let mut c = looping(8, 3);
        c.go_to_page(2).unwrap();
        assert_eq!(c.current_index(), 6);
        assert_eq!(c.active_page(), 2);
        assert_eq!(c.visible_items(), &[6, 7]);
    }

    #[test]
    fn go_to_page_rejects_out_of_range() {
        let mut c = paged(10, 4);
        c.next();
        assert_eq!(
            c.go_to_page(3),
            Err(CarouselError::PageOutOfRange {
                page: 3,
                total_pages: 3
            })
        );
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn index_stays_in_range_for_any_sequence() {
        for (mut c, m) in [(paged(10, 4), 3), (looping(7, 3), 7), (paged(1, 4), 1)] {
            for step in 0..50 {
                if step % 3 == 0 {
                    c.prev();
                } else {
                    c.next();
                }
                assert!(c.current_index() < m);
            }
        }
    }

    #[test]
    fn next_then_prev_round_trips() {
        for mut c in [paged(10, 4), looping(8, 3)] {
            for start in 0..3 {
                c.go_to_page(start).unwrap();
                let before = c.current_index();
                c.next();
                c.prev();
                assert_eq!(c.current_index(), before);
                c.prev();
                c.next();
                assert_eq!(c.current_index(), before);
            }
        }
    }

    #[test]
    fn empty_carousel_exposes_nothing() {
        let mut c = paged(0, 4);
        c.next();
        c.prev();
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.dot_count(), 0);
        assert!(!c.arrows_visible());
        assert!(!c.dots_visible());
        assert!(c.visible_items().is_empty());
        assert!(c.go_to_page(0).is_err());
        assert!((c.progress() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn offsets_follow_mode() {
        let mut p = paged(10, 4);
        p.next();
        assert!((p.offset_percent() - 100.0).abs() < 1e-9);

        let mut l = looping(8, 4);
        l.next();
        l.next();
        assert!((l.offset_percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn arrows_and_dots_visibility() {
        assert!(!paged(4, 4).arrows_visible());
        assert!(paged(5, 4).arrows_visible());
        assert!(!paged(4, 4).dots_visible());
        assert!(looping(4, 4).dots_visible());

        let hidden = Carousel::new(
            vec![1, 2, 3, 4, 5],
            CarouselOptions {
                items_per_view: ItemsPerView::Fixed(2),
                show_arrows: false,
                show_dots: false,
                ..CarouselOptions::default()
            },
        );
        assert!(!hidden.arrows_visible());
        assert!(!hidden.dots_visible());
    }

    #[test]
    fn progress_counts_steps() {
        let mut l = looping(8, 3);
        assert!((l.progress() - 1.0 / 8.0).abs() < 1e-9);
        l.go_to_page(2).unwrap();
        assert!((l.progress() - 7.0 / 8.0).abs() < 1e-9);

        let mut p = paged(10, 4);
        p.next();
        p.next();
        assert!((p.progress() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn resize_recomputes_and_keeps_valid_index() {
        let mut c = Carousel::new(
            (0..12).collect::<Vec<_>>(),
            CarouselOptions {
                items_per_view: ItemsPerView::responsive(1, 2, 4),
                ..CarouselOptions::default()
            },
        );
        assert_eq!(c.items_per_view(), 1);

        assert!(c.resize(800));
        assert_eq!(c.items_per_view(), 2);
        c.go_to_page(2).unwrap();

        assert!(c.resize(1280));
        assert_eq!(c.items_per_view(), 4);
        assert_eq!(c.current_index(), 2);
        assert_eq!(c.visible_items(), &[8, 9, 10, 11]);

        assert!(!c.resize(1300));
    }

    #[test]
    fn resize_wraps_index_that_falls_off_the_end() {
        let mut c = Carousel::with_width(
            (0..10).collect::<Vec<_>>(),
            CarouselOptions {
                items_per_view: ItemsPerView::responsive(1, 2, 4),
                ..CarouselOptions::default()
            },
            400,
        );
        c.go_to_page(7).unwrap();
        c.resize(1280);
        assert_eq!(c.total_pages(), 3);
        assert_eq!(c.current_index(), 7 % 3);
    }

    #[test]
    fn set_items_resets_stale_index() {
        let mut c = looping(8, 3);
        c.go_to_page(2).unwrap();
        c.set_items(vec![1, 2, 3]);
        assert_eq!(c.current_index(), 0);

        c.next();
        c.set_items(vec![1, 2, 3, 4]);
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn hover_pauses_autoplay() {
        let mut c = Carousel::new(
            vec!["a", "b", "c"],
            CarouselOptions {
                items_per_view: ItemsPerView::Fixed(1),
                autoplay: true,
                ..CarouselOptions::default()
            },
        );
        assert!(c.autoplay_tick());
        assert_eq!(c.current_index(), 1);

        c.pointer_enter();
        assert!(!c.is_auto_playing());
        assert!(!c.autoplay_tick());
        assert_eq!(c.current_index(), 1);

        c.pointer_leave();
        assert!(c.autoplay_tick());
        assert_eq!(c.current_index(), 2);

        c.set_items(Vec::new());
        assert!(!c.is_auto_playing());
    }

    #[test]
    fn hover_is_ignored_without_autoplay() {
        let mut c = paged(10, 4);
        c.pointer_enter();
        assert!(!c.is_auto_playing());
        assert!(!c.autoplay_tick());
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: CarouselOptions = serde_json::from_str(
            r#"{"items_per_view":{"mobile":1,"tablet":2,"desktop":4},"infinite_loop":true,"interval":3000}"#,
        )
        .unwrap();
        assert_eq!(opts.items_per_view, ItemsPerView::responsive(1, 2, 4));
        assert!(opts.infinite_loop);
        assert!(opts.show_arrows);
        assert_eq!(opts.interval, Duration::from_millis(3000));
    }
}
