//! The contract between the app loop and each screen.
//!
//! Screens never touch the terminal or the cache directly. Input arrives
//! through the `handle_*` methods, content arrives as
//! [`Action::ResourceUpdated`] through `update`, and anything a screen
//! wants done (switch page, show a warning) goes back out as an [`Action`].

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;

pub trait Component: Send {
    /// One-time setup before the first event. Screens that emit actions on
    /// their own schedule (autoplay) keep a clone of `action_tx`.
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    /// Keys the app did not claim as global shortcuts. Only the active
    /// screen sees them.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Mouse events for the active screen, in terminal coordinates.
    fn handle_mouse_event(&mut self, _mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Apply an action. A returned action is queued behind the current one.
    ///
    /// Resize and content updates are broadcast to every screen, so a
    /// screen must ignore keys it does not render.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Draw into `area`. Takes `&self`; hit areas that depend on the last
    /// layout live in interior cells.
    fn render(&self, frame: &mut Frame, area: Rect);

    /// Called when the screen becomes or stops being the active tab.
    fn set_focused(&mut self, _focused: bool) {}
}
