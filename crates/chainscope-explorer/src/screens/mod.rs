#![forbid(unsafe_code)]

//! Explorer screens. Each screen owns its state, handles the events routed
//! to it while active, and receives its background fetch results as typed
//! messages wrapped by the top-level [`crate::app::Msg`].

pub mod regulatory;
pub mod risk_alerts;
pub mod supply_chain;

use chainscope_core::event::Event;
use chainscope_core::geometry::Rect;
use chainscope_render::Frame;
use chainscope_runtime::Cmd;

/// One keybinding row for the status bar.
#[derive(Debug, Clone, Copy)]
pub struct HelpEntry {
    pub key: &'static str,
    pub action: &'static str,
}

/// A screen of the explorer.
pub trait Screen {
    /// Background message type for this screen.
    type Message: Send + 'static;

    /// Handle an input event routed to this screen.
    fn handle_event(&mut self, event: &Event) -> Cmd<Self::Message>;

    /// Apply a background message (fetch results).
    fn apply(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render into the given area.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Title shown in the tab bar.
    fn title(&self) -> &'static str;

    /// Keybindings shown in the status bar.
    fn keybindings(&self) -> Vec<HelpEntry>;
}

/// Split an area into a visualization column and a side panel.
pub(crate) fn split_columns(area: Rect, side_width: u16) -> (Rect, Rect) {
    let side = side_width.min(area.width / 2);
    let main = Rect::new(area.x, area.y, area.width.saturating_sub(side), area.height);
    let panel = Rect::new(main.right(), area.y, side, area.height);
    (main, panel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_columns_partitions_width() {
        let (main, panel) = split_columns(Rect::new(0, 0, 90, 30), 30);
        assert_eq!(main, Rect::new(0, 0, 60, 30));
        assert_eq!(panel, Rect::new(60, 0, 30, 30));
    }

    #[test]
    fn split_columns_caps_side_panel() {
        let (main, panel) = split_columns(Rect::new(0, 0, 40, 10), 30);
        assert_eq!(panel.width, 20);
        assert_eq!(main.width, 20);
    }
}
