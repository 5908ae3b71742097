#![forbid(unsafe_code)]

//! Top-level application model: the screen registry, tab chrome, and
//! message routing between the runtime and the active screen.

use std::sync::Arc;

use chainscope_core::event::{Event, KeyCode};
use chainscope_core::geometry::Rect;
use chainscope_model::RiskDataSource;
use chainscope_render::{Cell, Frame, Style};
use chainscope_runtime::{Cmd, Model};

use crate::catalog::{Catalog, CatalogSelector};
use crate::screens::regulatory::{RegulatoryMsg, RegulatoryScreen};
use crate::screens::risk_alerts::{RiskAlertsMsg, RiskAlertsScreen};
use crate::screens::supply_chain::{SupplyChainMsg, SupplyChainScreen};
use crate::screens::Screen;
use crate::theme;

/// The explorer's screens, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    RiskAlerts,
    SupplyChain,
    Regulatory,
}

impl ScreenId {
    pub const ALL: [ScreenId; 3] = [
        ScreenId::RiskAlerts,
        ScreenId::SupplyChain,
        ScreenId::Regulatory,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// The screen for a 1-indexed CLI/number-key choice, when in range.
    #[must_use]
    pub fn from_number(n: u16) -> Option<Self> {
        Self::ALL.get((n as usize).checked_sub(1)?).copied()
    }
}

/// Top-level message type.
pub enum Msg {
    Input(Event),
    RiskAlerts(RiskAlertsMsg),
    SupplyChain(SupplyChainMsg),
    Regulatory(RegulatoryMsg),
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        Msg::Input(event)
    }
}

pub struct AppModel {
    pub current_screen: ScreenId,
    risk_alerts: RiskAlertsScreen,
    supply_chain: SupplyChainScreen,
    regulatory: RegulatoryScreen,
}

impl AppModel {
    /// Build the app over a data source and its selector catalog.
    pub fn new(source: Arc<dyn RiskDataSource>, catalog: Catalog) -> Self {
        Self {
            current_screen: ScreenId::RiskAlerts,
            risk_alerts: RiskAlertsScreen::new(
                Arc::clone(&source),
                CatalogSelector::new(catalog.clone()),
            ),
            supply_chain: SupplyChainScreen::new(
                Arc::clone(&source),
                CatalogSelector::new(catalog.clone()),
            ),
            regulatory: RegulatoryScreen::new(source, CatalogSelector::new(catalog)),
        }
    }

    fn route_event(&mut self, event: &Event) -> Cmd<Msg> {
        match self.current_screen {
            ScreenId::RiskAlerts => self.risk_alerts.handle_event(event).map(Msg::RiskAlerts),
            ScreenId::SupplyChain => self.supply_chain.handle_event(event).map(Msg::SupplyChain),
            ScreenId::Regulatory => self.regulatory.handle_event(event).map(Msg::Regulatory),
        }
    }

    fn render_tab_bar(&self, area: Rect, frame: &mut Frame) {
        frame
            .buffer
            .fill(area, Cell::styled(' ', Style::new().bg(chainscope_render::Rgb::new(17, 24, 39))));
        let mut x = frame.buffer.set_string(
            area.x + 1,
            area.y,
            "ChainScope",
            Style::new().fg(theme::accent::PRIMARY).bold(),
            area.right(),
        );
        x += 2;
        for (i, id) in ScreenId::ALL.iter().enumerate() {
            let title = match id {
                ScreenId::RiskAlerts => self.risk_alerts.title(),
                ScreenId::SupplyChain => self.supply_chain.title(),
                ScreenId::Regulatory => self.regulatory.title(),
            };
            let style = if *id == self.current_screen {
                theme::tab_active()
            } else {
                theme::tab_inactive()
            };
            let text = format!("[{}] {}  ", i + 1, title);
            x = frame.buffer.set_string(x, area.y, &text, style, area.right());
        }
    }

    fn render_status_bar(&self, area: Rect, frame: &mut Frame) {
        let bindings = match self.current_screen {
            ScreenId::RiskAlerts => self.risk_alerts.keybindings(),
            ScreenId::SupplyChain => self.supply_chain.keybindings(),
            ScreenId::Regulatory => self.regulatory.keybindings(),
        };
        let mut text = String::new();
        for entry in bindings {
            text.push_str(&format!("{} {}  ·  ", entry.key, entry.action));
        }
        text.push_str("Tab switch  ·  q quit");
        frame.buffer.set_string(
            area.x + 1,
            area.y,
            &text,
            Style::new().fg(theme::fg::MUTED).dim(),
            area.right(),
        );
    }
}

impl Model for AppModel {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Input(event) => {
                if let Event::Key(key) = &event {
                    if key.is_char('q') || (key.ctrl() && key.is_char('c')) {
                        return Cmd::quit();
                    }
                    match key.code {
                        KeyCode::Tab => {
                            self.current_screen = self.current_screen.next();
                            return Cmd::none();
                        }
                        KeyCode::BackTab => {
                            self.current_screen = self.current_screen.prev();
                            return Cmd::none();
                        }
                        KeyCode::Char(c @ '1'..='3') => {
                            if let Some(id) = ScreenId::from_number(c as u16 - '0' as u16) {
                                self.current_screen = id;
                            }
                            return Cmd::none();
                        }
                        _ => {}
                    }
                }
                self.route_event(&event)
            }
            Msg::RiskAlerts(msg) => self.risk_alerts.apply(msg).map(Msg::RiskAlerts),
            Msg::SupplyChain(msg) => self.supply_chain.apply(msg).map(Msg::SupplyChain),
            Msg::Regulatory(msg) => self.regulatory.apply(msg).map(Msg::Regulatory),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.height < 6 || area.width < 20 {
            return;
        }
        self.render_tab_bar(Rect::new(area.x, area.y, area.width, 1), frame);
        let body = Rect::new(area.x, area.y + 1, area.width, area.height - 2);
        match self.current_screen {
            ScreenId::RiskAlerts => self.risk_alerts.view(frame, body),
            ScreenId::SupplyChain => self.supply_chain.view(frame, body),
            ScreenId::Regulatory => self.regulatory.view(frame, body),
        }
        self.render_status_bar(Rect::new(area.x, area.bottom() - 1, area.width, 1), frame);
    }
}
