#![forbid(unsafe_code)]

//! The alert feed: a column of alert cards.

use chainscope_core::geometry::Rect;
use chainscope_model::Alert;
use chainscope_render::{Frame, Rgb, Style};

use crate::adapter::severity_color;
use crate::{Widget, truncate_to_width};

const TEXT: Rgb = Rgb::new(209, 213, 219);
const MUTED: Rgb = Rgb::new(156, 163, 175);
const NOTICE: Rgb = Rgb::new(245, 158, 11);

/// Rows one card occupies, including its trailing separator.
const CARD_ROWS: u16 = 5;

/// Renders alert cards top to bottom, clipped to the area.
#[derive(Debug, Clone)]
pub struct AlertFeed<'a> {
    alerts: Vec<&'a Alert>,
    notice: Option<&'a str>,
}

impl<'a> AlertFeed<'a> {
    /// Create a feed over the given alerts.
    #[must_use]
    pub fn new(alerts: Vec<&'a Alert>) -> Self {
        Self {
            alerts,
            notice: None,
        }
    }

    /// Show a notice line above the cards (empty results, partial
    /// failures).
    #[must_use]
    pub fn notice(mut self, notice: &'a str) -> Self {
        self.notice = Some(notice);
        self
    }
}

impl Widget for AlertFeed<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let mut y = area.y;

        if let Some(notice) = self.notice {
            frame
                .buffer
                .set_string(area.x, y, notice, Style::new().fg(NOTICE), area.right());
            y = y.saturating_add(2);
        }

        if self.alerts.is_empty() {
            if self.notice.is_none() {
                frame.buffer.set_string(
                    area.x,
                    y,
                    "No active alerts for this view.",
                    Style::new().fg(MUTED),
                    area.right(),
                );
            }
            return;
        }

        let width = area.width as usize;
        for alert in &self.alerts {
            if y.saturating_add(CARD_ROWS - 1) > area.bottom() {
                break;
            }
            let badge = alert.risk_level.label();
            let badge_style = Style::new().fg(severity_color(alert.risk_level.severity())).bold();
            let category_max = width.saturating_sub(badge.len() + 1);
            let category = truncate_to_width(&alert.category, category_max);
            frame
                .buffer
                .set_string(area.x, y, &category, Style::new().fg(TEXT).bold(), area.right());
            let badge_x = area.right().saturating_sub(badge.len() as u16);
            frame
                .buffer
                .set_string(badge_x, y, badge, badge_style, area.right());

            let location = truncate_to_width(&format!("⌖ {}", alert.location), width);
            frame
                .buffer
                .set_string(area.x, y + 1, &location, Style::new().fg(TEXT), area.right());

            let details = truncate_to_width(&alert.details, width);
            frame
                .buffer
                .set_string(area.x, y + 2, &details, Style::new().fg(MUTED), area.right());

            frame.buffer.set_string(
                area.x,
                y + 3,
                &alert.date,
                Style::new().fg(MUTED).dim(),
                area.right(),
            );

            y = y.saturating_add(CARD_ROWS);
        }
    }
}
