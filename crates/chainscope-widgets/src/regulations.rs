#![forbid(unsafe_code)]

//! Regulations detail panel.
//!
//! Presents the regulation lookup for a selected node: the node's material
//! and location, then location-specific and global regulation tables, with
//! per-panel loading/error/empty states.

use chainscope_core::geometry::Rect;
use chainscope_model::{Regulation, RegulationSet};
use chainscope_render::{Frame, Rgb, Style};

use crate::{Widget, truncate_to_width};

const TEXT: Rgb = Rgb::new(209, 213, 219);
const MUTED: Rgb = Rgb::new(156, 163, 175);
const HEADING: Rgb = Rgb::new(129, 140, 248);
const ERROR: Rgb = Rgb::new(239, 68, 68);

const JURISDICTION_COL: u16 = 14;
const REGULATION_COL: u16 = 22;

/// Render the manufacturer key the way the detail pane shows locations.
#[must_use]
pub fn location_display(key: &str) -> String {
    if key.is_empty() {
        return "Unspecified".to_string();
    }
    key.split('_').collect::<Vec<_>>().join(", ")
}

/// What the panel currently shows.
#[derive(Debug, Clone)]
pub enum RegulationsContent<'a> {
    /// No lookup issued yet.
    Idle,
    /// A lookup is in flight.
    Loading,
    /// The lookup failed.
    Error(&'a str),
    /// Results arrived.
    Loaded(&'a RegulationSet),
}

/// The regulations panel for the currently selected node.
#[derive(Debug, Clone)]
pub struct RegulationsPanel<'a> {
    content: RegulationsContent<'a>,
    /// Selected node's material name and location display, when a node is
    /// selected.
    selection: Option<(&'a str, String)>,
}

impl<'a> RegulationsPanel<'a> {
    /// Create a panel in the given state.
    #[must_use]
    pub fn new(content: RegulationsContent<'a>) -> Self {
        Self {
            content,
            selection: None,
        }
    }

    /// Attach the selected node's material and location.
    #[must_use]
    pub fn selection(mut self, material: &'a str, location: String) -> Self {
        self.selection = Some((material, location));
        self
    }

    fn render_rows(
        regulations: &[Regulation],
        heading: &str,
        area: Rect,
        frame: &mut Frame,
        mut y: u16,
    ) -> u16 {
        if regulations.is_empty() || y >= area.bottom() {
            return y;
        }
        frame
            .buffer
            .set_string(area.x, y, heading, Style::new().fg(HEADING).bold(), area.right());
        y += 1;
        for regulation in regulations {
            if y >= area.bottom() {
                break;
            }
            let mut x = area.x;
            let jurisdiction =
                truncate_to_width(&regulation.jurisdiction, JURISDICTION_COL as usize - 1);
            frame
                .buffer
                .set_string(x, y, &jurisdiction, Style::new().fg(TEXT).bold(), area.right());
            x += JURISDICTION_COL;
            let name = truncate_to_width(&regulation.regulation, REGULATION_COL as usize - 1);
            frame
                .buffer
                .set_string(x, y, &name, Style::new().fg(TEXT), area.right());
            x += REGULATION_COL;
            let remaining = area.right().saturating_sub(x) as usize;
            let details = truncate_to_width(&regulation.details, remaining);
            frame
                .buffer
                .set_string(x, y, &details, Style::new().fg(MUTED), area.right());
            y += 1;
        }
        y + 1
    }
}

impl Widget for RegulationsPanel<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let mut y = area.y;

        match &self.selection {
            Some((material, location)) => {
                let header = truncate_to_width(
                    &format!("Material: {material}   Location: {location}"),
                    area.width as usize,
                );
                frame
                    .buffer
                    .set_string(area.x, y, &header, Style::new().fg(TEXT), area.right());
                y += 2;
            }
            None => {
                frame.buffer.set_string(
                    area.x,
                    y,
                    "Select a node marker to inspect its regulations.",
                    Style::new().fg(MUTED),
                    area.right(),
                );
                return;
            }
        }

        match &self.content {
            RegulationsContent::Idle => {
                frame.buffer.set_string(
                    area.x,
                    y,
                    "Press r to fetch regulations for this node.",
                    Style::new().fg(MUTED),
                    area.right(),
                );
            }
            RegulationsContent::Loading => {
                frame.buffer.set_string(
                    area.x,
                    y,
                    "Fetching regulations…",
                    Style::new().fg(MUTED),
                    area.right(),
                );
            }
            RegulationsContent::Error(message) => {
                frame
                    .buffer
                    .set_string(area.x, y, message, Style::new().fg(ERROR), area.right());
            }
            RegulationsContent::Loaded(set) => {
                if set.is_empty() {
                    frame.buffer.set_string(
                        area.x,
                        y,
                        "No regulations found for this combination.",
                        Style::new().fg(MUTED),
                        area.right(),
                    );
                    return;
                }
                let y = Self::render_rows(
                    &set.location_regulations,
                    "Location-Specific Regulations",
                    area,
                    frame,
                    y,
                );
                Self::render_rows(
                    &set.global_regulations,
                    "Global & International Regulations",
                    area,
                    frame,
                    y,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regulation(jurisdiction: &str, name: &str) -> Regulation {
        Regulation {
            id: "r".into(),
            jurisdiction: jurisdiction.into(),
            regulation: name.into(),
            details: "Applies to imports".into(),
            link: String::new(),
        }
    }

    fn frame_text(frame: &Frame, width: u16, height: u16) -> String {
        let mut text = String::new();
        for y in 0..height {
            for x in 0..width {
                text.push(frame.buffer.get(x, y).unwrap().ch);
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn location_display_joins_segments() {
        assert_eq!(location_display("Acme_Plant7"), "Acme, Plant7");
        assert_eq!(location_display("Solo"), "Solo");
        assert_eq!(location_display(""), "Unspecified");
    }

    #[test]
    fn no_selection_prompts_for_one() {
        let panel = RegulationsPanel::new(RegulationsContent::Idle);
        let mut frame = Frame::new(60, 10);
        panel.render(Rect::new(0, 0, 60, 10), &mut frame);
        assert!(frame_text(&frame, 60, 10).contains("Select a node marker"));
    }

    #[test]
    fn loaded_set_renders_both_sections() {
        let set = RegulationSet {
            location_regulations: vec![regulation("EU", "REACH")],
            global_regulations: vec![regulation("UN", "GHS")],
        };
        let panel = RegulationsPanel::new(RegulationsContent::Loaded(&set))
            .selection("Resin", location_display("Acme_Plant7"));
        let mut frame = Frame::new(70, 12);
        panel.render(Rect::new(0, 0, 70, 12), &mut frame);
        let text = frame_text(&frame, 70, 12);
        assert!(text.contains("Material: Resin"));
        assert!(text.contains("Acme, Plant7"));
        assert!(text.contains("Location-Specific Regulations"));
        assert!(text.contains("REACH"));
        assert!(text.contains("Global & International Regulations"));
        assert!(text.contains("GHS"));
    }

    #[test]
    fn empty_set_reports_nothing_found() {
        let set = RegulationSet::default();
        let panel = RegulationsPanel::new(RegulationsContent::Loaded(&set))
            .selection("Resin", "Somewhere".into());
        let mut frame = Frame::new(60, 10);
        panel.render(Rect::new(0, 0, 60, 10), &mut frame);
        assert!(frame_text(&frame, 60, 10).contains("No regulations found"));
    }

    #[test]
    fn error_state_shows_message() {
        let panel = RegulationsPanel::new(RegulationsContent::Error(
            "Could not load regulations.",
        ))
        .selection("Resin", "Somewhere".into());
        let mut frame = Frame::new(60, 10);
        panel.render(Rect::new(0, 0, 60, 10), &mut frame);
        assert!(frame_text(&frame, 60, 10).contains("Could not load regulations."));
    }
}
