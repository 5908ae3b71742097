#![forbid(unsafe_code)]

//! Geospatial hotspot map.
//!
//! Projects geolocated alerts onto the embedded world outline. Alerts
//! missing either coordinate are silently excluded here while staying
//! visible in the textual feed. Hotspots register [`HitRegion::Content`]
//! with `data` = the alert's index in the input slice.

use chainscope_core::geometry::Rect;
use chainscope_layout::MapProjection;
use chainscope_layout::world::WORLD_OUTLINE;
use chainscope_model::{Alert, RiskLevel};
use chainscope_render::{Frame, HitGrid, HitId, HitRegion, Painter, Rgb, Style};

use crate::Widget;
use crate::adapter::severity_color;

/// Landmass outline color.
const LAND: Rgb = Rgb::new(75, 85, 99);

/// Hotspot marker radius in painter dots.
#[must_use]
pub const fn marker_radius(level: Option<RiskLevel>) -> i32 {
    match level {
        Some(RiskLevel::High) => 8,
        Some(RiskLevel::Medium) => 6,
        _ => 5,
    }
}

/// Renders a flat alert list over the world outline.
#[derive(Debug, Clone)]
pub struct MapView<'a> {
    alerts: &'a [Alert],
    hit_id: Option<HitId>,
}

impl<'a> MapView<'a> {
    /// Create a map over the given alerts.
    #[must_use]
    pub fn new(alerts: &'a [Alert]) -> Self {
        Self {
            alerts,
            hit_id: None,
        }
    }

    /// Register hotspot hit regions under this id.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    /// Resolve a pointer position to a hovered alert index.
    #[must_use]
    pub fn resolve(grid: &HitGrid, x: u16, y: u16, expected: HitId) -> Option<usize> {
        match grid.hit_test(x, y) {
            Some((id, HitRegion::Content, data)) if id == expected => Some(data as usize),
            _ => None,
        }
    }
}

impl Widget for MapView<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let mut painter = Painter::for_area(area);
        let (dots_w, dots_h) = painter.size();
        let projection = MapProjection::fitted(dots_w as f64, dots_h as f64);

        for outline in WORLD_OUTLINE {
            let points: Vec<(f64, f64)> = outline
                .iter()
                .map(|&(lon, lat)| projection.project(lon, lat))
                .collect();
            painter.polyline(&points, Some(LAND));
        }

        for (index, alert) in self.alerts.iter().enumerate() {
            let Some((lon, lat)) = alert.coordinates() else {
                continue;
            };
            let (x, y) = projection.project(lon, lat);
            let radius = marker_radius(Some(alert.risk_level));
            let color = severity_color(alert.risk_level.severity());
            painter.circle_filled(x.round() as i32, y.round() as i32, radius, Some(color));

            if let Some(id) = self.hit_id {
                let cell_x = area.x + (x / 2.0).round().min(f64::from(area.width - 1)) as u16;
                let cell_y = area.y + (y / 4.0).round().min(f64::from(area.height - 1)) as u16;
                let half_w = (radius / 2).max(1) as u16;
                let half_h = (radius / 4).max(1) as u16;
                let rect = Rect::new(
                    cell_x.saturating_sub(half_w),
                    cell_y.saturating_sub(half_h),
                    half_w * 2 + 1,
                    half_h * 2 + 1,
                );
                frame.register_hit(rect, id, HitRegion::Content, index as u64);
            }
        }

        painter.render(area, frame, Style::new());
    }
}
