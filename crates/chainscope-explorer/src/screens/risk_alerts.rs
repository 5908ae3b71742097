#![forbid(unsafe_code)]

//! Risk Alerts screen: the supply-chain risk explorer.
//!
//! Two contexts drive the visualization column:
//!
//! - **Global** (initial): the hotspot map over globally scoped alerts.
//! - **SupplyChain**: the risk tree for an analyzed product, entered after
//!   the two-step fetch (hierarchy, then alerts for every manufacturer key
//!   found in it) succeeds far enough to have a hierarchy.
//!
//! The alert feed on the right mirrors hover focus: hovering a tree node
//! narrows the feed to that node's directly bound alerts; leaving reverts
//! to the context's full set. Every fetch carries a generation token and
//! responses from superseded generations are dropped, so a slow response
//! for an earlier selection can never overwrite a newer one.

use std::cell::RefCell;
use std::sync::Arc;

use tracing::{debug, info};

use chainscope_core::event::{Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
use chainscope_core::geometry::Rect;
use chainscope_layout::TreeLayout;
use chainscope_model::{
    Alert, FetchError, HierarchyNode, NodeId, RawNode, RiskDataSource, RiskOverlay, TreeSnapshot,
};
use chainscope_render::{Frame, HitGrid, HitId, Style};
use chainscope_runtime::Cmd;
use chainscope_widgets::adapter::severity_color;
use chainscope_widgets::alert_feed::AlertFeed;
use chainscope_widgets::block::Block;
use chainscope_widgets::map_view::MapView;
use chainscope_widgets::tooltip::Tooltip;
use chainscope_widgets::tree_view::{TreeHit, TreeView};
use chainscope_widgets::Widget;

use super::{HelpEntry, Screen, split_columns};
use crate::catalog::{CatalogSelector, Selection};
use crate::theme;

const TREE_HIT: HitId = HitId::new(1);
const MAP_HIT: HitId = HitId::new(2);

const FEED_WIDTH: u16 = 34;

/// Which alert set the feed falls back to when nothing is hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FeedContext {
    #[default]
    Global,
    SupplyChain,
}

/// Background fetch results.
pub enum RiskAlertsMsg {
    HierarchyLoaded {
        generation: u64,
        result: Result<RawNode, FetchError>,
    },
    AlertsLoaded {
        generation: u64,
        result: Result<Vec<Alert>, FetchError>,
    },
}

/// Geometry the last `view` produced, consulted by mouse handling.
#[derive(Default)]
struct ViewCache {
    grid: Option<HitGrid>,
    layout: TreeLayout,
}

pub struct RiskAlertsScreen {
    source: Arc<dyn RiskDataSource>,
    selector: CatalogSelector,
    context: FeedContext,
    global_alerts: Vec<Alert>,
    supplier_alerts: Vec<Alert>,
    hierarchy: Option<HierarchyNode>,
    overlay: RiskOverlay,
    /// Product name shown in the panel title while analyzing.
    product_label: String,
    loading: Option<String>,
    error: Option<String>,
    notice: Option<String>,
    generation: u64,
    hovered: Option<NodeId>,
    hovered_hotspot: Option<usize>,
    pointer: (u16, u16),
    tick: u64,
    cache: RefCell<ViewCache>,
}

impl RiskAlertsScreen {
    /// Create the screen; the global alert list is pre-loaded, no fetch.
    pub fn new(source: Arc<dyn RiskDataSource>, selector: CatalogSelector) -> Self {
        let global_alerts = source.global_alerts();
        Self {
            source,
            selector,
            context: FeedContext::Global,
            global_alerts,
            supplier_alerts: Vec::new(),
            hierarchy: None,
            overlay: RiskOverlay::default(),
            product_label: String::new(),
            loading: None,
            error: None,
            notice: None,
            generation: 0,
            hovered: None,
            hovered_hotspot: None,
            pointer: (0, 0),
            tick: 0,
            cache: RefCell::new(ViewCache::default()),
        }
    }

    fn begin_analysis(&mut self, selection: Selection) -> Cmd<RiskAlertsMsg> {
        self.generation += 1;
        let generation = self.generation;
        self.error = None;
        self.notice = None;
        self.hovered = None;
        self.loading = Some(format!(
            "Fetching hierarchy for {} {} …",
            selection.product, selection.manufacturer
        ));
        info!(product = %selection.product, manufacturer = %selection.manufacturer, generation, "supply-chain analysis started");
        let source = Arc::clone(&self.source);
        Cmd::task(move || RiskAlertsMsg::HierarchyLoaded {
            generation,
            result: source.fetch_hierarchy(&selection.product, &selection.manufacturer),
        })
    }

    fn clear_to_global(&mut self) {
        // Invalidate any in-flight response as well.
        self.generation += 1;
        self.context = FeedContext::Global;
        self.hierarchy = None;
        self.supplier_alerts.clear();
        self.overlay = RiskOverlay::default();
        self.product_label.clear();
        self.loading = None;
        self.error = None;
        self.notice = None;
        self.hovered = None;
        self.hovered_hotspot = None;
        self.selector.clear();
    }

    fn recompute_overlay(&mut self) {
        if let Some(tree) = &mut self.hierarchy {
            let snapshot = TreeSnapshot::capture(tree);
            self.overlay = RiskOverlay::compute(&snapshot, &self.supplier_alerts);
            self.overlay.apply(tree);
        } else {
            self.overlay = RiskOverlay::default();
        }
    }

    /// The feed's alert set: the hovered node's directly bound alerts, or
    /// the active context's full set.
    fn displayed_alerts(&self) -> Vec<&Alert> {
        if self.context == FeedContext::SupplyChain
            && let Some(id) = &self.hovered
        {
            return self
                .overlay
                .bound_alerts(id)
                .iter()
                .map(|&i| &self.supplier_alerts[i])
                .collect();
        }
        match self.context {
            FeedContext::Global => self.global_alerts.iter().collect(),
            FeedContext::SupplyChain => self.supplier_alerts.iter().collect(),
        }
    }

    fn on_mouse(&mut self, mouse: &MouseEvent) {
        self.pointer = (mouse.x, mouse.y);
        let cache = self.cache.borrow();
        let Some(grid) = &cache.grid else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Moved => match self.context {
                FeedContext::SupplyChain => {
                    let hit = TreeView::resolve(grid, mouse.x, mouse.y, TREE_HIT);
                    self.hovered = hit.map(|hit| match hit {
                        TreeHit::Row(i) | TreeHit::Marker(i) => cache.layout.nodes[i].id.clone(),
                    });
                }
                FeedContext::Global => {
                    self.hovered_hotspot = MapView::resolve(grid, mouse.x, mouse.y, MAP_HIT);
                }
            },
            MouseEventKind::Down(MouseButton::Left) => {
                if self.context == FeedContext::SupplyChain
                    && let Some(TreeHit::Row(i) | TreeHit::Marker(i)) =
                        TreeView::resolve(grid, mouse.x, mouse.y, TREE_HIT)
                {
                    let id = cache.layout.nodes[i].id.clone();
                    drop(cache);
                    if let Some(tree) = &mut self.hierarchy {
                        tree.toggle(&id);
                    }
                }
            }
            _ => {}
        }
    }

    fn render_visualization(&self, area: Rect, frame: &mut Frame) -> TreeLayout {
        let title = match self.context {
            FeedContext::Global => "Global Hotspots".to_string(),
            FeedContext::SupplyChain => format!("Risk Analysis — {}", self.product_label),
        };
        Block::new()
            .title(title)
            .border_style(theme::border())
            .title_style(theme::panel_title())
            .render(area, frame);
        let inner = Block::inner(area);
        let mut layout = TreeLayout::default();
        if inner.is_empty() {
            return layout;
        }
        if let Some(message) = &self.loading {
            let text = format!("{} {message}", theme::spinner_frame(self.tick));
            frame.buffer.set_string(
                inner.x + 1,
                inner.y + inner.height / 2,
                &text,
                Style::new().fg(theme::fg::MUTED),
                inner.right(),
            );
        } else if let Some(error) = &self.error {
            frame.buffer.set_string(
                inner.x + 1,
                inner.y + inner.height / 2,
                error,
                Style::new().fg(theme::accent::ERROR),
                inner.right(),
            );
        } else {
            match (self.context, &self.hierarchy) {
                (FeedContext::SupplyChain, Some(tree)) => {
                    let (w, h) = TreeView::layout_extent(inner);
                    layout = TreeLayout::compute(tree, w, h);
                    TreeView::new(&layout)
                        .with_overlay(&self.overlay)
                        .hit_id(TREE_HIT)
                        .render(inner, frame);
                }
                _ => {
                    MapView::new(&self.global_alerts)
                        .hit_id(MAP_HIT)
                        .render(inner, frame);
                }
            }
        }

        layout
    }

    fn render_tooltip(&self, layout: &TreeLayout, frame: &mut Frame) {
        match self.context {
            FeedContext::SupplyChain => {
                let Some(id) = &self.hovered else {
                    return;
                };
                let Some(node) = layout.node(id) else {
                    return;
                };
                let subtitle = if node.manufacturer_key.is_empty() {
                    "Component".to_string()
                } else {
                    node.manufacturer_key.clone()
                };
                let mut tooltip = Tooltip::new(node.name.clone()).subtitle(subtitle);
                let bound = self.overlay.bound_alerts(id);
                if bound.is_empty() {
                    tooltip = tooltip.line(
                        "No specific alerts for this supplier.",
                        Style::new().fg(theme::fg::MUTED),
                    );
                } else {
                    for &i in bound {
                        let alert = &self.supplier_alerts[i];
                        tooltip = tooltip.line(
                            format!(
                                "{} ({}): {}",
                                alert.category,
                                alert.risk_level.label(),
                                alert.details
                            ),
                            Style::new().fg(severity_color(alert.risk_level.severity())),
                        );
                    }
                }
                tooltip.render_at(self.pointer, frame);
            }
            FeedContext::Global => {
                let Some(index) = self.hovered_hotspot else {
                    return;
                };
                let Some(alert) = self.global_alerts.get(index) else {
                    return;
                };
                Tooltip::new(alert.location.clone())
                    .line(
                        format!("Risk: {}", alert.risk_level.label()),
                        Style::new().fg(severity_color(alert.risk_level.severity())),
                    )
                    .line(
                        format!("Type: {}", alert.category),
                        Style::new().fg(theme::fg::TEXT),
                    )
                    .line(alert.details.clone(), Style::new().fg(theme::fg::MUTED))
                    .render_at(self.pointer, frame);
            }
        }
    }
}

impl Screen for RiskAlertsScreen {
    type Message = RiskAlertsMsg;

    fn handle_event(&mut self, event: &Event) -> Cmd<RiskAlertsMsg> {
        match event {
            Event::Tick => {
                self.tick += 1;
                Cmd::none()
            }
            Event::Key(key) => {
                if self.selector.handle_key(key) {
                    return Cmd::none();
                }
                match key.code {
                    KeyCode::Enter if self.loading.is_none() => {
                        match self.selector.selection() {
                            Some(selection) => self.begin_analysis(selection),
                            None => Cmd::none(),
                        }
                    }
                    KeyCode::Char('c') => {
                        self.clear_to_global();
                        Cmd::none()
                    }
                    _ => Cmd::none(),
                }
            }
            Event::Mouse(mouse) => {
                self.on_mouse(mouse);
                Cmd::none()
            }
            Event::Resize { .. } => Cmd::none(),
        }
    }

    fn apply(&mut self, msg: RiskAlertsMsg) -> Cmd<RiskAlertsMsg> {
        match msg {
            RiskAlertsMsg::HierarchyLoaded { generation, result } => {
                if generation != self.generation {
                    debug!(generation, latest = self.generation, "stale hierarchy response dropped");
                    return Cmd::none();
                }
                match result {
                    Ok(raw) => {
                        let tree = HierarchyNode::initialize(raw);
                        let keys = tree.manufacturer_keys();
                        self.product_label = tree.name.clone();
                        self.hierarchy = Some(tree);
                        self.supplier_alerts.clear();
                        self.recompute_overlay();
                        if keys.is_empty() {
                            self.context = FeedContext::SupplyChain;
                            self.loading = None;
                            self.notice = Some(
                                "No manufacturers found in this supply chain; hierarchy shown without alerts."
                                    .to_string(),
                            );
                            Cmd::none()
                        } else {
                            self.loading =
                                Some(format!("Analyzing risks for {} suppliers …", keys.len()));
                            let source = Arc::clone(&self.source);
                            Cmd::task(move || RiskAlertsMsg::AlertsLoaded {
                                generation,
                                result: source.fetch_alerts_for_manufacturers(&keys),
                            })
                        }
                    }
                    Err(err) => {
                        self.loading = None;
                        self.error = Some(err.to_string());
                        Cmd::none()
                    }
                }
            }
            RiskAlertsMsg::AlertsLoaded { generation, result } => {
                if generation != self.generation {
                    debug!(generation, latest = self.generation, "stale alert response dropped");
                    return Cmd::none();
                }
                self.loading = None;
                self.context = FeedContext::SupplyChain;
                match result {
                    Ok(alerts) => {
                        self.supplier_alerts = alerts;
                        self.recompute_overlay();
                        self.notice = if self.supplier_alerts.is_empty() {
                            Some("No active alerts for these suppliers.".to_string())
                        } else {
                            None
                        };
                    }
                    Err(err) => {
                        // The hierarchy stays visible with zero risk; the
                        // failure surfaces only in the alert-dependent
                        // regions.
                        self.supplier_alerts.clear();
                        self.recompute_overlay();
                        self.notice =
                            Some(format!("Alert fetch failed: {err}. Risk coloring unavailable."));
                    }
                }
                Cmd::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.height < 4 {
            return;
        }
        self.selector
            .render_line(Rect::new(area.x + 1, area.y, area.width - 1, 1), frame);
        let body = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
        let (viz, feed) = split_columns(body, FEED_WIDTH);

        let layout = self.render_visualization(viz, frame);

        Block::new()
            .title("Alerts Feed")
            .border_style(theme::border())
            .title_style(theme::panel_title())
            .render(feed, frame);
        let mut widget = AlertFeed::new(self.displayed_alerts());
        if let Some(notice) = &self.notice {
            widget = widget.notice(notice);
        }
        widget.render(Block::inner(feed), frame);

        // The tooltip paints last so it floats over both columns.
        self.render_tooltip(&layout, frame);
        self.cache.replace(ViewCache {
            grid: Some(frame.hits().clone()),
            layout,
        });
    }

    fn title(&self) -> &'static str {
        "Risk Alerts"
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry {
                key: "←→↑↓",
                action: "select product",
            },
            HelpEntry {
                key: "Enter",
                action: "analyze supply chain",
            },
            HelpEntry {
                key: "c",
                action: "show global view",
            },
            HelpEntry {
                key: "click",
                action: "expand/collapse",
            },
        ]
    }
}
