#![forbid(unsafe_code)]

//! Supply Chain screen: the plain tree explorer.
//!
//! No alert overlay here: the screen answers "what is this product made
//! of and who makes it", with a Component/Manufacturer view toggle.
//! Switching views re-initializes the collapse state: each view is a fresh
//! rendering surface over the same fetched data.

use std::cell::RefCell;
use std::sync::Arc;

use tracing::debug;

use chainscope_core::event::{Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
use chainscope_core::geometry::Rect;
use chainscope_layout::TreeLayout;
use chainscope_model::{FetchError, HierarchyNode, NodeId, RawNode, RiskDataSource};
use chainscope_render::{Frame, HitGrid, HitId, Style};
use chainscope_runtime::Cmd;
use chainscope_widgets::Widget;
use chainscope_widgets::adapter::ViewMode;
use chainscope_widgets::block::Block;
use chainscope_widgets::tooltip::Tooltip;
use chainscope_widgets::tree_view::{TreeHit, TreeView};

use super::{HelpEntry, Screen};
use crate::catalog::{CatalogSelector, Selection};
use crate::theme;

const TREE_HIT: HitId = HitId::new(1);

/// Background fetch results.
pub enum SupplyChainMsg {
    HierarchyLoaded {
        generation: u64,
        result: Result<RawNode, FetchError>,
    },
}

#[derive(Default)]
struct ViewCache {
    grid: Option<HitGrid>,
    layout: TreeLayout,
}

pub struct SupplyChainScreen {
    source: Arc<dyn RiskDataSource>,
    selector: CatalogSelector,
    /// The fetched snapshot, kept so a view switch can rebuild collapse
    /// state from scratch.
    raw: Option<RawNode>,
    tree: Option<HierarchyNode>,
    mode: ViewMode,
    query_label: String,
    loading: Option<String>,
    error: Option<String>,
    generation: u64,
    hovered: Option<NodeId>,
    pointer: (u16, u16),
    tick: u64,
    cache: RefCell<ViewCache>,
}

impl SupplyChainScreen {
    pub fn new(source: Arc<dyn RiskDataSource>, selector: CatalogSelector) -> Self {
        Self {
            source,
            selector,
            raw: None,
            tree: None,
            mode: ViewMode::Component,
            query_label: String::new(),
            loading: None,
            error: None,
            generation: 0,
            hovered: None,
            pointer: (0, 0),
            tick: 0,
            cache: RefCell::new(ViewCache::default()),
        }
    }

    fn begin_fetch(&mut self, selection: Selection) -> Cmd<SupplyChainMsg> {
        self.generation += 1;
        let generation = self.generation;
        self.error = None;
        self.hovered = None;
        self.query_label = format!("{} {}", selection.product, selection.manufacturer);
        self.loading = Some(format!("Loading network for {} …", self.query_label));
        let source = Arc::clone(&self.source);
        Cmd::task(move || SupplyChainMsg::HierarchyLoaded {
            generation,
            result: source.fetch_hierarchy(&selection.product, &selection.manufacturer),
        })
    }

    fn clear(&mut self) {
        self.generation += 1;
        self.raw = None;
        self.tree = None;
        self.mode = ViewMode::Component;
        self.query_label.clear();
        self.loading = None;
        self.error = None;
        self.hovered = None;
        self.selector.clear();
    }

    fn toggle_view_mode(&mut self) {
        if let Some(raw) = &self.raw {
            self.mode = self.mode.toggled();
            // A fresh rendering surface: collapse state resets to default.
            self.tree = Some(HierarchyNode::initialize(raw.clone()));
            self.hovered = None;
        }
    }

    fn on_mouse(&mut self, mouse: &MouseEvent) {
        self.pointer = (mouse.x, mouse.y);
        let cache = self.cache.borrow();
        let Some(grid) = &cache.grid else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Moved => {
                let hit = TreeView::resolve(grid, mouse.x, mouse.y, TREE_HIT);
                self.hovered = hit.map(|hit| match hit {
                    TreeHit::Row(i) | TreeHit::Marker(i) => cache.layout.nodes[i].id.clone(),
                });
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(TreeHit::Row(i) | TreeHit::Marker(i)) =
                    TreeView::resolve(grid, mouse.x, mouse.y, TREE_HIT)
                {
                    let id = cache.layout.nodes[i].id.clone();
                    drop(cache);
                    if let Some(tree) = &mut self.tree {
                        tree.toggle(&id);
                    }
                }
            }
            _ => {}
        }
    }
}

impl Screen for SupplyChainScreen {
    type Message = SupplyChainMsg;

    fn handle_event(&mut self, event: &Event) -> Cmd<SupplyChainMsg> {
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
                    KeyCode::Enter if self.loading.is_none() => match self.selector.selection() {
                        Some(selection) => self.begin_fetch(selection),
                        None => Cmd::none(),
                    },
                    KeyCode::Char('c') => {
                        self.clear();
                        Cmd::none()
                    }
                    KeyCode::Char('v') => {
                        self.toggle_view_mode();
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

    fn apply(&mut self, msg: SupplyChainMsg) -> Cmd<SupplyChainMsg> {
        let SupplyChainMsg::HierarchyLoaded { generation, result } = msg;
        if generation != self.generation {
            debug!(generation, latest = self.generation, "stale hierarchy response dropped");
            return Cmd::none();
        }
        self.loading = None;
        match result {
            Ok(raw) => {
                self.tree = Some(HierarchyNode::initialize(raw.clone()));
                self.raw = Some(raw);
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.raw = None;
                self.tree = None;
            }
        }
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.height < 4 {
            return;
        }
        self.selector
            .render_line(Rect::new(area.x + 1, area.y, area.width - 1, 1), frame);
        let body = Rect::new(area.x, area.y + 1, area.width, area.height - 1);

        let title = if self.query_label.is_empty() {
            "Supply Chain".to_string()
        } else {
            format!("{} Network — {} View", self.query_label, self.mode.label())
        };
        Block::new()
            .title(title)
            .border_style(theme::border())
            .title_style(theme::panel_title())
            .render(body, frame);
        let inner = Block::inner(body);
        if inner.is_empty() {
            return;
        }

        let mut layout = TreeLayout::default();
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
        } else if let Some(tree) = &self.tree {
            let (w, h) = TreeView::layout_extent(inner);
            layout = TreeLayout::compute(tree, w, h);
            TreeView::new(&layout)
                .with_mode(self.mode)
                .hit_id(TREE_HIT)
                .render(inner, frame);
        } else {
            frame.buffer.set_string(
                inner.x + 1,
                inner.y + inner.height / 2,
                "Select a category, product, and manufacturer, then press Enter.",
                Style::new().fg(theme::fg::MUTED),
                inner.right(),
            );
        }

        if let Some(id) = &self.hovered
            && let Some(node) = layout.node(id)
        {
            let subtitle = if node.manufacturer_key.is_empty() {
                "Component".to_string()
            } else {
                node.manufacturer_key.clone()
            };
            Tooltip::new(format!("Material: {}", node.name))
                .subtitle(subtitle)
                .render_at(self.pointer, frame);
        }

        self.cache.replace(ViewCache {
            grid: Some(frame.hits().clone()),
            layout,
        });
    }

    fn title(&self) -> &'static str {
        "Supply Chain"
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry {
                key: "←→↑↓",
                action: "select product",
            },
            HelpEntry {
                key: "Enter",
                action: "apply",
            },
            HelpEntry {
                key: "v",
                action: "toggle view",
            },
            HelpEntry {
                key: "c",
                action: "clear",
            },
            HelpEntry {
                key: "click",
                action: "expand/collapse",
            },
        ]
    }
}
