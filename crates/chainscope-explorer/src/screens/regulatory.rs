#![forbid(unsafe_code)]

//! Regulatory screen: tree with node selection and regulation lookup.
//!
//! Clicking a node's marker glyph selects it for detail; clicking anywhere
//! else on the row toggles collapse. The marker registers its hit region
//! after the row, so the marker always claims the click and selection and
//! expand/collapse never double-fire on the same node.

use std::cell::RefCell;
use std::sync::Arc;

use tracing::debug;

use chainscope_core::event::{Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
use chainscope_core::geometry::Rect;
use chainscope_layout::TreeLayout;
use chainscope_model::{
    FetchError, HierarchyNode, NodeId, RawNode, RegulationSet, RiskDataSource,
};
use chainscope_render::{Frame, HitGrid, HitId, Style};
use chainscope_runtime::Cmd;
use chainscope_widgets::Widget;
use chainscope_widgets::block::Block;
use chainscope_widgets::regulations::{RegulationsContent, RegulationsPanel, location_display};
use chainscope_widgets::tree_view::{TreeHit, TreeView};

use super::{HelpEntry, Screen, split_columns};
use crate::catalog::{CatalogSelector, Selection};
use crate::theme;

const TREE_HIT: HitId = HitId::new(1);

const PANEL_WIDTH: u16 = 52;

/// Background fetch results.
pub enum RegulatoryMsg {
    HierarchyLoaded {
        generation: u64,
        result: Result<RawNode, FetchError>,
    },
    RegulationsLoaded {
        generation: u64,
        result: Result<RegulationSet, FetchError>,
    },
}

/// Lifecycle of the regulation lookup for the selected node.
#[derive(Debug, Clone, Default)]
enum RegulationsState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Loaded(RegulationSet),
}

#[derive(Default)]
struct ViewCache {
    grid: Option<HitGrid>,
    layout: TreeLayout,
}

pub struct RegulatoryScreen {
    source: Arc<dyn RiskDataSource>,
    selector: CatalogSelector,
    tree: Option<HierarchyNode>,
    loading: Option<String>,
    error: Option<String>,
    generation: u64,
    selected: Option<NodeId>,
    regulations: RegulationsState,
    reg_generation: u64,
    tick: u64,
    cache: RefCell<ViewCache>,
}

impl RegulatoryScreen {
    pub fn new(source: Arc<dyn RiskDataSource>, selector: CatalogSelector) -> Self {
        Self {
            source,
            selector,
            tree: None,
            loading: None,
            error: None,
            generation: 0,
            selected: None,
            regulations: RegulationsState::Idle,
            reg_generation: 0,
            tick: 0,
            cache: RefCell::new(ViewCache::default()),
        }
    }

    fn begin_fetch(&mut self, selection: Selection) -> Cmd<RegulatoryMsg> {
        self.generation += 1;
        let generation = self.generation;
        self.error = None;
        self.selected = None;
        self.regulations = RegulationsState::Idle;
        self.loading = Some(format!(
            "Loading supply chain for {} {} …",
            selection.product, selection.manufacturer
        ));
        let source = Arc::clone(&self.source);
        Cmd::task(move || RegulatoryMsg::HierarchyLoaded {
            generation,
            result: source.fetch_hierarchy(&selection.product, &selection.manufacturer),
        })
    }

    fn begin_regulation_lookup(&mut self) -> Cmd<RegulatoryMsg> {
        let Some((material, location)) = self.selected_material_location() else {
            return Cmd::none();
        };
        self.reg_generation += 1;
        let generation = self.reg_generation;
        self.regulations = RegulationsState::Loading;
        let source = Arc::clone(&self.source);
        Cmd::task(move || RegulatoryMsg::RegulationsLoaded {
            generation,
            result: source.fetch_regulations(&material, &location),
        })
    }

    fn selected_material_location(&self) -> Option<(String, String)> {
        let tree = self.tree.as_ref()?;
        let node = tree.find(self.selected.as_ref()?)?;
        Some((node.name.clone(), node.manufacturer_key.clone()))
    }

    fn clear(&mut self) {
        self.generation += 1;
        self.reg_generation += 1;
        self.tree = None;
        self.loading = None;
        self.error = None;
        self.selected = None;
        self.regulations = RegulationsState::Idle;
        self.selector.clear();
    }

    fn on_mouse(&mut self, mouse: &MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let cache = self.cache.borrow();
        let Some(grid) = &cache.grid else {
            return;
        };
        match TreeView::resolve(grid, mouse.x, mouse.y, TREE_HIT) {
            Some(TreeHit::Marker(i)) => {
                // The marker claims the click: select for detail, never
                // toggle.
                let id = cache.layout.nodes[i].id.clone();
                drop(cache);
                self.selected = Some(id);
                self.regulations = RegulationsState::Idle;
            }
            Some(TreeHit::Row(i)) => {
                let id = cache.layout.nodes[i].id.clone();
                drop(cache);
                if let Some(tree) = &mut self.tree {
                    tree.toggle(&id);
                }
            }
            None => {}
        }
    }
}

impl Screen for RegulatoryScreen {
    type Message = RegulatoryMsg;

    fn handle_event(&mut self, event: &Event) -> Cmd<RegulatoryMsg> {
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
                    KeyCode::Char('r') => {
                        if matches!(self.regulations, RegulationsState::Loading) {
                            Cmd::none()
                        } else {
                            self.begin_regulation_lookup()
                        }
                    }
                    KeyCode::Char('c') => {
                        self.clear();
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

    fn apply(&mut self, msg: RegulatoryMsg) -> Cmd<RegulatoryMsg> {
        match msg {
            RegulatoryMsg::HierarchyLoaded { generation, result } => {
                if generation != self.generation {
                    debug!(generation, latest = self.generation, "stale hierarchy response dropped");
                    return Cmd::none();
                }
                self.loading = None;
                match result {
                    Ok(raw) => {
                        self.tree = Some(HierarchyNode::initialize(raw));
                    }
                    Err(err) => {
                        self.error = Some(err.to_string());
                        self.tree = None;
                    }
                }
                Cmd::none()
            }
            RegulatoryMsg::RegulationsLoaded { generation, result } => {
                if generation != self.reg_generation {
                    debug!(generation, latest = self.reg_generation, "stale regulation response dropped");
                    return Cmd::none();
                }
                self.regulations = match result {
                    Ok(set) => RegulationsState::Loaded(set),
                    Err(_) => RegulationsState::Error(
                        "Could not load regulations. The service may be temporarily unavailable."
                            .to_string(),
                    ),
                };
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
        let (viz, panel) = split_columns(body, PANEL_WIDTH);

        Block::new()
            .title("Supply Chain")
            .border_style(theme::border())
            .title_style(theme::panel_title())
            .render(viz, frame);
        let inner = Block::inner(viz);

        let mut layout = TreeLayout::default();
        if inner.is_empty() {
            // Nothing to draw, but the panel still renders below.
        } else if let Some(message) = &self.loading {
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
            let mut view = TreeView::new(&layout)
                .hit_id(TREE_HIT)
                .with_marker_hits(true);
            if let Some(selected) = &self.selected {
                view = view.with_selected(selected);
            }
            view.render(inner, frame);
        } else {
            frame.buffer.set_string(
                inner.x + 1,
                inner.y + inner.height / 2,
                "Select a product and manufacturer to check regulations.",
                Style::new().fg(theme::fg::MUTED),
                inner.right(),
            );
        }

        Block::new()
            .title("Regulatory Information")
            .border_style(theme::border())
            .title_style(theme::panel_title())
            .render(panel, frame);
        let panel_inner = Block::inner(panel);
        let content = match &self.regulations {
            RegulationsState::Idle => RegulationsContent::Idle,
            RegulationsState::Loading => RegulationsContent::Loading,
            RegulationsState::Error(message) => RegulationsContent::Error(message),
            RegulationsState::Loaded(set) => RegulationsContent::Loaded(set),
        };
        let selection = self.selected_material_location();
        let mut widget = RegulationsPanel::new(content);
        if let Some((material, location)) = &selection {
            widget = widget.selection(material, location_display(location));
        }
        widget.render(panel_inner, frame);

        self.cache.replace(ViewCache {
            grid: Some(frame.hits().clone()),
            layout,
        });
    }

    fn title(&self) -> &'static str {
        "Regulatory"
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
                key: "click marker",
                action: "select node",
            },
            HelpEntry {
                key: "r",
                action: "show regulations",
            },
            HelpEntry {
                key: "c",
                action: "clear",
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainscope_model::Regulation;
    use std::collections::{BTreeMap, BTreeSet};

    struct StubSource;

    fn raw(name: &str, manufacturer: &str, children: Vec<RawNode>) -> RawNode {
        RawNode {
            name: name.into(),
            manufacturer: manufacturer.into(),
            children,
        }
    }

    impl RiskDataSource for StubSource {
        fn fetch_hierarchy(&self, _: &str, _: &str) -> Result<RawNode, FetchError> {
            Ok(raw("P", "", vec![]))
        }
        fn fetch_alerts_for_manufacturers(
            &self,
            _: &BTreeSet<String>,
        ) -> Result<Vec<chainscope_model::Alert>, FetchError> {
            Ok(Vec::new())
        }
        fn fetch_regulations(
            &self,
            _: &str,
            _: &str,
        ) -> Result<RegulationSet, FetchError> {
            Ok(Default::default())
        }
        fn global_alerts(&self) -> Vec<chainscope_model::Alert> {
            Vec::new()
        }
    }

    fn screen() -> RegulatoryScreen {
        RegulatoryScreen::new(Arc::new(StubSource), CatalogSelector::new(BTreeMap::new()))
    }

    fn selection() -> Selection {
        Selection {
            product: "Paracetamol".into(),
            manufacturer: "Medichem".into(),
        }
    }

    fn loaded_screen() -> RegulatoryScreen {
        let mut screen = screen();
        let _ = screen.begin_fetch(selection());
        let _ = screen.apply(RegulatoryMsg::HierarchyLoaded {
            generation: screen.generation,
            result: Ok(raw(
                "Paracetamol",
                "",
                vec![raw("4-Aminophenol", "Medichem_Mumbai", vec![])],
            )),
        });
        screen
    }

    fn sample_set() -> RegulationSet {
        RegulationSet {
            location_regulations: vec![Regulation {
                id: "r1".into(),
                jurisdiction: "IN".into(),
                regulation: "D&C Rules".into(),
                details: "Record keeping".into(),
                link: String::new(),
            }],
            global_regulations: Vec::new(),
        }
    }

    #[test]
    fn selection_yields_material_and_location() {
        let mut screen = loaded_screen();
        screen.selected = Some(NodeId::root().child(0));
        assert_eq!(
            screen.selected_material_location(),
            Some(("4-Aminophenol".to_string(), "Medichem_Mumbai".to_string()))
        );
    }

    #[test]
    fn regulation_lookup_without_selection_is_noop() {
        let mut screen = loaded_screen();
        let _ = screen.begin_regulation_lookup();
        assert!(matches!(screen.regulations, RegulationsState::Idle));
    }

    #[test]
    fn regulation_results_land_for_current_generation() {
        let mut screen = loaded_screen();
        screen.selected = Some(NodeId::root().child(0));
        let _ = screen.begin_regulation_lookup();
        assert!(matches!(screen.regulations, RegulationsState::Loading));
        let _ = screen.apply(RegulatoryMsg::RegulationsLoaded {
            generation: screen.reg_generation,
            result: Ok(sample_set()),
        });
        assert!(matches!(screen.regulations, RegulationsState::Loaded(_)));
    }

    #[test]
    fn stale_regulation_results_are_dropped() {
        let mut screen = loaded_screen();
        screen.selected = Some(NodeId::root().child(0));
        let _ = screen.begin_regulation_lookup();
        let stale = screen.reg_generation;
        let _ = screen.begin_regulation_lookup();
        let _ = screen.apply(RegulatoryMsg::RegulationsLoaded {
            generation: stale,
            result: Ok(sample_set()),
        });
        assert!(matches!(screen.regulations, RegulationsState::Loading));
    }

    #[test]
    fn regulation_failure_surfaces_in_panel_only() {
        let mut screen = loaded_screen();
        screen.selected = Some(NodeId::root().child(0));
        let _ = screen.begin_regulation_lookup();
        let _ = screen.apply(RegulatoryMsg::RegulationsLoaded {
            generation: screen.reg_generation,
            result: Err(FetchError::Unreachable("down".into())),
        });
        assert!(matches!(screen.regulations, RegulationsState::Error(_)));
        assert!(screen.tree.is_some());
        assert!(screen.error.is_none());
    }

    #[test]
    fn new_hierarchy_clears_selection_and_regulations() {
        let mut screen = loaded_screen();
        screen.selected = Some(NodeId::root().child(0));
        screen.regulations = RegulationsState::Loaded(sample_set());
        let _ = screen.begin_fetch(selection());
        assert!(screen.selected.is_none());
        assert!(matches!(screen.regulations, RegulationsState::Idle));
    }

    #[test]
    fn view_renders_tree_and_panel() {
        let screen = loaded_screen();
        let mut frame = Frame::new(120, 32);
        screen.view(&mut frame, Rect::new(0, 0, 120, 32));
        let mut text = String::new();
        for y in 0..32 {
            for x in 0..120 {
                text.push(frame.buffer.get(x, y).unwrap().ch);
            }
            text.push('\n');
        }
        assert!(text.contains("Supply Chain"));
        assert!(text.contains("Regulatory Information"));
        assert!(text.contains("Select a node marker"));
    }
}
