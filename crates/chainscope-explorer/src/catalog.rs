#![forbid(unsafe_code)]

//! Product catalog and the cascading category → product → manufacturer
//! selector that feeds the Apply action on every screen.

use std::collections::BTreeMap;

use chainscope_core::event::{KeyCode, KeyEvent};
use chainscope_core::geometry::Rect;
use chainscope_render::{Frame, Style};

use crate::theme;

/// Category → product → manufacturers, as shipped by the backend.
pub type Catalog = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Which selector field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Field {
    #[default]
    Category,
    Product,
    Manufacturer,
}

/// A complete product/manufacturer choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub product: String,
    pub manufacturer: String,
}

impl Selection {
    /// The hierarchy query string the backend expects.
    #[must_use]
    pub fn query(&self) -> String {
        format!("{}_{}", self.product, self.manufacturer)
    }
}

/// Keyboard-driven cascading selector.
///
/// Left/Right move between fields; Up/Down cycle the focused field's
/// options. Choosing a category resets the narrower fields, mirroring the
/// cascade in the catalog.
#[derive(Debug, Clone)]
pub struct CatalogSelector {
    catalog: Catalog,
    field: Field,
    category: Option<usize>,
    product: Option<usize>,
    manufacturer: Option<usize>,
}

impl CatalogSelector {
    /// Create a selector over a catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            field: Field::default(),
            category: None,
            product: None,
            manufacturer: None,
        }
    }

    fn categories(&self) -> Vec<&String> {
        self.catalog.keys().collect()
    }

    fn products(&self) -> Vec<&String> {
        match self.category_name() {
            Some(category) => self.catalog[&category].keys().collect(),
            None => Vec::new(),
        }
    }

    fn manufacturers(&self) -> Vec<&String> {
        match (self.category_name(), self.product_name()) {
            (Some(category), Some(product)) => {
                self.catalog[&category][&product].iter().collect()
            }
            _ => Vec::new(),
        }
    }

    fn category_name(&self) -> Option<String> {
        self.category
            .and_then(|i| self.categories().get(i).map(|s| (*s).clone()))
    }

    fn product_name(&self) -> Option<String> {
        self.product
            .and_then(|i| self.products().get(i).map(|s| (*s).clone()))
    }

    fn manufacturer_name(&self) -> Option<String> {
        self.manufacturer
            .and_then(|i| self.manufacturers().get(i).map(|s| (*s).clone()))
    }

    /// The completed selection, when every field is chosen.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        Some(Selection {
            product: self.product_name()?,
            manufacturer: self.manufacturer_name()?,
        })
    }

    /// Reset every field.
    pub fn clear(&mut self) {
        self.field = Field::default();
        self.category = None;
        self.product = None;
        self.manufacturer = None;
    }

    /// Handle a key, returning whether the selector consumed it.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => {
                self.field = match self.field {
                    Field::Category | Field::Product => Field::Category,
                    Field::Manufacturer => Field::Product,
                };
                true
            }
            KeyCode::Right => {
                self.field = match self.field {
                    Field::Category => {
                        if self.category.is_some() {
                            Field::Product
                        } else {
                            Field::Category
                        }
                    }
                    Field::Product | Field::Manufacturer => {
                        if self.product.is_some() {
                            Field::Manufacturer
                        } else {
                            Field::Product
                        }
                    }
                };
                true
            }
            KeyCode::Up => {
                self.cycle(-1);
                true
            }
            KeyCode::Down => {
                self.cycle(1);
                true
            }
            _ => false,
        }
    }

    fn cycle(&mut self, step: i64) {
        let len = match self.field {
            Field::Category => self.categories().len(),
            Field::Product => self.products().len(),
            Field::Manufacturer => self.manufacturers().len(),
        };
        if len == 0 {
            return;
        }
        let index = match self.field {
            Field::Category => &mut self.category,
            Field::Product => &mut self.product,
            Field::Manufacturer => &mut self.manufacturer,
        };
        let next = match *index {
            Some(i) => (i as i64 + step).rem_euclid(len as i64) as usize,
            None => {
                if step >= 0 {
                    0
                } else {
                    len - 1
                }
            }
        };
        *index = Some(next);
        // Narrower choices no longer apply once a broader field moves.
        match self.field {
            Field::Category => {
                self.product = None;
                self.manufacturer = None;
            }
            Field::Product => {
                self.manufacturer = None;
            }
            Field::Manufacturer => {}
        }
    }

    /// Render the selector as one line of labelled fields.
    pub fn render_line(&self, area: Rect, frame: &mut Frame) {
        let fields = [
            ("Category", self.category_name(), Field::Category),
            ("Product", self.product_name(), Field::Product),
            (
                "Manufacturer",
                self.manufacturer_name(),
                Field::Manufacturer,
            ),
        ];
        let mut x = area.x;
        for (label, value, field) in fields {
            let style = if self.field == field {
                theme::tab_active()
            } else {
                theme::tab_inactive()
            };
            let value = value.unwrap_or_else(|| "—".to_string());
            let text = format!("{label}: {value}   ");
            x = frame
                .buffer
                .set_string(x, area.y, &text, style, area.right());
        }
        frame.buffer.set_string(
            x,
            area.y,
            "←→ field  ↑↓ choose",
            Style::new().fg(theme::fg::MUTED).dim(),
            area.right(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainscope_core::event::KeyEvent;

    pub(crate) fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        let mut polymers = BTreeMap::new();
        polymers.insert(
            "Polyethylene".to_string(),
            vec!["AcmeCorp".to_string(), "Borealis".to_string()],
        );
        catalog.insert("Polymers".to_string(), polymers);
        let mut pharma = BTreeMap::new();
        pharma.insert("Paracetamol".to_string(), vec!["Medichem".to_string()]);
        catalog.insert("Pharma".to_string(), pharma);
        catalog
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    #[test]
    fn cascade_selects_down_to_manufacturer() {
        let mut selector = CatalogSelector::new(sample_catalog());
        assert_eq!(selector.selection(), None);
        selector.handle_key(&key(KeyCode::Down)); // first category: "Pharma"
        selector.handle_key(&key(KeyCode::Right));
        selector.handle_key(&key(KeyCode::Down)); // product
        selector.handle_key(&key(KeyCode::Right));
        selector.handle_key(&key(KeyCode::Down)); // manufacturer
        let selection = selector.selection().unwrap();
        assert_eq!(selection.product, "Paracetamol");
        assert_eq!(selection.manufacturer, "Medichem");
        assert_eq!(selection.query(), "Paracetamol_Medichem");
    }

    #[test]
    fn changing_category_resets_narrower_fields() {
        let mut selector = CatalogSelector::new(sample_catalog());
        selector.handle_key(&key(KeyCode::Down));
        selector.handle_key(&key(KeyCode::Right));
        selector.handle_key(&key(KeyCode::Down));
        selector.handle_key(&key(KeyCode::Right));
        selector.handle_key(&key(KeyCode::Down));
        assert!(selector.selection().is_some());

        selector.handle_key(&key(KeyCode::Left));
        selector.handle_key(&key(KeyCode::Left));
        selector.handle_key(&key(KeyCode::Down)); // next category
        assert_eq!(selector.selection(), None);
    }

    #[test]
    fn right_does_not_skip_unset_fields() {
        let mut selector = CatalogSelector::new(sample_catalog());
        selector.handle_key(&key(KeyCode::Right));
        // No category chosen yet: focus must stay on category.
        assert_eq!(selector.field, Field::Category);
    }

    #[test]
    fn cycle_wraps_around() {
        let mut selector = CatalogSelector::new(sample_catalog());
        selector.handle_key(&key(KeyCode::Down)); // "Pharma"
        selector.handle_key(&key(KeyCode::Down)); // "Polymers"
        selector.handle_key(&key(KeyCode::Down)); // wraps back to "Pharma"
        assert_eq!(selector.category_name().as_deref(), Some("Pharma"));
        selector.handle_key(&key(KeyCode::Up));
        assert_eq!(selector.category_name().as_deref(), Some("Polymers"));
    }

    #[test]
    fn clear_resets_everything() {
        let mut selector = CatalogSelector::new(sample_catalog());
        selector.handle_key(&key(KeyCode::Down));
        selector.handle_key(&key(KeyCode::Right));
        selector.handle_key(&key(KeyCode::Down));
        selector.clear();
        assert_eq!(selector.selection(), None);
        assert_eq!(selector.field, Field::Category);
    }

    #[test]
    fn unrelated_keys_are_not_consumed() {
        let mut selector = CatalogSelector::new(sample_catalog());
        assert!(!selector.handle_key(&key(KeyCode::Enter)));
        assert!(!selector.handle_key(&key(KeyCode::Char('x'))));
    }
}
