//! Active item and quantity input

use crate::catalog::Catalog;

/// Parse a quantity field: ASCII digits only, value above zero
pub fn parse_quantity(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<u32>().ok().filter(|&qty| qty > 0)
}

/// Render `$price × qty = $total`, degrading to a zero quantity on bad input
pub fn compute_total(unit_price: u32, quantity_text: &str) -> String {
    match parse_quantity(quantity_text) {
        Some(qty) => format!(
            "${} × {} = ${}",
            unit_price,
            qty,
            u64::from(unit_price) * u64::from(qty)
        ),
        None => format!("${} × 0 = $0", unit_price),
    }
}

/// What the user has picked so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    active_item: Option<String>,
    pub quantity_text: String,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, item: &str) {
        self.active_item = Some(item.to_string());
    }

    /// Drop the active item. The quantity text is left as typed.
    pub fn clear(&mut self) {
        self.active_item = None;
    }

    /// Start over: no item and an empty quantity
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn active_item(&self) -> Option<&str> {
        self.active_item.as_deref()
    }

    pub fn is_selected(&self, item: &str) -> bool {
        self.active_item.as_deref() == Some(item)
    }

    /// Label text for the running total
    pub fn display_total(&self, catalog: &Catalog) -> String {
        match self.active_item().and_then(|item| catalog.price(item)) {
            Some(price) => format!("Total: {}", compute_total(price, &self.quantity_text)),
            None => "Total: $0".to_string(),
        }
    }
}
