use chrono::NaiveTime;

use super::types::Catalog;

/// Summary line shown under the shop header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub items: usize,
    pub price_range: Option<(u32, u32)>,
    /// Local time of the last successful sheet load; `None` while on
    /// built-in prices
    pub last_update: Option<NaiveTime>,
}

impl CatalogStats {
    pub fn new(catalog: &Catalog, last_update: Option<NaiveTime>) -> Self {
        Self {
            items: catalog.len(),
            price_range: catalog.price_range(),
            last_update,
        }
    }

    pub fn summary(&self) -> String {
        let (min, max) = self.price_range.unwrap_or((0, 0));
        let updated = match self.last_update {
            Some(time) => time.format("%H:%M:%S").to_string(),
            None => "Never".to_string(),
        };
        format!("Items: {} | Range: ${} - ${} | Updated: {}", self.items, min, max, updated)
    }
}
