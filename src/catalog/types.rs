use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Sheet request failed with status {0}")]
    Status(u16),
    #[error("Malformed price sheet: {0}")]
    Parse(String),
}

/// Item name -> unit price for the current session.
///
/// Keeps the row order of the sheet since that is the order the shop lays
/// its buttons out in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    prices: IndexMap<String, u32>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in table used whenever the sheet can't be loaded
    pub fn fallback() -> Self {
        let mut catalog = Self::new();
        catalog.insert("Diamond", 50);
        catalog.insert("Iron", 20);
        catalog.insert("Dirt", 1);
        catalog.insert("Gold", 30);
        catalog
    }

    /// Insert or reprice an item. A repeated name keeps its first position.
    pub fn insert(&mut self, name: &str, price: u32) {
        match self.prices.get_mut(name) {
            Some(existing) => *existing = price,
            None => {
                self.prices.insert(name.to_string(), price);
            }
        }
    }

    pub fn price(&self, name: &str) -> Option<u32> {
        self.prices.get(name).copied()
    }

    /// Items in sheet order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.prices.iter().map(|(name, price)| (name.as_str(), *price))
    }

    /// Cheapest and dearest unit price
    pub fn price_range(&self) -> Option<(u32, u32)> {
        let min = self.prices.values().min()?;
        let max = self.prices.values().max()?;
        Some((*min, *max))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Where the catalog in a [`CatalogLoad`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    Remote,
    Fallback,
}

/// Result of one catalog load
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    /// Server money supply from the sheet banner line, if it has one
    pub money_supply: Option<u64>,
    pub origin: CatalogOrigin,
}

/// Parsed contents of the sheet export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSheet {
    pub catalog: Catalog,
    pub money_supply: Option<u64>,
}
