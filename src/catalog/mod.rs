pub mod types;
mod client;
mod sheet;
mod stats;

pub use client::{export_url, load_catalog, PriceSource, SheetClient};
pub use sheet::parse_price_sheet;
pub use stats::CatalogStats;
pub use types::{Catalog, CatalogError, CatalogLoad, CatalogOrigin, PriceSheet};
