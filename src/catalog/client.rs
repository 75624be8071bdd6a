use std::time::Duration;

use super::sheet::parse_price_sheet;
use super::types::{Catalog, CatalogError, CatalogLoad, CatalogOrigin};

/// Anything that can hand back the raw price sheet export.
/// Loads run on a worker thread.
pub trait PriceSource: Send + Sync {
    fn fetch_csv(&self) -> Result<String, CatalogError>;
}

/// Blocking client for the spreadsheet CSV export
pub struct SheetClient {
    export_url: String,
    agent: ureq::Agent,
}

impl SheetClient {
    pub fn new(sheet_id: &str, timeout: Duration) -> Self {
        Self::with_url(&export_url(sheet_id), timeout)
    }

    pub fn with_url(export_url: &str, timeout: Duration) -> Self {
        Self {
            export_url: export_url.to_string(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn export_url(&self) -> &str {
        &self.export_url
    }
}

impl PriceSource for SheetClient {
    fn fetch_csv(&self) -> Result<String, CatalogError> {
        let response = self.agent.get(&self.export_url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => CatalogError::Status(code),
            other => CatalogError::Network(other.to_string()),
        })?;

        response
            .into_string()
            .map_err(|e| CatalogError::Network(e.to_string()))
    }
}

/// CSV export URL for a spreadsheet id
pub fn export_url(sheet_id: &str) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{}/export?format=csv",
        sheet_id
    )
}

/// Fetch and parse the price sheet, falling back to the built-in table on
/// any failure. Never fails.
pub fn load_catalog(source: &dyn PriceSource) -> CatalogLoad {
    match source.fetch_csv().and_then(|text| parse_price_sheet(&text)) {
        Ok(sheet) => {
            log::info!(
                "Prices fetched: {}",
                sheet
                    .catalog
                    .iter()
                    .map(|(name, price)| format!("{}={}", name, price))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            CatalogLoad {
                catalog: sheet.catalog,
                money_supply: sheet.money_supply,
                origin: CatalogOrigin::Remote,
            }
        }
        Err(e) => {
            log::warn!("Error fetching price sheet, using built-in prices: {}", e);
            CatalogLoad {
                catalog: Catalog::fallback(),
                money_supply: None,
                origin: CatalogOrigin::Fallback,
            }
        }
    }
}
