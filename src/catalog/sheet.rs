//! Price sheet CSV parsing

use super::types::{Catalog, CatalogError, PriceSheet};

const ITEM_COLUMN: &str = "Item";
const PRICE_COLUMN: &str = "Price";
// The live sheet names its computed column this way
const ADJUSTED_PRICE_COLUMN: &str = "AdjustedPrice";

/// Parse the sheet export into a catalog.
///
/// The export may open with a banner line (`Money Supply: 15000`) before the
/// header row. Any price that isn't a non-negative integer rejects the whole
/// sheet.
pub fn parse_price_sheet(text: &str) -> Result<PriceSheet, CatalogError> {
    let text = text.trim_start_matches('\u{feff}');
    let (banner, body) = split_banner(text);
    let money_supply = banner.and_then(parse_money_supply);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| CatalogError::Parse(e.to_string()))?
        .clone();
    let item_col = headers
        .iter()
        .position(|h| h == ITEM_COLUMN)
        .ok_or_else(|| CatalogError::Parse(format!("missing '{}' column", ITEM_COLUMN)))?;
    let price_col = headers
        .iter()
        .position(|h| h == PRICE_COLUMN)
        .or_else(|| headers.iter().position(|h| h == ADJUSTED_PRICE_COLUMN))
        .ok_or_else(|| CatalogError::Parse(format!("missing '{}' column", PRICE_COLUMN)))?;

    let mut catalog = Catalog::new();
    for record in reader.records() {
        let record = record.map_err(|e| CatalogError::Parse(e.to_string()))?;
        let name = record.get(item_col).unwrap_or_default();
        if name.is_empty() {
            continue;
        }

        let raw_price = record.get(price_col).unwrap_or_default();
        let price = raw_price.parse::<u32>().map_err(|_| {
            CatalogError::Parse(format!("invalid price {:?} for {}", raw_price, name))
        })?;
        catalog.insert(name, price);
    }

    if catalog.is_empty() {
        return Err(CatalogError::Parse("no priced items".to_string()));
    }

    Ok(PriceSheet {
        catalog,
        money_supply,
    })
}

/// Split off the first line unless it is already the header row
fn split_banner(text: &str) -> (Option<&str>, &str) {
    let (first, rest) = match text.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (text, ""),
    };

    let is_header = first.split(',').any(|cell| cell.trim().trim_matches('"') == ITEM_COLUMN);
    if is_header {
        (None, text)
    } else {
        (Some(first), rest)
    }
}

fn parse_money_supply(banner: &str) -> Option<u64> {
    banner
        .trim_end_matches(|c: char| c == ',' || c.is_whitespace())
        .split_whitespace()
        .last()
        .and_then(|token| token.trim_matches('"').parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row() {
        let sheet = parse_price_sheet("Item,Price\nDiamond,50\n").unwrap();
        assert_eq!(sheet.catalog.len(), 1);
        assert_eq!(sheet.catalog.price("Diamond"), Some(50));
        assert_eq!(sheet.money_supply, None);
    }

    #[test]
    fn test_banner_and_extra_columns() {
        let csv = "Money Supply: 15000,,\nItem,BasePrice,AdjustedPrice\nDiamond,40,52\nIron,18,21\r\n";
        let sheet = parse_price_sheet(csv).unwrap();

        assert_eq!(sheet.money_supply, Some(15000));
        assert_eq!(sheet.catalog.price("Diamond"), Some(52));
        assert_eq!(sheet.catalog.price("Iron"), Some(21));
    }

    #[test]
    fn test_price_column_preferred_over_adjusted() {
        let sheet = parse_price_sheet("Item,AdjustedPrice,Price\nGold,99,30\n").unwrap();
        assert_eq!(sheet.catalog.price("Gold"), Some(30));
    }

    #[test]
    fn test_bad_price_rejects_sheet() {
        let result = parse_price_sheet("Item,Price\nDiamond,50\nIron,lots\n");
        assert!(matches!(result, Err(CatalogError::Parse(_))));

        let result = parse_price_sheet("Item,Price\nDiamond,-5\n");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_blank_item_rows_skipped() {
        let sheet = parse_price_sheet("Item,Price\n,\nDirt, 1 \n").unwrap();
        assert_eq!(sheet.catalog.len(), 1);
        assert_eq!(sheet.catalog.price("Dirt"), Some(1));
    }

    #[test]
    fn test_missing_columns() {
        assert!(parse_price_sheet("Name,Cost\nDiamond,50\n").is_err());
        assert!(parse_price_sheet("Item,Cost\nDiamond,50\n").is_err());
        assert!(parse_price_sheet("").is_err());
        assert!(parse_price_sheet("Item,Price\n").is_err());
    }
}
