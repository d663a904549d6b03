use crate::core::model::{HumanCapitalEdit, HumanCapitalLineItem, ServiceEdit, ServiceLineItem};
use crate::utils::error::{BudgetError, Result};
use regex::Regex;
use rust_decimal::Decimal;

pub const DESCRIPTION_COL: &str = "Description";
pub const QUANTITY_COL: &str = "Quantity";
pub const UNIT_COST_COL: &str = "Unit Cost USD";
pub const TOTAL_COST_COL: &str = "Total Cost USD";
pub const AMOUNT_COL: &str = "Amount USD";

/// Best-effort numeric coercion for a human-capital amount cell. Currency
/// symbols and thousands separators are stripped before parsing; anything
/// that still fails to parse is missing, not zero and not an error.
pub fn coerce_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalizer = Regex::new(r"[$,\s]").unwrap();
    let normalized = normalizer.replace_all(trimmed, "");
    normalized.parse::<Decimal>().ok()
}

/// Decodes a "Services and Products" sheet into typed line items. The stored
/// Total Cost column is display-only and ignored; totals are recomputed from
/// quantity and unit cost so the derived-field invariant holds from load.
pub fn decode_service_sheet(sheet: &str, bytes: &[u8]) -> Result<Vec<ServiceLineItem>> {
    let rows = decode_service_rows(sheet, bytes)?;
    Ok(rows.into_iter().map(ServiceLineItem::from).collect())
}

/// Decodes an edited services sheet as submitted through the editing
/// surface. The surface owns the numeric >= 0 constraint, so violations
/// surface as rejected submissions rather than workbook decode failures.
pub fn decode_service_edits(sheet: &str, bytes: &[u8]) -> Result<Vec<ServiceEdit>> {
    match decode_service_rows(sheet, bytes) {
        Ok(rows) => Ok(rows),
        Err(err @ BudgetError::RowDecodeError { .. }) => Err(BudgetError::ValidationError {
            message: err.to_string(),
        }),
        Err(other) => Err(other),
    }
}

fn decode_service_rows(sheet: &str, bytes: &[u8]) -> Result<Vec<ServiceEdit>> {
    let (headers, records) = read_rows(bytes)?;
    warn_unexpected_columns(
        sheet,
        &headers,
        &[DESCRIPTION_COL, QUANTITY_COL, UNIT_COST_COL, TOTAL_COST_COL],
    );

    let description_idx = column_index(sheet, &headers, DESCRIPTION_COL)?;
    let quantity_idx = column_index(sheet, &headers, QUANTITY_COL)?;
    let unit_cost_idx = column_index(sheet, &headers, UNIT_COST_COL)?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        // 1-based row number, counting the header row
        let row = i + 2;
        let description = cell(record, description_idx).to_string();
        let quantity = parse_quantity(sheet, row, cell(record, quantity_idx))?;
        let unit_cost = parse_unit_cost(sheet, row, cell(record, unit_cost_idx))?;
        rows.push(ServiceEdit {
            description,
            quantity,
            unit_cost,
        });
    }

    tracing::debug!("Decoded {} service rows from sheet '{}'", rows.len(), sheet);
    Ok(rows)
}

/// Decodes a "Human Capital and Operations" sheet, coercing the amount
/// column immediately so aggregation is well-defined from the start.
pub fn decode_human_capital_sheet(sheet: &str, bytes: &[u8]) -> Result<Vec<HumanCapitalLineItem>> {
    let rows = decode_human_capital_edits(sheet, bytes)?;
    Ok(rows
        .into_iter()
        .map(|row| HumanCapitalLineItem {
            amount_usd: coerce_amount(&row.amount),
            description: row.description,
        })
        .collect())
}

/// Decodes an edited human-capital sheet, keeping amounts as raw text so the
/// coercion policy applies at aggregation time.
pub fn decode_human_capital_edits(sheet: &str, bytes: &[u8]) -> Result<Vec<HumanCapitalEdit>> {
    let (headers, records) = read_rows(bytes)?;
    warn_unexpected_columns(sheet, &headers, &[DESCRIPTION_COL, AMOUNT_COL]);

    let description_idx = column_index(sheet, &headers, DESCRIPTION_COL)?;
    let amount_idx = column_index(sheet, &headers, AMOUNT_COL)?;

    let rows: Vec<HumanCapitalEdit> = records
        .iter()
        .map(|record| HumanCapitalEdit {
            description: cell(record, description_idx).to_string(),
            amount: cell(record, amount_idx).to_string(),
        })
        .collect();

    tracing::debug!(
        "Decoded {} human-capital rows from sheet '{}'",
        rows.len(),
        sheet
    );
    Ok(rows)
}

fn read_rows(bytes: &[u8]) -> Result<(Vec<String>, Vec<csv::StringRecord>)> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }

    Ok((headers, records))
}

fn column_index(sheet: &str, headers: &[String], column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| BudgetError::MissingColumnError {
            sheet: sheet.to_string(),
            column: column.to_string(),
        })
}

fn warn_unexpected_columns(sheet: &str, headers: &[String], expected: &[&str]) {
    for header in headers {
        if !expected.contains(&header.as_str()) {
            tracing::warn!("Sheet '{}': ignoring unexpected column '{}'", sheet, header);
        }
    }
}

fn cell<'a>(record: &'a csv::StringRecord, index: usize) -> &'a str {
    record.get(index).unwrap_or("")
}

fn parse_quantity(sheet: &str, row: usize, raw: &str) -> Result<u32> {
    raw.parse::<u32>().map_err(|_| BudgetError::RowDecodeError {
        sheet: sheet.to_string(),
        row,
        reason: format!("quantity must be a non-negative integer, got '{}'", raw),
    })
}

fn parse_unit_cost(sheet: &str, row: usize, raw: &str) -> Result<Decimal> {
    let value = raw
        .parse::<Decimal>()
        .map_err(|_| BudgetError::RowDecodeError {
            sheet: sheet.to_string(),
            row,
            reason: format!("unit cost must be a number, got '{}'", raw),
        })?;

    if value.is_sign_negative() {
        return Err(BudgetError::RowDecodeError {
            sheet: sheet.to_string(),
            row,
            reason: format!("unit cost must not be negative, got '{}'", raw),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SERVICES: &str = "Services and Products";
    const HUMAN_CAPITAL: &str = "Human Capital and Operations";

    #[test]
    fn test_coerce_amount_accepts_plain_numbers() {
        assert_eq!(coerce_amount("500"), Some(dec!(500)));
        assert_eq!(coerce_amount(" 42.5 "), Some(dec!(42.5)));
        assert_eq!(coerce_amount("0"), Some(dec!(0)));
    }

    #[test]
    fn test_coerce_amount_strips_currency_formatting() {
        assert_eq!(coerce_amount("$1,234.50"), Some(dec!(1234.50)));
        assert_eq!(coerce_amount("$ 900"), Some(dec!(900)));
    }

    #[test]
    fn test_coerce_amount_maps_failures_to_missing() {
        assert_eq!(coerce_amount("abc"), None);
        assert_eq!(coerce_amount(""), None);
        assert_eq!(coerce_amount("   "), None);
        assert_eq!(coerce_amount("TBD"), None);
    }

    #[test]
    fn test_decode_service_sheet_recomputes_totals() {
        // Stored total is tampered; the decoded item must not inherit it
        let bytes =
            b"Description,Quantity,Unit Cost USD,Total Cost USD\nHosting,2,10.00,999.99\n";
        let items = decode_service_sheet(SERVICES, bytes).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description(), "Hosting");
        assert_eq!(items[0].quantity(), 2);
        assert_eq!(items[0].total_cost(), dec!(20.00));
    }

    #[test]
    fn test_decode_service_sheet_without_total_column() {
        let bytes = b"Description,Quantity,Unit Cost USD\nHosting,2,10.00\n";
        let items = decode_service_sheet(SERVICES, bytes).unwrap();
        assert_eq!(items[0].total_cost(), dec!(20.00));
    }

    #[test]
    fn test_decode_service_sheet_ignores_unexpected_columns() {
        let bytes = b"Description,Quantity,Unit Cost USD,Notes\nHosting,1,5.00,internal\n";
        let items = decode_service_sheet(SERVICES, bytes).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].total_cost(), dec!(5.00));
    }

    #[test]
    fn test_decode_service_sheet_missing_column_fails() {
        let bytes = b"Description,Quantity\nHosting,2\n";
        let err = decode_service_sheet(SERVICES, bytes).unwrap_err();
        assert!(matches!(
            err,
            BudgetError::MissingColumnError { ref column, .. } if column == UNIT_COST_COL
        ));
    }

    #[test]
    fn test_decode_service_sheet_rejects_bad_quantity() {
        let bytes = b"Description,Quantity,Unit Cost USD\nHosting,two,10.00\n";
        let err = decode_service_sheet(SERVICES, bytes).unwrap_err();
        assert!(matches!(err, BudgetError::RowDecodeError { row: 2, .. }));
    }

    #[test]
    fn test_decode_service_sheet_rejects_negative_quantity() {
        let bytes = b"Description,Quantity,Unit Cost USD\nHosting,-1,10.00\n";
        assert!(decode_service_sheet(SERVICES, bytes).is_err());
    }

    #[test]
    fn test_decode_service_sheet_rejects_negative_unit_cost() {
        let bytes = b"Description,Quantity,Unit Cost USD\nHosting,1,-10.00\n";
        assert!(decode_service_sheet(SERVICES, bytes).is_err());
    }

    #[test]
    fn test_decode_service_edits_reports_validation_errors() {
        let bytes = b"Description,Quantity,Unit Cost USD\nHosting,-1,10.00\n";
        let err = decode_service_edits(SERVICES, bytes).unwrap_err();
        assert!(matches!(err, BudgetError::ValidationError { .. }));
    }

    #[test]
    fn test_decode_human_capital_sheet_coerces_on_load() {
        let bytes = b"Description,Amount USD\nEngineer,5000\nOffice,TBD\nCloud,\n";
        let items = decode_human_capital_sheet(HUMAN_CAPITAL, bytes).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].amount_usd, Some(dec!(5000)));
        assert_eq!(items[1].amount_usd, None);
        assert_eq!(items[2].amount_usd, None);
    }

    #[test]
    fn test_decode_human_capital_edits_keep_raw_amounts() {
        let bytes = b"Description,Amount USD\nEngineer,abc\n";
        let rows = decode_human_capital_edits(HUMAN_CAPITAL, bytes).unwrap();
        assert_eq!(rows[0].amount, "abc");
    }

    #[test]
    fn test_decode_human_capital_sheet_missing_amount_column_fails() {
        let bytes = b"Description,Cost\nEngineer,5000\n";
        let err = decode_human_capital_sheet(HUMAN_CAPITAL, bytes).unwrap_err();
        assert!(matches!(err, BudgetError::MissingColumnError { .. }));
    }

    #[test]
    fn test_short_rows_read_as_empty_cells() {
        let bytes = b"Description,Amount USD\nEngineer\n";
        let items = decode_human_capital_sheet(HUMAN_CAPITAL, bytes).unwrap();
        assert_eq!(items[0].amount_usd, None);
    }
}
