pub mod classify;
pub mod columns;
pub mod header;
pub mod values;

use crate::error::ObraError;
use crate::model::{Extraction, ExtractionWarning, RawSheet};
use classify::{classify_rows, is_candidate};
use columns::{project_rows, BudgetRow};
use header::{locate_header, CONCEPT_MARKER, ID_MARKER};

/// Extract budget items from one sheet.
///
/// Locates the header row, projects the required columns, keeps rows whose
/// code looks like a section or item, and folds them into item records.
pub fn extract_sheet(sheet: &RawSheet, sheet_name: &str) -> Result<Extraction, ObraError> {
    let header_row = locate_header(sheet, &[ID_MARKER, CONCEPT_MARKER])?;
    tracing::debug!(sheet = sheet_name, header_row, "header located");

    let rows = project_rows(sheet, header_row)?;
    let candidates: Vec<&BudgetRow> = rows.iter().filter(|r| is_candidate(r)).collect();
    tracing::debug!(
        data_rows = rows.len(),
        candidates = candidates.len(),
        "rows pre-filtered"
    );

    let mut warnings = Vec::new();
    if let Some(warning) = trailing_data_warning(&rows, &candidates) {
        tracing::warn!(row = ?warning.row, "{}", warning.message);
        warnings.push(warning);
    }

    let items = classify_rows(candidates.iter().copied())?;
    if items.is_empty() {
        return Err(ObraError::NoItems);
    }

    for item in items.iter().take(10) {
        tracing::debug!(
            section = %item.section,
            description = %item.description,
            unit = %item.unit,
            quantity = %item.quantity,
            price = %item.price,
            "item"
        );
    }

    Ok(Extraction {
        sheet: sheet_name.to_string(),
        items,
        warnings,
    })
}

/// Diagnostic only: the sheet has rows after the last row that passed the
/// code filter (totals, notes, signatures).
fn trailing_data_warning(
    rows: &[BudgetRow],
    candidates: &[&BudgetRow],
) -> Option<ExtractionWarning> {
    let last_candidate = candidates.last()?.index;
    let last_row = rows.last()?.index;
    if last_candidate >= last_row {
        return None;
    }
    Some(ExtractionWarning {
        row: Some(last_candidate),
        message: format!(
            "additional data after the last valid row ({} trailing row(s) ignored)",
            last_row - last_candidate
        ),
    })
}
