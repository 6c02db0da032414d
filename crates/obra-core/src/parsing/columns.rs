use crate::error::ObraError;
use crate::model::{Cell, RawSheet};
use crate::parsing::header::{CONCEPT_MARKER, ID_MARKER};

pub const UNIT_COLUMN: &str = "UT";
pub const QUANTITY_COLUMN: &str = "CANT.";
pub const PRICE_COLUMN: &str = "PRECIO UNIT.";

/// The five columns the extractor reads, in projection order.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    ID_MARKER,
    CONCEPT_MARKER,
    UNIT_COLUMN,
    QUANTITY_COLUMN,
    PRICE_COLUMN,
];

/// A data row reduced to the required columns.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRow {
    /// Absolute row index in the sheet.
    pub index: usize,
    pub id: Cell,
    pub concept: Cell,
    pub unit: Cell,
    pub quantity: Cell,
    pub price: Cell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    id: usize,
    concept: usize,
    unit: usize,
    quantity: usize,
    price: usize,
}

/// Use `header_row` as column names and project every row below it onto
/// the required columns.
pub fn project_rows(sheet: &RawSheet, header_row: usize) -> Result<Vec<BudgetRow>, ObraError> {
    let names: Vec<Option<String>> = sheet
        .rows
        .get(header_row)
        .map(|row| row.iter().map(Cell::to_text).collect())
        .unwrap_or_default();

    let find = |wanted: &str| -> Result<usize, ObraError> {
        names
            .iter()
            .position(|n| n.as_deref() == Some(wanted))
            .ok_or_else(|| ObraError::MissingColumn(wanted.to_string()))
    };

    let map = ColumnMap {
        id: find(ID_MARKER)?,
        concept: find(CONCEPT_MARKER)?,
        unit: find(UNIT_COLUMN)?,
        quantity: find(QUANTITY_COLUMN)?,
        price: find(PRICE_COLUMN)?,
    };

    let rows = (header_row + 1..sheet.row_count())
        .map(|index| BudgetRow {
            index,
            id: sheet.get(index, map.id).clone(),
            concept: sheet.get(index, map.concept).clone(),
            unit: sheet.get(index, map.unit).clone(),
            quantity: sheet.get(index, map.quantity).clone(),
            price: sheet.get(index, map.price).clone(),
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<Cell> {
        names.iter().map(|s| Cell::from(*s)).collect()
    }

    #[test]
    fn projects_columns_in_any_order() {
        let sheet = RawSheet::new(vec![
            header(&["PRECIO UNIT.", "OBS", "CANT.", "UT", "CONCEPTO", "Nº"]),
            vec![
                Cell::Number(10.0),
                Cell::from("ignorar"),
                Cell::Number(2.0),
                Cell::from("m2"),
                Cell::from("Revoque"),
                Cell::from("A.1"),
            ],
        ]);

        let rows = project_rows(&sheet, 0).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.index, 1);
        assert_eq!(row.id, Cell::from("A.1"));
        assert_eq!(row.concept, Cell::from("Revoque"));
        assert_eq!(row.unit, Cell::from("m2"));
        assert_eq!(row.quantity, Cell::Number(2.0));
        assert_eq!(row.price, Cell::Number(10.0));
    }

    #[test]
    fn short_rows_read_as_empty() {
        let sheet = RawSheet::new(vec![
            header(&REQUIRED_COLUMNS),
            vec![Cell::from("A"), Cell::from("Estructura")],
        ]);
        let rows = project_rows(&sheet, 0).unwrap();
        assert!(rows[0].unit.is_empty());
        assert!(rows[0].price.is_empty());
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let sheet = RawSheet::new(vec![header(&["Nº", "CONCEPTO", "UT", "CANT."])]);
        let err = project_rows(&sheet, 0).unwrap_err();
        assert!(matches!(err, ObraError::MissingColumn(ref c) if c == "PRECIO UNIT."));
    }

    #[test]
    fn duplicate_column_uses_first() {
        let sheet = RawSheet::new(vec![
            header(&["Nº", "CONCEPTO", "UT", "CANT.", "PRECIO UNIT.", "CONCEPTO"]),
            header(&["A", "primero", "", "", "", "segundo"]),
        ]);
        let rows = project_rows(&sheet, 0).unwrap();
        assert_eq!(rows[0].concept, Cell::from("primero"));
    }
}
