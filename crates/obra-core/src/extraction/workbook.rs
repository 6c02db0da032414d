use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::error::ObraError;
use crate::extraction::WorkbookSource;
use crate::model::{Cell, RawSheet};

/// Workbook backend over calamine. Format (xlsx, xls, xlsb, ods) is sniffed
/// from the bytes.
pub struct CalamineWorkbook {
    inner: Sheets<Cursor<Vec<u8>>>,
}

impl CalamineWorkbook {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ObraError> {
        let cursor = Cursor::new(bytes.to_vec());
        let inner = open_workbook_auto_from_rs(cursor)
            .map_err(|e| ObraError::Workbook(format!("failed to open workbook: {e}")))?;
        Ok(Self { inner })
    }
}

impl WorkbookSource for CalamineWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawSheet, ObraError> {
        let range = self
            .inner
            .worksheet_range(name)
            .map_err(|e| ObraError::Workbook(format!("failed to read sheet '{name}': {e}")))?;
        Ok(range_to_sheet(&range))
    }
}

/// Convert a calamine range into a `RawSheet` with absolute indices.
///
/// calamine trims leading empty rows and columns; they are padded back so
/// row numbers in diagnostics match what the user sees in the sheet.
pub fn range_to_sheet(range: &Range<Data>) -> RawSheet {
    let Some((start_row, start_col)) = range.start() else {
        return RawSheet::default();
    };

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col as usize];
        cells.extend(row.iter().map(cell_from_data));
        rows.push(cells);
    }
    RawSheet::new(rows)
}

fn cell_from_data(cell: &Data) -> Cell {
    match cell {
        Data::String(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Empty => Cell::Empty,
        // Booleans, dates and error cells keep their display form
        _ => Cell::Text(format!("{cell}")),
    }
}
