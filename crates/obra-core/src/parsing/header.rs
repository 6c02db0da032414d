use crate::error::ObraError;
use crate::model::RawSheet;

/// Label of the item code column.
pub const ID_MARKER: &str = "Nº";
/// Label of the description column.
pub const CONCEPT_MARKER: &str = "CONCEPTO";

/// Find the header row: the first row, top to bottom, in which every marker
/// appears as a text cell value.
pub fn locate_header(sheet: &RawSheet, markers: &[&str]) -> Result<usize, ObraError> {
    sheet
        .rows
        .iter()
        .position(|row| {
            markers
                .iter()
                .all(|marker| row.iter().any(|cell| cell.as_text() == Some(*marker)))
        })
        .ok_or_else(|| ObraError::HeaderNotFound {
            markers: markers.iter().map(|m| m.to_string()).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    fn sheet(rows: &[&[&str]]) -> RawSheet {
        RawSheet::new(
            rows.iter()
                .map(|r| r.iter().map(|s| Cell::from(*s)).collect())
                .collect(),
        )
    }

    #[test]
    fn finds_header_below_title_block() {
        let s = sheet(&[
            &["PRESUPUESTO GENERAL"],
            &["Obra: Escuela 12", "", ""],
            &[],
            &["Nº", "CONCEPTO", "UT", "CANT.", "PRECIO UNIT."],
            &["A", "Trabajos preliminares"],
        ]);
        assert_eq!(locate_header(&s, &[ID_MARKER, CONCEPT_MARKER]).unwrap(), 3);
    }

    #[test]
    fn first_matching_row_wins() {
        let s = sheet(&[
            &["CONCEPTO", "Nº"],
            &["Nº", "CONCEPTO"],
        ]);
        assert_eq!(locate_header(&s, &[ID_MARKER, CONCEPT_MARKER]).unwrap(), 0);
    }

    #[test]
    fn markers_split_across_rows_do_not_count() {
        let s = sheet(&[&["Nº", "x"], &["y", "CONCEPTO"]]);
        let err = locate_header(&s, &[ID_MARKER, CONCEPT_MARKER]).unwrap_err();
        assert!(matches!(err, ObraError::HeaderNotFound { .. }));
    }

    #[test]
    fn match_is_exact() {
        let s = sheet(&[&["Nº ", "Concepto"]]);
        assert!(locate_header(&s, &[ID_MARKER, CONCEPT_MARKER]).is_err());
    }

    #[test]
    fn empty_sheet_has_no_header() {
        let s = RawSheet::default();
        assert!(matches!(
            locate_header(&s, &[ID_MARKER, CONCEPT_MARKER]),
            Err(ObraError::HeaderNotFound { .. })
        ));
    }
}
