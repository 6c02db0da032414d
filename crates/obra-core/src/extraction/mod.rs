pub mod workbook;

use crate::error::ObraError;
use crate::model::RawSheet;

/// A sheet read out of a workbook, with the name it was found under.
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    pub name: String,
    pub sheet: RawSheet,
}

/// Trait for workbook reading backends.
pub trait WorkbookSource {
    /// Names of the sheets in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Read a named sheet into a `RawSheet`.
    fn read_sheet(&mut self, name: &str) -> Result<RawSheet, ObraError>;
}

/// Pick a sheet from the workbook: the named one, or the first.
///
/// A workbook without sheets is rejected before anything is parsed.
pub fn load_sheet(
    source: &mut dyn WorkbookSource,
    requested: Option<&str>,
) -> Result<LoadedSheet, ObraError> {
    let names = source.sheet_names();
    let name = match requested {
        Some(wanted) => names
            .into_iter()
            .find(|n| n == wanted)
            .ok_or_else(|| ObraError::SheetNotFound(wanted.to_string()))?,
        None => names.into_iter().next().ok_or(ObraError::EmptySheetSet)?,
    };

    tracing::debug!(sheet = %name, "reading sheet");
    let sheet = source.read_sheet(&name)?;
    Ok(LoadedSheet { name, sheet })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    struct MockWorkbook {
        sheets: Vec<(String, RawSheet)>,
    }

    impl WorkbookSource for MockWorkbook {
        fn sheet_names(&self) -> Vec<String> {
            self.sheets.iter().map(|(n, _)| n.clone()).collect()
        }

        fn read_sheet(&mut self, name: &str) -> Result<RawSheet, ObraError> {
            self.sheets
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, s)| s.clone())
                .ok_or_else(|| ObraError::SheetNotFound(name.into()))
        }
    }

    fn sheet_with(marker: &str) -> RawSheet {
        RawSheet::new(vec![vec![Cell::from(marker)]])
    }

    #[test]
    fn no_sheets_is_empty_sheet_set() {
        let mut wb = MockWorkbook { sheets: vec![] };
        let err = load_sheet(&mut wb, None).unwrap_err();
        assert!(matches!(err, ObraError::EmptySheetSet));
    }

    #[test]
    fn defaults_to_first_sheet() {
        let mut wb = MockWorkbook {
            sheets: vec![
                ("Presupuesto".into(), sheet_with("first")),
                ("Resumen".into(), sheet_with("second")),
            ],
        };
        let loaded = load_sheet(&mut wb, None).unwrap();
        assert_eq!(loaded.name, "Presupuesto");
        assert_eq!(loaded.sheet.get(0, 0), &Cell::from("first"));
    }

    #[test]
    fn named_sheet_is_selected() {
        let mut wb = MockWorkbook {
            sheets: vec![
                ("Presupuesto".into(), sheet_with("first")),
                ("Resumen".into(), sheet_with("second")),
            ],
        };
        let loaded = load_sheet(&mut wb, Some("Resumen")).unwrap();
        assert_eq!(loaded.sheet.get(0, 0), &Cell::from("second"));
    }

    #[test]
    fn unknown_sheet_name_fails() {
        let mut wb = MockWorkbook {
            sheets: vec![("Presupuesto".into(), sheet_with("first"))],
        };
        let err = load_sheet(&mut wb, Some("Otra")).unwrap_err();
        assert!(matches!(err, ObraError::SheetNotFound(ref n) if n == "Otra"));
    }
}
