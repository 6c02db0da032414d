use obra_core::error::ObraError;
use obra_core::ExtractOptions;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    sheet: Option<String>,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), ObraError> {
    let bytes = std::fs::read(&input_file)?;
    let options = ExtractOptions { sheet };
    let extraction = obra_core::extract_items(&bytes, &options)?;

    for w in &extraction.warnings {
        match w.row {
            Some(row) => eprintln!("  warning (row {}): {}", row + 1, w.message),
            None => eprintln!("  warning: {}", w.message),
        }
    }

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            std::fs::write(&path, output::json::items_json(&extraction.items)?)?;
            eprintln!(
                "Extracted {} item(s) from '{}', written to {}",
                extraction.items.len(),
                extraction.sheet,
                path.display()
            );
        }
        None => {
            let text = match output_format {
                "json" => output::json::items_json(&extraction.items)?,
                _ => output::table::format_extraction(&extraction),
            };
            println!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path().join("nope.xlsx"), None, "table", None).unwrap_err();
        assert!(matches!(err, ObraError::Io(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn garbage_workbook_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("budget.xlsx");
        let out = dir.path().join("items.json");
        std::fs::write(&input, b"not a workbook").unwrap();

        let err = run(input, None, "json", Some(out.clone())).unwrap_err();
        assert!(matches!(err, ObraError::Workbook(_)));
        assert!(!out.exists());
    }
}
