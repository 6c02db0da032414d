pub mod certificate;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;

use certificate::{Certificate, RenderedCertificate};
use error::ObraError;
use extraction::workbook::CalamineWorkbook;
use extraction::WorkbookSource;
use model::{Extraction, RawSheet};

/// Options for budget extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Sheet to read. Defaults to the first sheet in the workbook.
    pub sheet: Option<String>,
}

/// Main API entry point: extract budget items from workbook bytes.
///
/// The format (xlsx, xls, xlsb, ods) is detected from the bytes. Either the
/// whole sheet extracts or an error is returned; there are no partial results.
pub fn extract_items(bytes: &[u8], options: &ExtractOptions) -> Result<Extraction, ObraError> {
    let mut workbook = CalamineWorkbook::from_bytes(bytes)?;
    extract_from_workbook(&mut workbook, options)
}

/// Extract from any workbook backend.
pub fn extract_from_workbook(
    source: &mut dyn WorkbookSource,
    options: &ExtractOptions,
) -> Result<Extraction, ObraError> {
    let loaded = extraction::load_sheet(source, options.sheet.as_deref())?;
    extract_from_sheet(&loaded.sheet, &loaded.name)
}

/// Extract from an already loaded sheet.
pub fn extract_from_sheet(sheet: &RawSheet, sheet_name: &str) -> Result<Extraction, ObraError> {
    let extraction = parsing::extract_sheet(sheet, sheet_name)?;
    tracing::info!(
        sheet = sheet_name,
        items = extraction.items.len(),
        warnings = extraction.warnings.len(),
        "budget extracted"
    );
    Ok(extraction)
}

/// Parse and validate a certificate payload (JSON).
pub fn parse_certificate(json: &[u8]) -> Result<Certificate, ObraError> {
    Certificate::from_json(json)
}

/// Render a certificate to PDF.
pub fn render_certificate(cert: &Certificate) -> Result<RenderedCertificate, ObraError> {
    let rendered = certificate::render(cert)?;
    tracing::info!(
        file = %rendered.filename,
        pages = rendered.pages,
        total = %rendered.totals.total,
        "certificate rendered"
    );
    Ok(rendered)
}
