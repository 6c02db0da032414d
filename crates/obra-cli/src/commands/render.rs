use obra_core::error::ObraError;
use std::path::PathBuf;

pub fn run(input_file: PathBuf, output_file: Option<PathBuf>) -> Result<(), ObraError> {
    let json = std::fs::read(&input_file)?;
    let cert = obra_core::parse_certificate(&json)?;
    let rendered = obra_core::render_certificate(&cert)?;

    let path = output_file.unwrap_or_else(|| PathBuf::from(&rendered.filename));
    std::fs::write(&path, &rendered.bytes)?;
    eprintln!(
        "Certificate for '{}' ({} item(s), {} page(s)), written to {}",
        cert.project.name,
        rendered.totals.lines.len(),
        rendered.pages,
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CERTIFICATE: &str = r#"{
        "Project": {
            "name": "Centro de Salud",
            "projectNumber": 118,
            "address": "Belgrano 450",
            "description": "Refacción integral"
        },
        "version": 1,
        "certificateAmount": 250.0,
        "issuedAt": "2024-03-15T12:30:00Z",
        "certificateItems": [
            {
                "item": {
                    "section": "Instalaciones",
                    "description": "Tablero seccional",
                    "unit": "u",
                    "quantity": 1,
                    "price": 500
                },
                "progress": 50
            }
        ]
    }"#;

    #[test]
    fn writes_pdf_to_requested_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cert.json");
        let out = dir.path().join("cert.pdf");
        std::fs::write(&input, CERTIFICATE).unwrap();

        run(input, Some(out.clone())).unwrap();

        let bytes = std::fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn incomplete_payload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cert.json");
        let out = dir.path().join("cert.pdf");
        std::fs::write(&input, r#"{"version": "1"}"#).unwrap();

        let err = run(input, Some(out.clone())).unwrap_err();
        assert!(matches!(err, ObraError::RenderFieldMissing(_)));
        assert!(!out.exists());
    }
}
