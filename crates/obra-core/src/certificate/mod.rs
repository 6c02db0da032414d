pub mod format;
pub mod layout;
pub mod payload;
pub mod pdf;
pub mod wrap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ObraError;
use crate::model::ItemRecord;
use crate::parsing::values::round2;
pub use payload::{Certificate, CertificateItem, Project};

/// One table row of the certificate with its computed subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateLine {
    pub item: ItemRecord,
    #[serde(with = "rust_decimal::serde::float")]
    pub progress: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateTotals {
    pub lines: Vec<CertificateLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// The rendered document plus what a caller needs to deliver it.
#[derive(Debug, Clone)]
pub struct RenderedCertificate {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub totals: CertificateTotals,
}

/// subtotal = price × progress / 100, rounded to cents; total = Σ subtotals.
///
/// Subtotals are rounded before summing so the printed column adds up to
/// the printed total. Amounts beyond Decimal's range are an error.
pub fn compute_totals(items: &[CertificateItem]) -> Result<CertificateTotals, ObraError> {
    let hundred = Decimal::ONE_HUNDRED;
    let lines = items
        .iter()
        .enumerate()
        .map(|(i, ci)| {
            let subtotal = ci
                .item
                .price
                .checked_mul(ci.progress)
                .and_then(|v| v.checked_div(hundred))
                .ok_or_else(|| ObraError::AmountOverflow(format!("certificateItems[{i}] subtotal")))?;
            Ok(CertificateLine {
                item: ci.item.clone(),
                progress: ci.progress,
                subtotal: round2(subtotal),
            })
        })
        .collect::<Result<Vec<_>, ObraError>>()?;
    let total = lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.subtotal))
        .ok_or_else(|| ObraError::AmountOverflow("total".into()))?;
    Ok(CertificateTotals { lines, total })
}

/// `certificado_<projectNumber>_v<version>.pdf`, restricted to filename-safe
/// characters.
pub fn filename_hint(cert: &Certificate) -> String {
    let safe = |s: &str| -> String {
        s.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect()
    };
    format!(
        "certificado_{}_v{}.pdf",
        safe(&cert.project.project_number),
        safe(&cert.version)
    )
}

/// Compute totals, lay out and encode the certificate.
pub fn render(cert: &Certificate) -> Result<RenderedCertificate, ObraError> {
    let totals = compute_totals(&cert.items)?;
    tracing::debug!(
        items = totals.lines.len(),
        total = %totals.total,
        "certificate totals computed"
    );

    let laid_out = layout::layout_certificate(cert, &totals);
    let title = format!("{} - {}", layout::TITLE, cert.project.name);
    let bytes = pdf::encode_pdf(&laid_out, &title)?;

    Ok(RenderedCertificate {
        filename: filename_hint(cert),
        bytes,
        pages: laid_out.pages.len(),
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(price: Decimal, progress: Decimal) -> CertificateItem {
        CertificateItem {
            item: ItemRecord {
                section: "Estructura".into(),
                description: "Losa".into(),
                unit: "m2".into(),
                quantity: dec!(1),
                price,
            },
            progress,
        }
    }

    #[test]
    fn subtotals_and_total() {
        let totals = compute_totals(&[item(dec!(100.00), dec!(50)), item(dec!(50.00), dec!(20))]).unwrap();
        assert_eq!(totals.lines[0].subtotal, dec!(50.00));
        assert_eq!(totals.lines[1].subtotal, dec!(10.00));
        assert_eq!(totals.total, dec!(60.00));
    }

    #[test]
    fn total_matches_sum_of_rounded_subtotals() {
        // 33.333.. each; rounding first keeps the column sum and total equal
        let items = vec![item(dec!(100), dec!(33.3333)); 3];
        let totals = compute_totals(&items).unwrap();
        let column: Decimal = totals.lines.iter().map(|l| l.subtotal).sum();
        assert_eq!(totals.lines[0].subtotal, dec!(33.33));
        assert_eq!(totals.total, column);
        assert_eq!(totals.total, dec!(99.99));
    }

    #[test]
    fn no_items_totals_zero() {
        assert_eq!(compute_totals(&[]).unwrap().total, Decimal::ZERO);
    }

    #[test]
    fn oversized_subtotal_is_an_error() {
        let err = compute_totals(&[item(dec!(1000000000000000000000000000), dec!(100))]).unwrap_err();
        assert!(matches!(err, ObraError::AmountOverflow(ref what) if what == "certificateItems[0] subtotal"));
    }

    #[test]
    fn oversized_total_is_an_error() {
        // each subtotal fits, their sum does not
        let items = vec![item(dec!(700000000000000000000000000), dec!(100)); 200];
        let err = compute_totals(&items).unwrap_err();
        assert!(matches!(err, ObraError::AmountOverflow(ref what) if what == "total"));
    }

    #[test]
    fn filename_is_sanitized() {
        let cert = Certificate {
            project: Project {
                name: "x".into(),
                project_number: "OB 2024/07".into(),
                address: String::new(),
                description: String::new(),
            },
            version: "2.1".into(),
            certificate_amount: dec!(0),
            issued_at: format::parse_issued_at("2024-05-01T10:00:00Z").unwrap(),
            items: vec![],
        };
        assert_eq!(filename_hint(&cert), "certificado_OB_2024_07_v2_1.pdf");
    }
}
