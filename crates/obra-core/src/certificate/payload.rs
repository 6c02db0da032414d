use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::certificate::format::parse_issued_at;
use crate::error::ObraError;
use crate::model::ItemRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub project_number: String,
    pub address: String,
    pub description: String,
}

/// One budget item billed at a given progress percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateItem {
    pub item: ItemRecord,
    pub progress: Decimal,
}

/// A validated progress certificate, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    pub project: Project,
    pub version: String,
    pub certificate_amount: Decimal,
    pub issued_at: DateTime<Utc>,
    pub items: Vec<CertificateItem>,
}

impl Certificate {
    /// Parse and validate a certificate payload.
    ///
    /// Every required field is checked up front; the first one missing is
    /// reported by its path (e.g. `certificateItems[2].progress`).
    pub fn from_json(bytes: &[u8]) -> Result<Certificate, ObraError> {
        let raw: RawCertificate = serde_json::from_slice(bytes)?;
        raw.validate()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCertificate {
    #[serde(rename = "Project")]
    project: Option<RawProject>,
    version: Option<serde_json::Value>,
    certificate_amount: Option<Decimal>,
    issued_at: Option<String>,
    certificate_items: Option<Vec<RawCertificateItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    name: Option<String>,
    project_number: Option<serde_json::Value>,
    address: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCertificateItem {
    item: Option<RawItem>,
    progress: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    section: Option<String>,
    description: Option<String>,
    unit: Option<String>,
    quantity: Option<Decimal>,
    price: Option<Decimal>,
}

fn require<T>(value: Option<T>, path: &str) -> Result<T, ObraError> {
    value.ok_or_else(|| ObraError::RenderFieldMissing(path.to_string()))
}

/// Strings and numbers both appear for identifiers like `version`.
fn scalar_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl RawCertificate {
    fn validate(self) -> Result<Certificate, ObraError> {
        let raw_project = require(self.project, "Project")?;
        let project = Project {
            name: require(raw_project.name, "Project.name")?,
            project_number: require(
                scalar_text(raw_project.project_number),
                "Project.projectNumber",
            )?,
            address: raw_project.address.unwrap_or_default(),
            description: raw_project.description.unwrap_or_default(),
        };

        let version = require(scalar_text(self.version), "version")?;
        let certificate_amount = require(self.certificate_amount, "certificateAmount")?;
        let issued_at = parse_issued_at(&require(self.issued_at, "issuedAt")?)?;
        let raw_items = require(self.certificate_items, "certificateItems")?;

        let items = raw_items
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.validate(i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Certificate {
            project,
            version,
            certificate_amount,
            issued_at,
            items,
        })
    }
}

impl RawCertificateItem {
    fn validate(self, index: usize) -> Result<CertificateItem, ObraError> {
        let path = |field: &str| format!("certificateItems[{index}].{field}");
        let raw = require(self.item, &path("item"))?;
        let item = ItemRecord {
            section: raw.section.unwrap_or_default(),
            description: require(raw.description, &path("item.description"))?,
            unit: raw.unit.unwrap_or_default(),
            quantity: raw.quantity.unwrap_or_default(),
            price: require(raw.price, &path("item.price"))?,
        };
        let progress = require(self.progress, &path("progress"))?;
        Ok(CertificateItem { item, progress })
    }
}
