use obra_core::error::ObraError;
use obra_core::model::ItemRecord;
use serde::Serialize;

/// Response envelope: `{"data": [...]}`.
#[derive(Serialize)]
struct Envelope<'a> {
    data: &'a [ItemRecord],
}

pub fn items_json(items: &[ItemRecord]) -> Result<String, ObraError> {
    Ok(serde_json::to_string_pretty(&Envelope { data: items })?)
}
