use obra_core::model::Extraction;

const DESCRIPTION_MAX: usize = 50;

/// Plain-text table of extracted items, one row per item.
pub fn format_extraction(extraction: &Extraction) -> String {
    let items = &extraction.items;
    let section_w = items
        .iter()
        .map(|i| i.section.chars().count())
        .max()
        .unwrap_or(0)
        .max("SECCIÓN".chars().count());
    let desc_w = items
        .iter()
        .map(|i| i.description.chars().count().min(DESCRIPTION_MAX))
        .max()
        .unwrap_or(0)
        .max("CONCEPTO".len());
    let unit_w = items
        .iter()
        .map(|i| i.unit.chars().count())
        .max()
        .unwrap_or(0)
        .max("UT".len());

    let mut out = format!("Sheet: {}\n\n", extraction.sheet);
    out.push_str(&format!(
        "{:<section_w$}  {:<desc_w$}  {:<unit_w$}  {:>12}  {:>14}\n",
        "SECCIÓN", "CONCEPTO", "UT", "CANT.", "PRECIO UNIT."
    ));
    out.push_str(&format!(
        "{}\n",
        "-".repeat(section_w + desc_w + unit_w + 12 + 14 + 8)
    ));

    for item in items {
        out.push_str(&format!(
            "{:<section_w$}  {:<desc_w$}  {:<unit_w$}  {:>12}  {:>14}\n",
            item.section,
            truncate(&item.description, DESCRIPTION_MAX),
            item.unit,
            item.quantity.normalize(),
            item.price.normalize(),
        ));
    }

    out.push_str(&format!("\n{} item(s)", items.len()));
    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max - 1).collect();
    short.push('…');
    short
}
