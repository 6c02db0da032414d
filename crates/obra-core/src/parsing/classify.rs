use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ObraError;
use crate::model::ItemRecord;
use crate::parsing::columns::{BudgetRow, PRICE_COLUMN, QUANTITY_COLUMN};
use crate::parsing::values::cell_as_cents;

/// Codes that may be a section ("A") or an item ("A.1"). Anything else,
/// including "A.1.2" and "AA", never reaches the classifier. One trailing
/// newline (Alt-Enter in the cell) is tolerated and trimmed later.
static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]\.?\d*\n?$").expect("code pattern is valid"));

/// The row pre-filter. The code is matched untrimmed, in its display form.
pub fn is_candidate(row: &BudgetRow) -> bool {
    row.id
        .to_text()
        .is_some_and(|code| CODE_PATTERN.is_match(&code))
}

/// What a row means to the budget structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRole {
    Section,
    Item,
    Ignored,
}

/// Classifier state carried from row to row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierState {
    pub current_section: Option<String>,
}

impl ClassifierState {
    /// The section items are attributed to. A section titled with an empty
    /// concept counts as no section.
    fn active_section(&self) -> Option<&str> {
        self.current_section.as_deref().filter(|s| !s.is_empty())
    }
}

/// Decide a row's role from its trimmed code and the current state.
pub fn role_of(code: &str, state: &ClassifierState) -> RowRole {
    let mut chars = code.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => RowRole::Section,
        _ if code.contains('.') && state.active_section().is_some() => RowRole::Item,
        _ => RowRole::Ignored,
    }
}

/// One step of the classification fold.
pub fn classify_row(
    state: ClassifierState,
    row: &BudgetRow,
) -> Result<(ClassifierState, Option<ItemRecord>), ObraError> {
    let code = row.id.to_text().unwrap_or_default();
    let code = code.trim();
    let concept = trimmed_text(row);

    match role_of(code, &state) {
        RowRole::Section => Ok((
            ClassifierState {
                current_section: Some(concept),
            },
            None,
        )),
        RowRole::Item => {
            let section = state.active_section().unwrap_or_default().to_string();
            let quantity = cell_as_cents(&row.quantity, row.index, QUANTITY_COLUMN)?
                .unwrap_or_default();
            let price = cell_as_cents(&row.price, row.index, PRICE_COLUMN)?.unwrap_or_default();
            let item = ItemRecord {
                section,
                description: concept,
                unit: row.unit.to_text().unwrap_or_default(),
                quantity,
                price,
            };
            Ok((state, Some(item)))
        }
        RowRole::Ignored => Ok((state, None)),
    }
}

/// Classify pre-filtered rows in order, collecting item records.
pub fn classify_rows<'a, I>(rows: I) -> Result<Vec<ItemRecord>, ObraError>
where
    I: IntoIterator<Item = &'a BudgetRow>,
{
    rows.into_iter()
        .try_fold(
            (ClassifierState::default(), Vec::<ItemRecord>::new()),
            |(state, mut items), row| {
                let (state, item) = classify_row(state, row)?;
                items.extend(item);
                Ok::<_, ObraError>((state, items))
            },
        )
        .map(|(_, items)| items)
}

fn trimmed_text(row: &BudgetRow) -> String {
    row.concept
        .to_text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
