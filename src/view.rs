use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::domain::CatalogEntryDetail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Column the table is ordered by. Anything that is not a reserved field
/// name is treated as a stat name; a stat absent from an entry reads as 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Total,
    Stat(String),
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Id => write!(f, "id"),
            SortField::Name => write!(f, "name"),
            SortField::Total => write!(f, "total"),
            SortField::Stat(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for SortField {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_lowercase().as_str() {
            "id" => SortField::Id,
            "name" => SortField::Name,
            "total" => SortField::Total,
            other => SortField::Stat(other.to_string()),
        })
    }
}

/// Ephemeral per-screen filter and sort state, mutated only by user
/// interaction. Never part of any cache key.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub search_text: String,
    pub selected_type: Option<String>,
    pub sort_field: Option<SortField>,
    pub direction: SortDirection,
}

/// Computes the visible record set as a pure function of the full record
/// set and the view state: case-insensitive name filter, exact type filter,
/// then a stable sort. Identical inputs always produce identical output.
pub fn derive_view<'a>(
    all: &'a [CatalogEntryDetail],
    view: &ViewState,
) -> Vec<&'a CatalogEntryDetail> {
    let needle = view.search_text.to_lowercase();
    let mut entries: Vec<&CatalogEntryDetail> = all
        .iter()
        .filter(|entry| needle.is_empty() || entry.name.to_lowercase().contains(&needle))
        .filter(|entry| {
            view.selected_type
                .as_ref()
                .map(|type_name| entry.has_type(type_name))
                .unwrap_or(true)
        })
        .collect();

    if let Some(field) = &view.sort_field {
        entries.sort_by(|a, b| {
            let ordering = compare(a, b, field);
            match view.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    entries
}

fn compare(a: &CatalogEntryDetail, b: &CatalogEntryDetail, field: &SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Total => a.stat_total().cmp(&b.stat_total()),
        SortField::Stat(name) => a.stat(name).cmp(&b.stat(name)),
    }
}
