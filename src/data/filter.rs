use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::model::{Facility, FacilityDataset, Sector};

// ---------------------------------------------------------------------------
// Filter selection – what the sidebar currently asks for
// ---------------------------------------------------------------------------

/// Column the facility table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Commune,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::Name, SortKey::Commune];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Commune => "Commune",
        }
    }

    fn key(self, facility: &Facility) -> Option<&str> {
        match self {
            SortKey::Name => facility.name.as_deref(),
            SortKey::Commune => facility.commune.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "A → Z",
            SortDirection::Descending => "Z → A",
        }
    }
}

/// Every recognised filter option and its current value.
///
/// Rebuilt from the widgets each frame; never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSelection {
    /// Case-insensitive substring of the facility name; empty means no filter.
    pub name_query: String,
    pub communes: BTreeSet<String>,
    pub kinds: BTreeSet<String>,
    pub sectors: BTreeSet<Sector>,
    pub care_levels: BTreeSet<String>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

impl FilterSelection {
    /// Everything selected, empty query: applying it keeps every facility.
    pub fn all(dataset: &FacilityDataset) -> Self {
        FilterSelection {
            name_query: String::new(),
            communes: dataset.communes.clone(),
            kinds: dataset.kinds.clone(),
            sectors: dataset.sectors.clone(),
            care_levels: dataset.care_levels.clone(),
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering and sorting
// ---------------------------------------------------------------------------

/// Return indices of facilities passing every predicate, in display order.
///
/// A categorical filter passes a facility when:
/// * every known value is selected → passes (no constraint, nulls included)
/// * the facility's value is in the selected set → passes
/// * otherwise (including a null value under a partial selection) → fails
///
/// Ordering is stable: ties keep load order in both directions. Facilities
/// without a sort value come last in both directions.
pub fn filtered_indices(dataset: &FacilityDataset, selection: &FilterSelection) -> Vec<usize> {
    let query = selection.name_query.to_lowercase();

    let mut indices: Vec<usize> = dataset
        .facilities
        .iter()
        .enumerate()
        .filter(|(_, f)| {
            if !query.is_empty() {
                let Some(name) = &f.name else {
                    return false;
                };
                if !name.to_lowercase().contains(&query) {
                    return false;
                }
            }

            passes(&dataset.communes, &selection.communes, f.commune.as_ref())
                && passes(&dataset.kinds, &selection.kinds, f.kind.as_ref())
                && passes(&dataset.sectors, &selection.sectors, Some(&f.sector))
                && passes(&dataset.care_levels, &selection.care_levels, f.care_level.as_ref())
        })
        .map(|(i, _)| i)
        .collect();

    let key = selection.sort_key;
    let direction = selection.sort_direction;
    indices.sort_by(|&a, &b| {
        compare_keys(
            key.key(&dataset.facilities[a]),
            key.key(&dataset.facilities[b]),
            direction,
        )
    });
    indices
}

fn passes<T: Ord>(known: &BTreeSet<T>, selected: &BTreeSet<T>, value: Option<&T>) -> bool {
    if selected.len() == known.len() && selected.is_superset(known) {
        return true;
    }
    value.is_some_and(|v| selected.contains(v))
}

fn compare_keys(a: Option<&str>, b: Option<&str>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Ascending => a.cmp(b),
            SortDirection::Descending => b.cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
