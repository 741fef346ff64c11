use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Sector – derived public / private classification
// ---------------------------------------------------------------------------

/// Which health system a facility belongs to, derived from its
/// administrative dependency at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sector {
    Public,
    Private,
    Other,
}

impl Sector {
    pub const ALL: [Sector; 3] = [Sector::Public, Sector::Private, Sector::Other];

    pub fn label(self) -> &'static str {
        match self {
            Sector::Public => "Public",
            Sector::Private => "Private",
            Sector::Other => "Other",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Facility – one row of the source table
// ---------------------------------------------------------------------------

/// A single health-care establishment.
///
/// Text fields are `None` when the source cell was empty. Coordinates are
/// `None` when empty or not a number.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub name: Option<String>,
    pub commune: Option<String>,
    pub region: String,
    pub kind: Option<String>,
    pub dependency: Option<String>,
    pub care_level: Option<String>,
    /// Street type, street name and number joined by single spaces, trimmed.
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub sector: Sector,
}

impl Facility {
    /// `(longitude, latitude)` when both are present, i.e. the facility can
    /// be placed on the map.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.longitude?, self.latitude?))
    }
}

// ---------------------------------------------------------------------------
// FacilityDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded facilities with the distinct values each categorical filter
/// offers. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct FacilityDataset {
    pub facilities: Vec<Facility>,
    pub communes: BTreeSet<String>,
    pub kinds: BTreeSet<String>,
    pub sectors: BTreeSet<Sector>,
    pub care_levels: BTreeSet<String>,
    /// Whether the source file carried a phone column at all.
    pub has_phone_column: bool,
}

impl FacilityDataset {
    /// Build the option indices from the loaded facilities.
    pub fn from_facilities(facilities: Vec<Facility>, has_phone_column: bool) -> Self {
        let mut communes = BTreeSet::new();
        let mut kinds = BTreeSet::new();
        let mut sectors = BTreeSet::new();
        let mut care_levels = BTreeSet::new();

        for facility in &facilities {
            if let Some(c) = &facility.commune {
                communes.insert(c.clone());
            }
            if let Some(k) = &facility.kind {
                kinds.insert(k.clone());
            }
            if let Some(l) = &facility.care_level {
                care_levels.insert(l.clone());
            }
            sectors.insert(facility.sector);
        }

        FacilityDataset {
            facilities,
            communes,
            kinds,
            sectors,
            care_levels,
            has_phone_column,
        }
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::facility;
    use super::*;

    #[test]
    fn option_indices_skip_missing_values() {
        let mut unnamed = facility("X", "Maipú", Sector::Other);
        unnamed.commune = None;
        unnamed.care_level = None;
        let ds = FacilityDataset::from_facilities(
            vec![
                facility("A", "Maipú", Sector::Public),
                facility("B", "Ñuñoa", Sector::Private),
                unnamed,
            ],
            false,
        );

        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.communes.iter().map(String::as_str).collect::<Vec<_>>(),
            ["Maipú", "Ñuñoa"]
        );
        assert_eq!(ds.care_levels.len(), 1);
        assert_eq!(ds.sectors.len(), 3);
    }

    #[test]
    fn coordinates_need_both_axes() {
        let mut f = facility("A", "Maipú", Sector::Public);
        assert_eq!(f.coordinates(), None);
        f.latitude = Some(-33.5);
        assert_eq!(f.coordinates(), None);
        f.longitude = Some(-70.7);
        assert_eq!(f.coordinates(), Some((-70.7, -33.5)));
    }
}
