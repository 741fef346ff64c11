/// Data layer: facility types, loading, classification, filtering.
///
/// Architecture:
/// ```text
///  establecimientos.csv (`;`-delimited)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + region filter + classify → FacilityDataset
///   └──────────┘      (memoized per path / region)
///        │
///        ▼
///   ┌─────────────────┐
///   │ FacilityDataset │  Vec<Facility>, distinct values per filter
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → ordered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  metrics, top communes, map points
///   └──────────┘
/// ```

pub mod classify;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
