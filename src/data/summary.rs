use std::collections::HashMap;

use super::model::{Facility, Sector};

/// Headline counts for the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    pub total: usize,
    pub public: usize,
    pub private: usize,
}

impl Metrics {
    pub fn of(view: &[&Facility]) -> Self {
        view.iter().fold(
            Metrics {
                total: view.len(),
                ..Default::default()
            },
            |mut m, f| {
                match f.sector {
                    Sector::Public => m.public += 1,
                    Sector::Private => m.private += 1,
                    Sector::Other => {}
                }
                m
            },
        )
    }
}

/// The `n` communes with the most facilities, busiest first.
///
/// Equal counts keep the order in which the communes first appear in `view`.
pub fn top_communes(view: &[&Facility], n: usize) -> Vec<(String, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for commune in view.iter().filter_map(|f| f.commune.as_deref()) {
        let count = counts.entry(commune).or_insert_with(|| {
            order.push(commune);
            0
        });
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|c| (c.to_string(), counts[c]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// `(longitude, latitude, sector)` for every facility that can be mapped.
pub fn map_points(view: &[&Facility]) -> Vec<(f64, f64, Sector)> {
    view.iter()
        .filter_map(|f| f.coordinates().map(|(lon, lat)| (lon, lat, f.sector)))
        .collect()
}
