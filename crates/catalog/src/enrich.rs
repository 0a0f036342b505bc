use std::collections::HashMap;

use foundation::ids::RecordId;
use formats::geojson::{BorderCollection, GeoPolygonFeature};

use crate::snapshot::CountrySnapshot;

/// Border features joined to the country records they outline.
///
/// The join is one-directional: each feature may point at a record, records
/// know nothing about features.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnrichedBorders {
    borders: BorderCollection,
    matches: Vec<Option<RecordId>>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EnrichedFeature<'a> {
    pub index: usize,
    pub feature: &'a GeoPolygonFeature,
    pub country: Option<RecordId>,
}

impl EnrichedBorders {
    pub fn borders(&self) -> &BorderCollection {
        &self.borders
    }

    pub fn len(&self) -> usize {
        self.borders.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.borders.features.is_empty()
    }

    pub fn matched_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_some()).count()
    }

    pub fn get(&self, index: usize) -> Option<EnrichedFeature<'_>> {
        let feature = self.borders.features.get(index)?;
        Some(EnrichedFeature {
            index,
            feature,
            country: self.matches.get(index).copied().flatten(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = EnrichedFeature<'_>> {
        self.borders
            .features
            .iter()
            .zip(self.matches.iter())
            .enumerate()
            .map(|(index, (feature, country))| EnrichedFeature {
                index,
                feature,
                country: *country,
            })
    }

    pub fn country_of(&self, index: usize) -> Option<RecordId> {
        self.matches.get(index).copied().flatten()
    }
}

/// Matches every feature's administrative name against record names and
/// official names by exact equality. The earliest record in snapshot order
/// wins when several qualify.
pub fn enrich_borders(borders: BorderCollection, snapshot: &CountrySnapshot) -> EnrichedBorders {
    let mut by_name: HashMap<&str, RecordId> = HashMap::with_capacity(snapshot.len() * 2);
    for (id, record) in snapshot.iter() {
        by_name.entry(record.name.as_str()).or_insert(id);
        by_name.entry(record.official_name.as_str()).or_insert(id);
    }

    let matches = borders
        .features
        .iter()
        .map(|feature| {
            feature
                .admin_name()
                .and_then(|name| by_name.get(name).copied())
        })
        .collect();

    EnrichedBorders { borders, matches }
}
