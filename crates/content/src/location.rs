use std::collections::BTreeSet;

use foundation::math::{GeoCoord, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{ContentError, Result};

/// Opaque reference to a photo or clip shown in the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(pub String);

impl MediaRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Location as it appears in a content document, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub visited: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaRef>,
}

/// A validated, immutable place on the travel globe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "LocationRecord")]
pub struct Location {
    name: String,
    coord: GeoCoord,
    visited: bool,
    media: Vec<MediaRef>,
}

impl Location {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coord(&self) -> GeoCoord {
        self.coord
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    pub fn media(&self) -> &[MediaRef] {
        &self.media
    }

    /// Position of this location on a sphere of `radius`.
    pub fn position(&self, radius: f64) -> Vec3 {
        self.coord.to_sphere(radius)
    }
}

impl From<Location> for LocationRecord {
    fn from(l: Location) -> Self {
        LocationRecord {
            name: l.name,
            lat: l.coord.lat_deg(),
            lng: l.coord.lng_deg(),
            visited: l.visited,
            media: l.media,
        }
    }
}

impl TryFrom<LocationRecord> for Location {
    type Error = ContentError;

    fn try_from(r: LocationRecord) -> Result<Self> {
        let coord = GeoCoord::new(r.lat, r.lng).map_err(|source| {
            ContentError::InvalidCoordinate {
                name: r.name.clone(),
                source,
            }
        })?;
        Ok(Location {
            name: r.name,
            coord,
            visited: r.visited,
            media: r.media,
        })
    }
}

/// Index of a location within its [`LocationSet`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub u32);

impl LocationId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered, name-unique set of locations, validated as a whole.
///
/// Ordering contract: iteration order is document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LocationSet {
    locations: Vec<Location>,
}

impl LocationSet {
    pub fn from_records(records: Vec<LocationRecord>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        let mut locations = Vec::with_capacity(records.len());

        for (pos, mut record) in records.into_iter().enumerate() {
            record.name = record.name.trim().to_string();
            if record.name.is_empty() {
                return Err(ContentError::EmptyName(pos));
            }
            if !seen.insert(record.name.clone()) {
                return Err(ContentError::DuplicateLocation(record.name));
            }
            locations.push(Location::try_from(record)?);
        }

        Ok(Self { locations })
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.index())
    }

    pub fn find(&self, name: &str) -> Option<(LocationId, &Location)> {
        self.iter().find(|(_, l)| l.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LocationId, &Location)> + '_ {
        self.locations
            .iter()
            .enumerate()
            .map(|(i, l)| (LocationId(i as u32), l))
    }

    /// Visited locations in document order.
    pub fn visited(&self) -> impl Iterator<Item = (LocationId, &Location)> + '_ {
        self.iter().filter(|(_, l)| l.visited)
    }
}

#[cfg(test)]
mod tests {
    use super::{LocationId, LocationRecord, LocationSet, MediaRef};
    use crate::error::ContentError;
    use pretty_assertions::assert_eq;

    fn rec(name: &str, lat: f64, lng: f64, visited: bool) -> LocationRecord {
        LocationRecord {
            name: name.to_string(),
            lat,
            lng,
            visited,
            media: Vec::new(),
        }
    }

    #[test]
    fn visited_preserves_document_order() {
        let set = LocationSet::from_records(vec![
            rec("B", 0.0, 0.0, true),
            rec("X", 1.0, 1.0, false),
            rec("A", 2.0, 2.0, true),
        ])
        .expect("valid");

        let names: Vec<&str> = set.visited().map(|(_, l)| l.name()).collect();
        assert_eq!(names, vec!["B", "A"]);
        let ids: Vec<LocationId> = set.visited().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![LocationId(0), LocationId(2)]);
    }

    #[test]
    fn rejects_out_of_range_coordinates_at_load() {
        let err = LocationSet::from_records(vec![rec("Nowhere", 91.0, 0.0, true)])
            .expect_err("latitude out of range");
        match err {
            ContentError::InvalidCoordinate { name, .. } => assert_eq!(name, "Nowhere"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_duplicate_and_empty_names() {
        let dup = LocationSet::from_records(vec![rec("A", 0.0, 0.0, true), rec(" A ", 1.0, 1.0, false)]);
        assert!(matches!(dup, Err(ContentError::DuplicateLocation(n)) if n == "A"));

        let empty = LocationSet::from_records(vec![rec("A", 0.0, 0.0, true), rec("  ", 1.0, 1.0, false)]);
        assert!(matches!(empty, Err(ContentError::EmptyName(1))));
    }

    #[test]
    fn find_by_name_and_serialized_shape() {
        let mut r = rec("India", 20.5937, 78.9629, true);
        r.media = vec![MediaRef("india1.jpg".to_string())];
        let set = LocationSet::from_records(vec![r]).expect("valid");

        let (id, india) = set.find("India").expect("present");
        assert_eq!(id, LocationId(0));
        assert_eq!(india.media().len(), 1);
        assert!(set.find("Peru").is_none());

        let json = serde_json::to_value(&set).expect("serialize");
        assert_eq!(json, serde_json::json!([{
            "name": "India",
            "lat": 20.5937,
            "lng": 78.9629,
            "visited": true,
            "media": ["india1.jpg"],
        }]));
    }
}
