use content::{LocationId, LocationSet};
use serde::Serialize;

/// One selectable entry of the non-visual location list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackEntry {
    pub id: LocationId,
    pub name: String,
}

/// Stand-in for the globe when no rendering surface is available.
///
/// Lists exactly the visited locations, in their original order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackList {
    pub title: String,
    pub prompt: String,
    pub entries: Vec<FallbackEntry>,
}

impl FallbackList {
    pub fn from_locations(locations: &LocationSet) -> Self {
        Self {
            title: "Interactive Travel Map".to_owned(),
            prompt: "Click on the countries below to explore my travel journey and see photos from each destination.".to_owned(),
            entries: locations
                .visited()
                .map(|(id, l)| FallbackEntry {
                    id,
                    name: l.name().to_owned(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FallbackList;
    use content::Content;

    #[test]
    fn lists_visited_locations_in_order() {
        let content = Content::builtin().unwrap();
        let list = FallbackList::from_locations(&content.locations);
        let names: Vec<_> = list.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["United States", "Germany", "United Arab Emirates", "India"]);
        for entry in &list.entries {
            assert!(content.locations.get(entry.id).unwrap().visited());
        }
    }
}
