use content::Location;
use serde::Serialize;

/// Placeholder tile standing in for one media reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaTile {
    pub label: String,
    pub media: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayBody {
    Gallery { tiles: Vec<MediaTile> },
    /// The location has no media references.
    Empty { message: String },
}

/// What the detail overlay shows for the selected location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayView {
    pub title: String,
    pub body: OverlayBody,
    pub caption: String,
}

impl OverlayView {
    pub fn for_location(location: &Location) -> Self {
        let name = location.name();
        let body = if location.media().is_empty() {
            OverlayBody::Empty {
                message: format!("No photos from {name} yet."),
            }
        } else {
            OverlayBody::Gallery {
                tiles: location
                    .media()
                    .iter()
                    .enumerate()
                    .map(|(i, m)| MediaTile {
                        label: format!("Photo {}", i + 1),
                        media: m.as_str().to_owned(),
                    })
                    .collect(),
            }
        };
        Self {
            title: name.to_owned(),
            body,
            caption: format!(
                "Amazing memories from {name}! Click on other countries to explore more of my travel journey."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OverlayBody, OverlayView};
    use content::{LocationRecord, LocationSet, MediaRef};

    fn record(name: &str, media: &[&str]) -> LocationRecord {
        LocationRecord {
            name: name.into(),
            lat: 0.0,
            lng: 0.0,
            visited: true,
            media: media.iter().map(|m| MediaRef((*m).into())).collect(),
        }
    }

    #[test]
    fn gallery_tiles_are_numbered_in_media_order() {
        let set = LocationSet::from_records(vec![record("India", &["india1.jpg", "india2.jpg"])]).unwrap();
        let (_, india) = set.find("India").unwrap();
        let view = OverlayView::for_location(india);

        assert_eq!(view.title, "India");
        let OverlayBody::Gallery { tiles } = &view.body else {
            panic!("expected gallery");
        };
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].label, "Photo 1");
        assert_eq!(tiles[1].media, "india2.jpg");
    }

    #[test]
    fn missing_media_renders_empty_state() {
        let set = LocationSet::from_records(vec![record("Atlantis", &[])]).unwrap();
        let (_, loc) = set.find("Atlantis").unwrap();
        let view = OverlayView::for_location(loc);
        assert!(matches!(view.body, OverlayBody::Empty { ref message } if message.contains("Atlantis")));
    }
}
