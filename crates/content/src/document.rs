use serde::{Deserialize, Serialize};
use tracing::info;

use crate::achievement::Achievement;
use crate::error::Result;
use crate::highlight::TravelHighlight;
use crate::location::{LocationRecord, LocationSet};

const BUILTIN_CONTENT: &str = include_str!("../assets/content.json");

/// Content document as stored on disk or served next to the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    #[serde(default)]
    pub locations: Vec<LocationRecord>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub highlights: Vec<TravelHighlight>,
}

/// Validated static page content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Content {
    pub locations: LocationSet,
    pub achievements: Vec<Achievement>,
    pub highlights: Vec<TravelHighlight>,
}

impl Content {
    pub fn from_document(doc: ContentDocument) -> Result<Self> {
        let locations = LocationSet::from_records(doc.locations)?;
        info!(
            locations = locations.len(),
            visited = locations.visited().count(),
            achievements = doc.achievements.len(),
            "content loaded"
        );
        Ok(Self {
            locations,
            achievements: doc.achievements,
            highlights: doc.highlights,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: ContentDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// The content shipped with the page.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CONTENT)
    }
}
