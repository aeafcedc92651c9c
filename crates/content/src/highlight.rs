use serde::{Deserialize, Serialize};

/// A travel story card shown under the globe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelHighlight {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub countries: Vec<String>,
}
