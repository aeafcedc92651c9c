//! Offline checks for portfolio content documents.

use std::fs;
use std::path::{Path, PathBuf};

use content::{Content, ContentError};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Reads a content document, or the built-in one when `path` is `None`.
pub fn load_content(path: Option<&Path>) -> Result<Content, ToolError> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| ToolError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Content::from_json_str(&json)?)
        }
        None => Ok(Content::builtin()?),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub locations: usize,
    pub visited: usize,
    pub achievements: usize,
    pub highlights: usize,
    /// Visited locations whose overlay will show the empty state.
    pub visited_without_media: Vec<String>,
}

pub fn check(content: &Content) -> CheckReport {
    let visited_without_media: Vec<String> = content
        .locations
        .visited()
        .filter(|(_, l)| l.media().is_empty())
        .map(|(_, l)| l.name().to_owned())
        .collect();
    for name in &visited_without_media {
        warn!(location = %name, "visited location has no media");
    }
    CheckReport {
        locations: content.locations.len(),
        visited: content.locations.visited().count(),
        achievements: content.achievements.len(),
        highlights: content.highlights.len(),
        visited_without_media,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPosition {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub visited: bool,
    pub position: [f64; 3],
}

/// Projected marker centers at `radius`, in document order.
pub fn marker_positions(content: &Content, radius: f64) -> Vec<MarkerPosition> {
    content
        .locations
        .iter()
        .map(|(_, l)| {
            let p = l.position(radius);
            MarkerPosition {
                name: l.name().to_owned(),
                lat: l.coord().lat_deg(),
                lng: l.coord().lng_deg(),
                visited: l.visited(),
                position: [p.x, p.y, p.z],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ToolError, check, load_content, marker_positions};
    use content::Content;
    use foundation::math::lat_lng_to_sphere;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn builtin_content_passes_check() {
        let content = load_content(None).unwrap();
        let report = check(&content);
        assert_eq!(report.locations, 24);
        assert_eq!(report.visited, 4);
        assert_eq!(report.visited_without_media, Vec::<String>::new());
    }

    #[test]
    fn reports_visited_locations_without_media() {
        let content = Content::from_json_str(
            r#"{ "locations": [ { "name": "Iceland", "lat": 64.9, "lng": -19.0, "visited": true } ] }"#,
        )
        .unwrap();
        assert_eq!(check(&content).visited_without_media, vec!["Iceland".to_string()]);
    }

    #[test]
    fn marker_positions_use_the_projection() {
        let content = load_content(None).unwrap();
        let markers = marker_positions(&content, 2.05);
        let india = markers.iter().find(|m| m.name == "India").unwrap();
        let p = lat_lng_to_sphere(20.5937, 78.9629, 2.05);
        assert_eq!(india.position, [p.x, p.y, p.z]);
        assert!(india.visited);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_content(Some(Path::new("/nonexistent/content.json"))).unwrap_err();
        assert!(matches!(err, ToolError::Io { .. }));
    }
}
