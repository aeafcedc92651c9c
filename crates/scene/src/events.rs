use serde::Serialize;

/// Notifications for the host page, drained between frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GlobeEvent {
    LocationSelected { name: String },
    OverlayClosed,
    RenderFallback { reason: String },
}

#[cfg(test)]
mod tests {
    use super::GlobeEvent;

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_string(&GlobeEvent::LocationSelected {
            name: "India".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"location_selected","name":"India"}"#);
        let json = serde_json::to_string(&GlobeEvent::OverlayClosed).unwrap();
        assert_eq!(json, r#"{"type":"overlay_closed"}"#);
    }
}
