use content::LocationId;

/// Tags an entity as the marker of one location.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Marker {
    pub location: LocationId,
    pub visited: bool,
    /// Offset added to the pulse clock so neighbouring markers do not beat in unison.
    pub pulse_phase: f64,
    /// Pointer hit sphere relative to the drawn sphere; covers the glow shell.
    pub hit_scale: f64,
}

impl Marker {
    pub fn new(location: LocationId, visited: bool) -> Self {
        Self {
            location,
            visited,
            pulse_phase: 0.0,
            hit_scale: 1.0,
        }
    }

    pub fn with_pulse_phase(self, pulse_phase: f64) -> Self {
        Self {
            pulse_phase,
            ..self
        }
    }

    pub fn with_hit_scale(self, hit_scale: f64) -> Self {
        Self { hit_scale, ..self }
    }
}
