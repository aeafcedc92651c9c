use serde::{Deserialize, Serialize};

use crate::components::Rgb;

/// Tuned constants for the travel globe.
///
/// Every field has a default, so a partial JSON document only needs to name
/// the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub earth: EarthStyle,
    pub atmosphere: ShellStyle,
    pub continents: ContinentStyle,
    pub markers: MarkerStyle,
    /// Radians per second about +Y, applied to the whole globe group.
    pub spin_rad_per_s: f64,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            earth: EarthStyle::default(),
            atmosphere: ShellStyle::default(),
            continents: ContinentStyle::default(),
            markers: MarkerStyle::default(),
            spin_rad_per_s: 0.06,
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
        }
    }
}

impl GlobeConfig {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarthStyle {
    pub radius: f64,
    pub color: Rgb,
    pub opacity: f32,
    pub shininess: u32,
}

impl Default for EarthStyle {
    fn default() -> Self {
        Self {
            radius: 2.0,
            color: Rgb(0x2563eb),
            opacity: 0.9,
            shininess: 100,
        }
    }
}

/// Back-side shell drawn around the earth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellStyle {
    pub radius: f64,
    pub scale: f64,
    pub color: Rgb,
    pub opacity: f32,
}

impl Default for ShellStyle {
    fn default() -> Self {
        Self {
            radius: 2.0,
            scale: 2.1,
            color: Rgb(0x4fc3f7),
            opacity: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinentStyle {
    pub surface_radius: f64,
    pub color: Rgb,
    pub opacity: f32,
}

impl Default for ContinentStyle {
    fn default() -> Self {
        Self {
            surface_radius: 2.01,
            color: Rgb(0x22c55e),
            opacity: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub surface_radius: f64,
    pub visited: VisitedMarkerStyle,
    pub unvisited: UnvisitedMarkerStyle,
    /// Smallest world-space hit radius used when picking.
    pub min_pick_radius: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            surface_radius: 2.05,
            visited: VisitedMarkerStyle::default(),
            unvisited: UnvisitedMarkerStyle::default(),
            min_pick_radius: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitedMarkerStyle {
    pub size: f64,
    pub color: Rgb,
    pub opacity: f32,
    pub glow_scale: f64,
    pub glow_opacity: f32,
    pub pulse_base: f64,
    pub pulse_amplitude: f64,
    /// Angular frequency of the pulse, radians per second.
    pub pulse_rate: f64,
    /// Phase offset between consecutive markers.
    pub pulse_stagger: f64,
    pub hover_scale: f64,
}

impl Default for VisitedMarkerStyle {
    fn default() -> Self {
        Self {
            size: 0.03,
            color: Rgb(0x00ff88),
            opacity: 0.9,
            glow_scale: 2.0,
            glow_opacity: 0.2,
            pulse_base: 1.5,
            pulse_amplitude: 0.3,
            pulse_rate: 3.0,
            pulse_stagger: 0.1,
            hover_scale: 2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnvisitedMarkerStyle {
    pub size: f64,
    pub color: Rgb,
    pub opacity: f32,
    pub scale: f64,
    pub hover_scale: f64,
}

impl Default for UnvisitedMarkerStyle {
    fn default() -> Self {
        Self {
            size: 0.015,
            color: Rgb::WHITE,
            opacity: 0.4,
            scale: 0.8,
            hover_scale: 1.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f64; 3],
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Orbit-control speed units: 1.0 is one turn per minute.
    pub auto_rotate_speed: f64,
    /// Fraction of angular velocity removed per 60 Hz frame after release.
    pub damping: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 5.0],
            fov_y_deg: 50.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 3.0,
            max_distance: 8.0,
            auto_rotate_speed: 0.5,
            damping: 0.05,
        }
    }
}

impl CameraConfig {
    pub fn auto_rotate_rad_per_s(&self) -> f64 {
        std::f64::consts::TAU / 60.0 * self.auto_rotate_speed
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: [f64; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient: f32,
    pub points: Vec<PointLight>,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: 0.4,
            points: vec![
                PointLight {
                    position: [10.0, 10.0, 10.0],
                    intensity: 0.8,
                },
                PointLight {
                    position: [-10.0, -10.0, -10.0],
                    intensity: 0.3,
                },
            ],
        }
    }
}
