use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}: expected #rrggbb")]
pub struct ColorParseError(String);

/// 24-bit sRGB color, written as `#rrggbb` in config files.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xffffff);

    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b, alpha.clamp(0.0, 1.0)]
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6)
            .ok_or_else(|| ColorParseError(s.clone()))?;
        u32::from_str_radix(hex, 16)
            .map(Rgb)
            .map_err(|_| ColorParseError(s.clone()))
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        format!("#{:06x}", c.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Shading {
    /// Ambient + point lights with a specular term.
    Phong { shininess: u32 },
    /// Flat color, ignores lights.
    Unlit,
}

/// Which faces of a closed mesh are drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub opacity: f32,
    pub shading: Shading,
    pub side: Side,
}

impl Material {
    pub fn unlit(color: Rgb, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            shading: Shading::Unlit,
            side: Side::Front,
        }
    }

    pub fn phong(color: Rgb, opacity: f32, shininess: u32) -> Self {
        Self {
            color,
            opacity,
            shading: Shading::Phong { shininess },
            side: Side::Front,
        }
    }

    pub fn back_side(self) -> Self {
        Self {
            side: Side::Back,
            ..self
        }
    }

    pub fn rgba(&self) -> [f32; 4] {
        self.color.to_rgba(self.opacity)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    Sphere { radius: f64 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
    pub material: Material,
}

impl Drawable3D {
    pub fn sphere(radius: f64, material: Material) -> Self {
        Self {
            shape: Shape3D::Sphere { radius },
            material,
        }
    }

    pub fn radius(&self) -> f64 {
        match self.shape {
            Shape3D::Sphere { radius } => radius,
        }
    }
}
