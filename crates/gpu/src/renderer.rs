use bytemuck::{Pod, Zeroable};
use scene::components::{Drawable3D, Shading, Side, Transform};
use scene::config::LightingConfig;
use scene::travel::TravelGlobe;

use crate::camera::Camera3D;

/// Point lights carried by a frame; extra configured lights are dropped.
pub const MAX_POINT_LIGHTS: usize = 2;

/// One sphere instance as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SphereInstance {
    pub center: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
}

/// Pipeline a sphere is drawn with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpherePass {
    /// Phong-lit front faces with depth writes.
    Lit { shininess: u32 },
    /// Flat color, alpha blended, depth tested but not written.
    Unlit,
    /// Inside of a shell, alpha blended.
    BackSide,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RenderCommand {
    DrawSphere {
        pass: SpherePass,
        instance: SphereInstance,
    },
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 3],
    pub intensity: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 3],
    pub ambient: f32,
    pub lights: [PointLightUniform; MAX_POINT_LIGHTS],
    pub light_count: u32,
    pub shininess: f32,
    pub _pad: [f32; 2],
}

/// Everything a surface needs to draw one frame, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub globals: Globals,
    pub commands: Vec<RenderCommand>,
}

impl RenderFrame {
    /// Instances of one pass, preserving draw order.
    pub fn instances(&self, pass: SpherePass) -> Vec<SphereInstance> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                RenderCommand::DrawSphere { pass: p, instance } if p == pass => Some(instance),
                RenderCommand::DrawSphere { .. } => None,
            })
            .collect()
    }

    /// Instances of every lit pass, whatever their shininess.
    pub fn lit_instances(&self) -> Vec<SphereInstance> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                RenderCommand::DrawSphere {
                    pass: SpherePass::Lit { .. },
                    instance,
                } => Some(instance),
                RenderCommand::DrawSphere { .. } => None,
            })
            .collect()
    }
}

pub struct Renderer;

impl Renderer {
    /// Flattens the globe into sphere draws: scene bodies first, then each
    /// marker followed by its glow shell. The globe spin is baked into every
    /// center.
    pub fn collect(globe: &TravelGlobe, camera: Camera3D, width_px: f64, height_px: f64) -> RenderFrame {
        let cfg = globe.config();
        let spin = globe.spin_rad();
        let world = globe.world();
        let mut commands = Vec::new();
        let mut shininess = 0.0;

        for (_, transform, drawable) in world.drawables_3d() {
            if let Shading::Phong { shininess: s } = drawable.material.shading {
                shininess = s as f32;
            }
            commands.push(sphere_command(transform, drawable, spin, 1.0, drawable.material.rgba()));
        }

        let glow = &cfg.markers.visited;
        for (_, transform, drawable, marker) in world.markers() {
            commands.push(sphere_command(transform, drawable, spin, 1.0, drawable.material.rgba()));
            if marker.visited {
                let color = glow.color.to_rgba(glow.glow_opacity);
                commands.push(sphere_command(transform, drawable, spin, glow.glow_scale, color));
            }
        }

        RenderFrame {
            globals: Globals {
                view_proj: camera.view_proj(width_px, height_px),
                eye: camera.position.as_f32(),
                ambient: cfg.lighting.ambient,
                lights: light_uniforms(&cfg.lighting),
                light_count: cfg.lighting.points.len().min(MAX_POINT_LIGHTS) as u32,
                shininess,
                _pad: [0.0; 2],
            },
            commands,
        }
    }
}

fn sphere_command(
    transform: Transform,
    drawable: Drawable3D,
    spin: f64,
    extra_scale: f64,
    color: [f32; 4],
) -> RenderCommand {
    let pass = match (drawable.material.side, drawable.material.shading) {
        (Side::Back, _) => SpherePass::BackSide,
        (Side::Front, Shading::Phong { shininess }) => SpherePass::Lit { shininess },
        (Side::Front, Shading::Unlit) => SpherePass::Unlit,
    };
    RenderCommand::DrawSphere {
        pass,
        instance: SphereInstance {
            center: transform.position.rotate_y(spin).as_f32(),
            radius: (drawable.radius() * transform.scale * extra_scale) as f32,
            color,
        },
    }
}

fn light_uniforms(lighting: &LightingConfig) -> [PointLightUniform; MAX_POINT_LIGHTS] {
    let mut out = [PointLightUniform::zeroed(); MAX_POINT_LIGHTS];
    for (slot, light) in out.iter_mut().zip(&lighting.points) {
        *slot = PointLightUniform {
            position: [
                light.position[0] as f32,
                light.position[1] as f32,
                light.position[2] as f32,
            ],
            intensity: light.intensity,
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{RenderCommand, Renderer, SpherePass};
    use crate::camera::Camera3D;
    use approx::assert_relative_eq;
    use content::Content;
    use foundation::math::Vec3;
    use scene::config::GlobeConfig;
    use scene::travel::TravelGlobe;

    fn globe() -> TravelGlobe {
        TravelGlobe::new(Content::builtin().unwrap().locations, GlobeConfig::default())
    }

    fn camera() -> Camera3D {
        Camera3D::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 50f64.to_radians(), 0.1, 1000.0)
    }

    #[test]
    fn collects_bodies_then_markers_with_glow() {
        let globe = globe();
        let frame = Renderer::collect(&globe, camera(), 800.0, 600.0);

        // earth + atmosphere + 13 blobs + 24 markers + 4 glows
        assert_eq!(frame.commands.len(), 1 + 1 + 13 + 24 + 4);
        assert!(matches!(
            frame.commands[0],
            RenderCommand::DrawSphere {
                pass: SpherePass::Lit { shininess: 100 },
                ..
            }
        ));
        assert_eq!(frame.lit_instances().len(), 1);
        assert_eq!(frame.instances(SpherePass::BackSide).len(), 1);
        assert_relative_eq!(frame.instances(SpherePass::BackSide)[0].radius, 4.2, epsilon = 1e-6);
        assert_eq!(frame.globals.light_count, 2);
        assert_eq!(frame.globals.ambient, 0.4);
        assert_eq!(frame.globals.shininess, 100.0);
    }

    #[test]
    fn glow_shell_doubles_the_pulsing_marker() {
        let globe = globe();
        let frame = Renderer::collect(&globe, camera(), 800.0, 600.0);
        let unlit = frame.instances(SpherePass::Unlit);
        // First visited marker follows the 13 continent blobs.
        let marker = unlit[13];
        let glow = unlit[14];
        assert_eq!(marker.center, glow.center);
        assert_relative_eq!(glow.radius, marker.radius * 2.0, epsilon = 1e-6);
        assert_relative_eq!(glow.color[3], 0.2, epsilon = 1e-6);
    }

    #[test]
    fn centers_follow_the_globe_spin() {
        let mut globe = globe();
        let before = Renderer::collect(&globe, camera(), 800.0, 600.0).instances(SpherePass::Unlit)[0];
        for _ in 0..100 {
            globe.advance(0.1);
        }
        let after = Renderer::collect(&globe, camera(), 800.0, 600.0).instances(SpherePass::Unlit)[0];
        assert_ne!(before.center, after.center);
        let len = |c: [f32; 3]| (c[0] * c[0] + c[1] * c[1] + c[2] * c[2]).sqrt();
        assert_relative_eq!(len(before.center), len(after.center), epsilon = 1e-5);
    }
}
