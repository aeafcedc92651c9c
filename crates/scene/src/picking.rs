use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

use crate::World;
use crate::components::Marker;
use crate::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    /// The same ray expressed in a frame rotated by `angle_rad` about +Y.
    pub fn rotated_y(self, angle_rad: f64) -> Self {
        Self {
            origin: self.origin.rotate_y(angle_rad),
            dir: self.dir.rotate_y(angle_rad),
        }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir.scale(t)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub entity: EntityId,
    pub marker: Marker,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
    /// Hit spheres are never smaller than this.
    pub min_radius: f64,
    /// Radius of an opaque sphere at the origin that hides markers behind it.
    pub occluder_radius: Option<f64>,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
            min_radius: 0.0,
            occluder_radius: None,
        }
    }
}

/// Deterministic ray picking for marker entities.
///
/// Ordering contract:
/// - If multiple markers are hit at the same distance, the lower `EntityId::index()` wins.
/// - Otherwise, the closest hit along the (normalized) ray wins.
///
/// Notes:
/// - The ray must be expressed in the same frame as the marker transforms.
/// - A marker's hit sphere is its drawable radius times its transform scale
///   and `Marker::hit_scale`.
/// - Hits farther than the occluder's entry point are discarded.
pub fn pick_ray(world: &World, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalized()?;
    let ray = Ray::new(ray.origin, dir);

    let max_t = match opts.occluder_radius {
        Some(r) => ray_sphere_hit_t(&ray, Vec3::ZERO, r)
            .map_or(opts.max_distance, |t| t.min(opts.max_distance)),
        None => opts.max_distance,
    };

    let mut best: Option<(f64, EntityId, Marker)> = None;

    for (entity, transform, drawable, marker) in world.markers() {
        let radius = (drawable.radius() * transform.scale * marker.hit_scale).max(opts.min_radius);
        let Some(t) = ray_sphere_hit_t(&ray, transform.position, radius) else {
            continue;
        };
        if t > max_t {
            continue;
        }

        best = match best {
            None => Some((t, entity, marker)),
            Some((bt, be, bm)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| entity.index().cmp(&be.index()));
                if ord.is_lt() {
                    Some((t, entity, marker))
                } else {
                    Some((bt, be, bm))
                }
            }
        };
    }

    let (t, entity, marker) = best?;
    Some(PickHit {
        entity,
        marker,
        distance: t,
        point: ray.at(t),
    })
}

/// Entry distance of a normalized ray into a sphere; 0 if the origin is inside.
fn ray_sphere_hit_t(ray: &Ray, center: Vec3, radius: f64) -> Option<f64> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let disc = b * b - c;
    if disc < 0.0 || b > 0.0 {
        return None;
    }
    Some(-b - disc.sqrt())
}
