use content::LocationSet;
use foundation::math::lat_lng_to_sphere;
use tracing::debug;

use crate::World;
use crate::components::{Drawable3D, Marker, Material, Transform};
use crate::config::GlobeConfig;
use crate::entity::EntityId;

/// Simplified landmass blobs: (lat, lng, blob radius).
pub const CONTINENT_BLOBS: [(f64, f64, f64); 13] = [
    // North America
    (45.0, -100.0, 0.3),
    (40.0, -95.0, 0.2),
    (50.0, -105.0, 0.25),
    // Europe
    (50.0, 10.0, 0.15),
    (55.0, 15.0, 0.1),
    // Asia
    (30.0, 100.0, 0.4),
    (40.0, 80.0, 0.3),
    (50.0, 120.0, 0.25),
    // Africa
    (0.0, 20.0, 0.25),
    (-20.0, 25.0, 0.3),
    // South America
    (-10.0, -60.0, 0.2),
    (-30.0, -65.0, 0.15),
    // Australia
    (-25.0, 135.0, 0.1),
];

/// Entities making up one travel globe.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeScene {
    pub earth: EntityId,
    pub atmosphere: EntityId,
    pub continents: Vec<EntityId>,
    /// One entry per location, in location-set order.
    pub markers: Vec<EntityId>,
}

impl GlobeScene {
    pub fn marker_entity(&self, location_index: usize) -> Option<EntityId> {
        self.markers.get(location_index).copied()
    }
}

/// Builds the earth sphere, atmosphere shell, continent blobs and one marker
/// per location. Marker positions are projected once here.
pub fn spawn_travel_globe(world: &mut World, locations: &LocationSet, cfg: &GlobeConfig) -> GlobeScene {
    let earth = world.spawn();
    world.set_transform(earth, Transform::identity());
    world.set_drawable_3d(
        earth,
        Drawable3D::sphere(
            cfg.earth.radius,
            Material::phong(cfg.earth.color, cfg.earth.opacity, cfg.earth.shininess),
        ),
    );

    let atmosphere = world.spawn();
    world.set_transform(
        atmosphere,
        Transform::identity().with_scale(cfg.atmosphere.scale),
    );
    world.set_drawable_3d(
        atmosphere,
        Drawable3D::sphere(
            cfg.atmosphere.radius,
            Material::unlit(cfg.atmosphere.color, cfg.atmosphere.opacity).back_side(),
        ),
    );

    let continents = CONTINENT_BLOBS
        .iter()
        .map(|&(lat, lng, blob_radius)| {
            let entity = world.spawn();
            let position = lat_lng_to_sphere(lat, lng, cfg.continents.surface_radius);
            world.set_transform(entity, Transform::translate(position));
            world.set_drawable_3d(
                entity,
                Drawable3D::sphere(
                    blob_radius,
                    Material::unlit(cfg.continents.color, cfg.continents.opacity),
                ),
            );
            entity
        })
        .collect();

    let markers = locations
        .iter()
        .map(|(id, location)| {
            let entity = world.spawn();
            let position = location.position(cfg.markers.surface_radius);
            let (drawable, scale) = if location.visited() {
                let style = &cfg.markers.visited;
                (
                    Drawable3D::sphere(style.size, Material::unlit(style.color, style.opacity)),
                    style.pulse_base,
                )
            } else {
                let style = &cfg.markers.unvisited;
                (
                    Drawable3D::sphere(style.size, Material::unlit(style.color, style.opacity)),
                    style.scale,
                )
            };
            world.set_transform(entity, Transform::translate(position).with_scale(scale));
            world.set_drawable_3d(entity, drawable);
            let mut marker = Marker::new(id, location.visited())
                .with_pulse_phase(id.index() as f64 * cfg.markers.visited.pulse_stagger);
            if location.visited() {
                marker = marker.with_hit_scale(cfg.markers.visited.glow_scale);
            }
            world.set_marker(entity, marker);
            entity
        })
        .collect::<Vec<_>>();

    debug!(markers = markers.len(), "globe scene spawned");

    GlobeScene {
        earth,
        atmosphere,
        continents,
        markers,
    }
}

#[cfg(test)]
mod tests {
    use super::{CONTINENT_BLOBS, spawn_travel_globe};
    use crate::World;
    use crate::components::{Shading, Side};
    use crate::config::GlobeConfig;
    use approx::assert_relative_eq;
    use content::Content;

    #[test]
    fn spawns_one_marker_per_location_on_the_marker_shell() {
        let content = Content::builtin().unwrap();
        let cfg = GlobeConfig::default();
        let mut world = World::new();
        let scene = spawn_travel_globe(&mut world, &content.locations, &cfg);

        assert_eq!(scene.markers.len(), content.locations.len());
        assert_eq!(scene.continents.len(), CONTINENT_BLOBS.len());
        assert_eq!(world.markers().len(), content.locations.len());

        for (i, entity) in scene.markers.iter().enumerate() {
            let transform = world.transform(*entity).unwrap();
            assert_relative_eq!(transform.position.length(), 2.05, epsilon = 1e-12);
            let marker = world.marker(*entity).unwrap();
            assert_eq!(marker.location.index(), i);
        }
    }

    #[test]
    fn visited_markers_are_larger_and_start_at_pulse_base() {
        let content = Content::builtin().unwrap();
        let cfg = GlobeConfig::default();
        let mut world = World::new();
        let scene = spawn_travel_globe(&mut world, &content.locations, &cfg);

        let (india_id, _) = content.locations.find("India").unwrap();
        let (china_id, _) = content.locations.find("China").unwrap();
        let india = scene.marker_entity(india_id.index()).unwrap();
        let china = scene.marker_entity(china_id.index()).unwrap();

        assert_eq!(world.drawable_3d(india).unwrap().radius(), 0.03);
        assert_eq!(world.drawable_3d(china).unwrap().radius(), 0.015);
        assert_eq!(world.transform(india).unwrap().scale, 1.5);
        assert_eq!(world.transform(china).unwrap().scale, 0.8);
    }

    #[test]
    fn earth_is_lit_and_atmosphere_is_back_side() {
        let content = Content::builtin().unwrap();
        let mut world = World::new();
        let scene = spawn_travel_globe(&mut world, &content.locations, &GlobeConfig::default());

        let earth = world.drawable_3d(scene.earth).unwrap();
        assert_eq!(earth.material.shading, Shading::Phong { shininess: 100 });
        let atmosphere = world.drawable_3d(scene.atmosphere).unwrap();
        assert_eq!(atmosphere.material.side, Side::Back);
        assert_relative_eq!(
            atmosphere.radius() * world.transform(scene.atmosphere).unwrap().scale,
            4.2,
            epsilon = 1e-12
        );
    }
}
