use crate::components::{Drawable3D, Marker, Transform, Visibility};
use crate::entity::EntityId;
use foundation::handles::Handle;

/// Component storage for the globe scene.
///
/// Entities are dense indices; every component column is indexed by
/// `EntityId::index()`. Queries yield entities in ascending index order.
#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    transforms: Vec<Option<Transform>>,
    visibility: Vec<Option<Visibility>>,
    drawables_3d: Vec<Option<Drawable3D>>,
    markers: Vec<Option<Marker>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(Handle::new(self.next_index));
        self.next_index += 1;
        self.ensure_capacity(id.index() as usize);
        id
    }

    pub fn entity_count(&self) -> usize {
        self.next_index as usize
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.index() as usize);
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn set_visibility(&mut self, entity: EntityId, visibility: Visibility) {
        self.ensure_capacity(entity.index() as usize);
        self.visibility[entity.index() as usize] = Some(visibility);
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) {
        self.ensure_capacity(entity.index() as usize);
        self.drawables_3d[entity.index() as usize] = Some(drawable);
    }

    pub fn set_marker(&mut self, entity: EntityId, marker: Marker) {
        self.ensure_capacity(entity.index() as usize);
        self.markers[entity.index() as usize] = Some(marker);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms.get(entity.index() as usize).and_then(|t| *t)
    }

    pub fn drawable_3d(&self, entity: EntityId) -> Option<Drawable3D> {
        self.drawables_3d.get(entity.index() as usize).and_then(|d| *d)
    }

    pub fn marker(&self, entity: EntityId) -> Option<Marker> {
        self.markers.get(entity.index() as usize).and_then(|m| *m)
    }

    pub fn is_visible(&self, entity: EntityId) -> bool {
        self.visibility
            .get(entity.index() as usize)
            .and_then(|v| *v)
            .map(|v| v.visible)
            .unwrap_or(true)
    }

    /// Visible drawables that are not markers.
    pub fn drawables_3d(&self) -> Vec<(EntityId, Transform, Drawable3D)> {
        let mut out = Vec::new();
        for (idx, drawable) in self.drawables_3d.iter().enumerate() {
            let Some(drawable) = drawable else { continue };
            if self.markers.get(idx).is_some_and(|m| m.is_some()) {
                continue;
            }
            let entity = EntityId(Handle::new(idx as u32));
            let Some(transform) = self.transform(entity) else {
                continue;
            };
            if !self.is_visible(entity) {
                continue;
            }
            out.push((entity, transform, *drawable));
        }
        out
    }

    /// Visible markers with their placement and base drawable.
    pub fn markers(&self) -> Vec<(EntityId, Transform, Drawable3D, Marker)> {
        let mut out = Vec::new();
        for (idx, marker) in self.markers.iter().enumerate() {
            let Some(marker) = marker else { continue };
            let entity = EntityId(Handle::new(idx as u32));
            let (Some(transform), Some(drawable)) =
                (self.transform(entity), self.drawable_3d(entity))
            else {
                continue;
            };
            if !self.is_visible(entity) {
                continue;
            }
            out.push((entity, transform, drawable, *marker));
        }
        out
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let new_len = idx + 1;
            self.transforms.resize(new_len, None);
            self.visibility.resize(new_len, None);
            self.drawables_3d.resize(new_len, None);
            self.markers.resize(new_len, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::World;
    use crate::components::{Drawable3D, Marker, Material, Rgb, Transform, Visibility};
    use content::LocationId;

    fn sphere() -> Drawable3D {
        Drawable3D::sphere(1.0, Material::unlit(Rgb::WHITE, 1.0))
    }

    #[test]
    fn spawn_and_collect_drawables() {
        let mut world = World::new();
        let entity = world.spawn();
        world.set_transform(entity, Transform::identity());
        world.set_drawable_3d(entity, sphere());

        let drawables = world.drawables_3d();
        assert_eq!(drawables.len(), 1);
        assert_eq!(drawables[0].0, entity);
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn hidden_entities_are_filtered() {
        let mut world = World::new();
        let entity = world.spawn();
        world.set_transform(entity, Transform::identity());
        world.set_drawable_3d(entity, sphere());
        world.set_visibility(entity, Visibility::hidden());

        assert!(world.drawables_3d().is_empty());
    }

    #[test]
    fn markers_are_listed_separately_in_index_order() {
        let mut world = World::new();
        let plain = world.spawn();
        world.set_transform(plain, Transform::identity());
        world.set_drawable_3d(plain, sphere());

        let mut spawned = Vec::new();
        for i in 0..3u32 {
            let e = world.spawn();
            world.set_transform(e, Transform::identity());
            world.set_drawable_3d(e, sphere());
            world.set_marker(
                e,
                Marker::new(LocationId(i), i == 1),
            );
            spawned.push(e);
        }

        assert_eq!(world.drawables_3d().len(), 1);
        let markers: Vec<_> = world.markers().into_iter().map(|m| m.0).collect();
        assert_eq!(markers, spawned);
        assert_eq!(world.marker(spawned[1]).map(|m| m.visited), Some(true));
    }
}
