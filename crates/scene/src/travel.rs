use content::{LocationId, LocationSet};
use foundation::math::Vec3;
use runtime::{Event, EventBus, Frame};
use serde::Serialize;
use tracing::{info, warn};

use crate::World;
use crate::animation::{advance_spin, marker_scale};
use crate::config::GlobeConfig;
use crate::events::GlobeEvent;
use crate::fallback::FallbackList;
use crate::overlay::OverlayView;
use crate::picking::{PickOptions, Ray, pick_ray};
use crate::prefabs::{GlobeScene, spawn_travel_globe};
use crate::selection::{Selection, SelectionState, Transition};

/// The interactive travel globe: scene, animation clock, picking and
/// selection, independent of any rendering surface.
#[derive(Debug)]
pub struct TravelGlobe {
    cfg: GlobeConfig,
    locations: LocationSet,
    world: World,
    scene: GlobeScene,
    frame: Frame,
    spin_rad: f64,
    selection: Selection,
    events: EventBus<GlobeEvent>,
}

/// Snapshot of the globe's interactive state for the host page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobeViewState {
    pub frame_index: u64,
    pub time_s: f64,
    pub spin_rad: f64,
    pub selected: Option<String>,
    pub hovered: Option<String>,
    /// Whether the hovered marker would open an overlay when clicked.
    pub hovered_selectable: bool,
    pub overlay: Option<OverlayView>,
}

impl TravelGlobe {
    pub fn new(locations: LocationSet, cfg: GlobeConfig) -> Self {
        let mut world = World::new();
        let scene = spawn_travel_globe(&mut world, &locations, &cfg);
        Self {
            cfg,
            locations,
            world,
            scene,
            frame: Frame::first(),
            spin_rad: 0.0,
            selection: Selection::new(),
            events: EventBus::new(),
        }
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.cfg
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scene(&self) -> &GlobeScene {
        &self.scene
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Current rotation of the globe group about +Y.
    pub fn spin_rad(&self) -> f64 {
        self.spin_rad
    }

    /// Steps the clock, the globe spin and every marker's scale.
    pub fn advance(&mut self, dt_s: f64) -> Frame {
        self.frame = self.frame.next(dt_s);
        self.spin_rad = advance_spin(self.spin_rad, self.frame.dt_s, self.cfg.spin_rad_per_s);

        self.update_marker_scales();
        self.frame
    }

    fn update_marker_scales(&mut self) {
        let t = self.frame.time.seconds();
        let hovered = self.selection.hovered();
        for (entity, transform, _, marker) in self.world.markers() {
            let is_hovered = hovered == Some(marker.location);
            let scale = marker_scale(&marker, is_hovered, t, &self.cfg.markers);
            self.world.set_transform(entity, transform.with_scale(scale));
        }
    }

    /// Rebuilds the scene for a new location set. Clock, spin and undrained
    /// events carry over. An open overlay stays open while its location is
    /// still present and visited; otherwise it is dismissed.
    pub fn replace_locations(&mut self, locations: LocationSet) {
        let kept = self
            .selection
            .state()
            .selected()
            .and_then(|id| self.locations.get(id))
            .and_then(|current| locations.find(current.name()))
            .filter(|(_, l)| l.visited())
            .map(|(id, _)| id);
        if kept.is_none() {
            self.dismiss();
        }

        let mut world = World::new();
        self.scene = spawn_travel_globe(&mut world, &locations, &self.cfg);
        self.world = world;
        self.locations = locations;
        self.selection = Selection::new();
        if let Some(id) = kept {
            self.selection.select(&self.locations, id);
        }
        self.update_marker_scales();
    }

    /// Position of a location's marker after the globe spin is applied.
    pub fn marker_world_position(&self, id: LocationId) -> Option<Vec3> {
        let entity = self.scene.marker_entity(id.index())?;
        let transform = self.world.transform(entity)?;
        Some(transform.position.rotate_y(self.spin_rad))
    }

    /// Nearest marker under a world-space ray, hidden markers excluded.
    pub fn pick(&self, ray: Ray) -> Option<LocationId> {
        let opts = PickOptions {
            min_radius: self.cfg.markers.min_pick_radius,
            occluder_radius: Some(self.cfg.earth.radius),
            ..PickOptions::default()
        };
        pick_ray(&self.world, ray.rotated_y(-self.spin_rad), opts).map(|hit| hit.marker.location)
    }

    /// Updates hover from a pointer ray. Returns `true` if the hovered marker changed.
    pub fn pointer_move(&mut self, ray: Option<Ray>) -> bool {
        let hit = ray.and_then(|r| self.pick(r));
        self.selection.set_hovered(hit)
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.selection.set_hovered(None)
    }

    /// A click selects the marker under the ray if it is visited.
    pub fn click(&mut self, ray: Ray) -> Transition {
        match self.pick(ray) {
            Some(id) => self.select(id),
            None => Transition::Unchanged,
        }
    }

    pub fn select(&mut self, id: LocationId) -> Transition {
        let transition = self.selection.select(&self.locations, id);
        match transition {
            Transition::Opened(to) | Transition::Switched { to, .. } => {
                if let Some(location) = self.locations.get(to) {
                    self.events.emit(
                        self.frame,
                        GlobeEvent::LocationSelected {
                            name: location.name().to_owned(),
                        },
                    );
                }
            }
            Transition::Closed(_) | Transition::Unchanged => {}
        }
        transition
    }

    /// Selects by display name; unknown names are ignored.
    pub fn select_by_name(&mut self, name: &str) -> Transition {
        match self.locations.find(name) {
            Some((id, _)) => self.select(id),
            None => Transition::Unchanged,
        }
    }

    pub fn dismiss(&mut self) -> Transition {
        let transition = self.selection.dismiss();
        if let Transition::Closed(_) = transition {
            self.events.emit(self.frame, GlobeEvent::OverlayClosed);
        }
        transition
    }

    pub fn selection(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn hovered(&self) -> Option<LocationId> {
        self.selection.hovered()
    }

    pub fn overlay(&self) -> Option<OverlayView> {
        let id = self.selection.state().selected()?;
        self.locations.get(id).map(OverlayView::for_location)
    }

    pub fn fallback_list(&self) -> FallbackList {
        FallbackList::from_locations(&self.locations)
    }

    /// Reports that no rendering surface is available. The globe keeps
    /// working through the fallback list.
    pub fn emit_render_fallback(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(%reason, "rendering unavailable; using location list");
        self.events.emit(self.frame, GlobeEvent::RenderFallback { reason });
    }

    pub fn drain_events(&mut self) -> Vec<Event<GlobeEvent>> {
        self.events.drain()
    }

    pub fn view_state(&self) -> GlobeViewState {
        let name_of = |id: LocationId| self.locations.get(id).map(|l| l.name().to_owned());
        let hovered = self.selection.hovered();
        GlobeViewState {
            frame_index: self.frame.index,
            time_s: self.frame.time.seconds(),
            spin_rad: self.spin_rad,
            selected: self.selection.state().selected().and_then(name_of),
            hovered: hovered.and_then(name_of),
            hovered_selectable: hovered
                .and_then(|id| self.locations.get(id))
                .is_some_and(|l| l.visited()),
            overlay: self.overlay(),
        }
    }

    /// Logs a one-line summary of the loaded globe.
    pub fn log_summary(&self) {
        info!(
            locations = self.locations.len(),
            visited = self.locations.visited().count(),
            "travel globe ready"
        );
    }
}
