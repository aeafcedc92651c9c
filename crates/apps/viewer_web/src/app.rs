use content::LocationSet;
use gpu::{RenderSurface, Renderer, SurfaceError};
use runtime::Event;
use scene::config::GlobeConfig;
use scene::events::GlobeEvent;
use scene::fallback::FallbackList;
use scene::selection::Transition;
use scene::travel::{GlobeViewState, TravelGlobe};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::orbit::OrbitController;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenderMode {
    /// Waiting for the surface to come up.
    Pending,
    Scene,
    /// No surface; the host shows the location list instead.
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerSnapshot {
    pub render: RenderMode,
    pub running: bool,
    pub camera_distance: f64,
    pub globe: GlobeViewState,
    pub fallback: Option<FallbackList>,
}

/// Travel globe bound to an orbit camera and, when available, a surface.
///
/// Canvas pointer input only reaches the globe in `Scene` mode; selection by
/// name works in every mode so the fallback list keeps the same contract.
#[derive(Debug)]
pub struct GlobeViewer<S> {
    globe: TravelGlobe,
    orbit: OrbitController,
    surface: Option<S>,
    mode: RenderMode,
    canvas_width: f64,
    canvas_height: f64,
    running: bool,
    mount_id: u64,
}

impl<S: RenderSurface> GlobeViewer<S> {
    pub fn new(locations: LocationSet, cfg: GlobeConfig) -> Self {
        let orbit = OrbitController::new(cfg.camera.clone());
        let globe = TravelGlobe::new(locations, cfg);
        globe.log_summary();
        Self {
            globe,
            orbit,
            surface: None,
            mode: RenderMode::Pending,
            canvas_width: 1280.0,
            canvas_height: 720.0,
            running: true,
            mount_id: 0,
        }
    }

    /// Tags the viewer with the mount that created it.
    pub fn with_mount_id(mut self, mount_id: u64) -> Self {
        self.mount_id = mount_id;
        self
    }

    pub fn mount_id(&self) -> u64 {
        self.mount_id
    }

    pub fn globe(&self) -> &TravelGlobe {
        &self.globe
    }

    pub fn mode(&self) -> &RenderMode {
        &self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn attach_surface(&mut self, mut surface: S) {
        surface.resize(self.canvas_width as u32, self.canvas_height as u32);
        self.surface = Some(surface);
        self.mode = RenderMode::Scene;
        info!("globe surface attached");
    }

    /// Completes asynchronous surface creation started by mount `mount_id`.
    /// Results from an older mount, or arriving after unmount, are dropped.
    /// Returns `true` if the result was applied.
    pub fn finish_surface_init(&mut self, mount_id: u64, result: Result<S, SurfaceError>) -> bool {
        if mount_id != self.mount_id || !self.is_running() {
            debug!(mount_id, current = self.mount_id, "ignoring stale surface init");
            return false;
        }
        match result {
            Ok(surface) => self.attach_surface(surface),
            Err(err) => self.surface_failed(err),
        }
        true
    }

    /// Switches to the location list. Never fatal.
    pub fn surface_failed(&mut self, err: SurfaceError) {
        self.surface = None;
        let reason = err.to_string();
        self.globe.emit_render_fallback(reason.clone());
        self.mode = RenderMode::Fallback { reason };
    }

    /// Replaces the location set, keeping camera, render mode, selection
    /// where possible and pending events.
    pub fn replace_locations(&mut self, locations: LocationSet) {
        self.globe.replace_locations(locations);
        self.globe.log_summary();
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width.max(1.0);
        self.canvas_height = height.max(1.0);
        self.orbit.set_canvas_size(self.canvas_width, self.canvas_height);
        if let Some(surface) = &mut self.surface {
            surface.resize(self.canvas_width as u32, self.canvas_height as u32);
        }
    }

    fn accepts_canvas_input(&self) -> bool {
        self.is_running() && self.mode == RenderMode::Scene
    }

    pub fn pointer_down(&mut self, x_px: f64, y_px: f64) {
        if self.accepts_canvas_input() {
            self.orbit.on_pointer_down([x_px, y_px]);
        }
    }

    /// Returns `true` if the hovered marker changed.
    pub fn pointer_move(&mut self, x_px: f64, y_px: f64) -> bool {
        if !self.accepts_canvas_input() {
            return false;
        }
        if self.orbit.is_dragging() {
            self.orbit.on_pointer_move([x_px, y_px]);
            return false;
        }
        let ray = self
            .orbit
            .camera()
            .screen_ray(x_px, y_px, self.canvas_width, self.canvas_height);
        self.globe.pointer_move(ray)
    }

    /// Ends a press; a press that barely moved counts as a click on the marker
    /// under the pointer.
    pub fn pointer_up(&mut self, x_px: f64, y_px: f64) -> Transition {
        if !self.accepts_canvas_input() || !self.orbit.on_pointer_up() {
            return Transition::Unchanged;
        }
        match self
            .orbit
            .camera()
            .screen_ray(x_px, y_px, self.canvas_width, self.canvas_height)
        {
            Some(ray) => self.globe.click(ray),
            None => Transition::Unchanged,
        }
    }

    pub fn pointer_leave(&mut self) -> bool {
        if self.orbit.is_dragging() {
            self.orbit.on_pointer_up();
        }
        self.globe.pointer_leave()
    }

    pub fn wheel(&mut self, delta_y: f64) {
        if self.accepts_canvas_input() {
            self.orbit.on_wheel(delta_y);
        }
    }

    pub fn select_location(&mut self, name: &str) -> Transition {
        if !self.running {
            return Transition::Unchanged;
        }
        self.globe.select_by_name(name)
    }

    pub fn close_overlay(&mut self) -> Transition {
        self.globe.dismiss()
    }

    /// Advances one display refresh and draws it. Returns `false` once the
    /// viewer is unmounted so the host can stop scheduling frames.
    pub fn advance_frame(&mut self, dt_s: f64) -> bool {
        if !self.running {
            return false;
        }
        self.globe.advance(dt_s);
        self.orbit.update(dt_s);

        if let Some(surface) = &mut self.surface {
            let frame = Renderer::collect(
                &self.globe,
                self.orbit.camera(),
                self.canvas_width,
                self.canvas_height,
            );
            if let Err(err) = surface.submit(&frame) {
                warn!(%err, "frame submission failed");
                self.surface_failed(err);
            }
        }
        true
    }

    pub fn drain_events(&mut self) -> Vec<Event<GlobeEvent>> {
        self.globe.drain_events()
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            render: self.mode.clone(),
            running: self.running,
            camera_distance: self.orbit.distance(),
            globe: self.globe.view_state(),
            fallback: match self.mode {
                RenderMode::Fallback { .. } => Some(self.globe.fallback_list()),
                RenderMode::Pending | RenderMode::Scene => None,
            },
        }
    }

    /// Releases the surface, closes any overlay and stops the frame loop.
    pub fn unmount(&mut self) {
        self.surface = None;
        self.running = false;
        self.globe.pointer_leave();
        self.globe.dismiss();
        info!("globe unmounted");
    }
}
