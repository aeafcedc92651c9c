//! Orbit camera around the travel globe.
//!
//! Spherical-coordinate controller in the style of a standard 3D-viewer orbit
//! control:
//! - drag rotates, wheel dollies within `[min_distance, max_distance]`
//! - no panning; the target stays at the globe center
//! - rotation deltas are damped, so motion eases out after release
//! - auto-rotates about +Y whenever no drag is in progress

use foundation::math::Vec3;
use gpu::Camera3D;
use scene::config::CameraConfig;

/// Keeps the eye off the poles, where the up vector degenerates.
const POLAR_EPS: f64 = 1e-6;

/// A press-release that travels less than this many pixels is a click.
pub const CLICK_SLOP_PX: f64 = 4.0;

/// Wheel delta to dolly factor, as an exponent.
const WHEEL_ZOOM_RATE: f64 = 0.002;

#[derive(Debug, Clone)]
pub struct OrbitController {
    cfg: CameraConfig,
    /// Azimuth about +Y, measured from +Z toward +X.
    theta: f64,
    /// Polar angle from +Y.
    phi: f64,
    radius: f64,
    delta_theta: f64,
    delta_phi: f64,
    dragging: bool,
    last_pos_px: [f64; 2],
    drag_travel_px: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl OrbitController {
    pub fn new(cfg: CameraConfig) -> Self {
        let eye = Vec3::new(cfg.eye[0], cfg.eye[1], cfg.eye[2]);
        let radius = eye.length().clamp(cfg.min_distance, cfg.max_distance);
        let (theta, phi) = match eye.normalized() {
            Some(d) => (d.x.atan2(d.z), d.y.clamp(-1.0, 1.0).acos()),
            None => (0.0, std::f64::consts::FRAC_PI_2),
        };
        Self {
            cfg,
            theta,
            phi: phi.clamp(POLAR_EPS, std::f64::consts::PI - POLAR_EPS),
            radius,
            delta_theta: 0.0,
            delta_phi: 0.0,
            dragging: false,
            last_pos_px: [0.0, 0.0],
            drag_travel_px: 0.0,
            canvas_width: 1280.0,
            canvas_height: 720.0,
        }
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width.max(1.0);
        self.canvas_height = height.max(1.0);
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn on_pointer_down(&mut self, pos_px: [f64; 2]) {
        self.dragging = true;
        self.last_pos_px = pos_px;
        self.drag_travel_px = 0.0;
    }

    pub fn on_pointer_move(&mut self, pos_px: [f64; 2]) {
        if !self.dragging {
            return;
        }
        let dx = pos_px[0] - self.last_pos_px[0];
        let dy = pos_px[1] - self.last_pos_px[1];
        self.drag_travel_px += (dx * dx + dy * dy).sqrt();
        self.last_pos_px = pos_px;

        // A drag across the full canvas height turns the globe once.
        let per_px = std::f64::consts::TAU / self.canvas_height;
        self.delta_theta -= dx * per_px;
        self.delta_phi -= dy * per_px;
    }

    /// Ends a drag. Returns `true` when the gesture was a click rather than a
    /// rotation.
    pub fn on_pointer_up(&mut self) -> bool {
        if !self.dragging {
            return false;
        }
        self.dragging = false;
        self.drag_travel_px < CLICK_SLOP_PX
    }

    /// Positive `delta` dollies out.
    pub fn on_wheel(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        let factor = (delta * WHEEL_ZOOM_RATE).exp();
        self.radius = (self.radius * factor).clamp(self.cfg.min_distance, self.cfg.max_distance);
    }

    pub fn update(&mut self, dt: f64) {
        let dt = if dt.is_finite() { dt.clamp(0.0, 0.1) } else { 0.0 };

        if !self.dragging {
            self.delta_theta -= self.cfg.auto_rotate_rad_per_s() * dt;
        }

        // Damping is tuned per 60 Hz frame; rescale to the actual step.
        let keep = (1.0 - self.cfg.damping.clamp(0.0, 1.0)).powf(dt * 60.0);
        let applied = 1.0 - keep;
        self.theta += self.delta_theta * applied;
        self.phi = (self.phi + self.delta_phi * applied)
            .clamp(POLAR_EPS, std::f64::consts::PI - POLAR_EPS);
        self.delta_theta *= keep;
        self.delta_phi *= keep;
    }

    pub fn distance(&self) -> f64 {
        self.radius
    }

    pub fn azimuth_rad(&self) -> f64 {
        self.theta
    }

    pub fn eye_position(&self) -> Vec3 {
        let (sp, cp) = self.phi.sin_cos();
        let (st, ct) = self.theta.sin_cos();
        Vec3::new(self.radius * sp * st, self.radius * cp, self.radius * sp * ct)
    }

    pub fn camera(&self) -> Camera3D {
        Camera3D::look_at(
            self.eye_position(),
            Vec3::ZERO,
            self.cfg.fov_y_deg.to_radians(),
            self.cfg.near,
            self.cfg.far,
        )
    }
}
