use foundation::math::Vec3;
use scene::picking::Ray;

/// Perspective camera looking at a target, +Y up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_rad: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera3D {
    pub fn look_at(position: Vec3, target: Vec3, fov_y_rad: f64, near: f64, far: f64) -> Self {
        Self {
            position,
            target,
            fov_y_rad,
            near,
            far,
        }
    }

    /// Column-major view-projection matrix, depth range [0, 1].
    pub fn view_proj(&self, width_px: f64, height_px: f64) -> [[f32; 4]; 4] {
        let view = mat4_look_at_rh(self.position, self.target, Vec3::Y);
        let proj = mat4_perspective_rh_z0(self.fov_y_rad, aspect(width_px, height_px), self.near, self.far);
        mat4_mul(proj, view)
    }

    /// World-space ray through a canvas pixel (origin top-left).
    pub fn screen_ray(&self, x_px: f64, y_px: f64, width_px: f64, height_px: f64) -> Option<Ray> {
        if width_px <= 0.0 || height_px <= 0.0 {
            return None;
        }
        let f = (self.target - self.position).normalized()?;
        let s = f.cross(Vec3::Y).normalized()?;
        let u = s.cross(f);

        let ndc_x = 2.0 * x_px / width_px - 1.0;
        let ndc_y = 1.0 - 2.0 * y_px / height_px;
        let tan_half = (0.5 * self.fov_y_rad).tan();
        let dir = f + s.scale(ndc_x * tan_half * aspect(width_px, height_px)) + u.scale(ndc_y * tan_half);
        Some(Ray::new(self.position, dir))
    }
}

fn aspect(width_px: f64, height_px: f64) -> f64 {
    if height_px <= 0.0 {
        1.0
    } else {
        (width_px / height_px).max(1e-6)
    }
}

pub fn mat4_mul(a: [[f32; 4]; 4], b: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
    // Column-major matrix multiply: c = a * b
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

pub fn mat4_perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> [[f32; 4]; 4] {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let m00 = (f / aspect) as f32;
    let m11 = f as f32;
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;

    // Column-major form of:
    // [ m00,  0,   0,   0 ]
    // [  0,  m11,  0,   0 ]
    // [  0,   0,  m22, m23 ]
    // [  0,   0,  -1,   0 ]
    [
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}

pub fn mat4_look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> [[f32; 4]; 4] {
    let f = (target - eye).normalized().unwrap_or(Vec3::new(0.0, 0.0, -1.0));
    let s = f.cross(up).normalized().unwrap_or(Vec3::new(1.0, 0.0, 0.0));
    let u = s.cross(f);

    let ex = -s.dot(eye);
    let ey = -u.dot(eye);
    let ez = f.dot(eye);

    [
        [s.x as f32, u.x as f32, (-f.x) as f32, 0.0],
        [s.y as f32, u.y as f32, (-f.y) as f32, 0.0],
        [s.z as f32, u.z as f32, (-f.z) as f32, 0.0],
        [ex as f32, ey as f32, ez as f32, 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::Camera3D;
    use approx::assert_relative_eq;
    use foundation::math::Vec3;

    fn camera() -> Camera3D {
        Camera3D::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 50f64.to_radians(), 0.1, 1000.0)
    }

    fn project(m: [[f32; 4]; 4], p: Vec3) -> [f32; 3] {
        let v = [p.x as f32, p.y as f32, p.z as f32, 1.0];
        let mut clip = [0.0f32; 4];
        for row in 0..4 {
            clip[row] = (0..4).map(|col| m[col][row] * v[col]).sum();
        }
        [clip[0] / clip[3], clip[1] / clip[3], clip[2] / clip[3]]
    }

    #[test]
    fn target_projects_to_screen_center() {
        let ndc = project(camera().view_proj(800.0, 600.0), Vec3::ZERO);
        assert!(ndc[0].abs() < 1e-6);
        assert!(ndc[1].abs() < 1e-6);
        assert!((0.0..=1.0).contains(&ndc[2]));
    }

    #[test]
    fn up_and_right_keep_screen_orientation() {
        let m = camera().view_proj(800.0, 600.0);
        assert!(project(m, Vec3::new(1.0, 0.0, 0.0))[0] > 0.0);
        assert!(project(m, Vec3::new(0.0, 1.0, 0.0))[1] > 0.0);
    }

    #[test]
    fn center_pixel_ray_points_at_target() {
        let ray = camera().screen_ray(400.0, 300.0, 800.0, 600.0).unwrap();
        let dir = ray.dir.normalized().unwrap();
        assert_relative_eq!(dir.z, -1.0, epsilon = 1e-12);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn screen_ray_agrees_with_projection() {
        let cam = camera();
        let m = cam.view_proj(800.0, 600.0);
        let p = Vec3::new(0.5, -0.3, 1.0);
        let ndc = project(m, p);
        let x_px = (ndc[0] as f64 + 1.0) * 0.5 * 800.0;
        let y_px = (1.0 - ndc[1] as f64) * 0.5 * 600.0;

        let ray = cam.screen_ray(x_px, y_px, 800.0, 600.0).unwrap();
        let to_p = (p - ray.origin).normalized().unwrap();
        let dir = ray.dir.normalized().unwrap();
        assert!(to_p.dot(dir) > 1.0 - 1e-6);
    }

    #[test]
    fn degenerate_canvas_has_no_ray() {
        assert!(camera().screen_ray(0.0, 0.0, 0.0, 600.0).is_none());
    }
}
