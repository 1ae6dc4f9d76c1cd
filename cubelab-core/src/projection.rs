/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Clip-space `w` below which a point counts as behind the eye
const MIN_CLIP_W: f32 = 1e-6;

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera at `(5, 5, 5)` looking at the origin.
    pub fn new(fov_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            eye: Point3::new(5.0, 5.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov_degrees,
            aspect: 1.0,
            near,
            far,
        }
    }

    /// Set the aspect ratio from viewport dimensions. Empty viewports keep the current ratio.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye, &self.target, &self.up)
    }

    /// Create the perspective projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov_degrees.to_radians(), self.near, self.far)
    }

    /// Project a point through `mvp` to screen space.
    ///
    /// Returns `(x, y, depth)` with `y` growing downwards and depth in NDC.
    /// Points behind the eye yield `None`; points outside the viewport are
    /// still returned so triangles crossing the edge can be clipped by the
    /// rasterizer.
    pub fn project_to_screen(
        point: &Point3<f32>,
        mvp: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = mvp * point.to_homogeneous();

        if clip.w < MIN_CLIP_W {
            return None;
        }

        let ndc = clip.xyz() / clip.w;

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(40.0, 1.0, 200.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let mut camera = Camera::default();
        assert_eq!(camera.eye, Point3::new(5.0, 5.0, 5.0));
        assert!((camera.aspect - 1.0).abs() < 1e-6);

        camera.set_viewport(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);

        camera.set_viewport(0, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let camera = Camera::default();
        let view = camera.view_matrix();
        let eye = view.transform_point(&camera.eye);
        assert!(eye.coords.norm() < 1e-5);

        // Target lies straight ahead along -Z
        let target = view.transform_point(&camera.target);
        assert!(target.x.abs() < 1e-5 && target.y.abs() < 1e-5);
        assert!((target.z + 75f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_projection_depth_range() {
        let camera = Camera::default();
        let projection = camera.projection_matrix();

        let near = projection.transform_point(&Point3::new(0.0, 0.0, -camera.near));
        let far = projection.transform_point(&Point3::new(0.0, 0.0, -camera.far));
        assert!((near.z + 1.0).abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_project_to_screen() {
        let camera = Camera::default();
        let mvp = camera.projection_matrix() * camera.view_matrix();

        let (x, y, depth) = Camera::project_to_screen(&Point3::origin(), &mvp, 80, 40).unwrap();
        assert!((x - 40.0).abs() < 1e-3);
        assert!((y - 20.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);

        // Behind the eye
        let behind = Point3::new(10.0, 10.0, 10.0);
        assert!(Camera::project_to_screen(&behind, &mvp, 80, 40).is_none());
    }
}
