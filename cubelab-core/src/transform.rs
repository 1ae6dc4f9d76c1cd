/// Model transforms, rotation state and per-frame matrices
use nalgebra::{Matrix4, Vector3};

use crate::input::Key;
use crate::projection::Camera;

/// Degrees added or removed per key press.
pub const ROTATION_STEP: f32 = 1.0;

/// Rotation about the X and Y axes, in degrees.
///
/// Both angles are wrapped with `%` after each change, so they stay in
/// `(-360, 360)` and keep the sign of the accumulated rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x % 360.0,
            y: y % 360.0,
        }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.x = (self.x + dx) % 360.0;
        self.y = (self.y + dy) % 360.0;
    }

    pub fn reset(&mut self) {
        *self = Self::zero();
    }

    /// Apply a key press. Right/left turn about Y, up/down about X.
    pub fn apply(&mut self, key: Key) {
        match key {
            Key::Right => self.rotate(0.0, ROTATION_STEP),
            Key::Left => self.rotate(0.0, -ROTATION_STEP),
            Key::Up => self.rotate(-ROTATION_STEP, 0.0),
            Key::Down => self.rotate(ROTATION_STEP, 0.0),
            Key::Space => self.reset(),
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// `rotate(y, Y) * rotate(x, X)`
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let ry = Matrix4::from_axis_angle(&Vector3::y_axis(), rotation.y.to_radians());
        let rx = Matrix4::from_axis_angle(&Vector3::x_axis(), rotation.x.to_radians());

        ry * rx
    }

    /// Create a uniform scale matrix
    pub fn scale_matrix(scale: f32) -> Matrix4<f32> {
        Matrix4::new_scaling(scale)
    }

    /// Model matrix: rotate about Y, then X, then scale (applied right to left).
    pub fn model_matrix(rotation: &RotationState, scale: f32) -> Matrix4<f32> {
        Self::rotation_matrix(rotation) * Self::scale_matrix(scale)
    }

    /// Transpose of the inverse of `model`.
    ///
    /// A singular model (zero scale) yields the identity.
    pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix4<f32> {
        model
            .try_inverse()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

/// Every matrix a demo uploads for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub mvp: Matrix4<f32>,
    pub normal: Matrix4<f32>,
}

impl FrameMatrices {
    pub fn compute(camera: &Camera, rotation: &RotationState, scale: f32) -> Self {
        let model = Transform::model_matrix(rotation, scale);
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();

        Self {
            model,
            view,
            projection,
            mvp: Transform::mvp_matrix(&model, &view, &projection),
            normal: Transform::normal_matrix(&model),
        }
    }
}
