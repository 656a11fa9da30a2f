/// Object pose and per-draw transform composition
use nalgebra::{Matrix4, Vector3};

use crate::error::TransformError;
use crate::math::{
    check_scale, inverse_rotation_y, inverse_scaling, inverse_translation, rotation_y, scaling,
    translation,
};
use crate::projection::Camera;

/// Placement of an object in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3<f32>,
    /// Every component must be nonzero for the inverse to exist.
    pub scale: Vector3<f32>,
    /// Rotation about the vertical axis, in degrees.
    pub orientation: f32,
}

impl Pose {
    pub fn new(position: Vector3<f32>, scale: Vector3<f32>, orientation: f32) -> Self {
        Self {
            position,
            scale,
            orientation,
        }
    }

    /// `M = S * R * T`: scale, then rotate, then translate.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        scaling(&self.scale) * rotation_y(self.orientation) * translation(&self.position)
    }

    /// `InvM = InvT * InvR * InvS`.
    pub fn inverse_model_matrix(&self) -> Result<Matrix4<f32>, TransformError> {
        let inv_s = inverse_scaling(&self.scale)?;
        Ok(inverse_translation(&self.position) * inverse_rotation_y(self.orientation) * inv_s)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0), 0.0)
    }
}

/// Receiver of per-draw matrices. A sink implements only what it consumes.
pub trait UniformSink {
    fn upload_m(&mut self, _m: &Matrix4<f32>) {}
    fn upload_inv_m(&mut self, _inv_m: &Matrix4<f32>) {}
    fn upload_view(&mut self, _view: &Matrix4<f32>) {}
    fn upload_projection(&mut self, _projection: &Matrix4<f32>) {}
    fn upload_mvp(&mut self, _mvp: &Matrix4<f32>) {}
    fn upload_vp(&mut self, _vp: &Matrix4<f32>) {}
    fn upload_eye_position(&mut self, _eye: &Vector3<f32>) {}
}

/// All matrices needed for one draw call, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSet {
    pub model: Matrix4<f32>,
    pub inverse_model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    /// `M * View * Projection`.
    pub mvp: Matrix4<f32>,
    /// `View * Projection`.
    pub vp: Matrix4<f32>,
}

impl MatrixSet {
    pub fn upload<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        sink.upload_m(&self.model);
        sink.upload_inv_m(&self.inverse_model);
        sink.upload_view(&self.view);
        sink.upload_projection(&self.projection);
        sink.upload_mvp(&self.mvp);
        sink.upload_vp(&self.vp);
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Compose the full matrix set. Inputs are validated before any matrix
    /// is built; nothing is cached between calls.
    pub fn compose(pose: &Pose, camera: &Camera) -> Result<MatrixSet, TransformError> {
        check_scale(&pose.scale)?;
        let view = camera.view_matrix()?;
        let projection = camera.projection_matrix()?;

        let model = pose.model_matrix();
        let inverse_model = pose.inverse_model_matrix()?;
        let vp = view * projection;
        let mvp = model * vp;

        Ok(MatrixSet {
            model,
            inverse_model,
            view,
            projection,
            mvp,
            vp,
        })
    }
}
