/// Camera and projection utilities
use nalgebra::{Matrix4, Vector3};

use crate::error::TransformError;
use crate::math::inverse_translation;

/// Camera state: placement plus perspective parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vector3<f32>,
    pub look_at: Vector3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            ..Self::default()
        }
    }

    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn eye_position(&self) -> Vector3<f32> {
        self.eye
    }

    /// Orthonormal camera basis `(u, v, w)`; `w` points from the look-at
    /// point back to the eye.
    pub fn basis(&self) -> Result<(Vector3<f32>, Vector3<f32>, Vector3<f32>), TransformError> {
        let w = (self.eye - self.look_at)
            .try_normalize(f32::EPSILON)
            .ok_or(TransformError::DegenerateView)?;
        let u = self
            .up
            .cross(&w)
            .try_normalize(f32::EPSILON)
            .ok_or(TransformError::DegenerateView)?;
        let v = w.cross(&u);
        Ok((u, v, w))
    }

    /// View matrix: translate the eye to the origin, then rotate into the
    /// camera basis.
    #[rustfmt::skip]
    pub fn view_matrix(&self) -> Result<Matrix4<f32>, TransformError> {
        let (u, v, w) = self.basis()?;
        let rotation = Matrix4::new(
            u.x, v.x, w.x, 0.0,
            u.y, v.y, w.y, 0.0,
            u.z, v.z, w.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Ok(inverse_translation(&self.eye) * rotation)
    }

    /// Reject parameters that would give an infinite or NaN projection.
    pub fn check_projection(&self) -> Result<(), TransformError> {
        let fov_ok = self.fov > 0.0 && self.fov < std::f32::consts::PI;
        let aspect_ok = self.aspect > 0.0 && self.aspect.is_finite();
        let planes_ok = self.near > 0.0 && self.near < self.far && self.far.is_finite();
        if fov_ok && aspect_ok && planes_ok {
            Ok(())
        } else {
            Err(TransformError::InvalidProjection {
                fov: self.fov,
                aspect: self.aspect,
                near: self.near,
                far: self.far,
            })
        }
    }

    /// Perspective projection mapping depth `near -> -1`, `far -> +1`.
    #[rustfmt::skip]
    pub fn projection_matrix(&self) -> Result<Matrix4<f32>, TransformError> {
        self.check_projection()?;
        let (near, far) = (self.near, self.far);

        let sy = 1.0 / (self.fov / 2.0).tan();
        let depth = far - near;
        Ok(Matrix4::new(
            sy / self.aspect, 0.0, 0.0, 0.0,
            0.0, sy, 0.0, 0.0,
            0.0, 0.0, -(far + near) / depth, -1.0,
            0.0, 0.0, -2.0 * near * far / depth, 0.0,
        ))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vector3::new(0.0, 0.0, 2.0),
            look_at: Vector3::zeros(),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 1.0,
            near: 0.01,
            far: 10.0,
        }
    }
}
