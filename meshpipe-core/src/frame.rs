/// Per-frame context threaded through update and draw
use crate::controller::{CameraController, InputState};
use crate::error::TransformError;
use crate::projection::Camera;
use crate::transform::{MatrixSet, Pose, Transform, UniformSink};

/// Input, camera and controller for the render loop. Owned by a single
/// thread; update always runs before draw within a frame.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub input: InputState,
    pub camera: Camera,
    pub controller: CameraController,
}

impl Frame {
    pub fn new(camera: Camera, controller: CameraController) -> Self {
        Self {
            input: InputState::default(),
            camera,
            controller,
        }
    }

    /// Advance the camera by `dt` seconds and update the followed pose.
    pub fn step(&mut self, dt: f32, followed: Option<&mut Pose>) {
        self.controller.control(&self.input);
        self.controller.advance(&mut self.camera, dt);
        if let Some(pose) = followed {
            self.controller.follow_pose(&self.camera, pose);
        }
    }

    /// Compose and upload the matrices for one object. On error nothing is
    /// uploaded.
    pub fn draw<S: UniformSink + ?Sized>(
        &self,
        pose: &Pose,
        sink: &mut S,
    ) -> Result<MatrixSet, TransformError> {
        let set = Transform::compose(pose, &self.camera)?;
        sink.upload_eye_position(&self.camera.eye_position());
        set.upload(sink);
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix4, Vector3};

    #[derive(Default)]
    struct CountingSink {
        uploads: usize,
        eye: Option<Vector3<f32>>,
    }

    impl UniformSink for CountingSink {
        fn upload_m(&mut self, _m: &Matrix4<f32>) {
            self.uploads += 1;
        }
        fn upload_inv_m(&mut self, _inv_m: &Matrix4<f32>) {
            self.uploads += 1;
        }
        fn upload_view(&mut self, _view: &Matrix4<f32>) {
            self.uploads += 1;
        }
        fn upload_projection(&mut self, _projection: &Matrix4<f32>) {
            self.uploads += 1;
        }
        fn upload_mvp(&mut self, _mvp: &Matrix4<f32>) {
            self.uploads += 1;
        }
        fn upload_vp(&mut self, _vp: &Matrix4<f32>) {
            self.uploads += 1;
        }
        fn upload_eye_position(&mut self, eye: &Vector3<f32>) {
            self.eye = Some(*eye);
        }
    }

    #[test]
    fn test_step_then_draw_uses_updated_pose() {
        let mut frame = Frame::default();
        frame.input.forward = true;
        let mut pose = Pose::default();
        frame.step(0.5, Some(&mut pose));
        assert!((pose.position.z + 1.0).abs() < 1e-5);

        let mut sink = CountingSink::default();
        let set = frame.draw(&pose, &mut sink).unwrap();
        assert_eq!(sink.uploads, 6);
        assert_eq!(sink.eye, Some(frame.camera.eye));
        assert_eq!(set.model, pose.model_matrix());
    }

    #[test]
    fn test_degenerate_pose_uploads_nothing() {
        let frame = Frame::default();
        let pose = Pose::new(Vector3::zeros(), Vector3::new(0.0, 1.0, 1.0), 0.0);
        let mut sink = CountingSink::default();
        assert!(frame.draw(&pose, &mut sink).is_err());
        assert_eq!(sink.uploads, 0);
        assert_eq!(sink.eye, None);
    }
}
