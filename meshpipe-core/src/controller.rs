/// Keyboard-driven camera controller
use nalgebra::Vector3;
use tracing::debug;

use crate::math::{direction, rotation_y, transform_row};
use crate::projection::Camera;
use crate::transform::Pose;

/// Camera behaviour selected by the mode keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Camera steered by the turn/move keys; the followed object tracks it.
    #[default]
    FollowKeys,
    /// Camera chases an object that drives itself.
    HeliCam,
    /// Free-running trace; the controller leaves the camera alone.
    HeartTrace,
}

/// Mode-switch events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Trace,
    Heli,
    Follow,
}

impl CameraMode {
    /// Transition table. Every mode can reach every other mode.
    pub fn on_event(self, event: InputEvent) -> CameraMode {
        match (self, event) {
            (_, InputEvent::Trace) => CameraMode::HeartTrace,
            (_, InputEvent::Heli) => CameraMode::HeliCam,
            (_, InputEvent::Follow) => CameraMode::FollowKeys,
        }
    }
}

/// Keys held during the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub backward: bool,
    pub trace: bool,
    pub heli: bool,
    pub follow: bool,
}

impl InputState {
    /// Mode events for this frame; later events win.
    pub fn events(&self) -> impl Iterator<Item = InputEvent> {
        [
            (self.trace, InputEvent::Trace),
            (self.heli, InputEvent::Heli),
            (self.follow, InputEvent::Follow),
        ]
        .into_iter()
        .filter_map(|(held, event)| held.then_some(event))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// World units per second.
    pub move_speed: f32,
    /// Radians per second.
    pub turn_rate: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            turn_rate: 0.5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CameraController {
    pub mode: CameraMode,
    pub config: ControllerConfig,
    velocity: f32,
    angular_velocity: f32,
    /// Heading in degrees, measured from +Z.
    alpha: f32,
}

impl CameraController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn heading(&self) -> f32 {
        self.alpha
    }

    /// Apply mode switches and read the movement keys.
    pub fn control(&mut self, input: &InputState) {
        for event in input.events() {
            let next = self.mode.on_event(event);
            if next != self.mode {
                debug!(from = ?self.mode, to = ?next, "camera mode change");
                self.mode = next;
            }
        }

        self.angular_velocity = if input.turn_left {
            -self.config.turn_rate
        } else if input.turn_right {
            self.config.turn_rate
        } else {
            0.0
        };

        self.velocity = if input.forward {
            self.config.move_speed
        } else if input.backward {
            -self.config.move_speed
        } else {
            0.0
        };
    }

    /// Move the camera for one time step.
    pub fn advance(&mut self, camera: &mut Camera, dt: f32) {
        if self.mode != CameraMode::FollowKeys {
            return;
        }

        let offset = camera.look_at - camera.eye;
        let distance = offset.norm();
        let Some(heading) = offset.try_normalize(f32::EPSILON) else {
            return;
        };

        let turn = rotation_y((self.angular_velocity * dt).to_degrees());
        let turned = transform_row(&direction(&heading), &turn);
        let heading = Vector3::new(turned.x, turned.y, turned.z);

        camera.eye += heading * self.velocity * dt;
        camera.look_at = camera.eye + heading * distance;

        let side = if camera.look_at.x - camera.eye.x < 0.0 {
            -1.0
        } else {
            1.0
        };
        let cos = heading.dot(&Vector3::z()).clamp(-1.0, 1.0);
        self.alpha = -side * cos.acos().to_degrees();
    }

    /// Place the followed object under the look-at point, facing the
    /// camera heading.
    pub fn follow_pose(&self, camera: &Camera, pose: &mut Pose) {
        if self.mode == CameraMode::FollowKeys {
            pose.position = Vector3::new(camera.look_at.x, pose.position.y, camera.look_at.z);
            pose.orientation = self.alpha;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_transitions() {
        let mut controller = CameraController::default();
        assert_eq!(controller.mode, CameraMode::FollowKeys);

        controller.control(&InputState {
            heli: true,
            ..Default::default()
        });
        assert_eq!(controller.mode, CameraMode::HeliCam);

        // Follow wins over trace when both are held.
        controller.control(&InputState {
            trace: true,
            follow: true,
            ..Default::default()
        });
        assert_eq!(controller.mode, CameraMode::FollowKeys);

        assert_eq!(
            CameraMode::HeliCam.on_event(InputEvent::Trace),
            CameraMode::HeartTrace
        );
    }

    #[test]
    fn test_movement_keys() {
        let mut controller = CameraController::default();
        controller.control(&InputState {
            turn_left: true,
            backward: true,
            ..Default::default()
        });
        assert_eq!(controller.angular_velocity(), -0.5);
        assert_eq!(controller.velocity(), -2.0);

        controller.control(&InputState::default());
        assert_eq!(controller.angular_velocity(), 0.0);
        assert_eq!(controller.velocity(), 0.0);
    }

    #[test]
    fn test_advance_moves_forward() {
        let mut camera = Camera::default();
        let mut controller = CameraController::default();
        controller.control(&InputState {
            forward: true,
            ..Default::default()
        });
        controller.advance(&mut camera, 0.5);

        // Looking down -Z from (0,0,2): one unit forward.
        assert!((camera.eye - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
        assert!((camera.look_at - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-5);
        assert!((controller.heading().abs() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_advance_turns_and_keeps_distance() {
        let mut camera = Camera::default();
        let mut controller = CameraController::default();
        controller.control(&InputState {
            turn_right: true,
            ..Default::default()
        });
        controller.advance(&mut camera, 1.0);

        assert_eq!(camera.eye, Vector3::new(0.0, 0.0, 2.0));
        assert!(((camera.look_at - camera.eye).norm() - 2.0).abs() < 1e-5);
        assert!(camera.look_at.x.abs() > 0.1);
    }

    #[test]
    fn test_other_modes_leave_camera_alone() {
        let mut camera = Camera::default();
        let mut controller = CameraController::default();
        controller.control(&InputState {
            trace: true,
            forward: true,
            ..Default::default()
        });
        controller.advance(&mut camera, 1.0);
        assert_eq!(camera, Camera::default());
    }

    #[test]
    fn test_follow_pose_keeps_height() {
        let mut camera = Camera::default();
        camera.look_at = Vector3::new(3.0, 7.0, -4.0);
        let controller = CameraController::default();
        let mut pose = Pose::new(
            Vector3::new(0.0, -0.5, 0.9),
            Vector3::new(0.03, 0.03, 0.03),
            180.0,
        );
        controller.follow_pose(&camera, &mut pose);

        assert_eq!(pose.position, Vector3::new(3.0, -0.5, -4.0));
        assert_eq!(pose.orientation, controller.heading());
    }

    #[test]
    fn test_heading_uses_direction_after_turn() {
        let mut camera = Camera::default();
        let mut controller = CameraController::default();
        controller.control(&InputState {
            turn_right: true,
            forward: true,
            ..Default::default()
        });
        controller.advance(&mut camera, 1.0);

        // Facing -Z and turned by 0.5 rad toward +X: the heading is measured
        // from the turned direction, not the one held before the step.
        let expected = -(180.0 - 0.5f32.to_degrees());
        assert!(
            (controller.heading() - expected).abs() < 1e-3,
            "heading {}",
            controller.heading()
        );
        assert!(camera.look_at.x > camera.eye.x);
        let moved = Vector3::new(2.0 * 0.5f32.sin(), 0.0, 2.0 - 2.0 * 0.5f32.cos());
        assert!((camera.eye - moved).norm() < 1e-5);
    }
}
