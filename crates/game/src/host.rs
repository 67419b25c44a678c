use bitflags::bitflags;
use glam::{Quat, Vec3};

bitflags! {
    /// Which velocity components a launch replaces instead of adding to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LaunchFlags: u8 {
        const OVERRIDE_HORIZONTAL = 1 << 0;
        const OVERRIDE_VERTICAL = 1 << 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    Oil,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraEffect {
    DashFov,
}

/// What the controller needs from the movement integrator that owns the
/// character's body. World space is Y up.
pub trait MovementHost {
    fn is_grounded(&self) -> bool;

    fn max_walk_speed(&self) -> f32;
    fn set_max_walk_speed(&mut self, speed: f32);

    fn control_yaw(&self) -> f32;
    fn camera_forward(&self) -> Vec3;

    /// Standard jump. Only leaves the ground if the body is grounded when
    /// the integrator next steps.
    fn jump(&mut self);
    fn launch(&mut self, velocity: Vec3, flags: LaunchFlags);

    fn add_movement_input(&mut self, direction: Vec3, scale: f32);
    fn add_yaw_input(&mut self, value: f32);
    fn add_pitch_input(&mut self, value: f32);

    fn set_facing(&mut self, rotation: Quat);
    fn play_camera_effect(&mut self, effect: CameraEffect);
}

pub fn yaw_forward(yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(-sin_yaw, 0.0, -cos_yaw)
}

pub fn yaw_right(yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(cos_yaw, 0.0, -sin_yaw)
}

pub fn facing_from_direction(direction: Vec3) -> Quat {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() < 0.001 {
        return Quat::IDENTITY;
    }

    let flat = flat.normalize();
    Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z))
}
