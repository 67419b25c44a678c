use glam::{EulerRot, Quat, Vec3};

use super::CameraConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringArm {
    pub target_length: f32,
    pub pitch: f32,
    pub use_control_rotation: bool,
}

impl SpringArm {
    /// Camera offset from the character for the given control yaw, Y up.
    pub fn offset(&self, control_yaw: f32) -> Vec3 {
        let yaw = if self.use_control_rotation { control_yaw } else { 0.0 };
        let rotation = Quat::from_euler(EulerRot::YXZ, yaw, self.pitch, 0.0);
        rotation * Vec3::new(0.0, 0.0, self.target_length)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmSlot {
    Main,
    Aim,
}

pub struct CameraRig {
    arm: SpringArm,
    aim_arm: SpringArm,
    attached: ArmSlot,
    zoom_step: f32,
    zoom_min: f32,
    zoom_max: f32,
}

impl CameraRig {
    pub fn new(config: &CameraConfig) -> Self {
        let pitch = config.arm_pitch_degrees.to_radians();
        Self {
            arm: SpringArm {
                target_length: config.arm_length,
                pitch,
                use_control_rotation: true,
            },
            aim_arm: SpringArm {
                target_length: config.aim_arm_length,
                pitch,
                use_control_rotation: false,
            },
            attached: ArmSlot::Main,
            zoom_step: config.zoom_step,
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
        }
    }

    pub fn arm(&self) -> &SpringArm {
        &self.arm
    }

    pub fn aim_arm(&self) -> &SpringArm {
        &self.aim_arm
    }

    pub fn attached(&self) -> ArmSlot {
        self.attached
    }

    pub fn active_arm(&self) -> &SpringArm {
        match self.attached {
            ArmSlot::Main => &self.arm,
            ArmSlot::Aim => &self.aim_arm,
        }
    }

    pub fn attach(&mut self, slot: ArmSlot) {
        self.attached = slot;
    }

    // Past the soft limit the arm creeps back by one unit per press.
    pub fn zoom_in(&mut self) {
        if self.arm.target_length > self.zoom_min {
            self.arm.target_length -= self.zoom_step;
        } else {
            self.arm.target_length += 1.0;
        }
    }

    pub fn zoom_out(&mut self) {
        if self.arm.target_length < self.zoom_max {
            self.arm.target_length += self.zoom_step;
        } else {
            self.arm.target_length -= 1.0;
        }
    }
}
