use glam::{EulerRot, Quat, Vec3};
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;

use crate::host::{CameraEffect, LaunchFlags, MovementHost, facing_from_direction};

use super::PhysicsWorld;

/// Movement integrator tunables, in centimetres and seconds.
#[derive(Debug, Clone)]
pub struct BodySettings {
    pub radius: f32,
    pub height: f32,

    pub walk_speed: f32,
    pub acceleration: f32,
    pub braking: f32,
    pub air_control: f32,

    pub jump_velocity: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,

    pub rotation_rate_degrees: f32,
    pub pitch_limit_degrees: f32,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            radius: 34.0,
            height: 176.0,

            walk_speed: 600.0,
            acceleration: 2048.0,
            braking: 2048.0,
            air_control: 0.5,

            jump_velocity: 420.0,
            gravity: 980.0,
            max_fall_speed: 4000.0,

            rotation_rate_degrees: 540.0,
            pitch_limit_degrees: 80.0,
        }
    }
}

/// A kinematic capsule-ish body driven through rapier's character
/// controller. Input, jumps and launches are buffered and consumed by the
/// next `step`.
pub struct SandboxBody {
    handle: RigidBodyHandle,
    settings: BodySettings,
    character_controller: KinematicCharacterController,
    shape: SharedShape,

    velocity: Vec3,
    grounded: bool,
    max_walk_speed: f32,
    facing: Quat,
    yaw: f32,
    pitch: f32,

    pending_input: Vec3,
    jump_requested: bool,
    pending_launch: Option<(Vec3, LaunchFlags)>,
    camera_effects: Vec<CameraEffect>,
}

impl SandboxBody {
    pub fn spawn(physics: &mut PhysicsWorld, position: Vec3, settings: BodySettings) -> Self {
        let handle = physics.add_character(position, settings.radius, settings.height);

        let mut character_controller = KinematicCharacterController::default();
        character_controller.offset = CharacterLength::Absolute(2.0);
        character_controller.up = Vector::Y;
        character_controller.max_slope_climb_angle = 50_f32.to_radians();
        character_controller.min_slope_slide_angle = 35_f32.to_radians();
        character_controller.snap_to_ground = Some(CharacterLength::Absolute(20.0));
        character_controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(35.0),
            min_width: CharacterLength::Absolute(15.0),
            include_dynamic_bodies: false,
        });

        let shape = SharedShape::cylinder(settings.height / 2.0, settings.radius);

        Self {
            handle,
            max_walk_speed: settings.walk_speed,
            settings,
            character_controller,
            shape,
            velocity: Vec3::ZERO,
            grounded: false,
            facing: Quat::IDENTITY,
            yaw: 0.0,
            pitch: 0.0,
            pending_input: Vec3::ZERO,
            jump_requested: false,
            pending_launch: None,
            camera_effects: Vec::new(),
        }
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn facing(&self) -> Quat {
        self.facing
    }

    pub fn position(&self, physics: &PhysicsWorld) -> Vec3 {
        physics.body_position(self.handle).unwrap_or(Vec3::ZERO)
    }

    /// Distance from the body's feet to whatever is below, if anything is
    /// within `max_distance`.
    pub fn ground_distance(&self, physics: &PhysicsWorld, max_distance: f32) -> Option<f32> {
        let feet = self.position(physics) - Vec3::Y * (self.settings.height / 2.0);
        physics.raycast(feet, Vec3::NEG_Y, max_distance, Some(self.handle))
    }

    pub fn drain_camera_effects(&mut self) -> Vec<CameraEffect> {
        std::mem::take(&mut self.camera_effects)
    }

    pub fn step(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        let input = self.pending_input.clamp_length_max(1.0);
        self.pending_input = Vec3::ZERO;

        let mut velocity = self.velocity;

        if let Some((launch, flags)) = self.pending_launch.take() {
            velocity = apply_launch(velocity, launch, flags);
            self.grounded = false;
        }

        if std::mem::take(&mut self.jump_requested) && self.grounded {
            velocity.y = self.settings.jump_velocity;
            self.grounded = false;
        }

        let horizontal = self.compute_horizontal_velocity(
            Vec3::new(velocity.x, 0.0, velocity.z),
            input,
            dt,
        );
        velocity.x = horizontal.x;
        velocity.z = horizontal.z;

        if !self.grounded {
            velocity.y = (velocity.y - self.settings.gravity * dt).max(-self.settings.max_fall_speed);
        }

        let desired_translation = velocity * dt;
        let pose = physics.body_pose(self.handle);
        let corrected = physics.move_character(
            &self.character_controller,
            self.handle,
            &self.shape,
            pose,
            desired_translation,
        );

        let current_pos = pose.translation;
        let new_position = current_pos + corrected.translation;
        physics.set_body_position(
            self.handle,
            Vec3::new(new_position.x, new_position.y, new_position.z),
        );

        self.grounded = corrected.grounded && velocity.y <= 0.0;
        velocity.y = if self.grounded {
            0.0
        } else {
            velocity.y + (corrected.translation.y - desired_translation.y) / dt
        };
        self.velocity = velocity;

        self.orient_to_movement(dt);
    }

    fn compute_horizontal_velocity(&self, current: Vec3, input: Vec3, dt: f32) -> Vec3 {
        let has_input = input.length_squared() > 0.0001;

        if has_input {
            let target = input * self.max_walk_speed;
            let rate = if self.grounded {
                self.settings.acceleration
            } else {
                self.settings.acceleration * self.settings.air_control
            };
            move_towards(current, target, rate * dt)
        } else if self.grounded {
            move_towards(current, Vec3::ZERO, self.settings.braking * dt)
        } else {
            current
        }
    }

    fn orient_to_movement(&mut self, dt: f32) {
        let horizontal = Vec3::new(self.velocity.x, 0.0, self.velocity.z);
        if horizontal.length_squared() < 1.0 {
            return;
        }

        let target = facing_from_direction(horizontal);
        let max_angle = self.settings.rotation_rate_degrees.to_radians() * dt;
        let angle = self.facing.angle_between(target);

        self.facing = if angle <= max_angle {
            target
        } else {
            self.facing.slerp(target, max_angle / angle)
        };
    }
}

impl MovementHost for SandboxBody {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn max_walk_speed(&self) -> f32 {
        self.max_walk_speed
    }

    fn set_max_walk_speed(&mut self, speed: f32) {
        self.max_walk_speed = speed;
    }

    fn control_yaw(&self) -> f32 {
        self.yaw
    }

    fn camera_forward(&self) -> Vec3 {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0) * Vec3::NEG_Z
    }

    fn jump(&mut self) {
        self.jump_requested = true;
    }

    fn launch(&mut self, velocity: Vec3, flags: LaunchFlags) {
        self.pending_launch = Some((velocity, flags));
    }

    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += direction * scale;
    }

    // Look input is in degrees; positive yaw input turns right.
    fn add_yaw_input(&mut self, value: f32) {
        self.yaw -= value.to_radians();
    }

    fn add_pitch_input(&mut self, value: f32) {
        let limit = self.settings.pitch_limit_degrees.to_radians();
        self.pitch = (self.pitch + value.to_radians()).clamp(-limit, limit);
    }

    fn set_facing(&mut self, rotation: Quat) {
        self.facing = rotation;
    }

    fn play_camera_effect(&mut self, effect: CameraEffect) {
        self.camera_effects.push(effect);
    }
}

fn apply_launch(velocity: Vec3, launch: Vec3, flags: LaunchFlags) -> Vec3 {
    let mut result = velocity;

    if flags.contains(LaunchFlags::OVERRIDE_HORIZONTAL) {
        result.x = launch.x;
        result.z = launch.z;
    } else {
        result.x += launch.x;
        result.z += launch.z;
    }

    if flags.contains(LaunchFlags::OVERRIDE_VERTICAL) {
        result.y = launch.y;
    } else {
        result.y += launch.y;
    }

    result
}

fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance < 0.0001 {
        target
    } else {
        current + delta / distance * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_ground() -> PhysicsWorld {
        let mut physics = PhysicsWorld::default();
        physics.add_ground(0.0, 5000.0);
        physics.step();
        physics
    }

    fn settle(body: &mut SandboxBody, physics: &mut PhysicsWorld, ticks: usize) {
        for _ in 0..ticks {
            body.step(physics, 1.0 / 60.0);
            physics.step();
        }
    }

    #[test]
    fn falls_onto_ground_and_becomes_grounded() {
        let mut physics = world_with_ground();
        let mut body = SandboxBody::spawn(
            &mut physics,
            Vec3::new(0.0, 120.0, 0.0),
            BodySettings::default(),
        );

        assert!(!body.is_grounded());
        settle(&mut body, &mut physics, 120);

        assert!(body.is_grounded());
        assert!(body.position(&physics).y < 120.0);

        let gap = body.ground_distance(&physics, 100.0).unwrap();
        assert!(gap < 5.0);
    }

    #[test]
    fn jump_leaves_the_ground() {
        let mut physics = world_with_ground();
        let mut body = SandboxBody::spawn(
            &mut physics,
            Vec3::new(0.0, 100.0, 0.0),
            BodySettings::default(),
        );
        settle(&mut body, &mut physics, 120);
        assert!(body.is_grounded());
        let rest_height = body.position(&physics).y;

        body.jump();
        assert!(body.is_grounded());
        settle(&mut body, &mut physics, 5);

        assert!(!body.is_grounded());
        assert!(body.position(&physics).y > rest_height);
    }

    #[test]
    fn launch_flags_select_add_or_override() {
        let velocity = Vec3::new(10.0, -50.0, 0.0);
        let launch = Vec3::new(100.0, 500.0, 0.0);

        let overridden = apply_launch(velocity, launch, LaunchFlags::OVERRIDE_VERTICAL);
        assert_eq!(overridden, Vec3::new(110.0, 500.0, 0.0));

        let added = apply_launch(velocity, launch, LaunchFlags::empty());
        assert_eq!(added, Vec3::new(110.0, 450.0, 0.0));

        let replaced = apply_launch(velocity, launch, LaunchFlags::all());
        assert_eq!(replaced, launch);
    }

    #[test]
    fn movement_input_is_clamped_to_walk_speed() {
        let mut physics = world_with_ground();
        let mut body = SandboxBody::spawn(
            &mut physics,
            Vec3::new(0.0, 100.0, 0.0),
            BodySettings::default(),
        );
        settle(&mut body, &mut physics, 120);

        for _ in 0..120 {
            body.add_movement_input(Vec3::NEG_Z, 3.0);
            body.step(&mut physics, 1.0 / 60.0);
            physics.step();
        }

        let horizontal = Vec3::new(body.velocity().x, 0.0, body.velocity().z);
        assert!((horizontal.length() - 600.0).abs() < 1.0);
    }

    #[test]
    fn pitch_input_is_clamped() {
        let mut physics = PhysicsWorld::default();
        let mut body = SandboxBody::spawn(&mut physics, Vec3::ZERO, BodySettings::default());

        body.add_pitch_input(500.0);
        let forward = body.camera_forward();
        assert!(forward.y > 0.9);
        assert!(forward.y < 1.0);
    }
}
