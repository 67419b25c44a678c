use glam::Vec3;

use crate::ability::AbilitySlots;
use crate::event::{CharacterEvent, EventBus};
use crate::host::{
    CameraEffect, LaunchFlags, MovementHost, OverlapKind, facing_from_direction, yaw_forward,
    yaw_right,
};
use crate::input::{Action, Axis, Command, InputBindings, InputEdge};

use super::{ArmSlot, CameraRig, CharacterConfig, LocomotionState};

pub struct CharacterController {
    config: CharacterConfig,
    state: LocomotionState,
    camera: CameraRig,
    bindings: InputBindings,
    abilities: AbilitySlots,
    events: EventBus,
}

impl CharacterController {
    /// Builds the controller for a freshly spawned body. The host's current
    /// walk speed becomes the speed restored after sprinting, sneaking and
    /// slow effects, and the camera's forward direction becomes the dash facing.
    pub fn spawn(
        config: CharacterConfig,
        abilities: AbilitySlots,
        host: &impl MovementHost,
    ) -> Self {
        let state = LocomotionState::new(
            host.max_walk_speed(),
            facing_from_direction(host.camera_forward()),
        );
        let camera = CameraRig::new(&config.camera);

        Self {
            config,
            state,
            camera,
            bindings: InputBindings::default(),
            abilities,
            events: EventBus::new(),
        }
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn bindings_mut(&mut self) -> &mut InputBindings {
        &mut self.bindings
    }

    pub fn is_sprinting(&self) -> bool {
        self.state.is_sprinting
    }

    pub fn is_sneaking(&self) -> bool {
        self.state.is_sneaking
    }

    pub fn is_dashing(&self) -> bool {
        self.state.is_dashing
    }

    pub fn is_jumping(&self) -> bool {
        self.state.is_jumping
    }

    pub fn is_double_jumping(&self) -> bool {
        self.state.is_double_jumping
    }

    pub fn is_gliding(&self) -> bool {
        self.state.is_gliding()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_on_oil(&self) -> bool {
        self.state.is_on_oil
    }

    pub fn is_aiming(&self) -> bool {
        self.state.is_aiming
    }

    pub fn jump_count(&self) -> u32 {
        self.state.jump_count
    }

    pub fn dash_count(&self) -> u32 {
        self.state.dash_count
    }

    pub fn tick(&mut self, host: &mut impl MovementHost, dt: f32) {
        if self.state.tick_oil(self.config.oil_timer, dt) {
            log::debug!("Oil wore off");
        }

        if host.is_grounded() {
            self.state.land(self.config.dash_max_count);
        }

        if self.state.is_sprinting {
            self.events.broadcast(CharacterEvent::SprintStart);
        } else {
            self.events.broadcast(CharacterEvent::SprintStop);
        }

        self.select_speed(host);
    }

    fn select_speed(&mut self, host: &mut impl MovementHost) {
        if self.state.is_running() {
            host.set_max_walk_speed(self.config.sprint_speed);
        }

        if self.state.is_gliding() {
            host.set_max_walk_speed(self.config.glide_speed);
            self.events.broadcast(CharacterEvent::Slide);
        }
    }

    pub fn apply_axis(&mut self, host: &mut impl MovementHost, axis: Axis, value: f32, dt: f32) {
        if value == 0.0 {
            return;
        }

        match axis {
            Axis::MoveForward => {
                let direction = yaw_forward(host.control_yaw());
                host.add_movement_input(direction, value);
            }
            Axis::MoveRight => {
                let direction = yaw_right(host.control_yaw());
                let scale = if self.state.is_gliding() {
                    value / self.config.slide_value
                } else {
                    value
                };
                host.add_movement_input(direction, scale);
            }
            Axis::LookHorizontal => host.add_yaw_input(value),
            Axis::LookVertical => host.add_pitch_input(value),
            Axis::TurnRate => host.add_yaw_input(value * self.config.base_turn_rate * dt),
        }
    }

    /// Runs whatever command is bound to this edge. Returns the command, or
    /// `None` when the edge is unbound.
    pub fn handle_action(
        &mut self,
        host: &mut impl MovementHost,
        action: Action,
        edge: InputEdge,
    ) -> Option<Command> {
        let command = self.bindings.resolve(action, edge)?;
        self.execute(host, command);
        Some(command)
    }

    pub fn execute(&mut self, host: &mut impl MovementHost, command: Command) {
        match command {
            Command::Jump => self.jump_pressed(host),
            Command::SprintPressed => self.sprint_pressed(host),
            Command::SprintReleased => self.sprint_released(host),
            Command::ZoomIn => self.zoom_in(),
            Command::ZoomOut => self.zoom_out(),
            Command::SneakPressed => self.sneak_pressed(host),
            Command::SneakReleased => self.sneak_released(host),
            Command::FireProjectile => self.fire_projectile(),
            Command::AimPressed => self.aim_pressed(),
            Command::AimReleased => self.aim_released(),
            Command::FirePush => self.fire_push(),
        }
    }

    // Dash shares the sprint key: pressing sprint in the air dashes.
    pub fn sprint_pressed(&mut self, host: &mut impl MovementHost) {
        self.state.is_sprinting = true;
        let grounded = host.is_grounded();

        if host.max_walk_speed() != self.config.slow_speed && grounded && !self.state.is_on_oil {
            host.set_max_walk_speed(self.config.sprint_speed);
        }

        if !grounded && self.state.can_dash(self.config.dash_max_count) {
            self.dash(host);
        }
    }

    fn dash(&mut self, host: &mut impl MovementHost) {
        let impulse = host.camera_forward() * self.config.dash_velocity;
        host.launch(impulse, LaunchFlags::OVERRIDE_VERTICAL);
        host.set_facing(self.state.dash_facing);
        host.play_camera_effect(CameraEffect::DashFov);

        self.state.dash_count += 1;
        self.state.is_dashing = true;
        log::debug!(
            "Dashed ({}/{})",
            self.state.dash_count,
            self.config.dash_max_count
        );
        self.events.broadcast(CharacterEvent::Dash);
    }

    pub fn sprint_released(&mut self, host: &mut impl MovementHost) {
        self.state.is_sprinting = false;
        self.restore_walk_speed(host);
    }

    pub fn jump_pressed(&mut self, host: &mut impl MovementHost) {
        host.jump();
        if host.is_grounded() {
            self.events.broadcast(CharacterEvent::Jump);
        }
        self.state.is_jumping = true;

        self.try_double_jump(host);
    }

    fn try_double_jump(&mut self, host: &mut impl MovementHost) {
        if host.is_grounded() || !self.state.can_double_jump(self.config.max_jump_count) {
            return;
        }

        host.launch(
            Vec3::Y * self.config.launch_velocity,
            LaunchFlags::OVERRIDE_VERTICAL,
        );
        self.state.jump_count += 1;
        log::debug!("Double jumped");
        self.events.broadcast(CharacterEvent::DoubleJump);
        self.state.is_double_jumping = true;
    }

    pub fn sneak_pressed(&mut self, host: &mut impl MovementHost) {
        self.state.is_sneaking = true;

        if host.max_walk_speed() != self.config.slow_speed {
            host.set_max_walk_speed(self.config.sneak_speed);
        }
    }

    pub fn sneak_released(&mut self, host: &mut impl MovementHost) {
        self.state.is_sneaking = false;
        self.restore_walk_speed(host);
    }

    fn restore_walk_speed(&self, host: &mut impl MovementHost) {
        if host.max_walk_speed() != self.config.slow_speed {
            host.set_max_walk_speed(self.state.initial_walk_speed);
        }
    }

    pub fn start_slow(&mut self, host: &mut impl MovementHost) {
        host.set_max_walk_speed(self.config.slow_speed);
    }

    pub fn end_slow(&mut self, host: &mut impl MovementHost) {
        host.set_max_walk_speed(self.state.initial_walk_speed);
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    pub fn aim_pressed(&mut self) {
        if !self.state.is_aiming {
            self.camera.attach(ArmSlot::Aim);
        }
        self.state.is_aiming = true;
    }

    pub fn aim_released(&mut self) {
        if self.state.is_aiming {
            self.camera.attach(ArmSlot::Main);
        }
        self.state.is_aiming = false;
    }

    /// # Panics
    ///
    /// Panics if the controller was spawned without a projectile ability.
    pub fn fire_projectile(&mut self) {
        self.abilities.projectile().throw_projectile();
    }

    /// # Panics
    ///
    /// Panics if the controller was spawned without a push ability.
    pub fn fire_push(&mut self) {
        self.abilities.push().push();
    }

    pub fn on_overlap_begin(&mut self, kind: OverlapKind) {
        if kind == OverlapKind::Oil {
            if !self.state.is_on_oil {
                log::debug!("Entered oil");
            }
            self.state.is_on_oil = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;

    #[derive(Default)]
    struct StubHost {
        grounded: bool,
        max_walk_speed: f32,
        yaw: f32,
        movement: Vec<(Vec3, f32)>,
        yaw_input: f32,
        pitch_input: f32,
    }

    impl MovementHost for StubHost {
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
            yaw_forward(self.yaw)
        }
        fn jump(&mut self) {}
        fn launch(&mut self, _velocity: Vec3, _flags: LaunchFlags) {}
        fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
            self.movement.push((direction, scale));
        }
        fn add_yaw_input(&mut self, value: f32) {
            self.yaw_input += value;
        }
        fn add_pitch_input(&mut self, value: f32) {
            self.pitch_input += value;
        }
        fn set_facing(&mut self, _rotation: Quat) {}
        fn play_camera_effect(&mut self, _effect: CameraEffect) {}
    }

    fn grounded_host() -> StubHost {
        StubHost {
            grounded: true,
            max_walk_speed: 600.0,
            ..Default::default()
        }
    }

    #[test]
    fn right_axis_is_damped_while_gliding() {
        let mut host = grounded_host();
        let mut controller =
            CharacterController::spawn(CharacterConfig::default(), AbilitySlots::new(), &host);

        controller.apply_axis(&mut host, Axis::MoveRight, 1.0, 0.016);
        controller.on_overlap_begin(OverlapKind::Oil);
        controller.sprint_pressed(&mut host);
        controller.apply_axis(&mut host, Axis::MoveRight, 1.0, 0.016);

        assert_eq!(host.movement.len(), 2);
        assert_eq!(host.movement[0].1, 1.0);
        assert_eq!(host.movement[1].1, 0.5);
    }

    #[test]
    fn zero_axis_values_add_no_input() {
        let mut host = grounded_host();
        let mut controller =
            CharacterController::spawn(CharacterConfig::default(), AbilitySlots::new(), &host);

        controller.apply_axis(&mut host, Axis::MoveForward, 0.0, 0.016);
        assert!(host.movement.is_empty());
    }

    #[test]
    fn turn_rate_scales_by_base_rate_and_dt() {
        let mut host = grounded_host();
        let mut controller =
            CharacterController::spawn(CharacterConfig::default(), AbilitySlots::new(), &host);

        controller.apply_axis(&mut host, Axis::TurnRate, 0.5, 0.1);
        controller.apply_axis(&mut host, Axis::LookVertical, -2.0, 0.1);

        assert!((host.yaw_input - 0.5 * 45.0 * 0.1).abs() < 1e-5);
        assert_eq!(host.pitch_input, -2.0);
    }

    #[test]
    fn unbound_edges_are_ignored() {
        let mut host = grounded_host();
        let mut controller =
            CharacterController::spawn(CharacterConfig::default(), AbilitySlots::new(), &host);

        let command = controller.handle_action(&mut host, Action::Jump, InputEdge::Released);
        assert_eq!(command, None);
        assert!(!controller.is_jumping());
    }

    #[test]
    fn slow_speed_blocks_sprint_and_restore() {
        let mut host = grounded_host();
        let mut controller =
            CharacterController::spawn(CharacterConfig::default(), AbilitySlots::new(), &host);

        controller.start_slow(&mut host);
        controller.sprint_pressed(&mut host);
        assert_eq!(host.max_walk_speed, 100.0);

        controller.sprint_released(&mut host);
        assert_eq!(host.max_walk_speed, 100.0);

        controller.end_slow(&mut host);
        assert_eq!(host.max_walk_speed, 600.0);
    }

    #[test]
    fn aim_swaps_camera_arm() {
        let host = grounded_host();
        let mut controller =
            CharacterController::spawn(CharacterConfig::default(), AbilitySlots::new(), &host);

        controller.aim_pressed();
        assert!(controller.is_aiming());
        assert_eq!(controller.camera().attached(), ArmSlot::Aim);

        controller.aim_released();
        assert!(!controller.is_aiming());
        assert_eq!(controller.camera().attached(), ArmSlot::Main);
    }

    #[test]
    fn non_oil_overlap_is_ignored() {
        let host = grounded_host();
        let mut controller =
            CharacterController::spawn(CharacterConfig::default(), AbilitySlots::new(), &host);

        controller.on_overlap_begin(OverlapKind::Other);
        assert!(!controller.is_on_oil());
    }

    #[test]
    fn rebinding_changes_dispatch() {
        let mut host = grounded_host();
        let mut controller =
            CharacterController::spawn(CharacterConfig::default(), AbilitySlots::new(), &host);

        controller
            .bindings_mut()
            .bind(Action::Aim, InputEdge::Pressed, Command::ZoomIn);
        let command = controller.handle_action(&mut host, Action::Aim, InputEdge::Pressed);

        assert_eq!(command, Some(Command::ZoomIn));
        assert!(!controller.is_aiming());
        assert_eq!(controller.camera().arm().target_length, 380.0);
    }
}
