use glam::Vec3;

use crate::ability::AbilitySlots;
use crate::character::{CharacterConfig, CharacterController};
use crate::input::{AxisState, Command, InputEvent};
use crate::physics::{BodySettings, PhysicsWorld, SandboxBody, TriggerSet, TriggerVolume};

pub struct FixedTimestep {
    tick_rate: u32,
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            tick_rate,
            dt: 1.0 / tick_rate as f32,
            accumulator: 0.0,
        }
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta.min(0.25);
    }

    pub fn should_tick(&self) -> bool {
        self.accumulator >= self.dt
    }

    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator >= self.dt {
            self.accumulator -= self.dt;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.accumulator = 0.0;
    }
}

#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub tick_rate: u32,
    pub spawn_position: Vec3,
    pub ground_half_size: f32,
    pub body: BodySettings,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            spawn_position: Vec3::new(0.0, 100.0, 0.0),
            ground_half_size: 10_000.0,
            body: BodySettings::default(),
        }
    }
}

/// One character on a flat sandbox floor. Each tick applies held axes,
/// integrates the body, reports trigger overlaps and then runs the
/// controller's arbitration, so the controller always sees this tick's
/// ground contact.
pub struct Simulation {
    controller: CharacterController,
    body: SandboxBody,
    physics: PhysicsWorld,
    triggers: TriggerSet,
    axes: AxisState,
    timestep: FixedTimestep,
    tick: u32,
}

impl Simulation {
    pub fn new(config: CharacterConfig, abilities: AbilitySlots, settings: SimulationSettings) -> Self {
        let timestep = FixedTimestep::new(settings.tick_rate);
        let mut physics = PhysicsWorld::new(timestep.dt());
        physics.add_ground(0.0, settings.ground_half_size);

        let body = SandboxBody::spawn(&mut physics, settings.spawn_position, settings.body);
        physics.step();

        let controller = CharacterController::spawn(config, abilities, &body);

        Self {
            controller,
            body,
            physics,
            triggers: TriggerSet::new(),
            axes: AxisState::new(),
            timestep,
            tick: 0,
        }
    }

    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CharacterController {
        &mut self.controller
    }

    pub fn body(&self) -> &SandboxBody {
        &self.body
    }

    /// Both halves at once, for calling controller operations that need the
    /// host (slow effects, direct handler calls).
    pub fn split_mut(&mut self) -> (&mut CharacterController, &mut SandboxBody) {
        (&mut self.controller, &mut self.body)
    }

    pub fn triggers(&self) -> &TriggerSet {
        &self.triggers
    }

    pub fn axes(&self) -> &AxisState {
        &self.axes
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn dt(&self) -> f32 {
        self.timestep.dt()
    }

    pub fn tick_rate(&self) -> u32 {
        self.timestep.tick_rate()
    }

    pub fn position(&self) -> Vec3 {
        self.body.position(&self.physics)
    }

    pub fn add_trigger(&mut self, volume: TriggerVolume) -> usize {
        self.triggers.add(volume)
    }

    pub fn add_obstacle(&mut self, position: Vec3, half_extents: Vec3) {
        self.physics.add_static_box(position, half_extents);
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::Axis { axis, value } => {
                self.axes.set(axis, value);
                None
            }
            InputEvent::Action { action, edge } => {
                self.controller.handle_action(&mut self.body, action, edge)
            }
        }
    }

    /// Drops any partial tick, e.g. after the driver was paused.
    pub fn discard_pending_time(&mut self) {
        self.timestep.clear();
    }

    pub fn update(&mut self, delta: f32) -> u32 {
        self.timestep.accumulate(delta);

        let mut ticks_run = 0;
        while self.timestep.consume_tick() {
            self.step();
            ticks_run += 1;
        }

        ticks_run
    }

    pub fn step(&mut self) {
        let dt = self.timestep.dt();

        for (axis, value) in self.axes.iter() {
            self.controller.apply_axis(&mut self.body, axis, value, dt);
        }

        self.body.step(&mut self.physics, dt);
        self.physics.step();

        let position = self.body.position(&self.physics);
        for kind in self.triggers.update(position) {
            self.controller.on_overlap_begin(kind);
        }

        self.controller.tick(&mut self.body, dt);
        self.tick = self.tick.wrapping_add(1);
    }
}
