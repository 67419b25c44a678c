pub mod ability;
pub mod character;
pub mod error;
pub mod event;
pub mod host;
pub mod input;
pub mod physics;
pub mod simulation;

pub use ability::{AbilitySlots, ProjectileAbility, PushAbility};
pub use character::{
    ArmSlot, CameraConfig, CameraRig, CharacterConfig, CharacterController, LocomotionState,
    SpringArm,
};
pub use error::{ConfigError, ParseInputError};
pub use event::{CharacterEvent, EventBus, ListenerId};
pub use host::{CameraEffect, LaunchFlags, MovementHost, OverlapKind};
pub use input::{Action, Axis, AxisState, Command, InputBindings, InputEdge, InputEvent};
pub use physics::{BodySettings, PhysicsWorld, SandboxBody, TriggerSet, TriggerVolume};
pub use simulation::{FixedTimestep, Simulation, SimulationSettings};
