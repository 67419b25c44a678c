mod body;
mod trigger;
mod world;

pub use body::{BodySettings, SandboxBody};
pub use trigger::{TriggerSet, TriggerVolume};
pub use world::PhysicsWorld;
