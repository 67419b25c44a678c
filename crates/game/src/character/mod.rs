mod camera;
mod config;
mod controller;
mod state;

pub use camera::{ArmSlot, CameraRig, SpringArm};
pub use config::{CameraConfig, CharacterConfig};
pub use controller::CharacterController;
pub use state::LocomotionState;
