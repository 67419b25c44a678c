mod bindings;

use std::fmt;
use std::str::FromStr;

use crate::error::ParseInputError;

pub use bindings::{AxisState, Command, InputBindings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    MoveForward,
    MoveRight,
    LookHorizontal,
    LookVertical,
    TurnRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    Sprint,
    ZoomIn,
    ZoomOut,
    Sneak,
    Projectile,
    Aim,
    FirePush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEdge {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Axis { axis: Axis, value: f32 },
    Action { action: Action, edge: InputEdge },
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Self::MoveForward,
        Self::MoveRight,
        Self::LookHorizontal,
        Self::LookVertical,
        Self::TurnRate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::MoveForward => "MoveForward",
            Self::MoveRight => "MoveRight",
            Self::LookHorizontal => "LookHorizontal",
            Self::LookVertical => "LookVertical",
            Self::TurnRate => "TurnRate",
        }
    }
}

impl Action {
    pub const ALL: [Action; 8] = [
        Self::Jump,
        Self::Sprint,
        Self::ZoomIn,
        Self::ZoomOut,
        Self::Sneak,
        Self::Projectile,
        Self::Aim,
        Self::FirePush,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Jump => "Jump",
            Self::Sprint => "Sprint",
            Self::ZoomIn => "ZoomIn",
            Self::ZoomOut => "ZoomOut",
            Self::Sneak => "Sneak",
            Self::Projectile => "Projectile",
            Self::Aim => "Aim",
            Self::FirePush => "FirePush",
        }
    }
}

impl InputEdge {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pressed => "Pressed",
            Self::Released => "Released",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for InputEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|axis| axis.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseInputError::UnknownAxis(s.to_string()))
    }
}

impl FromStr for Action {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseInputError::UnknownAction(s.to_string()))
    }
}

impl FromStr for InputEdge {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pressed" | "press" => Ok(Self::Pressed),
            "released" | "release" => Ok(Self::Released),
            _ => Err(ParseInputError::UnknownEdge(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for axis in Axis::ALL {
            assert_eq!(axis.name().parse::<Axis>(), Ok(axis));
        }
        for action in Action::ALL {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("firepush".parse::<Action>(), Ok(Action::FirePush));
        assert_eq!("RELEASE".parse::<InputEdge>(), Ok(InputEdge::Released));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            "Absorb".parse::<Action>(),
            Err(ParseInputError::UnknownAction("Absorb".to_string()))
        );
        assert!(matches!(
            "Strafe".parse::<Axis>(),
            Err(ParseInputError::UnknownAxis(_))
        ));
        assert!(matches!(
            "held".parse::<InputEdge>(),
            Err(ParseInputError::UnknownEdge(_))
        ));
    }
}
