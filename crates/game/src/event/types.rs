#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterEvent {
    Jump,
    DoubleJump,
    SprintStart,
    SprintStop,
    Dash,
    Slide,
    /// Declared for listeners but never fired by the controller.
    Landing,
}

impl CharacterEvent {
    pub const ALL: [CharacterEvent; 7] = [
        Self::Jump,
        Self::DoubleJump,
        Self::SprintStart,
        Self::SprintStop,
        Self::Dash,
        Self::Slide,
        Self::Landing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::DoubleJump => "double jump",
            Self::SprintStart => "sprint start",
            Self::SprintStop => "sprint stop",
            Self::Dash => "dash",
            Self::Slide => "slide",
            Self::Landing => "landing",
        }
    }

    /// Level-triggered events fire on every tick their condition holds.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::SprintStart | Self::SprintStop | Self::Slide)
    }
}
