use std::collections::HashMap;

use super::{Action, Axis, InputEdge};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Jump,
    SprintPressed,
    SprintReleased,
    ZoomIn,
    ZoomOut,
    SneakPressed,
    SneakReleased,
    FireProjectile,
    AimPressed,
    AimReleased,
    FirePush,
}

pub struct InputBindings {
    actions: HashMap<(Action, InputEdge), Command>,
}

impl Default for InputBindings {
    fn default() -> Self {
        use Action as A;
        use InputEdge::{Pressed, Released};

        let mut bindings = Self::empty();
        bindings.bind(A::Jump, Pressed, Command::Jump);
        bindings.bind(A::Sprint, Pressed, Command::SprintPressed);
        bindings.bind(A::Sprint, Released, Command::SprintReleased);
        bindings.bind(A::ZoomIn, Pressed, Command::ZoomIn);
        bindings.bind(A::ZoomOut, Pressed, Command::ZoomOut);
        bindings.bind(A::Sneak, Pressed, Command::SneakPressed);
        bindings.bind(A::Sneak, Released, Command::SneakReleased);
        bindings.bind(A::Projectile, Pressed, Command::FireProjectile);
        bindings.bind(A::Aim, Pressed, Command::AimPressed);
        bindings.bind(A::Aim, Released, Command::AimReleased);
        bindings.bind(A::FirePush, Pressed, Command::FirePush);
        bindings
    }
}

impl InputBindings {
    pub fn empty() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    pub fn bind(&mut self, action: Action, edge: InputEdge, command: Command) -> Option<Command> {
        self.actions.insert((action, edge), command)
    }

    pub fn unbind(&mut self, action: Action, edge: InputEdge) -> Option<Command> {
        self.actions.remove(&(action, edge))
    }

    pub fn resolve(&self, action: Action, edge: InputEdge) -> Option<Command> {
        self.actions.get(&(action, edge)).copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Last value reported for each analog axis. Axes are level inputs and are
/// re-applied every tick until the device reports a new value.
#[derive(Debug, Clone, Default)]
pub struct AxisState {
    values: HashMap<Axis, f32>,
}

impl AxisState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        self.values.insert(axis, value);
    }

    pub fn get(&self, axis: Axis) -> f32 {
        self.values.get(&axis).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, f32)> + '_ {
        Axis::ALL.into_iter().map(|axis| (axis, self.get(axis)))
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_release_edges() {
        let bindings = InputBindings::default();

        assert_eq!(
            bindings.resolve(Action::Sprint, InputEdge::Released),
            Some(Command::SprintReleased)
        );
        assert_eq!(
            bindings.resolve(Action::Sneak, InputEdge::Released),
            Some(Command::SneakReleased)
        );
        assert_eq!(
            bindings.resolve(Action::ZoomOut, InputEdge::Pressed),
            Some(Command::ZoomOut)
        );
        assert_eq!(bindings.resolve(Action::Jump, InputEdge::Released), None);
        assert_eq!(bindings.resolve(Action::FirePush, InputEdge::Released), None);
        assert_eq!(bindings.len(), 11);
    }

    #[test]
    fn rebinding_replaces_previous_command() {
        let mut bindings = InputBindings::default();
        let previous = bindings.bind(Action::ZoomOut, InputEdge::Pressed, Command::ZoomIn);
        assert_eq!(previous, Some(Command::ZoomOut));

        bindings.unbind(Action::Projectile, InputEdge::Pressed);
        assert_eq!(bindings.resolve(Action::Projectile, InputEdge::Pressed), None);
    }

    #[test]
    fn unset_axes_read_zero() {
        let mut axes = AxisState::new();
        axes.set(Axis::MoveForward, 0.5);

        assert_eq!(axes.get(Axis::MoveForward), 0.5);
        assert_eq!(axes.get(Axis::MoveRight), 0.0);
        assert_eq!(axes.iter().count(), Axis::ALL.len());

        axes.reset();
        assert_eq!(axes.get(Axis::MoveForward), 0.0);
    }
}
