use glam::Quat;

#[derive(Debug, Clone)]
pub struct LocomotionState {
    pub is_sprinting: bool,
    pub is_sneaking: bool,
    pub is_on_oil: bool,
    pub is_dashing: bool,
    pub is_jumping: bool,
    pub is_double_jumping: bool,
    pub is_aiming: bool,
    pub jump_count: u32,
    pub dash_count: u32,
    pub oil_elapsed: f32,
    pub initial_walk_speed: f32,
    pub dash_facing: Quat,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            is_sprinting: false,
            is_sneaking: false,
            is_on_oil: false,
            is_dashing: false,
            is_jumping: false,
            is_double_jumping: false,
            is_aiming: false,
            jump_count: 0,
            dash_count: 0,
            oil_elapsed: 0.0,
            initial_walk_speed: 0.0,
            dash_facing: Quat::IDENTITY,
        }
    }
}

impl LocomotionState {
    pub fn new(initial_walk_speed: f32, dash_facing: Quat) -> Self {
        Self {
            initial_walk_speed,
            dash_facing,
            ..Default::default()
        }
    }

    pub fn is_gliding(&self) -> bool {
        self.is_on_oil && self.is_sprinting
    }

    pub fn is_running(&self) -> bool {
        !self.is_on_oil && self.is_sprinting
    }

    /// Advances the oil timer. Returns true on the tick the oil wears off.
    pub fn tick_oil(&mut self, oil_timer: f32, dt: f32) -> bool {
        if !self.is_on_oil {
            return false;
        }

        self.oil_elapsed += dt;
        if self.oil_elapsed >= oil_timer {
            self.is_on_oil = false;
            self.oil_elapsed = 0.0;
            return true;
        }

        false
    }

    pub fn land(&mut self, dash_max_count: u32) {
        self.jump_count = 0;
        self.is_jumping = false;
        self.is_double_jumping = false;
        self.is_dashing = false;

        if self.dash_count >= dash_max_count {
            self.dash_count = 0;
        }
    }

    pub fn can_dash(&self, dash_max_count: u32) -> bool {
        !self.is_on_oil && self.dash_count < dash_max_count
    }

    pub fn can_double_jump(&self, max_jump_count: u32) -> bool {
        self.jump_count < max_jump_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gliding_and_running_are_exclusive() {
        let mut state = LocomotionState::default();
        for (on_oil, sprinting) in [(false, false), (false, true), (true, false), (true, true)] {
            state.is_on_oil = on_oil;
            state.is_sprinting = sprinting;
            assert!(!(state.is_gliding() && state.is_running()));
            if !sprinting {
                assert!(!state.is_gliding());
                assert!(!state.is_running());
            }
        }
    }

    #[test]
    fn oil_expires_on_first_tick_past_timer() {
        let mut state = LocomotionState {
            is_on_oil: true,
            ..Default::default()
        };

        let mut expired_at = None;
        for tick in 1..=10 {
            if state.tick_oil(1.5, 0.2) {
                expired_at = Some(tick);
            }
        }

        assert_eq!(expired_at, Some(8));
        assert!(!state.is_on_oil);
        assert_eq!(state.oil_elapsed, 0.0);
    }

    #[test]
    fn landing_keeps_dash_count_below_limit() {
        let mut state = LocomotionState {
            jump_count: 1,
            dash_count: 1,
            is_dashing: true,
            ..Default::default()
        };

        state.land(2);
        assert_eq!(state.jump_count, 0);
        assert_eq!(state.dash_count, 1);
        assert!(!state.is_dashing);

        state.dash_count = 2;
        state.land(2);
        assert_eq!(state.dash_count, 0);
    }
}
