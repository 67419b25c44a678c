use std::cell::Cell;
use std::rc::Rc;

use locomotion::{AbilitySlots, ProjectileAbility, PushAbility};

/// Shared counters so the UI can show how often each ability fired.
#[derive(Debug, Clone, Default)]
pub struct AbilityCounters {
    pub projectiles: Rc<Cell<u32>>,
    pub pushes: Rc<Cell<u32>>,
}

struct LoggedProjectile(Rc<Cell<u32>>);

impl ProjectileAbility for LoggedProjectile {
    fn throw_projectile(&mut self) {
        self.0.set(self.0.get() + 1);
        log::info!("Projectile thrown (#{})", self.0.get());
    }
}

struct LoggedPush(Rc<Cell<u32>>);

impl PushAbility for LoggedPush {
    fn push(&mut self) {
        self.0.set(self.0.get() + 1);
        log::info!("Push fired (#{})", self.0.get());
    }
}

pub fn sandbox_abilities() -> (AbilitySlots, AbilityCounters) {
    let counters = AbilityCounters::default();
    let slots = AbilitySlots::new()
        .with_projectile(LoggedProjectile(Rc::clone(&counters.projectiles)))
        .with_push(LoggedPush(Rc::clone(&counters.pushes)));
    (slots, counters)
}
