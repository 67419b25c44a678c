pub trait ProjectileAbility {
    fn throw_projectile(&mut self);
}

pub trait PushAbility {
    fn push(&mut self);
}

/// Sibling ability components the controller dispatches to. Slots may be
/// left empty at construction, but firing an empty slot is a wiring bug
/// and panics.
#[derive(Default)]
pub struct AbilitySlots {
    projectile: Option<Box<dyn ProjectileAbility>>,
    push: Option<Box<dyn PushAbility>>,
}

impl AbilitySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projectile(mut self, ability: impl ProjectileAbility + 'static) -> Self {
        self.projectile = Some(Box::new(ability));
        self
    }

    pub fn with_push(mut self, ability: impl PushAbility + 'static) -> Self {
        self.push = Some(Box::new(ability));
        self
    }

    pub fn has_projectile(&self) -> bool {
        self.projectile.is_some()
    }

    pub fn has_push(&self) -> bool {
        self.push.is_some()
    }

    /// # Panics
    ///
    /// Panics if no projectile ability was attached.
    pub fn projectile(&mut self) -> &mut dyn ProjectileAbility {
        match self.projectile.as_deref_mut() {
            Some(ability) => ability,
            None => panic!("projectile ability component is not attached"),
        }
    }

    /// # Panics
    ///
    /// Panics if no push ability was attached.
    pub fn push(&mut self) -> &mut dyn PushAbility {
        match self.push.as_deref_mut() {
            Some(ability) => ability,
            None => panic!("push ability component is not attached"),
        }
    }
}
