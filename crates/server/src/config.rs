use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::Deserialize;

use locomotion::{
    AbilitySlots, CharacterConfig, OverlapKind, Simulation, SimulationSettings, TriggerVolume,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub tick_rate: u32,
    pub spawn: Vec3,
    pub character: CharacterConfig,
    pub oil: Vec<BoxRegion>,
    pub obstacle: Vec<BoxRegion>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BoxRegion {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            spawn: Vec3::new(0.0, 100.0, 0.0),
            character: CharacterConfig::default(),
            oil: vec![BoxRegion {
                center: Vec3::new(0.0, 0.0, -1500.0),
                half_extents: Vec3::new(600.0, 200.0, 400.0),
            }],
            obstacle: Vec::new(),
        }
    }
}

impl SandboxConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("reading sandbox config {}", path.display()))?;
        let config: Self = toml::from_str(&source)
            .with_context(|| format!("parsing sandbox config {}", path.display()))?;
        config
            .character
            .validate()
            .context("validating character config")?;

        log::info!(
            "Loaded sandbox config from {} ({} oil volumes, {} obstacles)",
            path.display(),
            config.oil.len(),
            config.obstacle.len()
        );
        Ok(config)
    }

    pub fn build(&self, abilities: AbilitySlots) -> Simulation {
        let settings = SimulationSettings {
            tick_rate: self.tick_rate,
            spawn_position: self.spawn,
            ..Default::default()
        };

        let mut sim = Simulation::new(self.character.clone(), abilities, settings);
        for region in &self.oil {
            sim.add_trigger(TriggerVolume::new(
                OverlapKind::Oil,
                region.center,
                region.half_extents,
            ));
        }
        for region in &self.obstacle {
            sim.add_obstacle(region.center, region.half_extents);
        }
        sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses() {
        let config: SandboxConfig =
            toml::from_str(include_str!("../../../demos/sandbox.toml")).unwrap();
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.oil.len(), 1);
        assert_eq!(config.obstacle.len(), 1);
        assert!(config.character.validate().is_ok());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: SandboxConfig = toml::from_str("tick_rate = 30").unwrap();
        assert_eq!(config.tick_rate, 30);
        assert_eq!(config.spawn, Vec3::new(0.0, 100.0, 0.0));
        assert_eq!(config.oil.len(), 1);
        assert_eq!(config.character.sprint_speed, 1200.0);
    }

    #[test]
    fn build_registers_oil_volumes() {
        let sim = SandboxConfig::default().build(AbilitySlots::new());
        assert_eq!(sim.triggers().volumes().len(), 1);
        assert_eq!(sim.tick(), 0);
    }
}
