use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use locomotion::{Action, Axis, InputEdge, InputEvent, Simulation};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub step: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    pub tick: u32,
    pub input: String,
    pub edge: Option<String>,
    pub value: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptAction {
    Input(InputEvent),
    StartSlow,
    EndSlow,
}

impl ScriptStep {
    pub fn action(&self) -> Result<ScriptAction> {
        match self.input.as_str() {
            "StartSlow" => return Ok(ScriptAction::StartSlow),
            "EndSlow" => return Ok(ScriptAction::EndSlow),
            _ => {}
        }

        if let Ok(axis) = self.input.parse::<Axis>() {
            let Some(value) = self.value else {
                bail!("axis step `{}` at tick {} needs a value", axis, self.tick);
            };
            return Ok(ScriptAction::Input(InputEvent::Axis { axis, value }));
        }

        let action: Action = self
            .input
            .parse()
            .with_context(|| format!("step at tick {}", self.tick))?;
        let edge = match &self.edge {
            Some(edge) => edge
                .parse()
                .with_context(|| format!("step at tick {}", self.tick))?,
            None => InputEdge::Pressed,
        };

        Ok(ScriptAction::Input(InputEvent::Action { action, edge }))
    }
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("parsing script {}", path.display()))
    }

    pub fn parse(source: &str) -> Result<Self> {
        let mut script: Self = toml::from_str(source)?;
        for step in &script.step {
            step.action()?;
        }
        script.step.sort_by_key(|step| step.tick);
        Ok(script)
    }

    pub fn last_tick(&self) -> u32 {
        self.step.last().map_or(0, |step| step.tick)
    }

    pub fn actions_at(&self, tick: u32) -> impl Iterator<Item = ScriptAction> + '_ {
        self.step
            .iter()
            .filter(move |step| step.tick == tick)
            .filter_map(|step| step.action().ok())
    }
}

pub fn apply(sim: &mut Simulation, action: ScriptAction) {
    match action {
        ScriptAction::Input(event) => {
            if let Some(command) = sim.handle_input(event) {
                log::debug!("tick {}: {:?}", sim.tick(), command);
            }
        }
        ScriptAction::StartSlow => {
            let (controller, body) = sim.split_mut();
            controller.start_slow(body);
        }
        ScriptAction::EndSlow => {
            let (controller, body) = sim.split_mut();
            controller.end_slow(body);
        }
    }
}

/// Built-in demo: run onto the oil patch, jump, double jump and dash.
pub fn demo() -> Script {
    let step = |tick, input: &str, edge: Option<&str>, value| ScriptStep {
        tick,
        input: input.to_string(),
        edge: edge.map(str::to_string),
        value,
    };

    Script {
        step: vec![
            step(60, "MoveForward", None, Some(1.0)),
            step(60, "Sprint", Some("pressed"), None),
            step(150, "Jump", Some("pressed"), None),
            step(170, "Jump", Some("pressed"), None),
            step(180, "Sprint", Some("released"), None),
            step(185, "Sprint", Some("pressed"), None),
            step(300, "Sprint", Some("released"), None),
            step(300, "MoveForward", None, Some(0.0)),
        ],
    }
}
