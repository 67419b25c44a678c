mod abilities;
mod config;
mod script;
mod tui;

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use locomotion::{Action, Axis, CharacterEvent, InputEdge, InputEvent, MovementHost, Simulation};

use abilities::{AbilityCounters, sandbox_abilities};
use config::SandboxConfig;
use script::{Script, ScriptAction};
use tui::TuiState;

// Terminals only report presses, so a movement key counts as held until
// it has not repeated for this long.
const KEY_HOLD: Duration = Duration::from_millis(400);

#[derive(Parser)]
#[command(name = "sandbox")]
#[command(about = "Character locomotion sandbox")]
struct Args {
    #[arg(short, long, help = "Sandbox TOML file")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Override the configured tick rate")]
    tick_rate: Option<u32>,

    #[arg(long, help = "Run a scripted session without the terminal UI")]
    headless: bool,

    #[arg(short, long, help = "Input script for headless mode")]
    script: Option<PathBuf>,

    #[arg(long, default_value_t = 600, help = "Ticks to run in headless mode")]
    ticks: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.headless {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let mut config = match &args.config {
        Some(path) => SandboxConfig::load(path)?,
        None => SandboxConfig::default(),
    };
    if let Some(tick_rate) = args.tick_rate {
        config.tick_rate = tick_rate;
    }

    let (abilities, counters) = sandbox_abilities();
    let mut sim = config.build(abilities);
    let events = forward_events(&mut sim);

    if args.headless {
        let script = match &args.script {
            Some(path) => Script::load(path)?,
            None => script::demo(),
        };
        run_headless(&mut sim, &events, &script, args.ticks, &counters);
    } else {
        run_with_tui(&mut sim, &events, &counters)?;
    }

    Ok(())
}

fn forward_events(sim: &mut Simulation) -> Receiver<CharacterEvent> {
    let (tx, rx) = mpsc::channel();
    sim.controller_mut().events_mut().subscribe_all(move |event| {
        let _ = tx.send(event);
    });
    rx
}

fn run_headless(
    sim: &mut Simulation,
    events: &Receiver<CharacterEvent>,
    script: &Script,
    ticks: u32,
    counters: &AbilityCounters,
) {
    log::info!(
        "Running {} ticks at {} Hz ({} scripted steps)",
        ticks,
        sim.tick_rate(),
        script.step.len()
    );

    let mut counts: HashMap<CharacterEvent, u64> = HashMap::new();
    for _ in 0..ticks {
        let tick = sim.tick();
        for action in script.actions_at(tick) {
            script::apply(sim, action);
        }

        sim.step();

        for event in events.try_iter() {
            *counts.entry(event).or_default() += 1;
            if event.is_continuous() {
                log::trace!("tick {}: {}", tick, event.as_str());
            } else {
                log::info!("tick {}: {}", tick, event.as_str());
            }
        }
        for effect in sim.split_mut().1.drain_camera_effects() {
            log::debug!("tick {}: camera effect {:?}", tick, effect);
        }
    }

    let position = sim.position();
    log::info!(
        "Finished at tick {}: position ({:.0}, {:.0}, {:.0}), max walk speed {:.0}",
        sim.tick(),
        position.x,
        position.y,
        position.z,
        sim.body().max_walk_speed()
    );
    for event in CharacterEvent::ALL {
        log::info!(
            "  {:<12} {}",
            event.as_str(),
            counts.get(&event).copied().unwrap_or(0)
        );
    }
    log::info!(
        "  projectiles {}, pushes {}",
        counters.projectiles.get(),
        counters.pushes.get()
    );
}

struct HeldAxes {
    held: HashMap<Axis, Instant>,
}

impl HeldAxes {
    fn new() -> Self {
        Self {
            held: HashMap::new(),
        }
    }

    fn press(&mut self, sim: &mut Simulation, axis: Axis, value: f32) {
        sim.handle_input(InputEvent::Axis { axis, value });
        self.held.insert(axis, Instant::now());
    }

    fn expire(&mut self, sim: &mut Simulation) {
        let now = Instant::now();
        self.held.retain(|&axis, pressed| {
            let alive = now.duration_since(*pressed) < KEY_HOLD;
            if !alive {
                sim.handle_input(InputEvent::Axis { axis, value: 0.0 });
            }
            alive
        });
    }
}

fn toggle(sim: &mut Simulation, action: Action, is_active: bool) {
    let edge = if is_active {
        InputEdge::Released
    } else {
        InputEdge::Pressed
    };
    sim.handle_input(InputEvent::Action { action, edge });
}

fn press(sim: &mut Simulation, action: Action) {
    sim.handle_input(InputEvent::Action {
        action,
        edge: InputEdge::Pressed,
    });
}

fn run_with_tui(
    sim: &mut Simulation,
    events: &Receiver<CharacterEvent>,
    counters: &AbilityCounters,
) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut tui_state = TuiState::new();
    let mut axes = HeldAxes::new();
    let mut last_frame = Instant::now();
    let mut running = true;

    tui_state.log_info(format!("Sandbox running at {} Hz", sim.tick_rate()));

    while running {
        let now = Instant::now();
        sim.update(now.duration_since(last_frame).as_secs_f32());
        last_frame = now;

        for event in events.try_iter() {
            tui_state.record_event(sim.tick(), event);
        }
        for effect in sim.split_mut().1.drain_camera_effects() {
            tui_state.log_info(format!("Camera effect: {:?}", effect));
        }

        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => running = false,
                        KeyCode::Char('w') => axes.press(sim, Axis::MoveForward, 1.0),
                        KeyCode::Char('s') => axes.press(sim, Axis::MoveForward, -1.0),
                        KeyCode::Char('d') => axes.press(sim, Axis::MoveRight, 1.0),
                        KeyCode::Char('a') => axes.press(sim, Axis::MoveRight, -1.0),
                        KeyCode::Right => axes.press(sim, Axis::TurnRate, 2.0),
                        KeyCode::Left => axes.press(sim, Axis::TurnRate, -2.0),
                        KeyCode::Up => axes.press(sim, Axis::LookVertical, 1.0),
                        KeyCode::Down => axes.press(sim, Axis::LookVertical, -1.0),
                        KeyCode::Char(' ') => press(sim, Action::Jump),
                        KeyCode::Char('f') => {
                            let active = sim.controller().is_sprinting();
                            toggle(sim, Action::Sprint, active);
                        }
                        KeyCode::Char('c') => {
                            let active = sim.controller().is_sneaking();
                            toggle(sim, Action::Sneak, active);
                        }
                        KeyCode::Char('e') => {
                            let active = sim.controller().is_aiming();
                            toggle(sim, Action::Aim, active);
                        }
                        KeyCode::Char('+') | KeyCode::Char('=') => press(sim, Action::ZoomIn),
                        KeyCode::Char('-') => press(sim, Action::ZoomOut),
                        KeyCode::Char('p') => press(sim, Action::Projectile),
                        KeyCode::Char('o') => press(sim, Action::FirePush),
                        KeyCode::Char('l') => {
                            let slowed = tui_state.toggle_slow();
                            let action = if slowed {
                                ScriptAction::StartSlow
                            } else {
                                ScriptAction::EndSlow
                            };
                            script::apply(sim, action);
                            tui_state.log_warn(if slowed { "Slowed" } else { "Slow ended" });
                        }
                        _ => {}
                    }
                }
            }
        }
        axes.expire(sim);

        terminal.draw(|frame| {
            tui::render(frame, &tui_state, sim, counters);
        })?;
    }

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;

    Ok(())
}
