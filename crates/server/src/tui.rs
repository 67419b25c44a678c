use std::collections::{HashMap, VecDeque};

use glam::EulerRot;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use locomotion::{ArmSlot, CharacterEvent, MovementHost, Simulation};

use crate::abilities::AbilityCounters;

const MAX_LOG_LINES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
}

pub struct TuiState {
    log: VecDeque<(LogLevel, String)>,
    event_counts: HashMap<CharacterEvent, u64>,
    slowed: bool,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            log: VecDeque::with_capacity(MAX_LOG_LINES),
            event_counts: HashMap::new(),
            slowed: false,
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.push_log(LogLevel::Info, message.into());
    }

    pub fn log_warn(&mut self, message: impl Into<String>) {
        self.push_log(LogLevel::Warn, message.into());
    }

    fn push_log(&mut self, level: LogLevel, message: String) {
        if self.log.len() >= MAX_LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back((level, message));
    }

    pub fn record_event(&mut self, tick: u32, event: CharacterEvent) {
        *self.event_counts.entry(event).or_default() += 1;
        if !event.is_continuous() {
            self.log_info(format!("[{tick:>6}] {}", event.as_str()));
        }
    }

    pub fn toggle_slow(&mut self) -> bool {
        self.slowed = !self.slowed;
        self.slowed
    }

    pub fn is_slowed(&self) -> bool {
        self.slowed
    }
}

pub fn render(frame: &mut Frame, state: &TuiState, sim: &Simulation, counters: &AbilityCounters) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(10),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(rows[2]);

    render_header(frame, rows[0], sim);
    render_speed(frame, rows[1], sim);
    render_flags(frame, middle[0], sim, state);
    render_camera(frame, middle[1], sim, counters);
    render_events(frame, middle[2], state);
    render_log(frame, rows[3], state);
    render_help(frame, rows[4]);
}

fn render_header(frame: &mut Frame, area: Rect, sim: &Simulation) {
    let block = Block::default()
        .title(" Locomotion Sandbox ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let position = sim.position();
    let velocity = sim.body().velocity();
    let text = format!(
        "Tick: {}  |  Pos: ({:.0}, {:.0}, {:.0})  |  Vel: ({:.0}, {:.0}, {:.0})  |  {}",
        sim.tick(),
        position.x,
        position.y,
        position.z,
        velocity.x,
        velocity.y,
        velocity.z,
        if sim.body().is_grounded() {
            "grounded"
        } else {
            "airborne"
        }
    );

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_speed(frame: &mut Frame, area: Rect, sim: &Simulation) {
    let block = Block::default()
        .title(" Max walk speed ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let speed = sim.body().max_walk_speed();
    let ceiling = sim.controller().config().glide_speed.max(1.0);
    let color = if sim.controller().is_gliding() {
        Color::Magenta
    } else if sim.controller().is_running() {
        Color::Yellow
    } else {
        Color::Green
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(color))
        .ratio((speed / ceiling).clamp(0.0, 1.0) as f64)
        .label(format!("{speed:.0}"));

    frame.render_widget(gauge, area);
}

fn flag_line(name: &str, value: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{name:<16}"), Style::default().fg(Color::Gray)),
        Span::styled(
            if value { "yes" } else { "no" },
            Style::default().fg(if value { Color::Green } else { Color::DarkGray }),
        ),
    ])
}

fn render_flags(frame: &mut Frame, area: Rect, sim: &Simulation, state: &TuiState) {
    let block = Block::default()
        .title(" State ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let controller = sim.controller();
    let locomotion = controller.state();
    let lines = vec![
        flag_line("sprinting", controller.is_sprinting()),
        flag_line("sneaking", controller.is_sneaking()),
        flag_line("running", controller.is_running()),
        flag_line("gliding", controller.is_gliding()),
        flag_line("jumping", controller.is_jumping()),
        flag_line("double jumping", controller.is_double_jumping()),
        flag_line("dashing", controller.is_dashing()),
        flag_line("slowed", state.is_slowed()),
        Line::from(format!(
            "oil {:.2}s  jumps {}  dashes {}",
            locomotion.oil_elapsed,
            controller.jump_count(),
            controller.dash_count()
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_camera(frame: &mut Frame, area: Rect, sim: &Simulation, counters: &AbilityCounters) {
    let block = Block::default()
        .title(" Camera / Abilities ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let camera = sim.controller().camera();
    let attached = match camera.attached() {
        ArmSlot::Main => "main",
        ArmSlot::Aim => "aim",
    };
    let lines = vec![
        Line::from(format!("arm length   {:.0}", camera.arm().target_length)),
        Line::from(format!("aim length   {:.0}", camera.aim_arm().target_length)),
        Line::from(format!("attached     {attached}")),
        Line::from(format!(
            "control yaw  {:.0}°",
            sim.body().control_yaw().to_degrees()
        )),
        Line::from(format!(
            "facing yaw   {:.0}°",
            sim.body().facing().to_euler(EulerRot::YXZ).0.to_degrees()
        )),
        Line::from(""),
        Line::from(format!("projectiles  {}", counters.projectiles.get())),
        Line::from(format!("pushes       {}", counters.pushes.get())),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_events(frame: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .title(" Events ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let lines: Vec<Line> = CharacterEvent::ALL
        .iter()
        .map(|event| {
            let count = state.event_counts.get(event).copied().unwrap_or(0);
            Line::from(vec![
                Span::styled(
                    format!("{:<14}", event.as_str()),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(count.to_string(), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_log(frame: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = state
        .log
        .iter()
        .skip(state.log.len().saturating_sub(visible))
        .map(|(level, message)| {
            let color = match level {
                LogLevel::Info => Color::White,
                LogLevel::Warn => Color::Yellow,
            };
            Line::from(Span::styled(message.clone(), Style::default().fg(color)))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Controls ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let text = Paragraph::new(
        "WASD move | arrows look | space jump | f sprint | c sneak | e aim | +/- zoom\n\
         p projectile | o push | l slow | q/Esc quit",
    )
    .block(block)
    .style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    );

    frame.render_widget(text, area);
}
