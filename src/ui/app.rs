//! Main TUI application state and logic

use crate::drivers::{AlgorithmInfo, Operation};
use crate::engine::errors::VizError;
use crate::engine::Visualizer;
use crate::protocol::{self, ServerEvent};
use crate::render;
use crate::snapshot::StructureKind;
use crate::ui::menu::{self, MenuItem};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Redraw cadence; the sleep also yields to the playback task
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Speed change per key press
const SPEED_STEP: u8 = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Structure,
    Log,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Structure => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Structure,
        }
    }
}

/// The main application state
pub struct App {
    pub visualizer: Visualizer,

    /// Operations available for the loaded family
    pub menu: Vec<MenuItem>,
    pub selected: usize,

    /// Typed operation parameters, comma separated
    pub input: String,

    pub focused_pane: FocusedPane,
    pub log_scroll: usize,

    pub should_quit: bool,
    pub status_message: String,
    pub status_is_error: bool,
}

impl App {
    pub fn new(visualizer: Visualizer) -> Self {
        let menu = MenuItem::items_for(visualizer.kind());
        let selected = visualizer
            .state()
            .info
            .sort_algorithm()
            .and_then(|algo| menu.iter().position(|item| *item == MenuItem::Sort(algo)))
            .unwrap_or(0);
        App {
            visualizer,
            menu,
            selected,
            input: String::new(),
            focused_pane: FocusedPane::Structure,
            log_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready!"),
            status_is_error: false,
        }
    }

    /// Run the TUI application. Must be awaited inside a `LocalSet`.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            tokio::time::sleep(FRAME_INTERVAL).await;
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(main_chunks[0]);

        // Left column: Structure (top) | Log (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        let live = self.visualizer.state();
        let drawing = render::draw(&live.snapshot, &live.highlights);

        super::panes::render_structure_pane(
            frame,
            left_rows[0],
            &drawing,
            live.kind,
            self.focused_pane == FocusedPane::Structure,
        );

        super::panes::render_log_pane(
            frame,
            left_rows[1],
            &live.log,
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        super::panes::render_stats_pane(
            frame,
            columns[1],
            super::panes::StatsRenderData {
                kind: live.kind,
                info: &live.info,
                counters: live.counters,
                speed: self.visualizer.speed(),
                delay: self.visualizer.step_delay(),
                menu: &self.menu,
                selected: self.selected,
                input: &self.input,
            },
            false,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            super::panes::StatusRenderData {
                message: &self.status_message,
                is_error: self.status_is_error,
                current_step: live.history_position,
                total_steps: live.history.len(),
                is_animating: live.animating,
                is_paused: self.visualizer.is_paused(),
            },
        );
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            // hash values are free text after the key, so letters and spaces
            // there are typed rather than treated as commands
            KeyCode::Char(c) if self.accepts_text() && (c.is_alphabetic() || c == ' ') => {
                self.input.push(c);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(c @ ('0'..='9' | '-' | ',')) => {
                self.input.push(c);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char('[') => self.move_selection(-1),
            KeyCode::Char(']') => self.move_selection(1),
            KeyCode::Enter => self.run_selected(),
            KeyCode::Char(' ') => {
                let paused = self.visualizer.toggle_pause();
                self.set_status(if paused { "Paused" } else { "Resumed" });
            }
            KeyCode::Char('r') => {
                self.visualizer.reset();
                self.log_scroll = usize::MAX;
                self.set_status("Reset with fresh data");
            }
            KeyCode::Char('n') => self.load_input(),
            KeyCode::Char('f') => self.next_family(),
            KeyCode::Char('>') | KeyCode::Char('+') => self.change_speed(SPEED_STEP as i16),
            KeyCode::Char('<') => self.change_speed(-(SPEED_STEP as i16)),
            KeyCode::Char('s') => self.traversal_step(true),
            KeyCode::Char('b') => self.traversal_step(false),
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                let result = self.visualizer.step_backward();
                self.report(result, "Stepped backward");
            }
            KeyCode::Right => {
                let result = self.visualizer.step_forward();
                self.report(result, "Stepped forward");
            }
            KeyCode::Up => {
                if self.focused_pane == FocusedPane::Log {
                    self.log_scroll = self.log_scroll.saturating_sub(1);
                } else {
                    self.move_selection(-1);
                }
            }
            KeyCode::Down => {
                if self.focused_pane == FocusedPane::Log {
                    self.log_scroll = self.log_scroll.saturating_add(1);
                } else {
                    self.move_selection(1);
                }
            }
            _ => {}
        }
    }

    fn selected_item(&self) -> Option<MenuItem> {
        self.menu.get(self.selected).copied()
    }

    fn accepts_text(&self) -> bool {
        self.selected_item() == Some(MenuItem::HashInsert) && self.input.contains(',')
    }

    fn move_selection(&mut self, delta: i64) {
        if self.menu.is_empty() {
            return;
        }
        let len = self.menu.len() as i64;
        self.selected = (self.selected as i64 + delta).rem_euclid(len) as usize;
        if let Some(MenuItem::Sort(algo)) = self.selected_item() {
            self.visualizer.set_algorithm(algo.info());
        }
    }

    fn run_selected(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        let operation: Operation = match item.build(&self.input) {
            Ok(op) => op,
            Err(message) => {
                self.set_error(message);
                return;
            }
        };
        let label = operation.to_string();
        let result = self.visualizer.start(operation);
        if result.is_ok() {
            self.input.clear();
            self.log_scroll = usize::MAX;
        }
        self.report(result, format!("Running {}", label));
    }

    fn load_input(&mut self) {
        match menu::parse_values(&self.input) {
            Ok(values) if values.is_empty() => {
                self.visualizer.reset();
                self.set_status("Generated new data");
            }
            Ok(values) => {
                self.visualizer.load_values(&values);
                self.input.clear();
                self.set_status(format!("Loaded {} values", values.len()));
            }
            Err(message) => self.set_error(message),
        }
        self.log_scroll = usize::MAX;
    }

    fn next_family(&mut self) {
        let kinds = StructureKind::ALL;
        let current = kinds
            .iter()
            .position(|k| *k == self.visualizer.kind())
            .unwrap_or(0);
        let kind = kinds[(current + 1) % kinds.len()];
        self.visualizer.select(kind);
        self.menu = MenuItem::items_for(kind);
        self.selected = 0;
        self.input.clear();
        self.log_scroll = usize::MAX;
        self.set_status(format!("Switched to {}", AlgorithmInfo::default_for(kind).name));
    }

    fn change_speed(&mut self, delta: i16) {
        let speed = (self.visualizer.speed() as i16 + delta).clamp(0, 100) as u8;
        self.visualizer.set_speed(speed);
        self.set_status(format!("Speed {}", speed));
    }

    /// Manual stepping through the selected traversal
    fn traversal_step(&mut self, forward: bool) {
        let Some(MenuItem::Traverse(order)) = self.selected_item() else {
            self.set_error("Select a traversal to step through it");
            return;
        };
        let needs_cursor = self
            .visualizer
            .traversal()
            .map_or(true, |cursor| cursor.order() != order);
        if needs_cursor {
            if let Err(err) = self.visualizer.prepare_traversal(order) {
                self.set_error(err.to_string());
                return;
            }
        }
        let result = if forward {
            self.visualizer.traversal_step_forward()
        } else {
            self.visualizer.traversal_step_back()
        };
        match result {
            Ok(Some(_)) => self.set_status(format!("{} traversal", order.name())),
            Ok(None) => self.set_status("Nothing left to step"),
            Err(err) => self.set_error(err.to_string()),
        }
        self.log_scroll = usize::MAX;
    }

    /// Surface a game server payload on the status line. Failures and
    /// undecodable payloads show as errors; quiet events leave it alone.
    pub fn receive_server_event(&mut self, payload: &str) {
        let event = match protocol::decode::<ServerEvent>(payload) {
            Ok(event) => event,
            Err(err) => {
                self.set_error(format!("Bad server payload: {}", err));
                return;
            }
        };
        if let Some(notice) = event.notice() {
            if event.is_failure() {
                self.set_error(notice);
            } else {
                self.set_status(notice);
            }
        }
    }

    fn report(&mut self, result: Result<(), VizError>, success: impl Into<String>) {
        match result {
            Ok(()) => self.set_status(success),
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VizConfig;
    use crossterm::event::KeyModifiers;

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn test_hash_value_accepts_command_letters() {
        let mut app = App::new(Visualizer::new(StructureKind::Hash, VizConfig::default()));
        type_text(&mut app, "3,aqua blue");

        assert_eq!(app.input, "3,aqua blue");
        assert!(!app.should_quit);
        assert!(!app.visualizer.is_paused());
    }

    #[test]
    fn test_commands_apply_outside_text_input() {
        let mut app = App::new(Visualizer::new(StructureKind::Stack, VizConfig::default()));
        type_text(&mut app, "12 ");
        assert_eq!(app.input, "12");
        assert!(app.visualizer.is_paused());

        type_text(&mut app, "q");
        assert!(app.should_quit);
    }

    #[test]
    fn test_server_events_reach_status_line() {
        let mut app = App::new(Visualizer::new(StructureKind::Sorting, VizConfig::default()));

        app.receive_server_event(
            r#"{"event": "gameError", "data": {"message": "Room is full"}}"#,
        );
        assert_eq!(app.status_message, "Room is full");
        assert!(app.status_is_error);

        app.receive_server_event(
            r#"{"event": "playerSolvedProblem", "data": {"userId": "u2", "username": "ada"}}"#,
        );
        assert_eq!(app.status_message, "ada solved the problem");
        assert!(!app.status_is_error);

        app.receive_server_event(r#"{"event": "roomUpdate", "data": {"roomId": "r1", "status": "waiting"}}"#);
        assert_eq!(app.status_message, "ada solved the problem");

        app.receive_server_event("not json");
        assert!(app.status_message.starts_with("Bad server payload"));
        assert!(app.status_is_error);
    }
}
