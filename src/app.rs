use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::config::{Config, KeybindsConfig, parse_key};
use crate::plan::{Course, load_course};
use crate::timeline::debounce::Debouncer;
use crate::timeline::duration::DisplayUnit;
use crate::timeline::layout::{LayoutOptions, ModuleLayout};
use crate::timeline::scroll::ScrollCoordinator;
use crate::timeline::{Report, recompute};
use crate::ui::theme::Theme;
use crate::ui::timeline_widget::{self, TRACK_COUNT, TrackRow};

pub const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub at: Instant,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub zoom_in: KeyCode,
    pub zoom_out: KeyCode,
    pub zoom_reset: KeyCode,
    pub cycle_unit: KeyCode,
    pub toggle_charts: KeyCode,
    pub cycle_theme: KeyCode,
    pub reload: KeyCode,
    pub help: KeyCode,
    pub next_module: KeyCode,
    pub prev_module: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            zoom_in: parse_key(&kb.zoom_in).unwrap_or(KeyCode::Char('+')),
            zoom_out: parse_key(&kb.zoom_out).unwrap_or(KeyCode::Char('-')),
            zoom_reset: parse_key(&kb.zoom_reset).unwrap_or(KeyCode::Char('0')),
            cycle_unit: parse_key(&kb.cycle_unit).unwrap_or(KeyCode::Char('u')),
            toggle_charts: parse_key(&kb.toggle_charts).unwrap_or(KeyCode::Char('c')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            reload: parse_key(&kb.reload).unwrap_or(KeyCode::Char('r')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
            next_module: parse_key(&kb.next_module).unwrap_or(KeyCode::Tab),
            prev_module: parse_key(&kb.prev_module).unwrap_or(KeyCode::BackTab),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.quit), "Quitter"),
            (key_label(self.zoom_in), "Zoom avant"),
            (key_label(self.zoom_out), "Zoom arrière"),
            (key_label(self.zoom_reset), "Zoom 100%"),
            (key_label(self.cycle_unit), "Changer d'unité"),
            (key_label(self.toggle_charts), "Graphiques"),
            (key_label(self.cycle_theme), "Changer de thème"),
            (key_label(self.reload), "Recharger le plan"),
            (key_label(self.help), "Aide"),
            (key_label(self.next_module), "Module suivant"),
            (key_label(self.prev_module), "Module précédent"),
        ];
        entries.push(("←→".to_string(), "Défiler"));
        entries.push(("Ctrl+C".to_string(), "Quitter (toujours)"));
        entries
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "S-Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    pub plan_path: Option<PathBuf>,
    pub course: Course,
    pub report: Report,
    pub layout_options: LayoutOptions,
    pub coordinator: ScrollCoordinator,
    pub debouncer: Debouncer,
    /// `module_index` of the highlighted module.
    pub selected_module: Option<usize>,
    pub input_mode: InputMode,
    pub show_charts: bool,
    pub display_unit: DisplayUnit,
    pub theme: Theme,
    pub status_message: Option<StatusMessage>,
    pub timeline_area: Option<Rect>,
    pub zoom_step: f64,
    pub scroll_step: u16,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    pub fn new(config: &Config, course: Course, plan_path: Option<PathBuf>) -> Self {
        let layout_options = config.timeline.layout_options();
        let report = recompute(&course, &layout_options);

        let mut coordinator = ScrollCoordinator::new(TRACK_COUNT, config.timeline.scroll_cooldown());
        coordinator.set_zoom(config.timeline.default_zoom);

        let display_unit = if course.learning_time_unit.trim().is_empty() {
            config.general.display_unit()
        } else {
            DisplayUnit::from_str_config(&course.learning_time_unit)
        };

        let mut app = App {
            running: true,
            plan_path,
            course,
            report,
            layout_options,
            coordinator,
            debouncer: Debouncer::new(config.timeline.debounce()),
            selected_module: None,
            input_mode: InputMode::Normal,
            show_charts: config.general.show_charts,
            display_unit,
            theme: Theme::from_config(&config.general.theme),
            status_message: None,
            timeline_area: None,
            zoom_step: config.timeline.zoom_step,
            scroll_step: config.timeline.scroll_step_cols.max(1),
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
        };
        app.clamp_selection();
        app
    }

    /// A unit given on the command line beats both the plan and the config.
    pub fn with_unit_override(mut self, unit: Option<DisplayUnit>) -> Self {
        if let Some(unit) = unit {
            self.display_unit = unit;
        }
        self
    }

    /// Full pass over the current snapshot.
    pub fn recompute(&mut self) {
        self.report = recompute(&self.course, &self.layout_options);
        self.clamp_selection();
        debug!(
            modules = self.report.layout.modules.len(),
            scale_seconds = self.report.layout.scale.total_seconds,
            "recomputed timeline"
        );
    }

    /// Reloads the plan from disk. On failure the last good snapshot stays.
    pub fn reload(&mut self) {
        let Some(path) = self.plan_path.clone() else {
            return;
        };
        match load_course(&path) {
            Ok(course) => {
                info!(path = %path.display(), steps = course.step_count(), "plan reloaded");
                self.course = course;
                self.recompute();
                self.set_status("Plan rechargé", StatusKind::Info);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "plan reload failed");
                self.set_status(format!("Rechargement impossible: {err}"), StatusKind::Error);
            }
        }
    }

    pub fn on_plan_changed(&mut self, now: Instant) {
        self.debouncer.schedule(now);
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.debouncer.poll(now) {
            self.reload();
        }
        if let Some(status) = &self.status_message
            && now.duration_since(status.at) >= STATUS_TTL
        {
            self.status_message = None;
        }
    }

    pub fn on_resize(&mut self) {
        self.timeline_area = None;
    }

    /// Lays the timeline out into `area`; called from the draw pass.
    pub fn set_timeline_area(&mut self, area: Rect) {
        self.timeline_area = Some(area);
        self.coordinator
            .set_viewport(timeline_widget::track_area(area).width);
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;
        let step = i32::from(self.scroll_step);

        match code {
            KeyCode::Left => return Action::Scroll(-step),
            KeyCode::Right => return Action::Scroll(step),
            KeyCode::Home => return Action::Scroll(-i32::from(u16::MAX)),
            KeyCode::End => return Action::Scroll(i32::from(u16::MAX)),
            _ => {}
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.zoom_in {
            return Action::ZoomIn;
        }
        if code == kb.zoom_out {
            return Action::ZoomOut;
        }
        if code == kb.zoom_reset {
            return Action::ZoomReset;
        }
        if code == kb.cycle_unit {
            return Action::CycleUnit;
        }
        if code == kb.toggle_charts {
            return Action::ToggleCharts;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.reload {
            return Action::Reload;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }
        if code == kb.next_module {
            return Action::NextModule;
        }
        if code == kb.prev_module {
            return Action::PrevModule;
        }

        Action::None
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        let now = Instant::now();
        match action {
            Action::Quit => self.running = false,
            Action::Scroll(delta) => {
                self.coordinator.scroll_by(delta, now);
            }
            Action::ScrollAt(col, row, delta) => self.scroll_at(col, row, delta, now),
            Action::ZoomIn => self.coordinator.zoom_in(self.zoom_step),
            Action::ZoomOut => self.coordinator.zoom_out(self.zoom_step),
            Action::ZoomReset => self.coordinator.reset_zoom(),
            Action::CycleUnit => self.display_unit = self.display_unit.next(),
            Action::ToggleCharts => self.show_charts = !self.show_charts,
            Action::CycleTheme => self.theme = self.theme.next(),
            Action::Reload => self.reload(),
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::NextModule => self.step_selection(1),
            Action::PrevModule => self.step_selection(-1),
            Action::SelectAt(col, row) => self.select_at(col, row),
            Action::None => {}
        }
    }

    fn step_selection(&mut self, delta: isize) {
        let modules = &self.report.layout.modules;
        if modules.is_empty() {
            self.selected_module = None;
            return;
        }
        let len = modules.len() as isize;
        let next = match self.selected_position() {
            Some(pos) => (pos as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.selected_module = Some(modules[next as usize].module_index);
    }

    fn selected_position(&self) -> Option<usize> {
        let selected = self.selected_module?;
        self.report
            .layout
            .modules
            .iter()
            .position(|m| m.module_index == selected)
    }

    /// Drops a selection that no longer points at a drawn module.
    fn clamp_selection(&mut self) {
        if self.selected_position().is_none() {
            self.selected_module = None;
        }
    }

    /// Course-axis percentage under a screen column, if inside the tracks.
    fn pct_at(&self, col: u16, row: u16) -> Option<(f64, TrackRow)> {
        let area = self.timeline_area?;
        if row < area.y || row >= area.y + area.height {
            return None;
        }
        let track_row = TrackRow::at(row - area.y)?;
        let tracks = timeline_widget::track_area(area);
        if col < tracks.x || col >= tracks.x + tracks.width {
            return None;
        }
        let content = f64::from(self.coordinator.content_width());
        if content <= 0.0 {
            return None;
        }
        let local = f64::from(col - tracks.x) + f64::from(self.coordinator.proxy_offset());
        Some(((local + 0.5) / content * 100.0, track_row))
    }

    fn select_at(&mut self, col: u16, row: u16) {
        let Some((pct, track_row)) = self.pct_at(col, row) else {
            return;
        };
        if track_row == TrackRow::Scrollbar {
            return;
        }
        if let Some(module) = self.report.layout.module_at(pct) {
            self.selected_module = Some(module.module_index);
        }
    }

    fn scroll_at(&mut self, col: u16, row: u16, delta: i32, now: Instant) {
        let Some((_, track_row)) = self.pct_at(col, row) else {
            return;
        };
        let target = (i32::from(self.coordinator.proxy_offset()) + delta).max(0) as u16;
        match track_row.track_index() {
            Some(track) => {
                self.coordinator.scroll_track(track, target, now);
            }
            None => {
                self.coordinator.scroll_proxy(target, now);
            }
        }
    }

    pub fn selected_layout(&self) -> Option<&ModuleLayout> {
        let pos = self.selected_position()?;
        self.report.layout.modules.get(pos)
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            kind,
            at: Instant::now(),
        });
    }
}
