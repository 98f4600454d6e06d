use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::app::{App, StatusKind, StatusMessage};
use crate::config::Config;
use crate::plan::model::{Course, Moment, Module, PedagogicalType, RawDuration, Step};
use crate::timeline::layout::LayoutOptions;
use crate::timeline::recompute;
use crate::timeline::scroll::ScrollCoordinator;
use crate::ui::theme::{ESTIMATED_GLYPH, MISSING_GLYPH, OVERFLOW_GLYPH, Theme};
use crate::ui::timeline_widget::{self, EMPTY_MESSAGE, TRACK_COUNT};

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

fn sample_course() -> Course {
    Course::new(
        "Sample",
        vec![
            Module::new(
                "Intro",
                RawDuration::minutes(60.0),
                vec![Moment::new(
                    "Découverte",
                    vec![
                        Step::new("Atelier", PedagogicalType::Lab, RawDuration::minutes(30.0)),
                        Step::new(
                            "Démo",
                            PedagogicalType::Demonstration,
                            RawDuration::minutes(10.0),
                        ),
                    ],
                )],
            ),
            Module::new(
                "Pratique",
                RawDuration::unset(),
                vec![Moment::new(
                    "Exercices",
                    vec![Step::new(
                        "Quiz",
                        PedagogicalType::Evaluation,
                        RawDuration::minutes(20.0),
                    )],
                )],
            ),
        ],
    )
}

fn make_app(course: Course) -> App {
    App::new(&Config::default(), course, None)
}

fn draw_app(app: &mut App, width: u16, height: u16) -> String {
    render_to_string(width, height, |f| crate::ui::draw(f, app))
}

#[test]
fn full_frame_shows_header_tracks_and_statusbar() {
    let mut app = make_app(sample_course());
    let output = draw_app(&mut app, 120, 30);

    assert!(output.contains("planline"));
    assert!(output.contains("Sample"));
    assert!(output.contains("Total: 60 min"));
    assert!(output.contains("Zoom: 100%"));
    assert!(output.contains("Chronologie"));
    for gutter in ["Cible", "Conçu", "Pédagogie", "Regroupement", "Temporalité"] {
        assert!(output.contains(gutter), "missing gutter label {gutter}");
    }
    assert!(output.contains("Intro"));
    assert!(output.contains("Pratique"));
    assert!(output.contains("Quitter"));
}

#[test]
fn draw_records_timeline_area_for_mouse_hits() {
    let mut app = make_app(sample_course());
    assert!(app.timeline_area.is_none());
    draw_app(&mut app, 120, 30);
    let area = app.timeline_area.unwrap();
    assert_eq!(area.height, timeline_widget::HEIGHT);
    assert_eq!(
        app.coordinator.viewport(),
        area.width - timeline_widget::GUTTER_WIDTH
    );
}

#[test]
fn empty_course_shows_placeholder() {
    let mut app = make_app(Course::new("Vide", Vec::new()));
    let output = draw_app(&mut app, 120, 30);
    assert!(output.contains(EMPTY_MESSAGE));
    assert!(output.contains("Total: 0 min"));
}

#[test]
fn selected_module_opens_detail_panel() {
    let mut app = make_app(sample_course());
    app.selected_module = Some(0);
    let output = draw_app(&mut app, 120, 30);
    assert!(output.contains("Remplissage"));
    assert!(output.contains("Atelier"));
    assert!(output.contains("Labo Pratique"));
    assert!(output.contains("Découverte"));
}

#[test]
fn detail_panel_marks_estimated_target() {
    let mut app = make_app(sample_course());
    app.selected_module = Some(1);
    let output = draw_app(&mut app, 120, 30);
    assert!(output.contains("estimée"));
    assert!(output.contains("Quiz"));
}

#[test]
fn charts_panel_toggles() {
    let mut app = make_app(sample_course());
    let output = draw_app(&mut app, 120, 30);
    assert!(output.contains("Outils"));
    assert!(output.contains("Général"));

    app.show_charts = false;
    let output = draw_app(&mut app, 120, 30);
    assert!(!output.contains("Outils"));
}

#[test]
fn status_message_replaces_pills() {
    let mut app = make_app(sample_course());
    app.status_message = Some(StatusMessage {
        text: "Plan rechargé".to_string(),
        kind: StatusKind::Info,
        at: std::time::Instant::now(),
    });
    let output = draw_app(&mut app, 120, 30);
    let last = output.lines().last().unwrap();
    assert!(last.contains("Plan rechargé"));
    assert!(!last.contains("Quitter"));
}

#[test]
fn help_overlay_lists_keys() {
    let mut app = make_app(sample_course());
    app.dispatch(crate::action::Action::ToggleHelp);
    let output = draw_app(&mut app, 120, 40);
    assert!(output.contains("Raccourcis"));
    assert!(output.contains("Zoom avant"));
    assert!(output.contains("Module suivant"));
}

#[test]
fn overflow_and_estimated_glyphs_on_tracks() {
    let course = Course::new(
        "Glyphs",
        vec![
            Module::new(
                "Long",
                RawDuration::minutes(30.0),
                vec![Moment::new(
                    "m",
                    vec![Step::new("a", PedagogicalType::Lab, RawDuration::minutes(45.0))],
                )],
            ),
            Module::new(
                "Libre",
                RawDuration::unset(),
                vec![Moment::new(
                    "m",
                    vec![Step::new("b", PedagogicalType::Lab, RawDuration::minutes(30.0))],
                )],
            ),
        ],
    );
    let report = recompute(&course, &LayoutOptions::default());
    let mut coordinator = ScrollCoordinator::new(TRACK_COUNT, std::time::Duration::ZERO);
    coordinator.set_viewport(100);
    let theme = Theme::dark();

    let output = render_to_string(113, timeline_widget::HEIGHT, |f| {
        timeline_widget::render(
            f,
            Rect::new(0, 0, 113, timeline_widget::HEIGHT),
            &report.layout,
            &coordinator,
            None,
            &theme,
        );
    });
    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[1].contains(ESTIMATED_GLYPH));
    assert!(lines[3].contains(OVERFLOW_GLYPH));
    assert!(lines[0].contains("|0"));
}

fn single_module_course(target_minutes: f64, step_minutes: f64) -> Course {
    Course::new(
        "Single",
        vec![Module::new(
            "Seul",
            RawDuration::minutes(target_minutes),
            vec![Moment::new(
                "m",
                vec![Step::new("a", PedagogicalType::Lab, RawDuration::minutes(step_minutes))],
            )],
        )],
    )
}

fn render_tracks(report: &crate::timeline::Report, coordinator: &ScrollCoordinator) -> String {
    let theme = Theme::dark();
    render_to_string(113, timeline_widget::HEIGHT, |f| {
        timeline_widget::render(
            f,
            Rect::new(0, 0, 113, timeline_widget::HEIGHT),
            &report.layout,
            coordinator,
            None,
            &theme,
        );
    })
}

#[test]
fn missing_time_marked_on_pedagogy_row_only() {
    let report = recompute(&single_module_course(60.0, 15.0), &LayoutOptions::default());
    let mut coordinator = ScrollCoordinator::new(TRACK_COUNT, std::time::Duration::ZERO);
    coordinator.set_viewport(100);

    let output = render_tracks(&report, &coordinator);
    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[4].contains(MISSING_GLYPH));
    assert!(!lines[3].contains(MISSING_GLYPH));
    for line in &lines[5..9] {
        assert!(!line.contains(MISSING_GLYPH));
    }
}

#[test]
fn scrolled_track_shifts_ruler() {
    let report = recompute(&single_module_course(60.0, 60.0), &LayoutOptions::default());
    let mut coordinator = ScrollCoordinator::new(TRACK_COUNT, std::time::Duration::ZERO);
    coordinator.set_viewport(100);
    coordinator.set_zoom(2.0);

    let before = render_tracks(&report, &coordinator);
    let ruler: String = before.lines().next().unwrap().chars().skip(13).collect();
    assert!(ruler.starts_with("|0"));

    coordinator.scroll_track(3, 40, std::time::Instant::now());
    let after = render_tracks(&report, &coordinator);
    let ruler: String = after.lines().next().unwrap().chars().skip(13).collect();
    assert!(!ruler.starts_with("|0"));
    assert!(ruler.contains("|20"));
}

#[test]
fn timeline_widget_is_blank_when_too_narrow() {
    let report = recompute(&sample_course(), &LayoutOptions::default());
    let coordinator = ScrollCoordinator::default();
    let theme = Theme::dark();
    let output = render_to_string(10, timeline_widget::HEIGHT, |f| {
        timeline_widget::render(
            f,
            Rect::new(0, 0, 10, timeline_widget::HEIGHT),
            &report.layout,
            &coordinator,
            None,
            &theme,
        );
    });
    assert!(output.chars().all(|c| c == ' ' || c == '\n'));
}
