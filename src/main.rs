use std::io::stdout;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyEventKind, MouseButton, MouseEventKind,
};
use crossterm::execute;
use tracing::info;

use planline::action::Action;
use planline::app::App;
use planline::config::{Config, load_config, load_config_from_path};
use planline::event::{Event, EventHandler};
use planline::plan::{Course, load_course};
use planline::timeline::duration::DisplayUnit;
use planline::{export, logging, ui};

const WHEEL_COLUMNS: i32 = 3;

#[derive(Parser)]
#[command(
    name = "planline",
    about = "Terminal timeline of a course plan: modules, steps and time budgets"
)]
struct Cli {
    /// Course plan (JSON). Without it the timeline starts empty.
    plan: Option<PathBuf>,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display unit for totals: mins, hours, days, weeks, months
    #[arg(long)]
    unit: Option<String>,

    /// Theme: dark, light, mono
    #[arg(long)]
    theme: Option<String>,

    /// Directory for the log file
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Print the computed timeline as JSON and exit.
    #[arg(long, default_value_t = false)]
    dump: bool,

    /// Do not reload the plan when it changes on disk.
    #[arg(long, default_value_t = false)]
    no_watch: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let _log_guard = logging::init(cli.log_dir.as_deref())?;
    let config = load_config_for_cli(&cli);

    let course = match &cli.plan {
        Some(path) => load_course(path)?,
        None => Course::default(),
    };
    info!(
        plan = ?cli.plan,
        modules = course.modules.len(),
        steps = course.step_count(),
        "starting"
    );

    if cli.dump {
        println!("{}", export::dump_report(&course, &config)?);
        return Ok(());
    }

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, &config, course, &cli).await;

    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();

    result
}

async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    config: &Config,
    course: Course,
    cli: &Cli,
) -> Result<()> {
    let watch = if cli.no_watch {
        None
    } else {
        cli.plan.as_deref()
    };
    let unit = cli.unit.as_deref().map(DisplayUnit::from_str_config);
    let mut app = App::new(config, course, cli.plan.clone()).with_unit_override(unit);
    let mut events = EventHandler::new(config.general.tick_rate(), watch)?;

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let mut should_draw = false;
        match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    let action = app.map_key(key);
                    app.dispatch(action);
                    should_draw = true;
                }
            }
            Event::Mouse(mouse) => {
                let action = match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        Action::SelectAt(mouse.column, mouse.row)
                    }
                    MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
                        Action::ScrollAt(mouse.column, mouse.row, WHEEL_COLUMNS)
                    }
                    MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
                        Action::ScrollAt(mouse.column, mouse.row, -WHEEL_COLUMNS)
                    }
                    _ => Action::None,
                };
                if action != Action::None {
                    app.dispatch(action);
                    should_draw = true;
                }
            }
            Event::Tick => {
                let had_status = app.status_message.is_some();
                let pending = app.debouncer.is_pending();
                app.on_tick(Instant::now());
                should_draw = pending || had_status;
            }
            Event::PlanChanged => {
                app.on_plan_changed(Instant::now());
            }
            Event::Resize => {
                app.on_resize();
                should_draw = true;
            }
        }
        if should_draw {
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref theme) = cli.theme {
        config.general.theme = theme.clone();
    }

    config
}
