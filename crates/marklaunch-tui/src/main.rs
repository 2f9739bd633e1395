//! marklaunch - typeahead bookmark picker.
//!
//! Loads `bookmarks.yml`, picks the category whose handler matches the
//! foreground application and runs the picker in the terminal until a bookmark
//! is launched, the picker is cancelled, or focus stays lost too long.

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use marklaunch_core::session::GraceTimer;
use marklaunch_core::{
    BookmarkItem, Outcome, ProcessSpawner, Registry, RegistryLocation, Session, SessionEvent,
    Startup, Step,
};
use marklaunch_tui::app::App;
use marklaunch_tui::cli::{Cli, CliExit, Geometry};
use marklaunch_tui::logging::setup_logging;
use marklaunch_tui::render::render_picker;
use marklaunch_tui::report::Report;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Serialize;
use std::io::{self, Write};
use std::process::ExitCode;
use tokio::sync::mpsc::{self, UnboundedReceiver};

type PickerTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// One line of `--print` output.
#[derive(Serialize)]
struct PrintedRow<'a> {
    #[serde(flatten)]
    item: &'a BookmarkItem,
    active: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(CliExit::Informational(err)) => err.exit(),
        Err(CliExit::Usage(err)) => {
            eprintln!("{}", Report::from_error(&err));
            return ExitCode::FAILURE;
        }
    };

    setup_logging(cli.debug);

    match run(&cli).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("{}", Report::unexpected(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    let location = RegistryLocation::resolve(cli.config.as_deref())?;
    let registry = Registry::load(&location.path)?;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let timer = GraceTimer::new(cli.grace(), events_tx);

    let mut session = match Session::start(&registry, &cli.foreground, ProcessSpawner, timer)? {
        Startup::Running(session) => session,
        Startup::NoMatch { identifier } => {
            eprintln!("{}", Report::no_match(&identifier));
            return Ok(ExitCode::FAILURE);
        }
    };

    if !cli.query.is_empty() {
        session.handle(SessionEvent::QueryChanged(cli.query.clone()));
    }

    if cli.print {
        print_view(&session)?;
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = run_picker(&mut session, events_rx, cli.geometry()).await?;
    match &outcome {
        Outcome::Launched(command) => tracing::info!("Launched {command}"),
        Outcome::LaunchFailed { command, error } => {
            tracing::warn!("Launch of {command} failed: {error}");
        }
        Outcome::Cancelled | Outcome::FocusTimeout => tracing::info!("Closed: {outcome:?}"),
    }
    if let Some(report) = Report::from_outcome(&outcome) {
        eprintln!("{report}");
    }

    // Launch errors are reported but still end the session normally.
    Ok(ExitCode::SUCCESS)
}

fn print_view(session: &Session<ProcessSpawner>) -> Result<()> {
    let view = session.view();
    let mut stdout = io::stdout().lock();
    for (idx, item) in view.rows.iter().copied().enumerate() {
        let row = PrintedRow {
            item,
            active: view.active == Some(idx),
        };
        serde_json::to_writer(&mut stdout, &row)?;
        writeln!(stdout)?;
    }
    Ok(())
}

async fn run_picker(
    session: &mut Session<ProcessSpawner>,
    events: UnboundedReceiver<SessionEvent>,
    geometry: Geometry,
) -> Result<Outcome> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, session, events, geometry).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut PickerTerminal,
    session: &mut Session<ProcessSpawner>,
    mut events: UnboundedReceiver<SessionEvent>,
    geometry: Geometry,
) -> Result<Outcome> {
    let mut app = App::with_query(session.query());
    let title = session.context().category.clone();
    let mut term_events = EventStream::new();

    loop {
        terminal.draw(|f| {
            let area = geometry.viewport(f.area());
            render_picker(f, area, &mut app, &session.view(), &title);
        })?;

        let event = tokio::select! {
            Some(event) = events.recv() => event,
            Some(event_result) = term_events.next() => {
                let event = match event_result {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::error!("Event stream error: {}", e);
                        continue;
                    }
                };
                match app.on_terminal_event(&event) {
                    Some(event) => event,
                    None => continue,
                }
            }
            else => {
                tracing::warn!("Input closed, cancelling");
                return Ok(Outcome::Cancelled);
            }
        };

        match session.handle(event) {
            Step::Terminated(outcome) => return Ok(outcome),
            Step::Continue | Step::Ignored => {}
        }
    }
}
