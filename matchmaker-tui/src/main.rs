//! Terminal UI for Maintenance Matchmaker that recommends services for a vehicle.

mod app;
mod input;
mod ui;

use std::{
    env,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration as StdDuration,
};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use matchmaker_core::{
    JsonSchedulePort, MatchmakerService, Miles, RawVehicleInput, RecommendationSet, SchedulePort,
    Vehicle, YearRange,
    engine::DEFAULT_LOOK_AHEAD,
    export::{due_label, format_miles, format_price, service_count_label},
    validate_vehicle_inputs,
};
use matchmaker_schedule_toyota as toyota;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::input::Action;

const DEFAULT_EXPORT_FILE: &str = "maintenance-quote.txt";
const LOG_FILE_NAME: &str = "matchmaker.log";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// JSON schedule to use instead of the built-in Toyota table
    #[arg(short, long, global = true)]
    schedule: Option<PathBuf>,

    /// Miles ahead of the current reading to surface upcoming services
    #[arg(short = 'w', long, default_value_t = DEFAULT_LOOK_AHEAD, global = true)]
    look_ahead: Miles,

    /// Oldest accepted model year
    #[arg(long, global = true)]
    min_year: Option<u16>,

    /// Newest accepted model year
    #[arg(long, global = true)]
    max_year: Option<u16>,

    /// Log file (defaults to matchmaker.log in the temp directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive form and service picker (default)
    Tui {
        /// File the quote is written to on export
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        export: PathBuf,
    },
    /// Print recommendations for a vehicle and exit
    Report {
        #[arg(long)]
        year: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        mileage: String,
        /// Emit the recommendation set as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.verbose)?;

    let service = Arc::new(build_service(args.schedule.as_deref(), args.look_ahead)?);
    let defaults = YearRange::default();
    let years = YearRange {
        min: args.min_year.unwrap_or(defaults.min),
        max: args.max_year.unwrap_or(defaults.max),
    };

    let command = args.command.unwrap_or(Commands::Tui {
        export: PathBuf::from(DEFAULT_EXPORT_FILE),
    });
    match command {
        Commands::Tui { export } => run_tui(App::new(service, years, export)),
        Commands::Report {
            year,
            model,
            mileage,
            json,
        } => {
            let raw = RawVehicleInput {
                year: &year,
                model: &model,
                mileage: &mileage,
            };
            report(&service, &validate_vehicle_inputs(raw, years)?, json)
        }
    }
}

fn init_logging(log_file: Option<&Path>, verbose: bool) -> Result<()> {
    let path = log_file.map_or_else(|| env::temp_dir().join(LOG_FILE_NAME), Path::to_path_buf);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("MATCHMAKER_LOG")
        .unwrap_or_else(|_err| EnvFilter::new(default_level));

    // The terminal belongs to the UI, so logs go to a file.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")?;
    Ok(())
}

fn build_service(schedule: Option<&Path>, look_ahead: Miles) -> Result<MatchmakerService> {
    let port: Box<dyn SchedulePort> = match schedule {
        Some(path) => Box::new(JsonSchedulePort::new(path, toyota::meta())),
        None => Box::new(toyota::ToyotaSchedulePort::new()),
    };

    let service = MatchmakerService::from_port(port.as_ref())
        .context("Failed to load maintenance schedule")?
        .with_look_ahead(look_ahead);
    Ok(service)
}

fn run_tui(app: App) -> Result<()> {
    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::Generate => {
                    // Schedule errors mean a broken deployment, not bad input
                    app.generate().context("Failed to compute recommendations")?;
                }
                Action::Export => export_quote(&mut app),
            }
        }
    }

    Ok(())
}

fn export_quote(app: &mut App) {
    let text = match app.export_text(Local::now().date_naive()) {
        Ok(text) => text,
        Err(reason) => {
            app.error_message = Some(reason.to_owned());
            return;
        }
    };

    match fs::write(&app.export_path, text) {
        Ok(()) => {
            info!(
                path = %app.export_path.display(),
                services = app.selection.len(),
                "quote exported"
            );
            app.error_message = None;
            app.status_message = Some(format!("✓ Saved quote to {}", app.export_path.display()));
        }
        Err(err) => {
            error!(path = %app.export_path.display(), %err, "quote export failed");
            app.error_message = Some(format!("Failed to save quote: {err}"));
        }
    }
}

fn report(service: &MatchmakerService, vehicle: &Vehicle, json: bool) -> Result<()> {
    let recommendations = service.recommendations(vehicle)?;
    let mut out = io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &recommendations)?;
        writeln!(out)?;
        return Ok(());
    }

    let next = service.next_interval(vehicle.mileage)?;
    writeln!(
        out,
        "{} {} {} · {} mi",
        vehicle.year,
        service.make(),
        vehicle.model,
        format_miles(vehicle.mileage)
    )?;
    writeln!(
        out,
        "Next service: {} mi (in {} mi)",
        format_miles(next),
        format_miles(next.saturating_sub(u64::from(vehicle.mileage)))
    )?;
    write_report_body(&mut out, &recommendations)?;
    Ok(())
}

fn write_report_body(out: &mut impl Write, recommendations: &RecommendationSet) -> io::Result<()> {
    if recommendations.is_empty() {
        writeln!(out)?;
        writeln!(out, "All caught up! No services due at this mileage")?;
        return Ok(());
    }

    for (priority, bucket) in recommendations.iter() {
        if bucket.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{} ({})", priority.label(), service_count_label(bucket.len()))?;
        for recommendation in bucket {
            writeln!(
                out,
                "  {} - {} - {} ({}h labor)",
                recommendation.service,
                due_label(recommendation),
                format_price(recommendation.price),
                recommendation.labor_hours
            )?;
        }
    }
    Ok(())
}
