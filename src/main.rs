use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use farm2city::app::{App, Screen};
use farm2city::cli::{Cli, Commands, PlanCommand};
use farm2city::commands::{self, PlanAction, ScheduleArgs};
use farm2city::config::Config;
use farm2city::db::{load_plan, Database};
use farm2city::error::Result;
use farm2city::logic::schedule::PLAN_DAYS;
use farm2city::logic::WeatherService;
use farm2city::ui::screens::{CropsScreen, ScheduleScreen, WeatherScreen};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Some(Commands::Init) = cli.command {
        Config::setup_interactive()?;
        return Ok(());
    }

    // Table-only commands run without a config file or first-run setup
    let config = match cli.command {
        Some(ref command) if !command.needs_config() => Config::default(),
        _ => load_or_setup(cli.config.clone())?,
    };

    match cli.command {
        Some(command) => run_command(command, &config, cli.data_dir.as_ref()).await,
        None => run_tui(config, cli.data_dir.as_ref()).await,
    }
}

fn load_or_setup(config_override: Option<PathBuf>) -> Result<Config> {
    if config_override.is_none() && !Config::exists(None) {
        let (config, _) = Config::setup_interactive()?;
        return Ok(config);
    }

    match Config::load(config_override) {
        Ok(c) => Ok(c),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `farm2city init` or copy config/config.yaml.example to config/config.yaml");
            std::process::exit(1);
        }
    }
}

async fn run_command(
    command: Commands,
    config: &Config,
    data_dir: Option<&PathBuf>,
) -> Result<()> {
    let result = dispatch(command, config, data_dir).await;

    if let Err(ref e) = result {
        if e.is_recoverable() {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    }

    result
}

async fn dispatch(command: Commands, config: &Config, data_dir: Option<&PathBuf>) -> Result<()> {
    match command {
        Commands::Init => Ok(()),
        Commands::Check => {
            config.farm.soil()?;
            config.farm.outlook()?;
            println!("Config: OK ({})", config.farm.name);

            let db = Database::open(&Config::db_path(data_dir)?)?;
            println!("Database: OK ({})", db.path().display());

            let status = WeatherService::new(config).check_connection().await;
            println!("{}", status.describe());
            Ok(())
        }
        Commands::Weather => {
            let weather = WeatherService::new(config).refresh().await;
            print!("{}", commands::weather_report(&weather));
            Ok(())
        }
        Commands::Soils => {
            print!("{}", commands::soils_report());
            Ok(())
        }
        Commands::Recommend { soil } => {
            let soil = commands::resolve_soil(soil.as_deref(), config)?;
            let weather = WeatherService::new(config).refresh().await;
            print!("{}", commands::recommend_report(soil, &weather)?);
            Ok(())
        }
        Commands::Schedule {
            soil,
            crops,
            area,
            forecast,
        } => {
            let db = Database::open(&Config::db_path(data_dir)?)?;
            let args = ScheduleArgs {
                soil,
                crops,
                area,
                forecast,
            };
            let plan = commands::schedule(&db, config, &args)?;
            print!("{}", commands::plan_report(&plan));
            Ok(())
        }
        Commands::Plan { action } => {
            let db = Database::open(&Config::db_path(data_dir)?)?;
            let plan = match action {
                PlanCommand::Show => load_plan(&db)?,
                PlanCommand::Complete { day } => {
                    Some(commands::update_plan(&db, &day, PlanAction::Complete)?)
                }
                PlanCommand::Undo { day } => {
                    Some(commands::update_plan(&db, &day, PlanAction::Undo)?)
                }
            };
            match plan {
                Some(plan) => print!("{}", commands::plan_report(&plan)),
                None => println!("No saved plan. Run `farm2city schedule` to create one."),
            }
            Ok(())
        }
    }
}

async fn run_tui(config: Config, data_dir: Option<&PathBuf>) -> Result<()> {
    let db = Database::open(&Config::db_path(data_dir)?)?;
    let weather = WeatherService::new(&config);

    let mut app = App::new(config, db)?;

    // Open on the cached snapshot and fetch live data from the event loop
    app.update_weather(weather.current().await);
    app.refreshing = true;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &weather).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    weather: &WeatherService,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let status = app.status_message.as_deref();

            match app.screen {
                Screen::Schedule => {
                    let outlook = app.weekly_outlook.as_deref().unwrap_or(&[]);
                    let screen = ScheduleScreen::new(app.plan.as_ref(), outlook)
                        .with_selection(app.schedule_state.selected_index)
                        .with_status(status);
                    f.render_widget(screen, area);
                }
                Screen::Crops => {
                    let screen = CropsScreen::new(&app.recommendations, app.soil_type)
                        .with_selection(app.crops_state.selected_index)
                        .with_status(status);
                    f.render_widget(screen, area);
                }
                Screen::Weather => {
                    let screen = WeatherScreen::new(&app.weather)
                        .with_refreshing(app.refreshing)
                        .with_status(status);
                    f.render_widget(screen, area);
                }
            }
        })?;

        // Handle input with timeout for async operations
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => app.quit(),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Esc => app.switch_screen(Screen::Schedule),
                    KeyCode::Char(c) => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        } else {
                            handle_screen_input(app, key.code);
                        }
                    }
                    _ => handle_screen_input(app, key.code),
                }
            }
        }

        // Fetch on the pass after the request so the refreshing frame is drawn first
        if app.refreshing {
            let snapshot = weather.refresh().await;
            let message = if snapshot.is_fallback() {
                "Weather unavailable - using fallback values"
            } else {
                "Weather refreshed"
            };
            app.update_weather(snapshot);
            app.set_status(message);
            app.refreshing = false;
        } else if app.needs_refresh {
            app.needs_refresh = false;
            app.refreshing = true;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Schedule => handle_schedule_input(app, code),
        Screen::Crops => handle_crops_input(app, code),
        Screen::Weather => {
            if let KeyCode::Char('r') = code {
                app.request_refresh();
            }
        }
    }
}

fn handle_schedule_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up => app.schedule_state.prev(),
        KeyCode::Down => app.schedule_state.next(PLAN_DAYS),
        KeyCode::Enter => app.toggle_selected(),
        KeyCode::Char('w') => app.cycle_outlook(),
        KeyCode::Char('g') => app.regenerate_plan(),
        _ => {}
    }
}

fn handle_crops_input(app: &mut App, code: KeyCode) {
    let count = app.recommendations.len();
    match code {
        KeyCode::Up => app.crops_state.prev(),
        KeyCode::Down => app.crops_state.next(count),
        KeyCode::Char('r') => app.request_refresh(),
        _ => {}
    }
}
