mod app;
mod config;
mod flow;
mod i18n;
mod logging;
mod models;
mod prefs;
mod puzzle;
mod repository;
mod sound;
mod stats;
mod ui;

use anyhow::Result;
use app::App;
use clap::{ArgAction, Parser};
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flow::{FlowController, Screen};
use prefs::Preferences;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use repository::{DirRepository, EmbeddedRepository, LayeredRepository, SentenceRepository};
use stats::Statistics;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "senta")]
#[command(version)]
#[command(about = "Put the shuffled words back into a sentence", long_about = None)]
// disable the default flags so they can be customized below
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
#[command(help_template = "\
{name} {version}
{about-section}
{usage-heading} {usage}

{all-args}
")]
struct Cli {
    /// Language code to start with (e.g. "en", "ru"); skips the language menu
    #[arg(short, long)]
    language: Option<String>,

    /// Sentence group to start with (e.g. "short", "random"); needs a language
    #[arg(short, long, requires = "language")]
    group: Option<String>,

    /// Directory with <code>.json sentence files that override the built-in ones
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Show answer statistics
    #[arg(long, default_value_t = false, help_heading = "Flags")]
    stats: bool,

    /// Clear answer statistics
    #[arg(long, default_value_t = false, help_heading = "Flags")]
    reset_stats: bool,

    /// Print help
    #[arg(short, long, action = ArgAction::Help, help_heading = "Flags")]
    help: Option<bool>,

    /// Print version
    #[arg(short = 'V', long, action = ArgAction::Version, help_heading = "Flags")]
    version: Option<bool>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    let stats_path = stats::stats_path();
    let mut stats = match &stats_path {
        Some(path) => Statistics::load_from(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load statistics, starting fresh. Error: {}", e);
            Statistics::default()
        }),
        None => Statistics::default(),
    };

    if cli.reset_stats {
        stats.reset();
        if let Some(path) = &stats_path {
            stats.save_to(path)?;
        }
        println!("Statistics cleared.");
        return Ok(());
    }

    if cli.stats {
        stats::show_stats(&stats);
        return Ok(());
    }

    let app_config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config, using defaults. Error: {}",
            e
        );
        AppConfig::default()
    });

    let prefs_path = prefs::prefs_path();
    let prefs = match &prefs_path {
        Some(path) => Preferences::load_from(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load preferences, using defaults. Error: {}", e);
            Preferences::default()
        }),
        None => Preferences::default(),
    };

    let repository: Box<dyn SentenceRepository> = match cli.data_dir.or(app_config.data_dir) {
        Some(dir) => {
            info!(dir = %dir.display(), "using sentence data dir");
            Box::new(LayeredRepository::new(DirRepository::new(dir)))
        }
        None => Box::new(EmbeddedRepository),
    };

    let flow = FlowController::new(
        repository,
        app_config.fallback_language,
        StdRng::from_os_rng(),
    );

    let start_language = cli.language.or_else(|| prefs.last_language.clone());

    let mut app = App::new(
        flow,
        app_config.theme,
        prefs,
        stats,
        prefs_path,
        stats_path,
    );

    if let Some(code) = start_language {
        app.select_language(&code);
        if let Some(group) = cli.group {
            if app.flow.screen() == Screen::GroupSelect {
                app.select_group(&group);
            } else {
                warn!(group = %group, "language did not load, ignoring --group");
            }
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(std::time::Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Esc => app.quit(),
                            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                                app.quit()
                            }
                            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                                app.quit()
                            }
                            KeyCode::Tab => app.restart(),
                            _ => app.on_key(key),
                        }
                    }
                }
                Event::Resize(w, h) => {
                    app.resize(w, h);
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
