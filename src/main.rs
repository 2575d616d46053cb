use angler::app::App;
use angler::build_info;
use angler::core::constants::{GALLERY_FILE, LOG_ENV, LOG_FILE, MAX_FRAME_DT_SECONDS, PROGRESSION_FILE};
use angler::core::{parse_args, CliCommand, GameConfig};
use angler::progression::{
    shared_gallery, shared_ledger, Gallery, JsonFileStore, ProgressionLedger, SharedGallery,
    SharedLedger,
};
use angler::ui::{self, input::action_for_key};
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Angler - terminal fishing

USAGE:
    angler [OPTIONS]

OPTIONS:
    --seed <N>         Seed the random generator for a reproducible session
    --save-dir <PATH>  Directory for progression, gallery and log files (default ~/.angler)
    --reset            Wipe progression and gallery before starting
    -v, --version      Print version
    -h, --help         Print this help

CONTROLS:
    Space/Enter  Cast, stop the dial, reel, hold to lift the zone
    G            Toggle gallery
    R            Reset progress
    Q/Esc        Quit

Set ANGLER_LOG (e.g. angler=debug) to change log verbosity.";

fn main() -> io::Result<()> {
    let config = match parse_args(std::env::args().skip(1)) {
        Ok(CliCommand::Play(config)) => config,
        Ok(CliCommand::Help) => {
            println!("{}", HELP);
            return Ok(());
        }
        Ok(CliCommand::Version) => {
            println!("{}", build_info::version_string());
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}\n\nRun with --help for usage.", message);
            std::process::exit(2);
        }
    };

    // Without a writable save directory the session still runs, unsaved
    let persistent = match fs::create_dir_all(&config.save_dir) {
        Ok(()) => true,
        Err(e) => {
            eprintln!(
                "Cannot use {} ({}); progress will not be saved.",
                config.save_dir.display(),
                e
            );
            false
        }
    };
    if persistent {
        if let Err(e) = init_logging(&config.save_dir) {
            eprintln!("Logging disabled: {}", e);
        }
    }
    let config = config.with_file_overrides();
    info!(
        version = %build_info::version_string(),
        save_dir = %config.save_dir.display(),
        seed = ?config.seed,
        "session starting"
    );

    let (ledger, gallery) = open_progress(&config, persistent);
    let mut app = App::new(&config, ledger, gallery);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    // Terminals that support it report key releases, which ends a hold exactly
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &mut app, config.frame_interval());

    if enhanced {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        warn!(error = %e, "session ended with an error");
    }
    info!("session ended");
    result
}

/// Log to a file in the save directory; the terminal belongs to the UI.
fn init_logging(save_dir: &Path) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(save_dir.join(LOG_FILE))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("angler=info"));

    // Only fails if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Load the ledger and gallery and wire them together.
///
/// Non-persistent sessions keep everything in memory.
fn open_progress(config: &GameConfig, persistent: bool) -> (SharedLedger, SharedGallery) {
    let (gallery, mut ledger) = if persistent {
        (
            Gallery::load(JsonFileStore::in_dir(&config.save_dir, GALLERY_FILE)),
            ProgressionLedger::load(JsonFileStore::in_dir(&config.save_dir, PROGRESSION_FILE)),
        )
    } else {
        (Gallery::in_memory(), ProgressionLedger::in_memory())
    };
    let gallery = shared_gallery(gallery);
    ledger.attach_gallery(gallery.clone());

    if config.reset_on_start {
        info!("resetting progress on request");
        ledger.reset_progress();
    }
    (shared_ledger(ledger), gallery)
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    frame_interval: Duration,
) -> io::Result<()> {
    let mut last_frame = Instant::now();

    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Drain input until the next frame is due
        let deadline = last_frame + frame_interval;
        while event::poll(deadline.saturating_duration_since(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = action_for_key(key, app.confirm_reset) {
                    app.handle(action, Instant::now());
                }
            }
            if app.should_quit {
                break;
            }
        }

        let now = Instant::now();
        let dt = now
            .duration_since(last_frame)
            .as_secs_f64()
            .min(MAX_FRAME_DT_SECONDS);
        last_frame = now;
        app.update(dt, now);
    }

    Ok(())
}
