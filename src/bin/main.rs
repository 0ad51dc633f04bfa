use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    process,
};

use clap::Parser;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, Timer};
use flashread_core::{
    EngineConfig, PlaybackState, ReadingEngine, ReadingMode, TickResult,
    content::{TextLibrary, bundled_library},
    settings::{PersistedSettings, SettingsStore},
};
use log::{LevelFilter, debug, info, warn};

use console::{ChannelInput, CommandChannel};
use library::FileLibrary;
use renderer::TerminalRenderer;
use settings_store::FileSettingsStore;
use settings_sync::SettingsSyncState;

#[path = "main/console.rs"]
mod console;
#[path = "main/library.rs"]
mod library;
#[path = "main/renderer.rs"]
mod renderer;
#[path = "main/settings_store.rs"]
mod settings_store;
#[path = "main/settings_sync.rs"]
mod settings_sync;

const SETTINGS_SAVE_DEBOUNCE_MS: u64 = 1_500;
const DEFAULT_SETTINGS_PATH: &str = "flashread-settings.bin";
const MAX_IDLE_WAIT_MS: u64 = 250;
const REPORT_INTERVAL_SECS: u64 = 5;

static INPUT_EVENTS: CommandChannel = CommandChannel::new();

/// Speed reader for the terminal.
///
/// Keys (followed by Enter): space/p pause, +/- speed, u back one, r restart,
/// m next mode, s start, q quit.
#[derive(Parser, Debug)]
#[command(name = "flashread", version, about)]
struct Args {
    /// Plain-text file to read. A bundled sample is used when omitted.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Bundled sample to read when no file is given.
    #[arg(long, default_value_t = 0)]
    sample: u16,

    /// List the bundled samples and exit.
    #[arg(long)]
    list: bool,

    /// rsvp, bionic, chunk, guided or dual-column.
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<ReadingMode>,

    /// Words per minute, clamped to 100..=800.
    #[arg(short, long)]
    wpm: Option<u16>,

    /// Words per group in chunk mode, clamped to 2..=5.
    #[arg(long)]
    chunk_size: Option<u8>,

    /// Where reading settings are remembered between runs.
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    /// Neither load nor save settings.
    #[arg(long)]
    no_settings: bool,

    /// Wait for `s` instead of starting right away.
    #[arg(long)]
    paused: bool,

    /// Disable ANSI styling and in-place redraw.
    #[arg(long)]
    plain: bool,
}

fn parse_mode(value: &str) -> Result<ReadingMode, String> {
    ReadingMode::from_label(value).ok_or_else(|| {
        format!("unknown mode `{value}` (expected rsvp, bionic, chunk, guided or dual-column)")
    })
}

fn list_bundled() {
    let library = bundled_library();
    for index in 0..library.title_count() {
        if let Some(title) = library.title_at(index) {
            println!("{index}: {title}");
        }
    }
}

fn load_bundled(sample: u16) -> (String, String) {
    let mut library = bundled_library();
    let index = sample.min(library.title_count().saturating_sub(1));
    let title = library.title_at(index).unwrap_or("sample").to_string();
    match library.load_text(index) {
        Ok(text) => (title, text),
        Err(err) => {
            warn!("library: bundled text unavailable index={} err={:?}", index, err);
            (title, String::new())
        }
    }
}

/// Title and text to read. A file that cannot be read falls back to the bundled sample.
fn load_source_text(args: &Args) -> (String, String) {
    let Some(path) = args.file.as_ref() else {
        return load_bundled(args.sample);
    };

    let mut library = FileLibrary::new();
    library.push(path);
    match library.load_text(0) {
        Ok(text) => (
            library.title_at(0).unwrap_or("text").to_string(),
            text,
        ),
        Err(err) => {
            warn!(
                "library: cannot read path={} err={:?}; using bundled sample",
                path.display(),
                err
            );
            load_bundled(args.sample)
        }
    }
}

fn engine_config(args: &Args, stored: Option<PersistedSettings>) -> EngineConfig {
    let mut config = EngineConfig::default();
    if let Some(stored) = stored {
        config = stored.apply_to(config);
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(wpm) = args.wpm {
        config.wpm = wpm;
    }
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size as usize;
    }
    config
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    if args.list {
        list_bundled();
        process::exit(0);
    }

    let mut settings_store = (!args.no_settings).then(|| FileSettingsStore::new(&args.settings));
    let stored = match settings_store.as_mut().map(|store| store.load()) {
        Some(Ok(stored)) => stored,
        Some(Err(err)) => {
            warn!(
                "settings: load failed path={} err={:?}; using defaults",
                args.settings.display(),
                err
            );
            None
        }
        None => None,
    };
    if let (Some(store), Some(stored)) = (settings_store.as_ref(), stored) {
        debug!(
            "settings: loaded path={} wpm={} mode={} chunk_size={}",
            store.path().display(),
            stored.wpm,
            stored.mode.label(),
            stored.chunk_size
        );
    }

    let (title, text) = load_source_text(&args);
    let mut engine = ReadingEngine::new(text, engine_config(&args, stored))
        .with_on_complete(|| info!("session: complete"));
    let mut settings_sync = SettingsSyncState::new(engine.persisted_settings());

    if let Err(err) = console::spawn_stdin_reader(&INPUT_EVENTS) {
        warn!("input: stdin reader unavailable err={:?}", err);
    }
    let mut input = ChannelInput::new(&INPUT_EVENTS);
    let ansi = !args.plain && io::stdout().is_terminal();
    let mut renderer = TerminalRenderer::new(io::stdout(), ansi);

    info!(
        "Reader started: title=\"{}\" words={} mode={} target_wpm={} chunk_size={}",
        title,
        engine.word_count(),
        engine.mode().label(),
        engine.wpm(),
        engine.chunk_size()
    );

    let loop_start = Instant::now();
    let mut report_words = 0u64;
    let mut report_start = Instant::now();
    let mut words_read = 0u64;

    if !args.paused {
        engine.start(0);
    }

    let mut now_ms: u64;
    loop {
        now_ms = loop_start.elapsed().as_millis();

        let applied = engine
            .process_inputs(&mut input, now_ms)
            .unwrap_or_else(|never| match never {});
        if applied > 0 {
            debug!("input: applied={} playback={}", applied, engine.playback().label());
        }
        if input.quit_requested() {
            info!("session: quit requested at {}/{}", engine.current_index(), engine.total_items());
            break;
        }

        if engine.tick(now_ms) == TickResult::RenderRequested {
            engine.with_screen(now_ms, |screen| {
                if let Err(err) = renderer.render(&screen) {
                    warn!("render: terminal write failed err={:?}", err);
                }
            });
        }

        settings_sync.track_current(engine.persisted_settings(), now_ms);
        settings_sync.flush_if_due(settings_store.as_mut(), now_ms);

        let drained = engine.drain_word_updates() as u64;
        report_words = report_words.saturating_add(drained);
        words_read = words_read.saturating_add(drained);

        let elapsed = report_start.elapsed();
        if elapsed >= Duration::from_secs(REPORT_INTERVAL_SECS) {
            let elapsed_ms = elapsed.as_millis().max(1);
            let wpm_x100 = report_words * 6_000_000 / elapsed_ms;

            info!(
                "effective_wpm={}.{:02} words={} elapsed_ms={}",
                wpm_x100 / 100,
                wpm_x100 % 100,
                report_words,
                elapsed_ms
            );

            report_words = 0;
            report_start = Instant::now();
        }

        if engine.playback() == PlaybackState::Complete {
            break;
        }

        let idle_wake = now_ms.saturating_add(MAX_IDLE_WAIT_MS);
        let wake_ms = engine
            .next_deadline_ms()
            .map_or(idle_wake, |deadline| deadline.min(idle_wake));
        match select(
            Timer::at(loop_start + Duration::from_millis(wake_ms)),
            INPUT_EVENTS.receive(),
        )
        .await
        {
            Either::First(()) => {}
            Either::Second(command) => input.stash(command),
        }
    }

    if settings_sync.has_pending() {
        settings_sync.flush_now(settings_store.as_mut(), now_ms);
    }
    if let Err(err) = renderer.finish() {
        warn!("render: terminal write failed err={:?}", err);
    }
    engine.dispose();
    info!(
        "Reader stopped: words_read={} frames={} elapsed_ms={}",
        words_read,
        renderer.frames(),
        loop_start.elapsed().as_millis()
    );
    process::exit(0);
}
