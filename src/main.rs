mod display;

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use space_invaders::compute::{advance_tick, apply_input, init_state, TickOutcome};
use space_invaders::config::Config;
use space_invaders::entities::{GameState, GameStatus, InputEvent};
use space_invaders::error::AppError;
use space_invaders::high_score::{FileScoreStore, ScoreStore};
use space_invaders::scheduler::FireScheduler;
use space_invaders::tuning::{WORLD_HEIGHT, WORLD_WIDTH};
use space_invaders::view::snapshot;

// ── Held-key input ────────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 8 frames at 60 FPS (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Min frames between taps while Space/Enter is held, so key repeat neither
/// empties the formation in a blink nor skips through the game-over screens.
const TAP_COOLDOWN: u32 = 15;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw alternate-screen mode while playing, so logs go to
/// a file.  If it cannot be opened, logging stays off but the panic hook is
/// still installed.
fn init_tracing(config: &Config) {
    install_panic_hook();

    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
    {
        Ok(file) => file,
        Err(_) => return,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .compact()
            .init();
    }
}

/// Leave raw mode before the default hook prints, so the message is readable.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = terminal::disable_raw_mode();
        let backtrace = std::backtrace::Backtrace::capture();
        error!(%info, ?backtrace, "panic");
        default_hook(info);
    }));
}

fn log_outcome(outcome: &TickOutcome, state: &GameState) {
    if outcome.enemies_destroyed > 0 || outcome.mystery_destroyed {
        debug!(
            enemies = outcome.enemies_destroyed,
            mystery = outcome.mystery_destroyed,
            remaining = state.enemies.len(),
            score = state.score,
            "hit"
        );
    }
    if outcome.obstacle_hits > 0 {
        debug!(hits = outcome.obstacle_hits, "obstacle absorbed fire");
    }
    if outcome.lives_lost > 0 {
        info!(
            lives = state.player.lives,
            formation_reset = outcome.formation_reset,
            "player hit"
        );
    }
    if outcome.level_up {
        info!(level = state.level, enemy_speed = state.enemy_speed, "level up");
    }
    if outcome.game_over {
        info!(score = state.score, level = state.level, "game over");
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Each frame: drain input, apply it and advance the simulation under the
/// shared lock, take a `FrameView`, release the lock, then draw.  The fire
/// scheduler contends for the same lock from its own thread.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    store: &impl ScoreStore,
    high_score: u32,
) -> Result<(), AppError> {
    let shared = Arc::new(Mutex::new(init_state(WORLD_WIDTH, WORLD_HEIGHT, high_score)));
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let scheduler_seed = config.seed.map(|seed| seed.wrapping_add(1));
    let mut scheduler = Some(FireScheduler::start(Arc::clone(&shared), scheduler_seed));

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut tap_cooldown: u32 = 0;
    let mut moving = false;
    let mut saved_high_score = high_score;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut taps = 0;
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            info!("quit requested");
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            info!("quit requested");
                            return Ok(());
                        }
                        KeyCode::Char(' ') | KeyCode::Enter if tap_cooldown == 0 => {
                            taps += 1;
                            tap_cooldown = TAP_COOLDOWN;
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }
        tap_cooldown = tap_cooldown.saturating_sub(1);

        let left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame)
            || is_held(&key_frame, &KeyCode::Char('A'), frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame)
            || is_held(&key_frame, &KeyCode::Char('D'), frame);

        // ── Simulate under the lock ───────────────────────────────────────────
        let mut transitions = Vec::new();
        let (outcome, view) = {
            let mut state = shared.lock().map_err(|_| AppError::LockPoisoned)?;

            // A held key behaves like a finger resting on that half of the screen.
            if left != right {
                let x = if right { state.width } else { 0.0 };
                apply_input(&mut state, InputEvent::Drag { x });
                moving = true;
            } else if moving {
                apply_input(&mut state, InputEvent::Cancel);
                moving = false;
            }
            for _ in 0..taps {
                if let Some(status) = apply_input(&mut state, InputEvent::Release) {
                    info!(?status, level = state.level, "state transition");
                    transitions.push(status);
                }
            }

            let outcome = advance_tick(&mut state, &mut rng);
            log_outcome(&outcome, &state);
            (outcome, snapshot(&state))
        };

        // ── Scheduler lifecycle ───────────────────────────────────────────────
        if outcome.game_over {
            if let Some(scheduler) = scheduler.take() {
                scheduler.stop();
            }
        }
        let resumed = transitions.contains(&GameStatus::Playing);
        if resumed && !scheduler.as_ref().is_some_and(FireScheduler::is_running) {
            scheduler = Some(FireScheduler::start(Arc::clone(&shared), scheduler_seed));
        }

        // ── Persist a beaten high score ───────────────────────────────────────
        if let Some(score) = outcome.new_high_score {
            if score > saved_high_score {
                match store.save(score) {
                    Ok(()) => saved_high_score = score,
                    Err(err) => warn!(error = %err, "could not save high score"),
                }
            }
        }

        display::render(out, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < config.frame_interval {
            thread::sleep(config.frame_interval - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), AppError> {
    let config = Config::from_env();
    init_tracing(&config);

    let store = FileScoreStore::new(config.score_file.clone());
    let high_score = store.load_or_default();
    info!(high_score, path = %store.path().display(), seed = ?config.seed, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &config, &store, high_score);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        error!(error = %err, "exiting with error");
    }
    result
}
