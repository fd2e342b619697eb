mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use tile_platformer::config::{SessionConfig, TICK_RATE};
use tile_platformer::input::InputSnapshot;
use tile_platformer::logging;
use tile_platformer::map::TileMap;
use tile_platformer::world::{GameEvent, Status, World};


const LEVEL_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/levels/level1.txt");

/// How long the win / game-over screen stays up without a key press.
const END_SCREEN: Duration = Duration::from_secs(5);

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 3 frames (120 ms) is
/// refreshed before expiry.
const HOLD_WINDOW: u64 = 3;

/// Maps each held key → the frame it was last seen (press or repeat).
#[derive(Default)]
struct HeldKeys {
    key_frame: HashMap<KeyCode, u64>,
}

impl HeldKeys {
    fn press(&mut self, code: KeyCode, frame: u64) {
        self.key_frame.insert(normalize(code), frame);
    }

    fn release(&mut self, code: KeyCode) {
        self.key_frame.remove(&normalize(code));
    }

    fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|&key| self.is_held(key, frame))
    }

    fn snapshot(&self, frame: u64) -> InputSnapshot {
        InputSnapshot {
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a')], frame),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d')], frame),
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w')], frame),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s')], frame),
            shoot: self.any_held(
                &[KeyCode::Char('x'), KeyCode::Char('f'), KeyCode::Char('j')],
                frame,
            ),
            jump: self.is_held(KeyCode::Char(' '), frame),
            quit: self.is_held(KeyCode::Char('q'), frame),
            escape: self.is_held(KeyCode::Esc, frame),
        }
    }
}

/// Letters are tracked case-insensitively so Shift or Caps Lock don't matter.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

// ── Audio stand-in ────────────────────────────────────────────────────────────

fn play(event: GameEvent) {
    match event {
        GameEvent::LifeLost | GameEvent::GameOver | GameEvent::Victory => {
            log::info!("{:?}", event)
        }
        _ => log::debug!("sfx {:?}", event),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → the player quit,  `false` → the level ended on its own.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let frame_budget = Duration::from_secs_f32(1.0 / TICK_RATE);
    let mut held = HeldKeys::default();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(true);
                    }
                    held.press(code, frame);
                }
                KeyEventKind::Release => held.release(code),
            }
        }

        let input = held.snapshot(frame);
        if input.wants_exit() {
            return Ok(true);
        }

        let dt = last_tick.elapsed().as_secs_f32();
        last_tick = Instant::now();
        let status = world.tick(dt, input);

        for event in world.drain_events() {
            play(event);
        }

        display::render(out, world)?;

        if status.is_finished() {
            return Ok(false);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let verbose = std::env::var(logging::VERBOSE_ENV).ok();
    logging::init(logging::verbose_requested(verbose.as_deref()));

    let map = TileMap::load(LEVEL_PATH).context("loading level")?;
    let mut world = World::new(map, SessionConfig::default()).context("starting session")?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
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
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &mut world, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")?;

    let outcome = match world.status {
        Status::Victory => "You win!",
        Status::GameOver => "Game over.",
        Status::Running => "Quit.",
    };
    println!("{} Score: {}", outcome, world.score);
    Ok(())
}

fn run<W: Write>(
    out: &mut W,
    world: &mut World,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let quit = game_loop(out, world, rx)?;
    if !quit {
        // Leave the end screen up until a fresh key press or the timeout.
        let deadline = Instant::now() + END_SCREEN;
        while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            match rx.recv_timeout(remaining) {
                Ok(Event::Key(KeyEvent { kind: KeyEventKind::Press, .. })) => break,
                Ok(_) => continue,
                Err(_) => break,
            }
        }
    }
    Ok(())
}
