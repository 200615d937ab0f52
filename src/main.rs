mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use arcade_shooter::catalog::{metadata_of, properties_of, Archetype};
use arcade_shooter::session::{Input, Session, SessionConfig, SpawnMode};
use display::Viewport;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".arcade_shooter_score")
}

fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(score: u32) {
    let _ = std::fs::write(high_score_path(), score.to_string());
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(SpawnMode),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    high_score: u32,
) -> std::io::Result<MenuResult> {
    loop {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        let (width, height) = terminal::size()?;
        let cx = width / 2;
        let top = (height / 2).saturating_sub(9);

        let title = "★  ARCADE  SHOOTER  ★";
        out.queue(cursor::MoveTo(
            cx.saturating_sub(title.chars().count() as u16 / 2),
            top,
        ))?;
        out.queue(style::SetForegroundColor(Color::Cyan))?;
        out.queue(Print(title))?;

        if high_score > 0 {
            let hs_str = format!("Best Score: {}", high_score);
            out.queue(cursor::MoveTo(
                cx.saturating_sub(hs_str.chars().count() as u16 / 2),
                top + 1,
            ))?;
            out.queue(style::SetForegroundColor(Color::Yellow))?;
            out.queue(Print(&hs_str))?;
        }

        out.queue(cursor::MoveTo(cx.saturating_sub(16), top + 3))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print("Select mode:"))?;

        let options: &[(&str, &str, Color, &str)] = &[
            ("1", "Arcade", Color::Green, "Progressive waves, new foes unlock over time"),
            ("2", "Test  ", Color::Yellow, "Pick exactly which foes spawn"),
        ];
        for (i, (key, label, color, desc)) in options.iter().enumerate() {
            let row = top + 4 + i as u16;
            out.queue(cursor::MoveTo(cx.saturating_sub(16), row))?;
            out.queue(style::SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(format!("[{}] ", key)))?;
            out.queue(style::SetForegroundColor(*color))?;
            out.queue(Print(format!("{:<8}", label)))?;
            out.queue(style::SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(format!(" — {}", desc)))?;
        }

        // Field guide: one line per archetype, straight from the catalog.
        out.queue(cursor::MoveTo(cx.saturating_sub(16), top + 7))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print("Know your enemy:"))?;
        for (i, archetype) in Archetype::ALL.into_iter().enumerate() {
            let info = metadata_of(archetype);
            let props = properties_of(archetype);
            let row = top + 8 + i as u16;
            out.queue(cursor::MoveTo(cx.saturating_sub(16), row))?;
            out.queue(style::SetForegroundColor(display::archetype_color(archetype)))?;
            out.queue(Print(format!("{:<14}", info.display_name)))?;
            out.queue(style::SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(format!(
                " {} HP, {} pts — {}",
                props.hit_points, props.score_value, info.description
            )))?;
        }

        out.queue(cursor::MoveTo(cx.saturating_sub(16), top + 14))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print("← → ↑ ↓ / WASD : Move   SPACE : Shoot   Q : Quit"))?;

        out.queue(style::ResetColor)?;
        out.flush()?;

        // Block until the user makes a choice
        loop {
            if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
                if kind != KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Char('1') => return Ok(MenuResult::Start(SpawnMode::Normal)),
                    KeyCode::Char('2') => match show_test_setup(out, rx)? {
                        Some(enabled) => {
                            return Ok(MenuResult::Start(SpawnMode::Test { enabled }))
                        }
                        None => break, // redraw the menu
                    },
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(MenuResult::Quit);
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Test-mode roster screen: number keys toggle archetypes, Enter starts.
/// Returns `None` when the user backs out to the main menu.
fn show_test_setup<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<Option<Vec<Archetype>>> {
    let mut enabled = [false; Archetype::ALL.len()];
    enabled[0] = true; // Standard pre-selected
    let mut error: Option<&str> = None;

    loop {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        let (width, height) = terminal::size()?;
        let cx = width / 2;
        let top = (height / 2).saturating_sub(6);

        let title = "TEST MODE — choose your foes";
        out.queue(cursor::MoveTo(
            cx.saturating_sub(title.chars().count() as u16 / 2),
            top,
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(title))?;

        for (i, archetype) in Archetype::ALL.into_iter().enumerate() {
            let info = metadata_of(archetype);
            let row = top + 2 + i as u16;
            let mark = if enabled[i] { "[x]" } else { "[ ]" };
            out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
            out.queue(style::SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(format!("{} {} ", i + 1, mark)))?;
            out.queue(style::SetForegroundColor(display::archetype_color(archetype)))?;
            out.queue(Print(info.display_name))?;
        }

        out.queue(cursor::MoveTo(cx.saturating_sub(14), top + 8))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print("1-5 : Toggle   ENTER : Start   ESC : Back"))?;

        if let Some(msg) = error {
            out.queue(cursor::MoveTo(
                cx.saturating_sub(msg.chars().count() as u16 / 2),
                top + 10,
            ))?;
            out.queue(style::SetForegroundColor(Color::Red))?;
            out.queue(Print(msg))?;
        }

        out.queue(style::ResetColor)?;
        out.flush()?;

        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char(c @ '1'..='5') => {
                    let idx = c as usize - '1' as usize;
                    enabled[idx] = !enabled[idx];
                    error = None;
                }
                KeyCode::Enter => {
                    let roster: Vec<Archetype> = Archetype::ALL
                        .into_iter()
                        .zip(enabled)
                        .filter(|(_, on)| *on)
                        .map(|(a, _)| a)
                        .collect();
                    if roster.is_empty() {
                        error = Some("Select at least one enemy type for test mode!");
                    } else {
                        return Ok(Some(roster));
                    }
                }
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(None),
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: instead of acting on each key event individually, we keep a
/// `key_frame` map recording the frame number of the last press/repeat event
/// for every key, and derive the held-key `Input` snapshot from it each
/// frame.  The core does its own fire-rate gating, so a held Space is simply
/// `input.fire = true` every frame.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    epoch: &Instant,
    high_score: u32,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    let (term_w, term_h) = terminal::size()?;
    let view = Viewport::new(
        term_w,
        term_h,
        session.config.arena_width,
        session.config.arena_height,
    );

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if session.game_over => {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = Input {
            left: any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            ),
            right: any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
            up: any_held(
                &key_frame,
                &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
                frame,
            ),
            down: any_held(
                &key_frame,
                &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
                frame,
            ),
            fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
        };

        let now = epoch.elapsed().as_millis() as u64;
        session.advance_frame(&input, now, &mut rng);

        display::render(out, session, &view, high_score, now)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
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

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let epoch = Instant::now();
    let mut high_score = load_high_score();

    loop {
        match show_menu(out, rx, high_score)? {
            MenuResult::Quit => break,
            MenuResult::Start(mode) => {
                let now = epoch.elapsed().as_millis() as u64;
                let mut session = Session::new(SessionConfig::default(), mode, now);
                let quit = game_loop(out, &mut session, rx, &epoch, high_score)?;

                // Persist new high score if beaten
                if session.score > high_score {
                    high_score = session.score;
                    save_high_score(high_score);
                }

                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
