//! Circuit Composer entry point
//!
//! A line-driven text front end over the session API. Each line is one
//! command; the board is redrawn after every command.

#[cfg(not(target_arch = "wasm32"))]
mod text_game {
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;

    use circuit_composer::Settings;
    use circuit_composer::consts::*;
    use circuit_composer::session::{Action, Session};
    use circuit_composer::sim::{CellKind, GamePhase, InitialsEdit, Verdict};
    use glam::IVec2;

    const SETTINGS_FILE: &str = "circuit_composer_settings.json";

    const HELP: &str = "\
commands:
  w a s d      move cursor (or edit initials)
  p            place / remove the selected tool
  t            next tool
  go           run the circuit until it is judged
  n            next level
  r            restart after game over / leaderboard
  ok           confirm initials
  level <n>    jump to level n (1-based)
  reset        start over
  q            quit";

    fn cell_glyph(kind: CellKind, state: bool) -> char {
        match (kind, state) {
            (CellKind::Empty, _) => '.',
            (CellKind::Wire, false) => '-',
            (CellKind::Wire, true) => '=',
            (CellKind::And, _) => '&',
            (CellKind::Or, _) => '|',
            (CellKind::Not, _) => '!',
            (CellKind::Input, true) => 'I',
            (CellKind::Input, false) => 'i',
            (CellKind::Output, true) => 'O',
            (CellKind::Output, false) => 'o',
        }
    }

    fn draw(session: &Session, out: &mut impl Write) -> io::Result<()> {
        let progress = session.progress();
        if let Some(level) = session.level() {
            writeln!(out, "\nLevel {}: {}", progress.level_index + 1, level.title)?;
            writeln!(out, "  {}", level.objective)?;
        }
        writeln!(
            out,
            "Score {}  Attempts {}  Tool {}  Phase {:?}",
            progress.score,
            progress.attempts,
            session.selected_tool().as_str(),
            session.phase()
        )?;

        let cursor = session.cursor();
        for y in 0..GRID_HEIGHT as i32 {
            let mut line = String::with_capacity(GRID_WIDTH * 2);
            for x in 0..GRID_WIDTH as i32 {
                let glyph = session
                    .grid()
                    .get(x, y)
                    .map(|c| cell_glyph(c.kind, c.state))
                    .unwrap_or(' ');
                line.push(glyph);
                line.push(if cursor == IVec2::new(x, y) { '<' } else { ' ' });
            }
            writeln!(out, "  {}", line)?;
        }

        match session.phase() {
            GamePhase::LevelComplete => {
                writeln!(out, "Solved! +{} points. 'n' for the next level.", progress.level_score)?
            }
            GamePhase::GameOver => writeln!(out, "Out of attempts. 'r' to continue.")?,
            GamePhase::EnteringInitials => writeln!(
                out,
                "New high score! Initials: {} (w/s letter, a/d slot, ok to save)",
                session.initials()
            )?,
            GamePhase::ShowingHighScores => {
                writeln!(out, "High scores:")?;
                for (i, e) in session.board().entries.iter().enumerate() {
                    writeln!(out, "  {:>2}. {} {:>6}  {}", i + 1, e.initials, e.score, e.date)?;
                }
                writeln!(out, "'r' to play again.")?;
            }
            GamePhase::Editing | GamePhase::Simulating => {}
        }
        Ok(())
    }

    /// Map a direction key to a cursor move or an initials edit
    fn direction(session: &Session, key: &str) -> Option<Action> {
        let entering = session.phase() == GamePhase::EnteringInitials;
        let action = match (key, entering) {
            ("w", true) => Action::Initials(InitialsEdit::NextLetter),
            ("s", true) => Action::Initials(InitialsEdit::PrevLetter),
            ("a", true) => Action::Initials(InitialsEdit::Left),
            ("d", true) => Action::Initials(InitialsEdit::Right),
            ("w", false) => Action::MoveCursor(IVec2::NEG_Y),
            ("s", false) => Action::MoveCursor(IVec2::Y),
            ("a", false) => Action::MoveCursor(IVec2::NEG_X),
            ("d", false) => Action::MoveCursor(IVec2::X),
            _ => return None,
        };
        Some(action)
    }

    pub fn run() -> io::Result<()> {
        let settings_path = std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
        let settings = Settings::load(&settings_path);
        let mut session = Session::open(settings);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        if session.settings().show_tutorial {
            writeln!(out, "{}", HELP)?;
        }
        draw(&session, &mut out)?;

        for line in io::stdin().lock().lines() {
            let line = line?;
            let mut words = line.split_whitespace();
            let Some(cmd) = words.next() else {
                continue;
            };

            match cmd {
                "q" | "quit" => break,
                "help" | "?" => writeln!(out, "{}", HELP)?,
                "p" => {
                    session.apply(Action::Place);
                }
                "t" => {
                    session.apply(Action::NextTool);
                }
                "n" => {
                    session.apply(Action::Advance);
                }
                "r" => {
                    session.apply(Action::Restart);
                }
                "ok" => {
                    if session.apply(Action::ConfirmInitials) {
                        if let Err(e) = session.save_scores() {
                            log::warn!("Could not save high scores: {}", e);
                        }
                    }
                }
                "go" => {
                    if session.apply(Action::ToggleSimulation) {
                        match session.run_until_evaluated() {
                            Some(Verdict::Pass) => writeln!(out, "PASS")?,
                            Some(Verdict::Fail) => writeln!(out, "FAIL")?,
                            None => {}
                        }
                    }
                }
                "level" => match words.next().and_then(|n| n.parse::<usize>().ok()) {
                    Some(n) if n >= 1 && session.load_level(n - 1) => {}
                    _ => writeln!(out, "no such level")?,
                },
                "reset" => session.reset_session(),
                key => match direction(&session, key) {
                    Some(action) => {
                        session.apply(action);
                    }
                    None => writeln!(out, "unknown command '{}', try 'help'", key)?,
                },
            }
            draw(&session, &mut out)?;
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Circuit Composer (text) starting...");

    if let Err(e) = text_game::run() {
        log::error!("I/O error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is driven by the host page through the library API
}
