//! Viselitsa entry point
//!
//! On the web the page drives `viselitsa::web::WebGame` directly; this
//! binary only matters natively, where it runs a terminal game.

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start in the library
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(e) = native::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufRead, Write};
    use std::time::{SystemTime, UNIX_EPOCH};

    use viselitsa::sim::{Command, GameEvent};
    use viselitsa::ui::{Screen, Session};
    use viselitsa::{Settings, Variant, WordBank};

    pub fn run() -> io::Result<()> {
        let variant = std::env::args()
            .nth(1)
            .and_then(|arg| Variant::from_str(&arg))
            .unwrap_or_default();
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let mut session = Session::new(Settings::from_variant(variant), WordBank::default(), seed);

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        let mut out = io::stdout();

        loop {
            match session.screen() {
                Screen::ThemeSelect => {
                    let themes = session.theme_names();
                    write!(out, "Тема ({}), пусто для выхода: ", themes.join(", "))?;
                    out.flush()?;
                    let Some(line) = lines.next().transpose()? else {
                        return Ok(());
                    };
                    let theme = line.trim();
                    if theme.is_empty() {
                        return Ok(());
                    }
                    if let Err(e) = session.choose_theme(theme) {
                        writeln!(out, "{e}")?;
                    }
                }
                Screen::Game => {
                    draw(&session, &mut out)?;
                    write!(out, "Буква (? подсказка, ! сдаться): ")?;
                    out.flush()?;
                    let Some(line) = lines.next().transpose()? else {
                        return Ok(());
                    };
                    match Command::parse(&line) {
                        Some(Command::Hint) => session.hint(),
                        Some(Command::GiveUp) => session.give_up(),
                        Some(Command::Guess(letter)) => session.press_letter(letter),
                        _ => {}
                    }
                    for event in session.drain_events() {
                        match event {
                            GameEvent::LetterMiss { letter, .. } => {
                                writeln!(out, "Буквы {letter} нет")?;
                            }
                            GameEvent::HintUsed { letter, .. } => {
                                writeln!(out, "Подсказка: {letter}")?;
                            }
                            _ => {}
                        }
                    }
                }
                Screen::Result => {
                    if let Some(result) = session.result_view() {
                        writeln!(out, "{}\n{}", result.status, result.word_reveal)?;
                    }
                    session.new_game();
                }
            }
        }
    }

    fn draw(session: &Session, out: &mut impl Write) -> io::Result<()> {
        let state = session.state();
        let used: String = state.used_letters().iter().collect();
        writeln!(
            out,
            "\n{}   попыток: {}/{}   использовано: {}",
            state.masked_word('_'),
            state.attempts_left(),
            state.max_attempts(),
            used
        )
    }
}
