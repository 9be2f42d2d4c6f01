//! Terminal game loop.
//!
//! Each round is printed as a numbered list. The player answers with
//! `<n>` to pick item n, `u` to undo, `d <n>` to declare item n as the
//! word they had in mind, or `q` to quit.

use std::io::BufRead;
use std::io::Write;

use lexapprox_core::EngineError;
use lexapprox_core::RandomSource;
use lexapprox_core::RevealAnalytics;
use lexapprox_core::Session;
use lexapprox_core::display_label;
use tracing::debug;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(usize),
    Undo,
    Declare(usize),
    Quit,
}

impl Command {
    /// Round positions are 1-based on input.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let first = words.next()?;
        let command = match first.to_ascii_lowercase().as_str() {
            "u" | "undo" => Command::Undo,
            "q" | "quit" | "exit" => Command::Quit,
            "d" | "done" => Command::Declare(words.next()?.parse().ok()?),
            number => Command::Select(number.parse().ok()?),
        };
        if words.next().is_some() {
            return None;
        }
        Some(command)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Revealed(RevealAnalytics),
    Quit,
}

pub fn play<R, I, W>(session: &mut Session<R>, input: I, out: &mut W) -> Result<Outcome>
where
    R: RandomSource,
    I: BufRead,
    W: Write,
{
    let start = session.start_items()?.to_vec();
    writeln!(out, "Pick the item closest to the one you have in mind.")?;
    print_round(out, 1, &start)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(Outcome::Quit);
        };
        if line.trim().is_empty() {
            continue;
        }
        let Some(command) = Command::parse(&line) else {
            writeln!(out, "commands: <n> select, u undo, d <n> declare target, q quit")?;
            continue;
        };
        debug!(?command, "player command");

        let round = session.current_round().map(<[String]>::to_vec).unwrap_or_default();
        match command {
            Command::Quit => return Ok(Outcome::Quit),
            Command::Select(n) => {
                let Some(item) = pick(&round, n) else {
                    writeln!(out, "choose a number between 1 and {}", round.len())?;
                    continue;
                };
                match session.select_and_suggest(item.clone()) {
                    Ok(view) if view.is_exhausted() => writeln!(
                        out,
                        "No items left to suggest. Undo with 'u' or declare your target with 'd <n>'."
                    )?,
                    Ok(view) => print_round(out, session.iterations() + 1, &view.items)?,
                    Err(err) => report(out, &err)?,
                }
            }
            Command::Undo => match session.undo() {
                Ok(()) => {
                    let round = session.current_round().unwrap_or_default();
                    print_round(out, session.iterations() + 1, round)?;
                }
                Err(err) => report(out, &err)?,
            },
            Command::Declare(n) => {
                let Some(target) = pick(&round, n) else {
                    writeln!(out, "choose a number between 1 and {}", round.len())?;
                    continue;
                };
                match session.reveal(target) {
                    Ok(analytics) => {
                        let analytics = analytics.clone();
                        print_analytics(out, &analytics)?;
                        return Ok(Outcome::Revealed(analytics));
                    }
                    Err(err) => report(out, &err)?,
                }
            }
        }
    }
}

fn pick(round: &[String], n: usize) -> Option<&String> {
    n.checked_sub(1).and_then(|i| round.get(i))
}

fn report<W: Write>(out: &mut W, err: &EngineError) -> Result<()> {
    match err {
        EngineError::EmptyHistory => writeln!(out, "Nothing to undo.")?,
        other => writeln!(out, "error: {other}")?,
    }
    Ok(())
}

fn print_round<W: Write>(out: &mut W, number: usize, items: &[String]) -> Result<()> {
    writeln!(out, "\nRound {number}")?;
    for (i, item) in items.iter().enumerate() {
        writeln!(out, "{:>3}. {}", i + 1, display_label(item))?;
    }
    Ok(())
}

fn print_analytics<W: Write>(out: &mut W, analytics: &RevealAnalytics) -> Result<()> {
    writeln!(
        out,
        "\nTarget: {} (found after {} iterations)",
        display_label(&analytics.target),
        analytics.iterations()
    )?;
    writeln!(
        out,
        "{:>4}  {:>8}  {:>8}  {:>8}  most similar suggested",
        "iter", "selected", "average", "closest"
    )?;
    for i in 0..analytics.iterations() {
        writeln!(
            out,
            "{:>4}  {:>8.4}  {:>8.4}  {:>8.4}  {}",
            i + 1,
            analytics.y_vals_selection[i],
            analytics.y_vals_suggestions_avg[i],
            analytics.y_vals_closest[i],
            display_label(&analytics.most_similar_of_suggested_sequence[i]),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexapprox_core::EmbeddingSpace;
    use lexapprox_core::EngineConfig;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use std::sync::Arc;

    fn session() -> Session {
        let entries = (0..130).map(|i| {
            let t = i as f32 * 0.43;
            (format!("w_{i}"), vec![t.cos(), t.sin(), 1.0 + (i % 3) as f32])
        });
        let space = Arc::new(EmbeddingSpace::from_entries(entries).unwrap());
        Session::seeded(space, EngineConfig::default(), 5)
    }

    fn run(script: &str) -> (Outcome, String, Session) {
        let mut session = session();
        let mut out = Vec::new();
        let outcome = play(&mut session, Cursor::new(script.to_string()), &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap(), session)
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("3"), Some(Command::Select(3)));
        assert_eq!(Command::parse(" U "), Some(Command::Undo));
        assert_eq!(Command::parse("d 12"), Some(Command::Declare(12)));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("d"), None);
        assert_eq!(Command::parse("3 4"), None);
        assert_eq!(Command::parse("pick"), None);
    }

    #[test]
    fn select_then_declare_reveals() {
        let (outcome, text, session) = run("2\n5\nd 7\n");
        let Outcome::Revealed(analytics) = outcome else {
            panic!("expected a reveal, got {outcome:?}");
        };
        assert_eq!(analytics.iterations(), 2);
        assert_eq!(session.selection_sequence().len(), 2);
        assert!(text.contains("Round 3"));
        assert!(text.contains("found after 2 iterations"));
    }

    #[test]
    fn undo_and_bad_input_keep_playing() {
        let (outcome, text, session) = run("u\n99\nhello\n1\nu\nq\n");
        assert_eq!(outcome, Outcome::Quit);
        assert!(text.contains("Nothing to undo."));
        assert!(text.contains("choose a number between 1 and 12"));
        assert!(text.contains("commands:"));
        assert!(session.selection_sequence().is_empty());
        assert_eq!(session.suggestions_sequence().len(), 1);
    }

    #[test]
    fn declaring_before_any_pick_is_refused() {
        let (outcome, text, _) = run("d 1\n");
        assert_eq!(outcome, Outcome::Quit);
        assert!(text.contains("error: precondition failed"));
    }
}
