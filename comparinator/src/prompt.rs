//! Terminal decision loop
//!
//! Shows the trial card next to its opponent, reads one decision per line and
//! applies it to the engine. The session is persisted after every decision.

use crate::engine::{Decision, Engine, Outcome};
use crate::error::Result;
use crate::session::Session;
use mtg_common::Card;
use std::io::{BufRead, Write};

/// A parsed line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Decide(Decision),
    Quit,
}

/// How the decision loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Considering is empty, results can be exported
    Finished,
    /// The user stopped early; the session can be resumed
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_lowercase().as_str() {
        "1" | "k" | "keep" => Some(Command::Decide(Decision::Promote)),
        "2" | "r" | "reject" => Some(Command::Decide(Decision::Reject)),
        "c" | "cut" => Some(Command::Decide(Decision::ForceCut)),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

fn write_card_details<W: Write>(out: &mut W, card: &Card) -> std::io::Result<()> {
    let mut line = String::new();
    if let Some(type_line) = &card.type_line {
        line.push_str(type_line);
    }
    if let Some(mana_cost) = card.mana_cost.as_deref().filter(|cost| !cost.is_empty()) {
        line.push_str(&format!(" {mana_cost}"));
    }
    if let Some(pt) = card.power_toughness() {
        line.push_str(&format!(" ({pt})"));
    }
    if !line.trim().is_empty() {
        writeln!(out, "    {}", line.trim())?;
    }
    if let Some(url) = &card.image_url {
        writeln!(out, "    {url}")?;
    }
    Ok(())
}

/// Render the current pairing
pub fn render_pairing<W: Write>(out: &mut W, engine: &Engine) -> Result<()> {
    let Some(trial) = engine.trial_card() else {
        writeln!(out, "All cards sorted.")?;
        return Ok(());
    };
    let opponent = engine.opponent()?;

    writeln!(out)?;
    writeln!(
        out,
        "Considering: {}  (USD Price: {})  - {} remaining in list",
        trial.name,
        trial.price_label(),
        engine.considering_len()
    )?;
    write_card_details(out, trial)?;
    writeln!(
        out,
        "Current:     {}  (USD Price: {})  - {}/{}",
        opponent.name,
        opponent.price_label(),
        engine.cursor() + 1,
        engine.current_len()
    )?;
    write_card_details(out, opponent)?;
    writeln!(
        out,
        "[1] keep {}   [2] keep {}   [c] cut {} now   [q] save and quit",
        trial.name, opponent.name, trial.name
    )?;
    Ok(())
}

pub fn describe_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Promoted { winner, displaced } => {
            format!("{winner} joins the current list, {displaced} goes back to considering")
        }
        Outcome::NextOpponent { opponent, losses } => {
            format!("Loss {losses}, next opponent: {opponent}")
        }
        Outcome::Cut { card, forced: true } => format!("{card} cut"),
        Outcome::Cut { card, forced: false } => format!("{card} lost every comparison and was cut"),
    }
}

/// Run decisions until the engine is terminal, the user quits or input ends.
/// `persist` is called after every applied decision.
pub fn run<R, W, F>(session: &mut Session, input: R, out: &mut W, mut persist: F) -> Result<LoopExit>
where
    R: BufRead,
    W: Write,
    F: FnMut(&mut Session) -> Result<()>,
{
    let mut lines = input.lines();

    while !session.engine.is_terminal() {
        render_pairing(out, &session.engine)?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            log::info!("Input closed, stopping");
            return Ok(LoopExit::Quit);
        };
        let line = line?;

        match parse_command(&line) {
            Some(Command::Decide(decision)) => {
                let outcome = session.engine.apply(decision)?;
                writeln!(out, "{}", describe_outcome(&outcome))?;
                persist(session)?;
            }
            Some(Command::Quit) => return Ok(LoopExit::Quit),
            None => writeln!(out, "Unknown choice '{}'. Use 1, 2, c or q.", line.trim())?,
        }
    }

    writeln!(
        out,
        "All cards sorted: {} kept, {} cut after {} decisions.",
        session.engine.current_len(),
        session.engine.cut_len(),
        session.engine.decisions()
    )?;
    Ok(LoopExit::Finished)
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
