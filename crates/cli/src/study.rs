//! # Interactive Study Loop
//!
//! Reads one command per line and renders the current card after each transition.

use anyhow::{Context, Result};
use flashgen::{CardDeck, Session};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

/// A user action in the study loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudyCommand {
    Next,
    Previous,
    ToggleAnswer,
    Random,
    Export,
    Clear,
    Help,
    Quit,
}

impl StudyCommand {
    /// Parses a line of input. Unknown input yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "n" | "next" => Some(Self::Next),
            "p" | "prev" | "previous" => Some(Self::Previous),
            "a" | "answer" => Some(Self::ToggleAnswer),
            "r" | "random" => Some(Self::Random),
            "e" | "export" => Some(Self::Export),
            "c" | "clear" => Some(Self::Clear),
            "h" | "help" | "?" => Some(Self::Help),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub const HELP: &str =
    "[n] next  [p] previous  [a] show/hide answer  [r] random  [e] export CSV  [c] clear  [q] quit";

/// Renders the card under the cursor.
pub fn render_card(deck: &CardDeck) -> String {
    let (Some(card), Some(cursor)) = (deck.current(), deck.cursor()) else {
        return "No flashcards generated.".to_string();
    };

    let mut out = format!(
        "Card {} of {}\n\nQuestion\n  {}\n",
        cursor.index + 1,
        deck.len(),
        card.question
    );
    if cursor.answer_visible {
        out.push_str(&format!("\nAnswer\n  {}\n", card.answer));
    } else {
        out.push_str("\n(press 'a' to reveal the answer)\n");
    }
    out
}

/// Runs the loop until `q`, end of input, or the deck is cleared.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut out: W,
    export_path: &Path,
) -> Result<()> {
    writeln!(out, "{}\n{HELP}", render_card(session.deck()))?;

    for line in input.lines() {
        let line = line?;
        let Some(command) = StudyCommand::parse(&line) else {
            writeln!(out, "Unknown command '{}'.\n{HELP}", line.trim())?;
            continue;
        };

        let deck = session.deck_mut();
        match command {
            StudyCommand::Next if !deck.has_next() => {
                writeln!(out, "Already at the last card.")?;
                continue;
            }
            StudyCommand::Previous if !deck.has_previous() => {
                writeln!(out, "Already at the first card.")?;
                continue;
            }
            StudyCommand::Next => {
                deck.next();
            }
            StudyCommand::Previous => {
                deck.previous();
            }
            StudyCommand::ToggleAnswer => {
                deck.toggle_answer();
            }
            StudyCommand::Random => {
                deck.random_jump();
            }
            StudyCommand::Export => {
                match session.export_csv() {
                    Some(bytes) => {
                        fs::write(export_path, bytes).with_context(|| {
                            format!("Failed to write '{}'", export_path.display())
                        })?;
                        writeln!(
                            out,
                            "Saved {} flashcards to {}",
                            session.deck().len(),
                            export_path.display()
                        )?;
                    }
                    None => writeln!(out, "Nothing to export.")?,
                }
                continue;
            }
            StudyCommand::Clear => {
                session.clear();
                writeln!(out, "Flashcards cleared.")?;
                return Ok(());
            }
            StudyCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            StudyCommand::Quit => return Ok(()),
        }
        writeln!(out, "{}", render_card(session.deck()))?;
    }
    Ok(())
}
