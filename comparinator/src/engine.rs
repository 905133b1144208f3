//! Comparison engine
//!
//! Holds the three card collections of a comparison session and applies one
//! user decision at a time:
//!
//! - **Considering**: cards awaiting a decision. The head is the trial card.
//! - **Current**: cards currently kept. `Current[cursor]` is the opponent.
//! - **Cut**: cards that lost their trial, in elimination order.
//!
//! A trial card that beats its opponent takes the opponent's place in Current
//! and the opponent goes back to the end of Considering. A trial card that loses
//! to every member of Current in a row is cut.

use mtg_common::Card;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Example lists for trying the tool without an input file
const DEMO_CONSIDERING: &[&str] = &["Beast Whisperer", "Branch of Vitu-Ghazi", "Experiment Twelve"];
const DEMO_CURRENT: &[&str] = &[
    "Mystic Forge",
    "Nervous Gardener",
    "Panoptic Projektor",
    "Primordial Mist",
    "Printlifter Ooze",
    "Rampant Growth",
];

/// Errors raised by engine construction and decisions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Both lists were empty, or no name could be resolved
    #[error("Configuration error: there are no cards to compare")]
    NothingToCompare,
    /// Cards to consider but nothing kept to compare them against
    #[error("Configuration error: the current list has no cards to compare against")]
    NoCurrentCards,
    /// Considering is empty; the session only allows export now
    #[error("All cards sorted, no comparison in progress")]
    Finished,
    /// Internal state is inconsistent (logic defect, not a user error)
    #[error("Invariant violated: {0}")]
    InvariantViolated(String),
}

/// The name lists a session was started from, with blank entries removed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLists {
    pub considering: Vec<String>,
    pub current: Vec<String>,
}

impl InputLists {
    /// Build input lists, trimming names and dropping blank entries
    pub fn new<I, J, S, T>(considering: I, current: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            considering: clean_names(considering),
            current: clean_names(current),
        }
    }

    /// The built-in demo lists
    pub fn demo() -> Self {
        Self::new(DEMO_CONSIDERING.iter(), DEMO_CURRENT.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.considering.is_empty() && self.current.is_empty()
    }
}

fn clean_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// A user decision on the current pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The trial card is better than the opponent
    Promote,
    /// The opponent is better than the trial card
    Reject,
    /// Cut the trial card now, without finishing its round
    ForceCut,
}

/// What a decision did to the collections
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `winner` moved into Current; `displaced` went back to Considering
    Promoted { winner: String, displaced: String },
    /// The trial card lost but stays on trial against the next opponent
    NextOpponent { opponent: String, losses: usize },
    /// The trial card moved to Cut
    Cut { card: String, forced: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    considering: Vec<Card>,
    current: Vec<Card>,
    cut: Vec<Card>,
    #[serde(rename = "current_card_index")]
    cursor: usize,
    loss_count: usize,
    #[serde(default)]
    decisions: u64,
    #[serde(default)]
    inputs: InputLists,
}

impl Engine {
    /// Start a session from materialized lists. Cut starts empty, the cursor
    /// and loss counter start at zero.
    pub fn new(
        considering: Vec<Card>,
        current: Vec<Card>,
        inputs: InputLists,
    ) -> Result<Self, EngineError> {
        Self::from_parts(considering, current, Vec::new(), 0, 0, inputs)
    }

    /// Rebuild a session from explicit state, checking every invariant
    pub fn from_parts(
        considering: Vec<Card>,
        current: Vec<Card>,
        cut: Vec<Card>,
        cursor: usize,
        loss_count: usize,
        inputs: InputLists,
    ) -> Result<Self, EngineError> {
        let engine = Self {
            considering,
            current,
            cut,
            cursor,
            loss_count,
            decisions: 0,
            inputs,
        };
        engine.validate()?;
        Ok(engine)
    }

    /// Check the configuration and structural invariants of the state
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.considering.is_empty() && self.cut.is_empty() {
            return Err(EngineError::NothingToCompare);
        }
        if !self.considering.is_empty() && self.current.is_empty() {
            return Err(EngineError::NoCurrentCards);
        }
        if !self.current.is_empty() && self.cursor >= self.current.len() {
            return Err(EngineError::InvariantViolated(format!(
                "cursor {} out of range for {} current cards",
                self.cursor,
                self.current.len()
            )));
        }
        if self.loss_count > self.current.len() {
            return Err(EngineError::InvariantViolated(format!(
                "loss count {} exceeds {} current cards",
                self.loss_count,
                self.current.len()
            )));
        }

        let mut seen = HashSet::new();
        for card in self.considering.iter().chain(&self.current).chain(&self.cut) {
            if !seen.insert(card.identity_key()) {
                return Err(EngineError::InvariantViolated(format!(
                    "card '{}' is in more than one place",
                    card.name
                )));
            }
        }
        Ok(())
    }

    /// True once every candidate has been decided
    pub fn is_terminal(&self) -> bool {
        self.considering.is_empty()
    }

    /// The card on trial (head of Considering)
    pub fn trial_card(&self) -> Option<&Card> {
        self.considering.first()
    }

    /// The kept card the trial card is currently compared against
    pub fn opponent(&self) -> Result<&Card, EngineError> {
        self.check_opponent()?;
        Ok(&self.current[self.cursor])
    }

    pub fn considering(&self) -> &[Card] {
        &self.considering
    }

    pub fn current(&self) -> &[Card] {
        &self.current
    }

    pub fn cut(&self) -> &[Card] {
        &self.cut
    }

    pub fn considering_len(&self) -> usize {
        self.considering.len()
    }

    pub fn current_len(&self) -> usize {
        self.current.len()
    }

    pub fn cut_len(&self) -> usize {
        self.cut.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn loss_count(&self) -> usize {
        self.loss_count
    }

    /// Number of decisions applied so far
    pub fn decisions(&self) -> u64 {
        self.decisions
    }

    pub fn inputs(&self) -> &InputLists {
        &self.inputs
    }

    /// Total number of cards across all three collections
    pub fn total_cards(&self) -> usize {
        self.considering.len() + self.current.len() + self.cut.len()
    }

    /// Apply a user decision
    pub fn apply(&mut self, decision: Decision) -> Result<Outcome, EngineError> {
        match decision {
            Decision::Promote => self.promote(),
            Decision::Reject => self.reject(),
            Decision::ForceCut => self.force_cut(),
        }
    }

    /// The trial card beat its opponent: swap them between Current and
    /// Considering. The cursor stays where it is.
    pub fn promote(&mut self) -> Result<Outcome, EngineError> {
        self.check_opponent()?;

        let winner = self.considering.remove(0);
        let displaced = self.current.remove(self.cursor);
        let outcome = Outcome::Promoted {
            winner: winner.name.clone(),
            displaced: displaced.name.clone(),
        };
        log::info!("{} displaced {}", winner.name, displaced.name);

        self.current.push(winner);
        self.considering.push(displaced);
        self.loss_count = 0;
        self.decisions += 1;
        Ok(outcome)
    }

    /// The opponent beat the trial card. After a full round of losses the trial
    /// card is cut; otherwise the next opponent is lined up.
    pub fn reject(&mut self) -> Result<Outcome, EngineError> {
        self.check_opponent()?;

        self.decisions += 1;
        self.loss_count += 1;
        if self.loss_count >= self.current.len() {
            let card = self.cut_trial_card();
            log::info!("{} lost to every current card and was cut", card);
            return Ok(Outcome::Cut {
                card,
                forced: false,
            });
        }

        self.cursor = (self.cursor + 1) % self.current.len();
        Ok(Outcome::NextOpponent {
            opponent: self.current[self.cursor].name.clone(),
            losses: self.loss_count,
        })
    }

    /// Cut the trial card immediately. The cursor stays where it is.
    pub fn force_cut(&mut self) -> Result<Outcome, EngineError> {
        if self.considering.is_empty() {
            return Err(EngineError::Finished);
        }

        self.decisions += 1;
        let card = self.cut_trial_card();
        log::info!("{} was cut early", card);
        Ok(Outcome::Cut { card, forced: true })
    }

    /// Moves the trial card to Cut and starts a fresh round for the next one
    fn cut_trial_card(&mut self) -> String {
        let card = self.considering.remove(0);
        let name = card.name.clone();
        self.cut.push(card);
        self.loss_count = 0;
        name
    }

    /// Guard for every read of `Current[cursor]`
    fn check_opponent(&self) -> Result<(), EngineError> {
        if self.considering.is_empty() {
            return Err(EngineError::Finished);
        }
        if self.current.is_empty() {
            log::error!(
                "No current cards left while {} cards are still being considered",
                self.considering.len()
            );
            return Err(EngineError::InvariantViolated(
                "current list is empty during a comparison".to_string(),
            ));
        }
        if self.cursor >= self.current.len() {
            log::error!(
                "Cursor {} out of range for {} current cards",
                self.cursor,
                self.current.len()
            );
            return Err(EngineError::InvariantViolated(format!(
                "cursor {} out of range for {} current cards",
                self.cursor,
                self.current.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
