//! Card lookups used to materialize the starting lists
//!
//! Names that cannot be resolved are dropped with a warning. They never reach
//! the engine.

use crate::engine::InputLists;
use mtg_common::{Card, ScryfallClient};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Card not found: {0}")]
    NotFound(String),
    #[error("Lookup failed for {name}: {reason}")]
    Lookup { name: String, reason: String },
}

/// Resolves a (possibly misspelled) card name to its canonical record
pub trait CardCatalog {
    fn lookup(&self, name: &str) -> Result<Card, CatalogError>;
}

impl CardCatalog for ScryfallClient {
    fn lookup(&self, name: &str) -> Result<Card, CatalogError> {
        self.fetch_card(name).map_err(|e| {
            if e.is_not_found() {
                CatalogError::NotFound(name.to_string())
            } else {
                CatalogError::Lookup {
                    name: name.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }
}

/// Lookup results keyed by lowercased input name, so repeated names cost one request
type LookupMemo = HashMap<String, Option<Card>>;

fn resolve<C: CardCatalog + ?Sized>(catalog: &C, name: &str, memo: &mut LookupMemo) -> Option<Card> {
    let key = name.trim().to_lowercase();
    if let Some(cached) = memo.get(&key) {
        return cached.clone();
    }

    let resolved = match catalog.lookup(name.trim()) {
        Ok(card) => {
            if !card.name.eq_ignore_ascii_case(name.trim()) {
                log::info!("Resolved '{}' to {}", name.trim(), card.name);
            }
            Some(card)
        }
        Err(e) => {
            log::warn!("Dropping '{}': {}", name.trim(), e);
            None
        }
    };
    memo.insert(key, resolved.clone());
    resolved
}

fn resolve_list<C: CardCatalog + ?Sized>(catalog: &C, names: &[String], memo: &mut LookupMemo) -> Vec<Card> {
    let mut seen = HashSet::new();
    let mut cards = Vec::new();

    for name in names.iter().filter(|name| !name.trim().is_empty()) {
        let Some(card) = resolve(catalog, name, memo) else {
            continue;
        };
        if seen.insert(card.identity_key()) {
            cards.push(card);
        } else {
            log::warn!("Skipping duplicate entry '{}' ({})", name.trim(), card.name);
        }
    }
    cards
}

/// Resolve a list of names, dropping failures and duplicates
pub fn materialize<C: CardCatalog + ?Sized>(catalog: &C, names: &[String]) -> Vec<Card> {
    resolve_list(catalog, names, &mut LookupMemo::new())
}

/// Resolve both starting lists. Returns `(considering, current)`.
///
/// A card that resolves into both lists is kept in Current only.
pub fn materialize_lists<C: CardCatalog + ?Sized>(catalog: &C, inputs: &InputLists) -> (Vec<Card>, Vec<Card>) {
    let mut memo = LookupMemo::new();
    let considering = resolve_list(catalog, &inputs.considering, &mut memo);
    let current = resolve_list(catalog, &inputs.current, &mut memo);

    let kept: HashSet<String> = current.iter().map(Card::identity_key).collect();
    let considering: Vec<Card> = considering
        .into_iter()
        .filter(|card| {
            let duplicate = kept.contains(&card.identity_key());
            if duplicate {
                log::warn!("{} is already in the current list, not considering it", card.name);
            }
            !duplicate
        })
        .collect();

    log::info!(
        "Materialized {} of {} considering and {} of {} current cards",
        considering.len(),
        inputs.considering.len(),
        current.len(),
        inputs.current.len()
    );
    (considering, current)
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
