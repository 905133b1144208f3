//! Flattened card record used by downstream tools.
//!
//! A `Card` is built once from a Scryfall response and never edited afterwards.
//! Identity is the canonical name Scryfall returns after fuzzy matching.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    /// Converted mana cost, truncated to a whole number
    #[serde(default)]
    pub cmc: u32,
    #[serde(default)]
    pub oracle_text: Option<String>,
    /// `None` means Scryfall has no USD price, which is not the same as 0.00
    #[serde(default)]
    pub usd_price: Option<f64>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub released_at: Option<NaiveDate>,
    /// Normal-size image URL (front face for double-faced cards)
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Card {
    /// Minimal card with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_line: None,
            mana_cost: None,
            cmc: 0,
            oracle_text: None,
            usd_price: None,
            power: None,
            toughness: None,
            released_at: None,
            image_url: None,
        }
    }

    /// Key used to compare card identity (case-insensitive name)
    pub fn identity_key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Price formatted for display, e.g. "$1.25" or "N/A"
    pub fn price_label(&self) -> String {
        match self.usd_price {
            Some(price) => format!("${price:.2}"),
            None => "N/A".to_string(),
        }
    }

    /// "3/4" for creatures, `None` otherwise
    pub fn power_toughness(&self) -> Option<String> {
        match (&self.power, &self.toughness) {
            (Some(p), Some(t)) => Some(format!("{p}/{t}")),
            _ => None,
        }
    }
}
