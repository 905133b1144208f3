//! Scryfall API client for fuzzy card-name lookups
//!
//! Uses blocking reqwest. Consecutive requests are spaced by a minimum delay
//! to stay within Scryfall's rate limit.

use crate::card::Card;
use crate::error::{ScryfallError, ScryfallResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::time::{Duration, Instant};

/// Production Scryfall API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.scryfall.com";

/// Minimum spacing between requests (Scryfall asks for 50-100ms)
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);

const USER_AGENT: &str = "Comparinator/1.0";

/// Scryfall card response (subset used for comparisons and export)
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScryfallCard {
    pub name: String,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub prices: ScryfallPrices,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    /// For double-faced cards, images and rules text are in card_faces
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ScryfallPrices {
    pub usd: Option<String>,
    pub usd_foil: Option<String>,
    pub eur: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
}

/// Scryfall API error response
#[derive(Debug, Deserialize)]
struct ScryfallErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    details: String,
}

impl ScryfallCard {
    /// Get the primary image URL (normal size)
    pub fn image_url(&self) -> Option<&str> {
        // Try direct image_uris first
        if let Some(ref uris) = self.image_uris {
            return uris.normal.as_deref();
        }
        // For double-faced cards, get front face image
        self.front_face()
            .and_then(|face| face.image_uris.as_ref())
            .and_then(|uris| uris.normal.as_deref())
    }

    fn front_face(&self) -> Option<&CardFace> {
        self.card_faces.as_ref().and_then(|faces| faces.first())
    }

    /// USD price parsed as a number. Missing or unparsable prices are `None`.
    pub fn usd_price(&self) -> Option<f64> {
        self.prices
            .usd
            .as_deref()
            .and_then(|price| price.trim().parse::<f64>().ok())
    }

    /// Flatten the response into the immutable `Card` record
    pub fn into_card(mut self) -> Card {
        let image_url = self.image_url().map(str::to_string);
        let usd_price = self.usd_price();
        let front = self
            .card_faces
            .take()
            .and_then(|faces| faces.into_iter().next());

        let released_at = self.released_at.as_deref().and_then(|date| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| log::debug!("Unparsable release date '{}' for {}: {}", date, self.name, e))
                .ok()
        });

        // Double-faced cards carry rules text per face; fall back to the front face
        let front = front.as_ref();
        Card {
            type_line: self.type_line.or_else(|| front.and_then(|f| f.type_line.clone())),
            mana_cost: self.mana_cost.or_else(|| front.and_then(|f| f.mana_cost.clone())),
            cmc: self.cmc.map(|cmc| cmc.max(0.0) as u32).unwrap_or(0),
            oracle_text: self.oracle_text.or_else(|| front.and_then(|f| f.oracle_text.clone())),
            usd_price,
            power: self.power.or_else(|| front.and_then(|f| f.power.clone())),
            toughness: self.toughness.or_else(|| front.and_then(|f| f.toughness.clone())),
            released_at,
            image_url,
            name: self.name,
        }
    }
}

/// Enforces a minimum delay between consecutive calls
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Cell<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Cell::new(None),
        }
    }

    /// Block until at least `min_interval` has passed since the previous call.
    /// The first call never waits.
    pub fn wait(&self) {
        if let Some(last) = self.last_call.get() {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                std::thread::sleep(self.min_interval - elapsed);
            }
        }
        self.last_call.set(Some(Instant::now()));
    }
}

/// Blocking Scryfall client with built-in request spacing
#[derive(Debug)]
pub struct ScryfallClient {
    http: reqwest::blocking::Client,
    base_url: String,
    limiter: RateLimiter,
}

impl ScryfallClient {
    /// Client for the public Scryfall API with the default delay
    pub fn new() -> ScryfallResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_REQUEST_DELAY)
    }

    /// Client for a custom endpoint (mirrors, mock servers)
    pub fn with_base_url(base_url: &str, request_delay: Duration) -> ScryfallResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(request_delay),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a card by name (fuzzy search)
    pub fn fetch_named(&self, name: &str) -> ScryfallResult<ScryfallCard> {
        let url = format!(
            "{}/cards/named?fuzzy={}",
            self.base_url,
            urlencoding::encode(name)
        );

        self.limiter.wait();
        log::debug!("Fetching card from Scryfall: {}", url);

        let response = self.http.get(&url).header("Accept", "application/json").send()?;
        let status = response.status();

        if status.is_success() {
            let body = response.text()?;
            return Ok(serde_json::from_str::<ScryfallCard>(&body)?);
        }

        let body = response.text().unwrap_or_default();
        let error = serde_json::from_str::<ScryfallErrorBody>(&body).ok();

        if status == reqwest::StatusCode::NOT_FOUND {
            let details = error
                .map(|e| format!("{}: {}", e.code, e.details))
                .unwrap_or_else(|| status.to_string());
            Err(ScryfallError::NotFound {
                name: name.to_string(),
                details,
            })
        } else {
            Err(ScryfallError::HttpStatus(status))
        }
    }

    /// Fetch and flatten a card by name
    pub fn fetch_card(&self, name: &str) -> ScryfallResult<Card> {
        self.fetch_named(name).map(ScryfallCard::into_card)
    }
}

#[cfg(test)]
#[path = "scryfall_tests.rs"]
mod tests;
