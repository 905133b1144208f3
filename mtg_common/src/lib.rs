//! Shared MTG types: the flattened card record, the Scryfall client and its errors.

pub mod card;
pub mod error;
pub mod scryfall;

pub use card::Card;
pub use error::{ScryfallError, ScryfallResult};
pub use scryfall::{RateLimiter, ScryfallCard, ScryfallClient, DEFAULT_BASE_URL, DEFAULT_REQUEST_DELAY};
