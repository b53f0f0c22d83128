//! Place-search provider (geocoding and autocomplete).
//!
//! Resolves free-text place queries to coordinates by trying the
//! address-style search endpoint first and falling back to the
//! keyword-style endpoint, taking the first result of whichever
//! answers. No disambiguation among multiple candidates.

mod client;
mod error;
pub mod types;

pub use client::{KakaoClient, PlaceSuggestion};
pub use error::KakaoError;
