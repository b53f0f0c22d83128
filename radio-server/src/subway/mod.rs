//! Realtime subway arrivals feed.
//!
//! Fetches live arrival predictions per station from the Seoul open-data
//! XML feed and narrows them down to trains relevant to a planned leg.
//! A failed lookup is never fatal: it degrades to "no arrivals for this
//! station" so the rest of the route response survives.

mod client;
mod error;
pub mod filter;
pub mod lines;

pub use client::{SubwayClient, parse_arrivals};
pub use error::SubwayError;
pub use filter::{filter_by_direction, filter_by_line};
