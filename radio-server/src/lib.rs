//! Morning-commute radio backend.
//!
//! Aggregates place search, transit routing, realtime subway arrivals,
//! weather, news and music charts behind one HTTP API, and turns weather
//! and news into radio-DJ scripts via a hosted chat-completion model.

pub mod config;
pub mod domain;
pub mod kakao;
pub mod music;
pub mod news;
pub mod odsay;
pub mod route;
pub mod script;
pub mod subway;
pub mod weather;
pub mod web;
