//! Music providers: Deezer chart/search and YouTube video search.

mod deezer;
mod error;
mod youtube;

pub use deezer::{DeezerClient, Track};
pub use error::MusicError;
pub use youtube::{Video, YoutubeClient, parse_iso_duration};
