//! Application state for the web layer.

use std::sync::Arc;

use crate::kakao::KakaoClient;
use crate::music::{DeezerClient, YoutubeClient};
use crate::news::NewsClient;
use crate::odsay::OdsayClient;
use crate::script::ChatClient;
use crate::subway::SubwayClient;
use crate::weather::WeatherClient;

/// Shared application state.
///
/// Contains all the provider clients needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    pub kakao: Arc<KakaoClient>,
    pub odsay: Arc<OdsayClient>,
    pub subway: Arc<SubwayClient>,
    pub weather: Arc<WeatherClient>,
    pub news: Arc<NewsClient>,
    pub deezer: Arc<DeezerClient>,
    pub youtube: Arc<YoutubeClient>,
    pub llm: Arc<ChatClient>,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kakao: KakaoClient,
        odsay: OdsayClient,
        subway: SubwayClient,
        weather: WeatherClient,
        news: NewsClient,
        deezer: DeezerClient,
        youtube: YoutubeClient,
        llm: ChatClient,
    ) -> Self {
        Self {
            kakao: Arc::new(kakao),
            odsay: Arc::new(odsay),
            subway: Arc::new(subway),
            weather: Arc::new(weather),
            news: Arc::new(news),
            deezer: Arc::new(deezer),
            youtube: Arc::new(youtube),
            llm: Arc::new(llm),
        }
    }
}
