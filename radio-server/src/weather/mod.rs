//! Weather provider (Open-Meteo).
//!
//! Fetches the current conditions plus an hourly forecast for one day
//! and renders them as a short Korean briefing: a headline line with
//! the rounded temperature and condition, then one rain line each for
//! the morning commute window (06:00–12:00) and the afternoon window
//! (12:00–18:00).

use chrono::Local;
use serde::Deserialize;

/// Default base URL for the forecast API. No key required.
const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Total request timeout in seconds.
const TIMEOUT_SECS: u64 = 15;

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// WMO weather codes rendered in Korean. Unknown codes fall back to
/// "알 수 없음".
const WEATHER_CODE_KO: &[(u32, &str)] = &[
    (0, "맑음"),
    (1, "대체로 맑음"),
    (2, "약간 흐림"),
    (3, "흐림"),
    (45, "안개"),
    (48, "서리 안개"),
    (51, "이슬비"),
    (53, "이슬비"),
    (55, "이슬비"),
    (61, "비"),
    (63, "비"),
    (65, "폭우"),
    (66, "진눈깨비"),
    (67, "진눈깨비"),
    (71, "눈"),
    (73, "눈"),
    (75, "눈"),
    (77, "눈알"),
    (80, "소나기"),
    (81, "소나기"),
    (82, "폭우"),
    (85, "눈 소나기"),
    (86, "눈 소나기"),
    (95, "뇌우"),
    (96, "뇌우+우박"),
    (99, "뇌우+우박"),
];

/// WMO codes that count as precipitation even with 0mm reported.
const RAIN_CODES: &[u32] = &[
    51, 53, 55, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 82, 85, 86, 95, 96, 99,
];

/// Errors from the weather provider.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the forecast API
    #[error("weather API returned status {status}")]
    Api { status: u16 },
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: Option<CurrentConditions>,
    #[serde(default)]
    pub hourly: Option<HourlyForecast>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub temperature_2m: Option<f64>,
    #[serde(default)]
    pub weather_code: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HourlyForecast {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<u32>,
    #[serde(default)]
    pub precipitation: Vec<f64>,
}

/// Rain outlook for one time-of-day window.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RainSlot {
    pub rain: bool,
    pub max_precip_mm: f64,
}

/// Client for the forecast API.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Fetch today's briefing text for a coordinate.
    pub async fn weather_text(
        &self,
        lat: f64,
        lon: f64,
        location_name: &str,
    ) -> Result<String, WeatherError> {
        let lat5 = (lat * 1e5).round() / 1e5;
        let lon5 = (lon * 1e5).round() / 1e5;

        let response = self
            .http
            .get(format!("{}/v1/forecast", self.base_url))
            .query(&[
                ("latitude", lat5.to_string()),
                ("longitude", lon5.to_string()),
                ("current", "temperature_2m,weather_code".to_string()),
                ("hourly", "weather_code,precipitation".to_string()),
                ("timezone", "Asia/Seoul".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Api {
                status: status.as_u16(),
            });
        }

        let body: ForecastResponse = response.json().await?;
        let today = Local::now().format("%Y-%m-%d").to_string();
        Ok(briefing_text(&body, location_name, &today))
    }
}

/// Render the briefing. Missing current conditions give a single
/// "확인할 수 없습니다" line; a missing hourly forecast drops the rain
/// lines but keeps the headline.
pub fn briefing_text(forecast: &ForecastResponse, location_name: &str, today: &str) -> String {
    let current = forecast.current.as_ref();
    let (temp, code) = match current.and_then(|c| c.temperature_2m.zip(c.weather_code)) {
        Some(pair) => pair,
        None => return format!("오늘 {location_name} 날씨 정보를 확인할 수 없습니다."),
    };

    let main_line = format!(
        "오늘 {location_name} {}°C {}",
        temp.round() as i64,
        weather_code_ko(code)
    );

    let Some(hourly) = forecast.hourly.as_ref().filter(|h| !h.time.is_empty()) else {
        return main_line;
    };

    let (morning, afternoon) = rain_by_slot(hourly, today);
    format!(
        "{main_line}\n{}\n{}",
        format_slot_rain("오전(출근길)", morning),
        format_slot_rain("오후", afternoon)
    )
}

/// Scan today's hours into the 06–12 and 12–18 windows.
pub fn rain_by_slot(hourly: &HourlyForecast, today: &str) -> (RainSlot, RainSlot) {
    let mut morning = RainSlot::default();
    let mut afternoon = RainSlot::default();

    for (i, t) in hourly.time.iter().enumerate() {
        if !t.starts_with(today) {
            continue;
        }
        // Timestamps look like "2026-08-23T07:00".
        let hour: u32 = t
            .get(11..13)
            .and_then(|h| h.parse().ok())
            .unwrap_or_default();
        let precip = hourly.precipitation.get(i).copied().unwrap_or(0.0);
        let code = hourly.weather_code.get(i).copied().unwrap_or(0);
        let is_rain = precip > 0.0 || RAIN_CODES.contains(&code);

        let slot = match hour {
            6..12 => &mut morning,
            12..18 => &mut afternoon,
            _ => continue,
        };
        if is_rain {
            slot.rain = true;
        }
        slot.max_precip_mm = slot.max_precip_mm.max(precip);
    }

    (morning, afternoon)
}

fn format_slot_rain(label: &str, slot: RainSlot) -> String {
    if !slot.rain {
        return format!("{label} 비 예보 없음");
    }
    if slot.max_precip_mm > 0.0 {
        format!(
            "☔ {label} 비/눈 예보 있음 (최대 {:.0}mm)",
            slot.max_precip_mm
        )
    } else {
        format!("☔ {label} 비/눈 예보 있음")
    }
}

fn weather_code_ko(code: u32) -> &'static str {
    WEATHER_CODE_KO
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or("알 수 없음")
}
