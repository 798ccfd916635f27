//! Current-conditions client for the OpenWeather-shaped API.
//!
//! # Invariants
//! - Requests always use metric units.
//! - A 401 is reported as an invalid-key API error so the widget can show
//!   a precise message instead of a generic failure.

use crate::weather::WeatherError;
use log::info;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Normalized current conditions for the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Rounded temperature in °C.
    pub temp: i32,
    /// Rounded feels-like temperature in °C.
    pub feels_like: i32,
    /// Relative humidity percent.
    pub humidity: u8,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    pub description: String,
    /// Upstream icon id, e.g. `04d`.
    pub icon: String,
    /// Cloud cover percent.
    pub cloudiness: u8,
    /// Reporting station/city name.
    pub station: String,
}

/// Raw response shape of the upstream current-weather endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct WeatherResponse {
    main: MainSection,
    weather: Vec<ConditionSection>,
    wind: WindSection,
    clouds: CloudsSection,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ConditionSection {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindSection {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct CloudsSection {
    all: u8,
}

impl WeatherResponse {
    fn into_current(self) -> Result<CurrentWeather, WeatherError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Decode("empty weather condition list".to_string()))?;

        Ok(CurrentWeather {
            temp: self.main.temp.round() as i32,
            feels_like: self.main.feels_like.round() as i32,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            description: condition.description,
            icon: condition.icon,
            cloudiness: self.clouds.all,
            station: self.name,
        })
    }
}

/// HTTP client for current conditions.
///
/// Holds only the connection handle and key; responses are never cached.
pub struct WeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    /// # Errors
    /// - `MissingApiKey` when the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Overrides the upstream base URL; test hook.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches current conditions for the coordinates.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<CurrentWeather, WeatherError> {
        let url = format!(
            "{}/weather?lat={lat}&lon={lon}&appid={}&units=metric",
            self.base_url, self.api_key
        );

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = if status.as_u16() == 401 {
                "invalid API key".to_string()
            } else {
                response.text().await.unwrap_or_default()
            };
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: WeatherResponse = response
            .json()
            .await
            .map_err(|err| WeatherError::Decode(err.to_string()))?;

        info!("event=weather_fetch module=weather status=ok lat={lat} lon={lon}");
        parsed.into_current()
    }
}
