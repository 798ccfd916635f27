//! Third-party weather and place-search clients.
//!
//! # Responsibility
//! - Typed access to the current-conditions and geocoding HTTP APIs.
//! - Persist the user's saved lookup locations.
//!
//! # Invariants
//! - Nothing here is cached; every call hits the network.
//! - Failures are typed and returned to the caller for inline rendering;
//!   they are never fatal to the application.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client;
pub mod geocode;
pub mod locations;

pub use client::{CurrentWeather, WeatherClient};
pub use geocode::{GeocodeClient, Place};
pub use locations::{SavedLocation, SavedLocations};

/// Errors shared by the weather and geocoding clients.
#[derive(Debug)]
pub enum WeatherError {
    /// No API key configured; checked before any request is sent.
    MissingApiKey,
    /// Transport-level failure from the HTTP client.
    Http(reqwest::Error),
    /// Non-success HTTP status from the upstream API.
    Api { status: u16, message: String },
    /// Response body did not match the expected shape.
    Decode(String),
}

impl Display for WeatherError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "API key is not configured"),
            Self::Http(err) => write!(f, "{err}"),
            Self::Api { status, message } => {
                write!(f, "upstream API returned status {status}: {message}")
            }
            Self::Decode(message) => write!(f, "unexpected API response: {message}"),
        }
    }
}

impl Error for WeatherError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}
