use thiserror::Error;

/// Errors produced while resolving a city or talking to the weather service.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// City parameter was empty or whitespace-only.
    #[error("City name cannot be empty")]
    EmptyCity,

    /// Geocoding returned no match for the requested city.
    #[error("City '{0}' not found")]
    CityNotFound(String),

    /// The outbound request could not be sent or returned a client error.
    #[error("Request to weather service failed: {0}")]
    RequestFailed(String),

    /// The service answered, but the payload was not what we expect.
    #[error("Weather service returned an invalid response: {0}")]
    InvalidResponse(String),

    /// The service is down or answering with server errors.
    #[error("Weather service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The service rejected us for sending too many requests.
    #[error("Weather service rate limit exceeded")]
    RateLimited,
}
