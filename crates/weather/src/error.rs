use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("malformed Open-Meteo response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{selected} is past the forecast horizon ({latest})")]
    OutOfRange {
        selected: NaiveDateTime,
        latest: NaiveDateTime,
    },
    #[error("hourly data has no entry at index {index} ({len} hours present)")]
    MissingHour { index: usize, len: usize },
}
