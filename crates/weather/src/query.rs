//! Which Open-Meteo endpoint serves a selected time, and the request URLs.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// How far ahead forecasts reach.
pub const FORECAST_HORIZON_DAYS: i64 = 7;
/// How far back the date picker reaches.
pub const HISTORY_DAYS: u64 = 365;
/// Default span of the precipitation ranking.
pub const RANKING_DAYS: u64 = 30;

const ARCHIVE_HOURLY: &str = "temperature_2m,precipitation,rain,snowfall,weathercode,cloudcover";
const FORECAST_HOURLY: &str =
    "temperature_2m,precipitation_probability,precipitation,rain,snowfall,weathercode,cloudcover";
const RANKING_DAILY: &str =
    "precipitation_sum,rain_sum,snowfall_sum,weathercode_max,temperature_2m_max";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// Already happened: read from the archive.
    Historical,
    /// Within the forecast horizon.
    Forecast,
}

impl QueryKind {
    /// Past times are historical, anything up to the horizon is a forecast.
    pub fn classify(selected: NaiveDateTime, now: NaiveDateTime) -> Result<Self, WeatherError> {
        let latest = now + Duration::days(FORECAST_HORIZON_DAYS);
        if selected < now {
            Ok(QueryKind::Historical)
        } else if selected <= latest {
            Ok(QueryKind::Forecast)
        } else {
            Err(WeatherError::OutOfRange { selected, latest })
        }
    }
}

/// Dates a user may pick, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl DateWindow {
    pub fn around(today: NaiveDate) -> Self {
        Self {
            earliest: today
                .checked_sub_days(Days::new(HISTORY_DAYS))
                .unwrap_or(NaiveDate::MIN),
            latest: today
                .checked_add_days(Days::new(FORECAST_HORIZON_DAYS as u64))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.earliest <= date && date <= self.latest
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA zone the API reports local times in.
    pub timezone: String,
}

impl Default for Location {
    fn default() -> Self {
        Self::shinjuku()
    }
}

impl Location {
    pub fn shinjuku() -> Self {
        Self {
            name: "Shinjuku".to_string(),
            latitude: 35.6938,
            longitude: 139.7034,
            timezone: "Asia/Tokyo".to_string(),
        }
    }

    fn coords(&self) -> String {
        format!("latitude={}&longitude={}", self.latitude, self.longitude)
    }

    /// Hourly archive data for one day.
    pub fn archive_url(&self, date: NaiveDate) -> String {
        format!(
            "{ARCHIVE_URL}?{}&start_date={date}&end_date={date}&hourly={ARCHIVE_HOURLY}&timezone={}",
            self.coords(),
            self.timezone
        )
    }

    /// Hourly forecast for the coming week.
    pub fn forecast_url(&self) -> String {
        format!(
            "{FORECAST_URL}?{}&hourly={FORECAST_HOURLY}&timezone={}",
            self.coords(),
            self.timezone
        )
    }

    /// Daily totals for the `days` days ending on `end`.
    pub fn ranking_url(&self, end: NaiveDate, days: u64) -> String {
        let start = end.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        format!(
            "{ARCHIVE_URL}?{}&start_date={start}&end_date={end}&daily={RANKING_DAILY}&timezone={}",
            self.coords(),
            self.timezone
        )
    }

    /// URL that serves `selected`, or why none does.
    pub fn url_for(&self, selected: NaiveDateTime, now: NaiveDateTime) -> Result<String, WeatherError> {
        Ok(match QueryKind::classify(selected, now)? {
            QueryKind::Historical => self.archive_url(selected.date()),
            QueryKind::Forecast => self.forecast_url(),
        })
    }
}
