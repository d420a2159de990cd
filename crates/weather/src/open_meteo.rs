//! Open-Meteo response parsing.
//!
//! Responses use the legacy `weathercode`/`cloudcover` names; the newer
//! snake_case names are accepted too. Nulls and absent series read as zero.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::condition::WeatherCondition;
use crate::error::WeatherError;

/// Hour used when the selected time is not in the response.
pub const FALLBACK_HOUR_INDEX: usize = 12;

/// One hour of weather at the location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Local time as returned, `YYYY-MM-DDTHH:MM`.
    pub time: String,
    pub temperature: f32,
    pub precipitation: f32,
    pub rain: f32,
    pub snowfall: f32,
    /// Percent, 0 to 100.
    pub cloud_cover: f32,
    pub weather_code: Option<u8>,
    pub condition: WeatherCondition,
    /// Only present in forecasts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<f32>,
}

/// A day with measurable precipitation, for the ranking view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationDay {
    pub date: String,
    pub precipitation: f32,
    pub rain: f32,
    pub snowfall: f32,
    /// Precipitation plus snowfall; the ranking key.
    pub total: f32,
    pub weather_code: Option<u8>,
    pub condition: WeatherCondition,
    pub max_temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct HourlyResponse {
    hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f32>>,
    #[serde(default)]
    precipitation: Vec<Option<f32>>,
    #[serde(default)]
    rain: Vec<Option<f32>>,
    #[serde(default)]
    snowfall: Vec<Option<f32>>,
    #[serde(default, alias = "weather_code")]
    weathercode: Vec<Option<u8>>,
    #[serde(default, alias = "cloud_cover")]
    cloudcover: Vec<Option<f32>>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f32>>,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f32>>,
    #[serde(default)]
    rain_sum: Vec<Option<f32>>,
    #[serde(default)]
    snowfall_sum: Vec<Option<f32>>,
    #[serde(default, alias = "weather_code_max")]
    weathercode_max: Vec<Option<u8>>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f32>>,
}

fn at<T: Copy>(series: &[Option<T>], idx: usize) -> Option<T> {
    series.get(idx).copied().flatten()
}

fn or_zero(series: &[Option<f32>], idx: usize) -> f32 {
    at(series, idx).unwrap_or(0.0)
}

fn hour_index(time: &[String], selection: Option<NaiveDateTime>) -> usize {
    let Some(selection) = selection else {
        return FALLBACK_HOUR_INDEX;
    };
    let key = selection.format("%Y-%m-%dT%H:%M").to_string();
    match time.iter().position(|t| t.starts_with(&key)) {
        Some(idx) => idx,
        None => {
            log::debug!("No hourly entry for {key}, using index {FALLBACK_HOUR_INDEX}");
            FALLBACK_HOUR_INDEX
        }
    }
}

/// Read one hour from an hourly response. `None` (or a time the response does
/// not cover) selects the noon slot of the first day.
pub fn parse_hourly(
    json: &str,
    selection: Option<NaiveDateTime>,
) -> Result<WeatherSample, WeatherError> {
    let HourlyResponse { hourly } = serde_json::from_str(json)?;
    let idx = hour_index(&hourly.time, selection);
    let time = hourly
        .time
        .get(idx)
        .cloned()
        .ok_or(WeatherError::MissingHour {
            index: idx,
            len: hourly.time.len(),
        })?;

    let weather_code = at(&hourly.weathercode, idx);
    Ok(WeatherSample {
        time,
        temperature: or_zero(&hourly.temperature_2m, idx),
        precipitation: or_zero(&hourly.precipitation, idx),
        rain: or_zero(&hourly.rain, idx),
        snowfall: or_zero(&hourly.snowfall, idx),
        cloud_cover: or_zero(&hourly.cloudcover, idx),
        weather_code,
        condition: WeatherCondition::from_optional_code(weather_code),
        precipitation_probability: at(&hourly.precipitation_probability, idx),
    })
}

/// Days with any precipitation or snowfall, wettest first. Ties keep date order.
pub fn parse_ranking(json: &str) -> Result<Vec<PrecipitationDay>, WeatherError> {
    let DailyResponse { daily } = serde_json::from_str(json)?;

    let mut days: Vec<PrecipitationDay> = daily
        .time
        .iter()
        .enumerate()
        .filter_map(|(idx, date)| {
            let precipitation = or_zero(&daily.precipitation_sum, idx);
            let snowfall = or_zero(&daily.snowfall_sum, idx);
            let total = precipitation + snowfall;
            if total <= 0.0 {
                return None;
            }
            let weather_code = at(&daily.weathercode_max, idx);
            Some(PrecipitationDay {
                date: date.clone(),
                precipitation,
                rain: or_zero(&daily.rain_sum, idx),
                snowfall,
                total,
                weather_code,
                condition: WeatherCondition::from_optional_code(weather_code),
                max_temperature: at(&daily.temperature_2m_max, idx),
            })
        })
        .collect();

    days.sort_by(|a, b| b.total.total_cmp(&a.total));
    log::debug!("{} of {} days had precipitation", days.len(), daily.time.len());
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hourly_json(hours: usize) -> String {
        let time: Vec<String> = (0..hours)
            .map(|h| format!("\"2024-06-01T{:02}:00\"", h))
            .collect();
        let temps: Vec<String> = (0..hours).map(|h| format!("{}.5", 18 + h)).collect();
        let codes: Vec<String> = (0..hours)
            .map(|h| if h == 15 { "63".to_string() } else { "2".to_string() })
            .collect();
        format!(
            r#"{{"latitude":35.69,"hourly":{{
                "time":[{}],
                "temperature_2m":[{}],
                "precipitation":[{}],
                "weathercode":[{}],
                "cloudcover":[{}]
            }}}}"#,
            time.join(","),
            temps.join(","),
            vec!["null"; hours].join(","),
            codes.join(","),
            vec!["40"; hours].join(","),
        )
    }

    fn at_hour(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn selected_hour_is_used() {
        let sample = parse_hourly(&hourly_json(24), Some(at_hour(15))).unwrap();
        assert_eq!(sample.time, "2024-06-01T15:00");
        assert_eq!(sample.temperature, 33.5);
        assert_eq!(sample.weather_code, Some(63));
        assert_eq!(sample.condition, WeatherCondition::Rain);
        assert_eq!(sample.cloud_cover, 40.0);
    }

    #[test]
    fn missing_values_read_as_zero() {
        let sample = parse_hourly(&hourly_json(24), Some(at_hour(3))).unwrap();
        assert_eq!(sample.precipitation, 0.0);
        assert_eq!(sample.rain, 0.0);
        assert_eq!(sample.snowfall, 0.0);
        assert_eq!(sample.precipitation_probability, None);
    }

    #[test]
    fn unknown_time_falls_back_to_noon() {
        let other_day = NaiveDate::from_ymd_opt(2024, 6, 9)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let sample = parse_hourly(&hourly_json(24), Some(other_day)).unwrap();
        assert_eq!(sample.time, "2024-06-01T12:00");
        let sample = parse_hourly(&hourly_json(24), None).unwrap();
        assert_eq!(sample.time, "2024-06-01T12:00");
    }

    #[test]
    fn short_response_is_an_error() {
        let err = parse_hourly(&hourly_json(6), None).unwrap_err();
        assert!(matches!(err, WeatherError::MissingHour { index: 12, len: 6 }));
        assert!(matches!(parse_hourly("{}", None), Err(WeatherError::Json(_))));
    }

    #[test]
    fn forecast_names_and_probability() {
        let json = r#"{"hourly":{
            "time":["2024-06-01T00:00"],
            "weather_code":[95],
            "cloud_cover":[100],
            "rain":[4.0],
            "precipitation_probability":[80]
        }}"#;
        let sample = parse_hourly(json, Some(at_hour(0))).unwrap();
        assert_eq!(sample.condition, WeatherCondition::Thunderstorm);
        assert_eq!(sample.cloud_cover, 100.0);
        assert_eq!(sample.rain, 4.0);
        assert_eq!(sample.precipitation_probability, Some(80.0));
    }

    #[test]
    fn ranking_keeps_wet_days_sorted() {
        let json = r#"{"daily":{
            "time":["2024-01-01","2024-01-02","2024-01-03","2024-01-04"],
            "precipitation_sum":[0.0, 3.5, null, 12.0],
            "rain_sum":[0.0, 3.5, 0.0, 10.0],
            "snowfall_sum":[0.0, 0.0, 1.4, 2.0],
            "weathercode_max":[1, 61, 71, 65],
            "temperature_2m_max":[9.1, 7.0, 2.2, null]
        }}"#;
        let days = parse_ranking(json).unwrap();
        let dates: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-04", "2024-01-02", "2024-01-03"]);
        assert_eq!(days[0].total, 14.0);
        assert_eq!(days[0].max_temperature, None);
        assert_eq!(days[2].condition, WeatherCondition::Snow);
        assert_eq!(days[2].precipitation, 0.0);
    }

    #[test]
    fn dry_period_ranks_nothing() {
        let json = r#"{"daily":{"time":["2024-01-01"],"precipitation_sum":[0.0],"snowfall_sum":[0.0]}}"#;
        assert!(parse_ranking(json).unwrap().is_empty());
    }
}
