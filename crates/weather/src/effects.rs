use serde::{Deserialize, Serialize};

use crate::condition::WeatherCondition;
use crate::lighting::LightingProfile;
use crate::open_meteo::WeatherSample;

/// Exponential fog density used for foggy hours.
pub const FOG_DENSITY: f32 = 0.05;
/// Fixed rain intensity of a thunderstorm.
pub const STORM_RAIN_INTENSITY: f32 = 1.5;

/// An overlay the renderer should show. Intensities are unitless scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherEffect {
    Sunny,
    Clouds { count: u32 },
    Fog { density: f32 },
    Rain { intensity: f32 },
    Snow { intensity: f32 },
    SnowCover,
    Lightning,
}

fn clouds(cloud_cover: f32) -> WeatherEffect {
    WeatherEffect::Clouds {
        count: (cloud_cover.max(0.0) / 10.0).floor() as u32,
    }
}

/// Effects for a sample, in the order they should be layered.
pub fn select_effects(sample: &WeatherSample) -> Vec<WeatherEffect> {
    match sample.condition {
        WeatherCondition::Clear => vec![WeatherEffect::Sunny],
        WeatherCondition::PartlyCloudy => vec![clouds(sample.cloud_cover), WeatherEffect::Sunny],
        WeatherCondition::Cloudy => vec![clouds(sample.cloud_cover)],
        WeatherCondition::Fog => vec![
            WeatherEffect::Fog {
                density: FOG_DENSITY,
            },
            clouds(sample.cloud_cover),
        ],
        WeatherCondition::Rain => vec![
            clouds(sample.cloud_cover),
            WeatherEffect::Rain {
                intensity: sample.rain / 10.0,
            },
        ],
        WeatherCondition::Snow => vec![
            clouds(sample.cloud_cover),
            WeatherEffect::Snow {
                intensity: sample.snowfall / 5.0,
            },
            WeatherEffect::SnowCover,
        ],
        WeatherCondition::Thunderstorm => vec![
            WeatherEffect::Rain {
                intensity: STORM_RAIN_INTENSITY,
            },
            WeatherEffect::Lightning,
        ],
    }
}

/// Everything the scene needs to render one weather sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherOverlay {
    pub condition: WeatherCondition,
    pub lighting: LightingProfile,
    pub effects: Vec<WeatherEffect>,
}

impl WeatherOverlay {
    pub fn for_sample(sample: &WeatherSample) -> Self {
        Self {
            condition: sample.condition,
            lighting: LightingProfile::for_condition(sample.condition),
            effects: select_effects(sample),
        }
    }
}
