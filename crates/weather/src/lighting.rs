use city_core::Rgb;
use serde::{Deserialize, Serialize};

use crate::condition::WeatherCondition;

/// Sky color and light levels for a condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingProfile {
    pub sky: Rgb,
    pub sun_intensity: f32,
    pub ambient_intensity: f32,
}

impl LightingProfile {
    pub const fn new(sky: Rgb, sun_intensity: f32, ambient_intensity: f32) -> Self {
        Self {
            sky,
            sun_intensity,
            ambient_intensity,
        }
    }

    pub fn for_condition(condition: WeatherCondition) -> Self {
        match condition {
            WeatherCondition::Clear => Self::new(Rgb::new(0x87, 0xce, 0xeb), 0.7, 0.3),
            WeatherCondition::PartlyCloudy => Self::new(Rgb::new(0xb0, 0xc4, 0xde), 0.5, 0.4),
            WeatherCondition::Cloudy | WeatherCondition::Fog => {
                Self::new(Rgb::new(0x69, 0x69, 0x69), 0.2, 0.5)
            }
            WeatherCondition::Rain | WeatherCondition::Thunderstorm => {
                Self::new(Rgb::new(0x4b, 0x4b, 0x4b), 0.1, 0.6)
            }
            WeatherCondition::Snow => Self::new(Rgb::new(0xd3, 0xd3, 0xd3), 0.3, 0.5),
        }
    }
}

impl Default for LightingProfile {
    fn default() -> Self {
        Self::for_condition(WeatherCondition::Clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_match_sky_table() {
        let clear = LightingProfile::for_condition(WeatherCondition::Clear);
        assert_eq!(clear.sky.to_hex(), "#87ceeb");
        assert_eq!((clear.sun_intensity, clear.ambient_intensity), (0.7, 0.3));

        let storm = LightingProfile::for_condition(WeatherCondition::Thunderstorm);
        assert_eq!(storm, LightingProfile::for_condition(WeatherCondition::Rain));
        assert_eq!(storm.sky.to_hex(), "#4b4b4b");

        assert_eq!(
            LightingProfile::for_condition(WeatherCondition::Fog),
            LightingProfile::for_condition(WeatherCondition::Cloudy)
        );
        assert_eq!(LightingProfile::for_condition(WeatherCondition::Snow).sky.to_hex(), "#d3d3d3");
    }

    #[test]
    fn worse_weather_is_darker() {
        for condition in WeatherCondition::ALL {
            let p = LightingProfile::for_condition(condition);
            assert!(p.sun_intensity <= 0.7);
            assert!(p.sun_intensity + p.ambient_intensity <= 1.0 + f32::EPSILON);
        }
    }
}
