//! Log summaries of the generated scene and of weather inputs.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use city_core::BuildingCategory;
use citygen::CityScene;
use weather::{parse_hourly, parse_ranking, Location, PrecipitationDay, WeatherOverlay};

/// Days shown from the precipitation ranking.
const RANKING_SHOWN: usize = 10;

pub fn log_scene(scene: &CityScene) {
    let report = &scene.layout.report;
    let counts = scene.category_counts();
    for category in BuildingCategory::ALL {
        log::info!(
            "  {:<10} {}",
            category.label(),
            counts.get(&category).copied().unwrap_or(0)
        );
    }
    log::info!(
        "{} buildings ({} of {} candidates dropped), {} trees, {} street lights, {} windows",
        scene.layout.placements.len(),
        report.dropped(),
        report.requested(),
        scene.trees.len(),
        scene.street_lights.len(),
        scene.window_count()
    );
    for name in &report.landmarks_rejected {
        log::warn!("Landmark {name:?} did not fit");
    }
}

/// Parse an hourly response and log what the overlay will show.
pub fn load_weather(path: &Path, at: Option<NaiveDateTime>) -> Result<WeatherOverlay> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading weather from {}", path.display()))?;
    let sample = parse_hourly(&json, at)
        .with_context(|| format!("parsing weather from {}", path.display()))?;
    let overlay = WeatherOverlay::for_sample(&sample);

    log::info!(
        "Weather at {}: {} ({:.1}°C, {:.1} mm, {:.0}% cloud)",
        sample.time,
        sample.condition,
        sample.temperature,
        sample.precipitation,
        sample.cloud_cover
    );
    if let Some(p) = sample.precipitation_probability {
        log::info!("  chance of precipitation {p:.0}%");
    }
    log::info!(
        "  sky {} sun {:.1} ambient {:.1}, effects {:?}",
        overlay.lighting.sky,
        overlay.lighting.sun_intensity,
        overlay.lighting.ambient_intensity,
        overlay.effects
    );
    Ok(overlay)
}

pub fn load_ranking(path: &Path) -> Result<Vec<PrecipitationDay>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading ranking from {}", path.display()))?;
    let days = parse_ranking(&json)
        .with_context(|| format!("parsing ranking from {}", path.display()))?;

    log::info!("{} days with precipitation", days.len());
    for (rank, day) in days.iter().take(RANKING_SHOWN).enumerate() {
        log::info!(
            "  #{:<2} {} {:>6.1} mm ({})",
            rank + 1,
            day.date,
            day.total,
            day.condition
        );
    }
    Ok(days)
}

/// Print the request URLs for `at` and for the ranking that ends today.
pub fn print_urls(location: &Location, at: NaiveDateTime, now: NaiveDateTime, ranking_days: u64) {
    match location.url_for(at, now) {
        Ok(url) => println!("Weather: {url}"),
        Err(e) => log::warn!("No weather source for {at}: {e}"),
    }
    println!("Ranking: {}", location.ranking_url(now.date(), ranking_days));
}
