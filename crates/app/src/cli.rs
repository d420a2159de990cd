use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "shinjuku",
    version,
    about = "Procedural Shinjuku city layout with a weather overlay"
)]
pub struct Cli {
    /// RNG seed (overrides the config; random when neither sets one)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config file
    #[arg(long, default_value = "shinjuku.ron")]
    pub config: PathBuf,

    /// Write the effective config back to --config
    #[arg(long)]
    pub save_config: bool,

    /// Write the scene description (RON, or JSON for a .json path)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Write the packed building instance buffer
    #[arg(long)]
    pub instances: Option<PathBuf>,

    /// Open-Meteo hourly response to derive the weather overlay from
    #[arg(long)]
    pub weather_json: Option<PathBuf>,

    /// Open-Meteo daily response to rank by precipitation
    #[arg(long)]
    pub ranking_json: Option<PathBuf>,

    /// Local time to show, YYYY-MM-DDTHH:MM or YYYY-MM-DD (noon)
    #[arg(long, value_parser = parse_local_time)]
    pub at: Option<NaiveDateTime>,

    /// Print the Open-Meteo URLs for --at and the ranking
    #[arg(long)]
    pub print_urls: bool,
}

pub fn parse_local_time(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(t) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Ok(t);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM or YYYY-MM-DD, got {value:?}"))
}
