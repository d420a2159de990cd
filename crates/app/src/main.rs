//! Shinjuku - procedural city layout generator with a weather overlay

mod cli;
mod config;
mod output;
mod report;

use anyhow::{Context, Result};
use chrono::Local;
use citygen::CityScene;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::Cli;
use config::AppConfig;
use output::SceneFile;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    println!("╔══════════════════════════════════════════════╗");
    println!("║                   SHINJUKU                   ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Procedural city blocks, landmarks, streets  ║");
    println!("║  and an Open-Meteo weather overlay           ║");
    println!("╚══════════════════════════════════════════════╝");

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::load(&cli.config);
    if cli.save_config {
        config.save(&cli.config)?;
        log::info!("Saved config to {}", cli.config.display());
    }
    config
        .city
        .validate()
        .with_context(|| format!("invalid city config in {}", cli.config.display()))?;

    let seed = cli.seed.or(config.seed).unwrap_or_else(rand::random);
    log::info!("Generating city with seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let scene = CityScene::build(&config.city, &mut rng);
    report::log_scene(&scene);

    // Selected times are local wall-clock times, compared against this machine's clock.
    let now = Local::now().naive_local();
    if cli.print_urls {
        report::print_urls(&config.location, cli.at.unwrap_or(now), now, config.ranking_days);
    }

    let weather = cli
        .weather_json
        .as_deref()
        .map(|path| report::load_weather(path, cli.at))
        .transpose()?;
    if let Some(path) = &cli.ranking_json {
        report::load_ranking(path)?;
    }

    if let Some(path) = &cli.out {
        output::write_scene(
            path,
            &SceneFile {
                seed,
                scene: &scene,
                weather: weather.as_ref(),
            },
        )?;
    }
    if let Some(path) = &cli.instances {
        output::write_instances(path, &scene)?;
    }

    Ok(())
}
