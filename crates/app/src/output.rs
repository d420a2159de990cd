//! Files written by the app: the scene description and the instance buffer.

use std::path::Path;

use anyhow::{Context, Result};
use citygen::CityScene;
use serde::Serialize;
use weather::WeatherOverlay;

/// Scene description as written to `--out`.
#[derive(Debug, Serialize)]
pub struct SceneFile<'a> {
    pub seed: u64,
    pub scene: &'a CityScene,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<&'a WeatherOverlay>,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn write_scene(path: &Path, file: &SceneFile<'_>) -> Result<()> {
    let text = if is_json(path) {
        serde_json::to_string_pretty(file).context("serializing scene as JSON")?
    } else {
        ron::ser::to_string_pretty(file, ron::ser::PrettyConfig::default())
            .context("serializing scene as RON")?
    };
    std::fs::write(path, text).with_context(|| format!("writing scene to {}", path.display()))?;
    log::info!("Wrote scene to {}", path.display());
    Ok(())
}

/// Raw `InstanceRaw` records, native endian, in placement order.
pub fn write_instances(path: &Path, scene: &CityScene) -> Result<()> {
    let instances = scene.instances();
    let bytes: &[u8] = bytemuck::cast_slice(&instances);
    std::fs::write(path, bytes)
        .with_context(|| format!("writing instances to {}", path.display()))?;
    log::info!(
        "Wrote {} instances ({} bytes) to {}",
        instances.len(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use city_core::InstanceRaw;
    use citygen::CityConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene() -> CityScene {
        CityScene::build(&CityConfig::default(), &mut StdRng::seed_from_u64(5))
    }

    #[test]
    fn instance_file_is_one_record_per_building() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("city.bin");
        let scene = scene();
        write_instances(&path, &scene).unwrap();
        let len = std::fs::metadata(&path).unwrap().len() as usize;
        assert_eq!(len, scene.layout.placements.len() * std::mem::size_of::<InstanceRaw>());
    }

    #[test]
    fn scene_format_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let scene = scene();
        let file = SceneFile {
            seed: 5,
            scene: &scene,
            weather: None,
        };

        let json_path = dir.path().join("scene.json");
        write_scene(&json_path, &file).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value["seed"], 5);
        assert!(value.get("weather").is_none());

        let ron_path = dir.path().join("scene.ron");
        write_scene(&ron_path, &file).unwrap();
        let text = std::fs::read_to_string(&ron_path).unwrap();
        assert!(text.contains("seed: 5"));
    }
}
