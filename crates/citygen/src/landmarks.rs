//! Named landmark towers placed after the ordinary blocks.

use city_core::{BuildingCategory, BuildingPlacement, Footprint, Rgb};
use serde::{Deserialize, Serialize};

/// Fixed tower at a fixed spot. Validated like any other building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSpec {
    pub name: String,
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl LandmarkSpec {
    pub fn new(name: impl Into<String>, x: f32, z: f32, width: f32, height: f32, depth: f32) -> Self {
        Self {
            name: name.into(),
            x,
            z,
            width,
            height,
            depth,
        }
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::from_center_size(self.x, self.z, self.width, self.depth)
    }

    pub fn to_placement(&self, color: Rgb) -> BuildingPlacement {
        BuildingPlacement::on_ground(
            self.x,
            self.z,
            self.width,
            self.height,
            self.depth,
            color,
            BuildingCategory::Landmark,
        )
        .with_name(self.name.clone())
    }
}

/// West Shinjuku skyline stand-ins, one per quadrant.
pub fn shinjuku_landmarks() -> Vec<LandmarkSpec> {
    vec![
        LandmarkSpec::new("Metropolitan Government Building", -30.0, -30.0, 8.0, 70.0, 8.0),
        LandmarkSpec::new("Park Tower", 30.0, 30.0, 10.0, 60.0, 10.0),
        LandmarkSpec::new("Cocoon Tower", -70.0, 30.0, 6.0, 50.0, 6.0),
        LandmarkSpec::new("Sumitomo Building", 70.0, -30.0, 8.0, 55.0, 8.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roads::{hits_road, shinjuku_road_network};

    #[test]
    fn default_landmarks_clear_the_roads() {
        let roads = shinjuku_road_network();
        for landmark in shinjuku_landmarks() {
            assert!(!hits_road(&roads, &landmark.footprint()), "{} sits on a road", landmark.name);
        }
    }

    #[test]
    fn placement_keeps_name_and_category() {
        let tower = LandmarkSpec::new("Tower", 5.0, 6.0, 8.0, 70.0, 9.0);
        let p = tower.to_placement(Rgb::new(1, 2, 3));
        assert_eq!(p.category, BuildingCategory::Landmark);
        assert_eq!(p.name.as_deref(), Some("Tower"));
        assert_eq!(p.position.y, 35.0);
        assert_eq!(p.footprint(), tower.footprint());
    }
}
