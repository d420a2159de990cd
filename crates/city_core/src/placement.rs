//! Building placements and the raw instance data renderers upload.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::footprint::Footprint;

/// Size class of a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingCategory {
    LowRise,
    Normal,
    Tall,
    Skyscraper,
    /// Named tower from the fixed landmark list.
    Landmark,
}

impl BuildingCategory {
    pub const ALL: [BuildingCategory; 5] = [
        BuildingCategory::LowRise,
        BuildingCategory::Normal,
        BuildingCategory::Tall,
        BuildingCategory::Skyscraper,
        BuildingCategory::Landmark,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BuildingCategory::LowRise => "low-rise",
            BuildingCategory::Normal => "normal",
            BuildingCategory::Tall => "tall",
            BuildingCategory::Skyscraper => "skyscraper",
            BuildingCategory::Landmark => "landmark",
        }
    }
}

/// One accepted building box resting on the ground plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingPlacement {
    /// Box center; `position.y` is half the height.
    pub position: Vec3,
    /// Full extents: width (x), height (y), depth (z).
    pub scale: Vec3,
    pub color: Rgb,
    pub category: BuildingCategory,
    /// Set for landmarks only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl BuildingPlacement {
    /// Box of the given size standing on the ground at (x, z).
    pub fn on_ground(
        x: f32,
        z: f32,
        width: f32,
        height: f32,
        depth: f32,
        color: Rgb,
        category: BuildingCategory,
    ) -> Self {
        Self {
            position: Vec3::new(x, height * 0.5, z),
            scale: Vec3::new(width, height, depth),
            color,
            category,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::from_center_size(self.position.x, self.position.z, self.scale.x, self.scale.z)
    }

    pub fn height(&self) -> f32 {
        self.scale.y
    }

    /// Y of the roof.
    pub fn top(&self) -> f32 {
        self.position.y + self.scale.y * 0.5
    }

    /// Y of the base (0 for anything built with [`BuildingPlacement::on_ground`]).
    pub fn base(&self) -> f32 {
        self.position.y - self.scale.y * 0.5
    }

    /// Model matrix of a unit cube scaled and moved into place.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.position)
    }
}

/// Raw per-building data for GPU upload (instance buffer).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl From<&BuildingPlacement> for InstanceRaw {
    fn from(placement: &BuildingPlacement) -> Self {
        Self {
            model: placement.to_matrix().to_cols_array_2d(),
            color: placement.color.to_linear(1.0),
        }
    }
}

impl From<BuildingPlacement> for InstanceRaw {
    fn from(placement: BuildingPlacement) -> Self {
        Self::from(&placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BuildingPlacement {
        BuildingPlacement::on_ground(
            10.0,
            -6.0,
            4.0,
            30.0,
            6.0,
            Rgb::new(0x70, 0x80, 0x90),
            BuildingCategory::Tall,
        )
    }

    #[test]
    fn on_ground_rests_on_plane() {
        let b = sample();
        assert_eq!(b.position.y, 15.0);
        assert_eq!(b.base(), 0.0);
        assert_eq!(b.top(), 30.0);
        assert_eq!(b.height(), 30.0);
    }

    #[test]
    fn footprint_uses_width_and_depth() {
        let f = sample().footprint();
        assert_eq!(f.center, glam::Vec2::new(10.0, -6.0));
        assert_eq!(f.width(), 4.0);
        assert_eq!(f.depth(), 6.0);
    }

    #[test]
    fn instance_matrix_maps_unit_cube_corner() {
        let raw = InstanceRaw::from(&sample());
        let model = Mat4::from_cols_array_2d(&raw.model);
        let corner = model.transform_point3(Vec3::splat(0.5));
        assert!((corner - Vec3::new(12.0, 30.0, -3.0)).length() < 1e-5);
        assert_eq!(raw.color[3], 1.0);
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 80);
    }

    #[test]
    fn landmark_name_round_trips_through_ron() {
        let b = sample().with_name("Park Tower");
        let text = ron::to_string(&b).unwrap();
        let back: BuildingPlacement = ron::from_str(&text).unwrap();
        assert_eq!(back, b);
    }

    #[test]
    fn category_labels_are_distinct() {
        let labels: std::collections::BTreeSet<_> =
            BuildingCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), BuildingCategory::ALL.len());
    }
}
