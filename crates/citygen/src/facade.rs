//! Facade dressing: material, window grid and rooftop unit per building.

use city_core::{BuildingCategory, BuildingPlacement, Rgb};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Vertical distance between floors.
pub const FLOOR_HEIGHT: f32 = 3.0;
/// Horizontal distance between window slots.
pub const WINDOW_SPACING: f32 = 2.0;
/// Windows sit this far off the wall to avoid z-fighting.
pub const WINDOW_OFFSET: f32 = 0.1;

const GLASS_CHANCE: f32 = 0.4;
const WINDOW_CHANCE: f32 = 0.7;
const LIT_CHANCE: f32 = 0.4;
const ROOFTOP_CHANCE: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Rgb,
    pub metalness: f32,
    pub roughness: f32,
    /// Set for transparent (glass) materials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl Material {
    pub fn glass(color: Rgb) -> Self {
        Self {
            color,
            metalness: 0.1,
            roughness: 0.1,
            opacity: Some(0.8),
        }
    }

    pub fn concrete(color: Rgb) -> Self {
        Self {
            color,
            metalness: 0.0,
            roughness: 0.8,
            opacity: None,
        }
    }

    pub fn is_glass(&self) -> bool {
        self.opacity.is_some()
    }

    pub fn pick<R: Rng + ?Sized>(color: Rgb, rng: &mut R) -> Self {
        if rng.gen::<f32>() < GLASS_CHANCE {
            Self::glass(color)
        } else {
            Self::concrete(color)
        }
    }
}

/// Which wall a window is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// +z
    Front,
    /// -z
    Back,
    /// -x
    Left,
    /// +x
    Right,
}

impl Facing {
    /// Y rotation in degrees that turns a +z facing plane toward this wall.
    pub fn yaw_degrees(&self) -> f32 {
        match self {
            Facing::Front => 0.0,
            Facing::Back => 180.0,
            Facing::Left => 90.0,
            Facing::Right => -90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub position: Vec3,
    pub facing: Facing,
    pub lit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rooftop {
    pub position: Vec3,
    pub scale: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDressing {
    pub material: Material,
    pub windows: Vec<Window>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooftop: Option<Rooftop>,
}

/// Full storeys in the building. Every storey above the ground floor gets windows.
pub fn window_floors(building: &BuildingPlacement) -> u32 {
    (building.height() / FLOOR_HEIGHT).floor() as u32
}

fn slots(extent: f32) -> u32 {
    ((extent / WINDOW_SPACING).floor() as u32).max(1)
}

/// Window grid on all four walls. Each slot is filled with a pair of windows on
/// opposite walls, or left blank.
pub fn window_grid<R: Rng + ?Sized>(building: &BuildingPlacement, rng: &mut R) -> Vec<Window> {
    let p = building.position;
    let half = building.scale * 0.5;
    let mut windows = Vec::new();
    let mut push = |position: Vec3, facing: Facing, rng: &mut R| {
        windows.push(Window {
            position,
            facing,
            lit: rng.gen::<f32>() < LIT_CHANCE,
        });
    };

    for floor in 1..window_floors(building) {
        let y = building.base() + floor as f32 * FLOOR_HEIGHT + 1.0;

        for i in 0..slots(building.scale.x) {
            let x = p.x - half.x + (i as f32 + 0.5) * WINDOW_SPACING;
            if rng.gen::<f32>() < WINDOW_CHANCE {
                push(Vec3::new(x, y, p.z + half.z + WINDOW_OFFSET), Facing::Front, &mut *rng);
                push(Vec3::new(x, y, p.z - half.z - WINDOW_OFFSET), Facing::Back, &mut *rng);
            }
        }

        for i in 0..slots(building.scale.z) {
            let z = p.z - half.z + (i as f32 + 0.5) * WINDOW_SPACING;
            if rng.gen::<f32>() < WINDOW_CHANCE {
                push(Vec3::new(p.x - half.x - WINDOW_OFFSET, y, z), Facing::Left, &mut *rng);
                push(Vec3::new(p.x + half.x + WINDOW_OFFSET, y, z), Facing::Right, &mut *rng);
            }
        }
    }

    windows
}

/// Mechanical box on the roof, inset to 80% of the roof.
pub fn rooftop_for(building: &BuildingPlacement) -> Rooftop {
    Rooftop {
        position: Vec3::new(building.position.x, building.top() + 1.0, building.position.z),
        scale: Vec3::new(building.scale.x * 0.8, 2.0, building.scale.z * 0.8),
    }
}

/// Material, windows and (sometimes) a rooftop unit. Landmarks never get rooftop units.
pub fn dress_building<R: Rng + ?Sized>(building: &BuildingPlacement, rng: &mut R) -> BuildingDressing {
    let material = Material::pick(building.color, rng);
    let windows = window_grid(building, rng);
    let rooftop = (building.category != BuildingCategory::Landmark
        && rng.gen::<f32>() < ROOFTOP_CHANCE)
        .then(|| rooftop_for(building));
    BuildingDressing {
        material,
        windows,
        rooftop,
    }
}
