//! Street trees and street lights.

use city_core::{BuildingPlacement, Footprint, Rgb};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{non_negative, ConfigError};
use crate::roads::{hits_road, RoadSegment};

/// Which way a row of street trees runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAxis {
    /// Along x at a fixed z.
    Horizontal,
    /// Along z at a fixed x.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeRow {
    pub axis: RowAxis,
    /// Fixed z (horizontal) or x (vertical) of the row.
    pub offset: f32,
}

impl TreeRow {
    pub const fn horizontal(z: f32) -> Self {
        Self { axis: RowAxis::Horizontal, offset: z }
    }

    pub const fn vertical(x: f32) -> Self {
        Self { axis: RowAxis::Vertical, offset: x }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeOrigin {
    Street,
    Scattered,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreePlacement {
    pub x: f32,
    pub z: f32,
    pub origin: TreeOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreetLight {
    pub x: f32,
    pub z: f32,
    pub pole_height: f32,
    pub color: Rgb,
    pub intensity: f32,
    /// Point light falloff distance.
    pub range: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreetscapeConfig {
    pub tree_rows: Vec<TreeRow>,
    /// Inclusive range walked along each row.
    pub row_start: f32,
    pub row_end: f32,
    pub row_step: f32,
    /// No row trees within this distance of the main crossing.
    pub intersection_clearance: f32,
    pub scattered_count: u32,
    /// Side of the square (centered on the origin) scattered trees are drawn from.
    pub scatter_extent: f32,
    /// Side of a tree's square footprint for the road test.
    pub tree_size: f32,
    /// Gap kept between scattered trees and buildings.
    pub building_clearance: f32,
    pub lights: Vec<(f32, f32)>,
    pub light_pole_height: f32,
    pub light_color: Rgb,
    pub light_intensity: f32,
    pub light_range: f32,
}

impl Default for StreetscapeConfig {
    fn default() -> Self {
        Self {
            tree_rows: vec![
                TreeRow::horizontal(6.0),
                TreeRow::horizontal(-6.0),
                TreeRow::horizontal(46.0),
                TreeRow::horizontal(-46.0),
                TreeRow::vertical(6.0),
                TreeRow::vertical(-6.0),
                TreeRow::vertical(46.0),
                TreeRow::vertical(-46.0),
            ],
            row_start: -80.0,
            row_end: 80.0,
            row_step: 15.0,
            intersection_clearance: 10.0,
            scattered_count: 30,
            scatter_extent: 160.0,
            tree_size: 2.0,
            building_clearance: 3.0,
            lights: vec![
                (-15.0, 0.0),
                (15.0, 0.0),
                (0.0, -15.0),
                (0.0, 15.0),
                (-30.0, -30.0),
                (30.0, 30.0),
                (-30.0, 30.0),
                (30.0, -30.0),
            ],
            light_pole_height: 5.0,
            light_color: Rgb::new(0xff, 0xfa, 0xcd),
            light_intensity: 0.3,
            light_range: 15.0,
        }
    }
}

impl StreetscapeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.row_step.is_finite() && self.row_step > 0.0) {
            return Err(ConfigError::Negative {
                field: "row_step",
                value: self.row_step,
            });
        }
        if !(self.row_start.is_finite() && self.row_end.is_finite() && self.row_start <= self.row_end) {
            return Err(ConfigError::BadRowSpan {
                start: self.row_start,
                end: self.row_end,
            });
        }
        non_negative("intersection_clearance", self.intersection_clearance)?;
        non_negative("scatter_extent", self.scatter_extent)?;
        non_negative("tree_size", self.tree_size)?;
        non_negative("building_clearance", self.building_clearance)
    }

    /// Positions walked along each row, skipping the main crossing. Empty for an
    /// unusable span or step.
    fn row_positions(&self) -> Vec<f32> {
        let (start, end, step) = (self.row_start, self.row_end, self.row_step);
        if !(start.is_finite() && end.is_finite() && start <= end && step.is_finite() && step > 0.0) {
            return Vec::new();
        }
        let count = ((end - start) / step).floor() as u32 + 1;
        (0..count)
            .map(|i| start + i as f32 * step)
            .filter(|p| p.abs() > self.intersection_clearance)
            .collect()
    }

    /// Row trees first (horizontal rows, then vertical), then scattered trees
    /// that clear the roads and keep `building_clearance` from every building.
    pub fn plant_trees<R: Rng + ?Sized>(
        &self,
        roads: &[RoadSegment],
        buildings: &[BuildingPlacement],
        rng: &mut R,
    ) -> Vec<TreePlacement> {
        let positions = self.row_positions();
        let mut trees = Vec::new();

        for axis in [RowAxis::Horizontal, RowAxis::Vertical] {
            for &p in &positions {
                for row in self.tree_rows.iter().filter(|r| r.axis == axis) {
                    let (x, z) = match axis {
                        RowAxis::Horizontal => (p, row.offset),
                        RowAxis::Vertical => (row.offset, p),
                    };
                    trees.push(TreePlacement {
                        x,
                        z,
                        origin: TreeOrigin::Street,
                    });
                }
            }
        }

        let street_count = trees.len();
        for _ in 0..self.scattered_count {
            let x = (rng.gen::<f32>() - 0.5) * self.scatter_extent;
            let z = (rng.gen::<f32>() - 0.5) * self.scatter_extent;
            if self.is_clear_for_tree(roads, buildings, x, z) {
                trees.push(TreePlacement {
                    x,
                    z,
                    origin: TreeOrigin::Scattered,
                });
            }
        }

        log::debug!(
            "Planted {} street trees and {} of {} scattered trees",
            street_count,
            trees.len() - street_count,
            self.scattered_count
        );
        trees
    }

    pub fn is_clear_for_tree(
        &self,
        roads: &[RoadSegment],
        buildings: &[BuildingPlacement],
        x: f32,
        z: f32,
    ) -> bool {
        let canopy = Footprint::from_center_size(x, z, self.tree_size, self.tree_size);
        if hits_road(roads, &canopy) {
            return false;
        }
        let trunk = Footprint::point(x, z);
        !buildings
            .iter()
            .any(|b| b.footprint().intersects(&trunk, self.building_clearance))
    }

    pub fn street_lights(&self) -> Vec<StreetLight> {
        self.lights
            .iter()
            .map(|&(x, z)| StreetLight {
                x,
                z,
                pole_height: self.light_pole_height,
                color: self.light_color,
                intensity: self.light_intensity,
                range: self.light_range,
            })
            .collect()
    }
}
