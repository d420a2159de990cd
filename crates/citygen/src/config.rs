//! City configuration: the static inputs of a generation pass.
//!
//! Every field has a default matching the built-in Shinjuku layout, so a config
//! file only needs to mention what it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::CategoryTable;
use crate::landmarks::{shinjuku_landmarks, LandmarkSpec};
use crate::layout::BlockCenter;
use crate::palette::Palette;
use crate::roads::{shinjuku_road_network, RoadSegment};
use crate::streetscape::StreetscapeConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("buildings_per_block min {min} exceeds max {max}")]
    BadBuildingCount { min: u32, max: u32 },
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("category table has no buckets")]
    EmptyCategoryTable,
    #[error("category bucket {bucket} has no bands")]
    EmptyBucket { bucket: usize },
    #[error("category bucket {bucket} bound is smaller than the previous bucket's")]
    UnorderedBuckets { bucket: usize },
    #[error("category bucket {bucket} band {band} threshold must be in [0, 1] and non-decreasing")]
    BadThreshold { bucket: usize, band: usize },
    #[error("category bucket {bucket} band {band} has an empty or non-positive size range")]
    BadRange { bucket: usize, band: usize },
    #[error("tree row span {start}..={end} must be finite with start <= end")]
    BadRowSpan { start: f32, end: f32 },
    #[error("road {index} has a non-positive extent")]
    BadRoad { index: usize },
    #[error("landmark {name:?} has a non-positive size")]
    BadLandmark { name: String },
}

/// Per-candidate placement rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementRules {
    /// Inclusive bounds on candidates drawn per block.
    pub min_buildings_per_block: u32,
    pub max_buildings_per_block: u32,
    /// Draws per candidate before it is dropped.
    pub max_attempts: u32,
    /// Side of the square (centered on the block) positions are drawn from.
    pub block_spread: f32,
    /// Gap kept between accepted buildings.
    pub building_buffer: f32,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            min_buildings_per_block: 3,
            max_buildings_per_block: 8,
            max_attempts: 20,
            block_spread: 30.0,
            building_buffer: 2.0,
        }
    }
}

impl PlacementRules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_buildings_per_block > self.max_buildings_per_block {
            return Err(ConfigError::BadBuildingCount {
                min: self.min_buildings_per_block,
                max: self.max_buildings_per_block,
            });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        non_negative("block_spread", self.block_spread)?;
        non_negative("building_buffer", self.building_buffer)
    }
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Everything a generation pass reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    pub roads: Vec<RoadSegment>,
    pub blocks: Vec<BlockCenter>,
    pub landmarks: Vec<LandmarkSpec>,
    pub rules: PlacementRules,
    pub categories: CategoryTable,
    pub palette: Palette,
    pub streetscape: StreetscapeConfig,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            roads: shinjuku_road_network(),
            blocks: shinjuku_blocks(),
            landmarks: shinjuku_landmarks(),
            rules: PlacementRules::default(),
            categories: CategoryTable::default(),
            palette: Palette::default(),
            streetscape: StreetscapeConfig::default(),
        }
    }
}

impl CityConfig {
    /// Reject tables the generator cannot sample from. A valid config can still
    /// yield a sparse city; that is not an error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;
        self.categories.validate()?;
        for (index, road) in self.roads.iter().enumerate() {
            if !(road.width > 0.0 && road.height > 0.0) {
                return Err(ConfigError::BadRoad { index });
            }
        }
        for landmark in &self.landmarks {
            if !(landmark.width > 0.0 && landmark.height > 0.0 && landmark.depth > 0.0) {
                return Err(ConfigError::BadLandmark {
                    name: landmark.name.clone(),
                });
            }
        }
        self.streetscape.validate()
    }
}

/// Sixteen blocks: the four around the main crossing, eight beside them, four corners.
pub fn shinjuku_blocks() -> Vec<BlockCenter> {
    const CENTERS: [(f32, f32); 16] = [
        // Main city blocks
        (-20.0, -20.0), (20.0, -20.0), (-20.0, 20.0), (20.0, 20.0),
        // Secondary blocks
        (-60.0, -20.0), (60.0, -20.0), (-60.0, 20.0), (60.0, 20.0),
        (-20.0, -60.0), (20.0, -60.0), (-20.0, 60.0), (20.0, 60.0),
        // Corner blocks
        (-60.0, -60.0), (60.0, -60.0), (-60.0, 60.0), (60.0, 60.0),
    ];
    CENTERS.iter().map(|&(x, z)| BlockCenter::new(x, z)).collect()
}
