//! Building size distribution: distance buckets × weighted category bands.
//!
//! Blocks near the origin (the station side of the district) skew toward taller,
//! wider buildings. The table is plain data so it can be tuned from config and
//! tested without running the generator.

use city_core::BuildingCategory;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Size range, sampled uniformly from `min` up to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
}

impl SizeRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.gen::<f32>() * (self.max - self.min)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One outcome of a category roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryBand {
    /// Cumulative probability: picked when the roll is below this and above the previous band's.
    pub threshold: f32,
    pub height: SizeRange,
    /// Used for both width and depth.
    pub width: SizeRange,
    pub category: BuildingCategory,
}

impl CategoryBand {
    pub const fn new(
        threshold: f32,
        height: SizeRange,
        width: SizeRange,
        category: BuildingCategory,
    ) -> Self {
        Self {
            threshold,
            height,
            width,
            category,
        }
    }
}

/// Bands that apply to blocks within `max_distance` of the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceBucket {
    /// `None` means unbounded (outermost bucket).
    pub max_distance: Option<f32>,
    pub bands: Vec<CategoryBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    /// Ordered nearest first.
    pub buckets: Vec<DistanceBucket>,
}

/// First band whose threshold exceeds `roll`; the last band catches everything above.
pub fn weighted_pick(bands: &[CategoryBand], roll: f32) -> Option<&CategoryBand> {
    bands.iter().find(|band| roll < band.threshold).or_else(|| bands.last())
}

impl CategoryTable {
    /// Bucket for a block at `distance` from the origin. Past the last bound, the last bucket.
    pub fn bucket_for(&self, distance: f32) -> Option<&DistanceBucket> {
        self.buckets
            .iter()
            .find(|bucket| bucket.max_distance.map_or(true, |max| distance <= max))
            .or_else(|| self.buckets.last())
    }

    /// Band for a block at `distance` given a uniform `roll` in `[0, 1)`.
    pub fn pick(&self, distance: f32, roll: f32) -> Option<&CategoryBand> {
        self.bucket_for(distance)
            .and_then(|bucket| weighted_pick(&bucket.bands, roll))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buckets.is_empty() {
            return Err(ConfigError::EmptyCategoryTable);
        }
        let mut last_bound = f32::NEG_INFINITY;
        for (b, bucket) in self.buckets.iter().enumerate() {
            if let Some(max) = bucket.max_distance {
                if max < last_bound {
                    return Err(ConfigError::UnorderedBuckets { bucket: b });
                }
                last_bound = max;
            }
            if bucket.bands.is_empty() {
                return Err(ConfigError::EmptyBucket { bucket: b });
            }
            let mut last_threshold = 0.0;
            for (i, band) in bucket.bands.iter().enumerate() {
                if !(0.0..=1.0).contains(&band.threshold) || band.threshold < last_threshold {
                    return Err(ConfigError::BadThreshold { bucket: b, band: i });
                }
                last_threshold = band.threshold;
                for range in [band.height, band.width] {
                    if !(range.min > 0.0 && range.min <= range.max) {
                        return Err(ConfigError::BadRange { bucket: b, band: i });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        use BuildingCategory::*;
        Self {
            buckets: vec![
                // Core blocks around the main crossing
                DistanceBucket {
                    max_distance: Some(30.0),
                    bands: vec![
                        CategoryBand::new(0.3, SizeRange::new(40.0, 70.0), SizeRange::new(6.0, 10.0), Skyscraper),
                        CategoryBand::new(0.7, SizeRange::new(25.0, 45.0), SizeRange::new(5.0, 9.0), Tall),
                        CategoryBand::new(1.0, SizeRange::new(10.0, 30.0), SizeRange::new(4.0, 8.0), Normal),
                    ],
                },
                DistanceBucket {
                    max_distance: Some(65.0),
                    bands: vec![
                        CategoryBand::new(0.3, SizeRange::new(25.0, 40.0), SizeRange::new(5.0, 8.0), Tall),
                        CategoryBand::new(0.8, SizeRange::new(10.0, 30.0), SizeRange::new(4.0, 8.0), Normal),
                        CategoryBand::new(1.0, SizeRange::new(5.0, 12.0), SizeRange::new(4.0, 7.0), LowRise),
                    ],
                },
                // Corner blocks
                DistanceBucket {
                    max_distance: None,
                    bands: vec![
                        CategoryBand::new(0.6, SizeRange::new(10.0, 25.0), SizeRange::new(4.0, 8.0), Normal),
                        CategoryBand::new(1.0, SizeRange::new(5.0, 12.0), SizeRange::new(4.0, 7.0), LowRise),
                    ],
                },
            ],
        }
    }
}
