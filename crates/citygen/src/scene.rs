//! Full city scene: everything a renderer needs to draw one generated city.

use std::collections::BTreeMap;

use city_core::{BuildingCategory, InstanceRaw};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::CityConfig;
use crate::facade::{dress_building, BuildingDressing};
use crate::layout::CityLayout;
use crate::roads::{road_markings, RoadMarking, RoadSegment};
use crate::streetscape::{StreetLight, TreePlacement};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityScene {
    pub roads: Vec<RoadSegment>,
    pub markings: Vec<RoadMarking>,
    pub layout: CityLayout,
    pub trees: Vec<TreePlacement>,
    pub street_lights: Vec<StreetLight>,
    /// One per placement, same order.
    pub dressings: Vec<BuildingDressing>,
}

impl CityScene {
    /// Generate the layout, then trees around it, then facades.
    pub fn build<R: Rng + ?Sized>(config: &CityConfig, rng: &mut R) -> Self {
        let layout = config.generate_layout(rng);
        let trees = config
            .streetscape
            .plant_trees(&config.roads, &layout.placements, rng);
        let dressings = layout
            .placements
            .iter()
            .map(|p| dress_building(p, rng))
            .collect();

        Self {
            roads: config.roads.clone(),
            markings: road_markings(),
            layout,
            trees,
            street_lights: config.streetscape.street_lights(),
            dressings,
        }
    }

    pub fn category_counts(&self) -> BTreeMap<BuildingCategory, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.layout.placements {
            *counts.entry(p.category).or_insert(0) += 1;
        }
        counts
    }

    pub fn window_count(&self) -> usize {
        self.dressings.iter().map(|d| d.windows.len()).sum()
    }

    /// Instance buffer for the building boxes, in placement order.
    pub fn instances(&self) -> Vec<InstanceRaw> {
        self.layout.placements.iter().map(InstanceRaw::from).collect()
    }
}
