//! Block layout: rejection-sampled building placement around block centers.
//!
//! For every block a random number of candidate buildings is drawn. Each
//! candidate rolls a category from the [`CategoryTable`] (keyed by the block's
//! distance from the origin) and then retries random (position, size) draws until
//! one clears the roads and every building accepted so far, or the attempt cap
//! runs out and the candidate is dropped. Landmarks go last, validated the same way.
//!
//! **Determinism:** every random value comes from the caller's RNG, in a fixed
//! order, so the same seed and config always produce the same city.

use city_core::{BuildingCategory, BuildingPlacement, Footprint};
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::category::CategoryTable;
use crate::config::{CityConfig, PlacementRules};
use crate::landmarks::LandmarkSpec;
use crate::palette::Palette;
use crate::roads::{hits_road, RoadSegment};

/// Anchor point buildings of one city block are scattered around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockCenter {
    pub x: f32,
    pub z: f32,
}

impl BlockCenter {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn distance_from_origin(&self) -> f32 {
        Vec2::new(self.x, self.z).length()
    }
}

/// Tables a generation pass samples from.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams<'a> {
    pub rules: &'a PlacementRules,
    pub categories: &'a CategoryTable,
    pub palette: &'a Palette,
}

impl<'a> From<&'a CityConfig> for LayoutParams<'a> {
    fn from(config: &'a CityConfig) -> Self {
        Self {
            rules: &config.rules,
            categories: &config.categories,
            palette: &config.palette,
        }
    }
}

/// Buildings accepted so far in one pass, and the rule for accepting more.
#[derive(Debug)]
pub struct PlacementSet<'a> {
    roads: &'a [RoadSegment],
    buffer: f32,
    placements: Vec<BuildingPlacement>,
}

impl<'a> PlacementSet<'a> {
    pub fn new(roads: &'a [RoadSegment], buffer: f32) -> Self {
        Self {
            roads,
            buffer,
            placements: Vec::new(),
        }
    }

    /// Clear of every road, and at least `buffer` away from every accepted building.
    pub fn is_clear(&self, footprint: &Footprint) -> bool {
        !hits_road(self.roads, footprint)
            && !self
                .placements
                .iter()
                .any(|p| p.footprint().intersects(footprint, self.buffer))
    }

    /// Accept `placement` if its footprint is clear. Returns whether it was kept.
    pub fn try_accept(&mut self, placement: BuildingPlacement) -> bool {
        if self.is_clear(&placement.footprint()) {
            self.placements.push(placement);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn placements(&self) -> &[BuildingPlacement] {
        &self.placements
    }

    pub fn into_placements(self) -> Vec<BuildingPlacement> {
        self.placements
    }
}

/// What happened in one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockReport {
    pub center: BlockCenter,
    /// Candidates drawn for the block.
    pub requested: u32,
    pub placed: u32,
    /// Draws spent across all candidates.
    pub attempts: u32,
    /// Most draws any single candidate needed (or used up).
    pub max_attempts_used: u32,
}

impl BlockReport {
    pub fn dropped(&self) -> u32 {
        self.requested - self.placed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub blocks: Vec<BlockReport>,
    pub landmarks_placed: Vec<String>,
    pub landmarks_rejected: Vec<String>,
}

impl LayoutReport {
    pub fn requested(&self) -> u32 {
        self.blocks.iter().map(|b| b.requested).sum()
    }

    pub fn dropped(&self) -> u32 {
        self.blocks.iter().map(|b| b.dropped()).sum()
    }
}

/// Result of one generation pass. Placements are in insertion order: blocks in
/// input order, then landmarks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityLayout {
    pub placements: Vec<BuildingPlacement>,
    pub report: LayoutReport,
}

impl CityLayout {
    pub fn count(&self, category: BuildingCategory) -> usize {
        self.placements.iter().filter(|p| p.category == category).count()
    }
}

/// Place buildings around every block, then the landmarks.
///
/// Candidates that exhaust `rules.max_attempts` are dropped without error, so a
/// crowded or road-covered config yields a sparse (possibly empty) layout.
pub fn generate_layout<R: Rng + ?Sized>(
    roads: &[RoadSegment],
    blocks: &[BlockCenter],
    landmarks: &[LandmarkSpec],
    params: LayoutParams<'_>,
    rng: &mut R,
) -> CityLayout {
    let mut set = PlacementSet::new(roads, params.rules.building_buffer);
    let mut report = LayoutReport::default();

    for block in blocks {
        report.blocks.push(fill_block(*block, &mut set, params, rng));
    }

    for landmark in landmarks {
        let color = params.palette.pick(rng);
        if set.try_accept(landmark.to_placement(color)) {
            report.landmarks_placed.push(landmark.name.clone());
        } else {
            log::debug!("Landmark {:?} rejected: site is blocked", landmark.name);
            report.landmarks_rejected.push(landmark.name.clone());
        }
    }

    log::info!(
        "Layout: {} buildings placed ({} candidates, {} dropped), {} of {} landmarks",
        set.len(),
        report.requested() as usize + landmarks.len(),
        report.dropped(),
        report.landmarks_placed.len(),
        landmarks.len(),
    );

    CityLayout {
        placements: set.into_placements(),
        report,
    }
}

/// Draw and place the candidates of one block.
fn fill_block<R: Rng + ?Sized>(
    block: BlockCenter,
    set: &mut PlacementSet<'_>,
    params: LayoutParams<'_>,
    rng: &mut R,
) -> BlockReport {
    let rules = params.rules;
    let mut report = BlockReport {
        center: block,
        requested: 0,
        placed: 0,
        attempts: 0,
        max_attempts_used: 0,
    };
    if rules.min_buildings_per_block > rules.max_buildings_per_block {
        log::warn!(
            "Skipping block ({}, {}): min_buildings_per_block {} exceeds max {}",
            block.x,
            block.z,
            rules.min_buildings_per_block,
            rules.max_buildings_per_block
        );
        return report;
    }
    let requested = rng.gen_range(rules.min_buildings_per_block..=rules.max_buildings_per_block);
    report.requested = requested;
    let distance = block.distance_from_origin();

    for candidate in 0..requested {
        let roll: f32 = rng.gen();
        let Some(band) = params.categories.pick(distance, roll) else {
            // Empty table: nothing can be sized.
            report.requested = candidate;
            break;
        };

        let mut used = 0;
        let mut accepted = false;
        while used < rules.max_attempts {
            used += 1;
            let height = band.height.sample(rng);
            let width = band.width.sample(rng);
            let depth = band.width.sample(rng);
            let x = block.x + (rng.gen::<f32>() - 0.5) * rules.block_spread;
            let z = block.z + (rng.gen::<f32>() - 0.5) * rules.block_spread;

            let color = params.palette.pick(rng);

            let placement =
                BuildingPlacement::on_ground(x, z, width, height, depth, color, band.category);
            if set.try_accept(placement) {
                accepted = true;
                break;
            }
        }

        report.attempts += used;
        report.max_attempts_used = report.max_attempts_used.max(used);
        if accepted {
            report.placed += 1;
        } else {
            log::debug!(
                "Dropped {} candidate at block ({}, {}) after {} attempts",
                band.category.label(),
                block.x,
                block.z,
                used
            );
        }
    }

    report
}

impl CityConfig {
    /// Run [`generate_layout`] over this config's roads, blocks and landmarks.
    pub fn generate_layout<R: Rng + ?Sized>(&self, rng: &mut R) -> CityLayout {
        generate_layout(
            &self.roads,
            &self.blocks,
            &self.landmarks,
            LayoutParams::from(self),
            rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roads::shinjuku_road_network;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_invariants(layout: &CityLayout, roads: &[RoadSegment], buffer: f32) {
        for (i, a) in layout.placements.iter().enumerate() {
            assert!(!hits_road(roads, &a.footprint()), "placement {i} sits on a road");
            assert_eq!(a.position.y, a.scale.y * 0.5);
            for b in &layout.placements[i + 1..] {
                assert!(
                    !a.footprint().intersects(&b.footprint(), buffer),
                    "{a:?} overlaps {b:?}"
                );
            }
        }
    }

    #[test]
    fn default_city_respects_invariants() {
        let config = CityConfig::default();
        let mut rng = StdRng::seed_from_u64(2024);
        let layout = config.generate_layout(&mut rng);
        assert!(!layout.placements.is_empty());
        assert_eq!(layout.report.blocks.len(), config.blocks.len());
        assert_invariants(&layout, &config.roads, config.rules.building_buffer);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = CityConfig::default();
        let a = config.generate_layout(&mut StdRng::seed_from_u64(42));
        let b = config.generate_layout(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let config = CityConfig::default();
        let a = config.generate_layout(&mut StdRng::seed_from_u64(1));
        let b = config.generate_layout(&mut StdRng::seed_from_u64(2));
        assert_ne!(a.placements, b.placements);
    }

    #[test]
    fn single_strip_keeps_buildings_off_the_road() {
        let roads = [RoadSegment::new(0.0, 0.0, 200.0, 8.0)];
        let blocks = [BlockCenter::new(20.0, 20.0)];
        let config = CityConfig::default();
        let layout = generate_layout(
            &roads,
            &blocks,
            &[],
            LayoutParams::from(&config),
            &mut StdRng::seed_from_u64(5),
        );
        assert!(!layout.placements.is_empty());
        for p in &layout.placements {
            assert!(p.position.z.abs() > 4.0, "building at z = {}", p.position.z);
        }
    }

    #[test]
    fn overlapping_landmarks_keep_only_the_first() {
        let landmarks = [
            LandmarkSpec::new("First", 0.0, 0.0, 10.0, 60.0, 10.0),
            LandmarkSpec::new("Second", 6.0, 4.0, 8.0, 50.0, 8.0),
        ];
        let config = CityConfig::default();
        let layout = generate_layout(
            &[],
            &[],
            &landmarks,
            LayoutParams::from(&config),
            &mut StdRng::seed_from_u64(9),
        );
        assert_eq!(layout.placements.len(), 1);
        assert_eq!(layout.placements[0].name.as_deref(), Some("First"));
        assert_eq!(layout.placements[0].category, BuildingCategory::Landmark);
        assert_eq!(layout.report.landmarks_rejected, vec!["Second".to_string()]);
    }

    #[test]
    fn block_surrounded_by_roads_stays_empty() {
        // Three overlapping strips cover z in (-16, 16), wider than the ±15 spread.
        let roads = [
            RoadSegment::new(0.0, -10.0, 100.0, 12.0),
            RoadSegment::new(0.0, 0.0, 100.0, 12.0),
            RoadSegment::new(0.0, 10.0, 100.0, 12.0),
        ];
        let blocks = [BlockCenter::new(0.0, 0.0)];
        let config = CityConfig::default();
        let layout = generate_layout(
            &roads,
            &blocks,
            &[],
            LayoutParams::from(&config),
            &mut StdRng::seed_from_u64(77),
        );
        assert!(layout.placements.is_empty());
        let block = &layout.report.blocks[0];
        assert_eq!(block.placed, 0);
        assert_eq!(block.attempts, block.requested * config.rules.max_attempts);
        assert_eq!(block.max_attempts_used, config.rules.max_attempts);
    }

    #[test]
    fn buffer_keeps_neighbors_apart() {
        let config = CityConfig::default();
        let mut set = PlacementSet::new(&config.roads, 2.0);
        let first = LandmarkSpec::new("A", 20.0, 20.0, 6.0, 40.0, 6.0);
        assert!(set.try_accept(first.to_placement(city_core::Rgb::new(0, 0, 0))));
        // Centers 5 apart: edges 1 unit apart, inside the 2-unit buffer.
        let near = Footprint::from_center_size(25.0, 20.0, 2.0, 2.0);
        assert!(!set.is_clear(&near));
        // Edges exactly one buffer apart.
        let far = Footprint::from_center_size(26.0, 20.0, 2.0, 2.0);
        assert!(set.is_clear(&far));
        assert_eq!(set.len(), 1);
        assert!(!set.try_accept(first.to_placement(city_core::Rgb::new(0, 0, 0))));
    }

    #[test]
    fn inverted_building_count_skips_blocks() {
        let mut config = CityConfig::default();
        config.rules.min_buildings_per_block = 9;
        config.rules.max_buildings_per_block = 3;
        let layout = config.generate_layout(&mut StdRng::seed_from_u64(1));
        assert_eq!(layout.report.blocks.len(), config.blocks.len());
        assert!(layout.report.blocks.iter().all(|b| b.requested == 0 && b.attempts == 0));
        assert_eq!(layout.count(BuildingCategory::Landmark), layout.placements.len());
        assert_eq!(layout.report.landmarks_placed.len(), 4);
    }

    #[test]
    fn empty_category_table_places_nothing() {
        let config = CityConfig::default();
        let categories = CategoryTable { buckets: vec![] };
        let params = LayoutParams {
            categories: &categories,
            ..LayoutParams::from(&config)
        };
        let layout = generate_layout(
            &config.roads,
            &config.blocks,
            &[],
            params,
            &mut StdRng::seed_from_u64(3),
        );
        assert!(layout.placements.is_empty());
        assert!(layout.report.blocks.iter().all(|b| b.requested == 0));
    }

    fn arb_road() -> impl Strategy<Value = RoadSegment> {
        (-80.0f32..80.0, -80.0f32..80.0, 1.0f32..120.0, 1.0f32..120.0)
            .prop_map(|(x, z, w, h)| RoadSegment::new(x, z, w, h))
    }

    fn arb_block() -> impl Strategy<Value = BlockCenter> {
        (-80.0f32..80.0, -80.0f32..80.0).prop_map(|(x, z)| BlockCenter::new(x, z))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn random_configs_never_overlap(
            seed in any::<u64>(),
            roads in prop::collection::vec(arb_road(), 0..6),
            blocks in prop::collection::vec(arb_block(), 1..8),
            buffer in 0.0f32..4.0,
        ) {
            let mut config = CityConfig::default();
            config.rules.building_buffer = buffer;
            let layout = generate_layout(
                &roads,
                &blocks,
                &config.landmarks,
                LayoutParams::from(&config),
                &mut StdRng::seed_from_u64(seed),
            );
            assert_invariants(&layout, &roads, buffer);
        }

        #[test]
        fn counts_and_attempts_are_bounded(
            seed in any::<u64>(),
            min in 0u32..5,
            extra in 0u32..6,
            cap in 1u32..30,
        ) {
            let mut config = CityConfig::default();
            config.rules.min_buildings_per_block = min;
            config.rules.max_buildings_per_block = min + extra;
            config.rules.max_attempts = cap;
            let layout = config.generate_layout(&mut StdRng::seed_from_u64(seed));
            for block in &layout.report.blocks {
                prop_assert!(block.requested >= min && block.requested <= min + extra);
                prop_assert!(block.placed <= block.requested);
                prop_assert!(block.max_attempts_used <= cap);
                prop_assert!(block.attempts <= block.requested * cap);
            }
            let from_blocks: u32 = layout.report.blocks.iter().map(|b| b.placed).sum();
            prop_assert_eq!(
                layout.placements.len(),
                from_blocks as usize + layout.report.landmarks_placed.len()
            );
        }

        #[test]
        fn seeded_runs_are_reproducible(seed in any::<u64>()) {
            let config = CityConfig::default();
            let a = config.generate_layout(&mut StdRng::seed_from_u64(seed));
            let b = config.generate_layout(&mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(a, b);
        }
    }
}
