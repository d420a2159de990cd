//! Road network: the fixed grid buildings must stay clear of.

use city_core::Footprint;
use serde::{Deserialize, Serialize};

/// Half of the standard road width.
pub const ROAD_HALF_WIDTH: f32 = 4.0;

/// Axis-aligned road rectangle. `width` spans x, `height` spans z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
}

impl RoadSegment {
    pub const fn new(x: f32, z: f32, width: f32, height: f32) -> Self {
        Self { x, z, width, height }
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::from_center_size(self.x, self.z, self.width, self.height)
    }

    /// Runs along x (east-west).
    pub fn is_horizontal(&self) -> bool {
        self.width >= self.height
    }
}

/// Painted line on top of a road.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadMarking {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
}

/// Main crossing plus two parallel roads on each axis.
pub fn shinjuku_road_network() -> Vec<RoadSegment> {
    let w = ROAD_HALF_WIDTH * 2.0;
    vec![
        RoadSegment::new(0.0, 0.0, 200.0, w),
        RoadSegment::new(0.0, 0.0, w, 200.0),
        RoadSegment::new(40.0, 0.0, w, 200.0),
        RoadSegment::new(-40.0, 0.0, w, 200.0),
        RoadSegment::new(0.0, 40.0, 200.0, w),
        RoadSegment::new(0.0, -40.0, 200.0, w),
    ]
}

/// Center lines of the main crossing.
pub fn road_markings() -> Vec<RoadMarking> {
    vec![
        RoadMarking { x: 0.0, z: 0.0, width: 180.0, height: 0.5 },
        RoadMarking { x: 0.0, z: 0.0, width: 0.5, height: 180.0 },
    ]
}

/// Whether `footprint` touches the interior of any road.
pub fn hits_road(roads: &[RoadSegment], footprint: &Footprint) -> bool {
    roads.iter().any(|road| road.footprint().intersects(footprint, 0.0))
}
