//! Walkable-area queries.

use bevy::prelude::*;

use crate::config::Footprint;

/// A closed polygon in Y-up world pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub points: Vec<Vec2>,
}

impl Polygon {
    pub fn new(points: impl Into<Vec<Vec2>>) -> Self {
        Self {
            points: points.into(),
        }
    }

    /// Crossing-number test: cast a ray towards +X and count edge crossings.
    ///
    /// Polygons with fewer than three points contain nothing. Points exactly
    /// on an edge may land on either side.
    pub fn contains(&self, point: Vec2) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// The walkable polygons of a loaded room.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollisionIndex {
    polygons: Vec<Polygon>,
    footprint: Footprint,
}

impl CollisionIndex {
    pub fn new(footprint: Footprint) -> Self {
        Self {
            polygons: Vec::new(),
            footprint,
        }
    }

    pub fn with_polygons(footprint: Footprint, polygons: impl IntoIterator<Item = Polygon>) -> Self {
        Self {
            polygons: polygons.into_iter().collect(),
            footprint,
        }
    }

    pub fn insert(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// True when any polygon contains `point`.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.polygons.iter().any(|p| p.contains(point))
    }

    /// Whether a character may stand at `candidate`.
    ///
    /// Both footprint probes must lie inside some polygon, not necessarily
    /// the same one. An empty index allows nothing.
    pub fn allows_move(&self, candidate: Vec2) -> bool {
        let [left, right] = self.footprint.probes(candidate);
        self.contains_point(left) && self.contains_point(right)
    }
}
