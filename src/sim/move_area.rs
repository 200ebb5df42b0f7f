//! Jump trigger regions and the sorted index over them
//!
//! A move area is a one-cell-tall strip of grid cells carrying optional
//! up/down jump target descriptors. Areas are level data: immutable after
//! construction, inserted once at setup, then queried every tick for the
//! player and for every rat. The index keeps areas sorted by their bottom
//! edge so a query binary-searches into the right "row" and only scans the
//! areas sharing it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::body::Body;

/// A jump target in grid units, as authored in level data
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target {
    pub offset_x: i32,
    pub offset_y: i32,
    pub x_limit_start: Option<i32>,
    pub x_limit_end: Option<i32>,
    /// Scale the x offset by the jumper's facing (default true)
    pub scale_x_by_facing: bool,
}

impl Target {
    pub fn new(offset_x: i32, offset_y: i32) -> Self {
        Self {
            offset_x,
            offset_y,
            x_limit_start: None,
            x_limit_end: None,
            scale_x_by_facing: true,
        }
    }

    pub fn limited(offset_x: i32, offset_y: i32, start: i32, end: i32) -> Self {
        Self {
            x_limit_start: Some(start),
            x_limit_end: Some(end),
            ..Self::new(offset_x, offset_y)
        }
    }

    pub fn limited_from(offset_x: i32, offset_y: i32, start: i32) -> Self {
        Self {
            x_limit_start: Some(start),
            ..Self::new(offset_x, offset_y)
        }
    }

    pub fn absolute_x(mut self) -> Self {
        self.scale_x_by_facing = false;
        self
    }
}

/// A [`Target`] scaled into world units
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldTarget {
    /// Offset from the jumper's position to the landing spot's bottom-left
    pub offset: Vec2,
    pub x_limit_start: Option<f32>,
    pub x_limit_end: Option<f32>,
    pub scale_x_by_facing: bool,
}

impl WorldTarget {
    fn new(target: Target, cell_size: f32) -> Self {
        Self {
            offset: Vec2::new(
                target.offset_x as f32 * cell_size,
                target.offset_y as f32 * cell_size,
            ),
            x_limit_start: target.x_limit_start.map(|l| l as f32 * cell_size),
            x_limit_end: target.x_limit_end.map(|l| l as f32 * cell_size),
            scale_x_by_facing: target.scale_x_by_facing,
        }
    }
}

/// A trigger region exposing optional up/down jump targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveArea {
    pub aabb: Aabb,
    pub down_target: Option<WorldTarget>,
    pub up_target: Option<WorldTarget>,
}

impl MoveArea {
    /// Build from an inclusive cell span `[x_start, x_end]` on row `y`
    pub fn new(
        cell_size: f32,
        x_start: i32,
        x_end: i32,
        y: i32,
        down_target: Option<Target>,
        up_target: Option<Target>,
    ) -> Self {
        Self {
            aabb: Aabb::from_grid(x_start, y, x_end, y, cell_size),
            down_target: down_target.map(|t| WorldTarget::new(t, cell_size)),
            up_target: up_target.map(|t| WorldTarget::new(t, cell_size)),
        }
    }

    /// Landing position (eventual top-left) for a downward jump, or `None`
    /// if this area has no down target. Depends on the body's live position
    /// and facing, so it is recomputed on every query.
    pub fn down_target_for(&self, body: &Body) -> Option<Vec2> {
        self.down_target.map(|t| resolve_target(body, &t))
    }

    /// Landing position for an upward jump, if any
    pub fn up_target_for(&self, body: &Body) -> Option<Vec2> {
        self.up_target.map(|t| resolve_target(body, &t))
    }
}

fn resolve_target(body: &Body, target: &WorldTarget) -> Vec2 {
    let direction = if target.scale_x_by_facing {
        body.facing.sign()
    } else {
        1.0
    };

    let mut x = body.position.x + target.offset.x * direction;
    if let Some(limit) = target.x_limit_start {
        x = x.max(limit);
    }
    if let Some(limit) = target.x_limit_end {
        x = x.min(limit);
    }

    // offset.y points at the landing surface; shift up by the body height
    // so the result is the body's eventual top-left corner
    let y = body.position.y + target.offset.y - body.height;

    Vec2::new(x, y)
}

/// Move areas kept sorted ascending by `aabb.bottom`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveAreaIndex {
    areas: Vec<MoveArea>,
}

impl MoveAreaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveArea> {
        self.areas.iter()
    }

    /// Insert keeping the bottom-edge ordering: scan from the tail for the
    /// first element whose bottom is <= the new one and insert just after
    /// it (stable for ties). Linear, but insertion only happens at level
    /// setup.
    pub fn insert(&mut self, area: MoveArea) {
        for i in (0..self.areas.len()).rev() {
            if self.areas[i].aabb.bottom <= area.aabb.bottom {
                self.areas.insert(i + 1, area);
                return;
            }
        }
        self.areas.insert(0, area);
    }

    /// Binary search for ANY index whose y-interval overlaps the box.
    ///
    /// Not necessarily the first or last such index; rows sharing a bottom
    /// edge sit next to each other, so the caller expands outward from the
    /// hit.
    fn find_intersecting_y(&self, aabb: &Aabb) -> Option<usize> {
        let mut left = 0;
        let mut right = self.areas.len(); // exclusive

        while left < right {
            let mid = (left + right) / 2;

            let area = &self.areas[mid];
            if area.aabb.colliding_y(aabb) {
                return Some(mid);
            }
            if aabb.top >= area.aabb.top {
                left = mid + 1;
            } else {
                right = mid;
            }
        }

        None
    }

    /// Find a move area overlapping the query box, if any.
    ///
    /// Binary-searches for a y-overlapping index, expands right then left
    /// over the contiguous run of y-overlapping neighbors, and returns the
    /// first collected candidate that also overlaps in x.
    pub fn query_containing(&self, aabb: &Aabb) -> Option<&MoveArea> {
        let index = self.find_intersecting_y(aabb)?;

        let mut candidates = vec![index];

        for i in index + 1..self.areas.len() {
            if self.areas[i].aabb.colliding_y(aabb) {
                candidates.push(i);
            } else {
                break;
            }
        }

        for i in (0..index).rev() {
            if self.areas[i].aabb.colliding_y(aabb) {
                candidates.push(i);
            } else {
                break;
            }
        }

        candidates
            .into_iter()
            .map(|i| &self.areas[i])
            .find(|area| area.aabb.colliding_x(aabb))
    }

    /// Uniform random area, `None` on an empty index. Callers re-roll if
    /// the pick lands somewhere unsuitable (e.g. next to the player).
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&MoveArea> {
        if self.areas.is_empty() {
            return None;
        }
        let i = rng.random_range(0..self.areas.len());
        Some(&self.areas[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Facing;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const CELL: f32 = 10.0;

    fn area(x_start: i32, x_end: i32, y: i32) -> MoveArea {
        MoveArea::new(CELL, x_start, x_end, y, Some(Target::new(1, 3)), None)
    }

    fn index_of(rows: &[(i32, i32, i32)]) -> MoveAreaIndex {
        let mut index = MoveAreaIndex::new();
        for &(xs, xe, y) in rows {
            index.insert(area(xs, xe, y));
        }
        index
    }

    fn is_sorted(index: &MoveAreaIndex) -> bool {
        index
            .areas
            .windows(2)
            .all(|w| w[0].aabb.bottom <= w[1].aabb.bottom)
    }

    #[test]
    fn test_insert_keeps_sorted_order() {
        let index = index_of(&[(0, 5, 8), (0, 5, 2), (0, 5, 13), (0, 5, 2), (0, 5, 0)]);
        assert!(is_sorted(&index));
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_insert_smallest_goes_to_front() {
        let mut index = index_of(&[(0, 5, 8), (0, 5, 13)]);
        index.insert(area(0, 5, 1));
        assert!(is_sorted(&index));
        assert_eq!(index.areas[0].aabb.bottom, 20.0);
    }

    #[test]
    fn test_query_hit_and_miss() {
        let index = index_of(&[(0, 5, 2), (8, 12, 2), (0, 5, 8)]);

        // Overlapping row 2, x over the second strip
        let probe = Aabb::from_rect(85.0, 22.0, 10.0, 10.0);
        let found = index.query_containing(&probe).unwrap();
        assert_eq!(found.aabb.left, 80.0);

        // y matches but no strip covers this x
        let probe = Aabb::from_rect(135.0, 22.0, 10.0, 10.0);
        assert!(index.query_containing(&probe).is_none());

        // no y overlap at all
        let probe = Aabb::from_rect(10.0, 300.0, 10.0, 10.0);
        assert!(index.query_containing(&probe).is_none());
    }

    #[test]
    fn test_query_expands_across_row_ties() {
        // Many strips on the same row: the binary search can land on any
        // of them, expansion must still reach the one overlapping in x.
        let index = index_of(&[
            (0, 1, 4),
            (3, 4, 4),
            (6, 7, 4),
            (9, 10, 4),
            (12, 13, 4),
            (0, 13, 9),
        ]);

        let probe = Aabb::from_rect(121.0, 42.0, 8.0, 6.0);
        let found = index.query_containing(&probe).unwrap();
        assert_eq!(found.aabb.left, 120.0);
    }

    #[test]
    fn test_pick_random_empty_is_none() {
        let index = MoveAreaIndex::new();
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(index.pick_random(&mut rng).is_none());
    }

    #[test]
    fn test_pick_random_returns_member() {
        let index = index_of(&[(0, 5, 2), (0, 5, 8), (0, 5, 13)]);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..20 {
            let picked = index.pick_random(&mut rng).unwrap();
            assert!(index.iter().any(|a| a.aabb == picked.aabb));
        }
    }

    #[test]
    fn test_target_resolution_scales_by_facing() {
        let mut body = Body::new(Vec2::new(100.0, 200.0), 20.0, 30.0);
        body.facing = Facing::Left;

        let area = MoveArea::new(CELL, 0, 5, 2, Some(Target::new(2, 3)), None);
        let target = area.down_target_for(&body).unwrap();
        // offset (2,3) cells, x scaled by facing -1, y shifted up by height
        assert_eq!(target, Vec2::new(80.0, 200.0));
    }

    #[test]
    fn test_target_resolution_limits_and_absolute() {
        let body = Body::new(Vec2::new(100.0, 200.0), 20.0, 30.0);

        let clamped = MoveArea::new(CELL, 0, 5, 2, None, Some(Target::limited(5, -4, 2, 11)));
        let target = clamped.up_target_for(&body).unwrap();
        // raw x = 100 + 50 = 150, clamped to x_limit_end 110
        assert_eq!(target.x, 110.0);
        assert_eq!(target.y, 200.0 - 40.0 - 30.0);

        let absolute = MoveArea::new(
            CELL,
            0,
            5,
            2,
            Some(Target::new(3, 3).absolute_x()),
            None,
        );
        let mut body = body.clone();
        body.facing = Facing::Left;
        let target = absolute.down_target_for(&body).unwrap();
        // facing ignored when scale_x_by_facing is off
        assert_eq!(target.x, 130.0);
    }

    proptest! {
        /// The stored sequence is non-decreasing in bottom after any
        /// insertion order
        #[test]
        fn prop_sorted_invariant(rows in proptest::collection::vec((0i32..20, 0i32..20, 0i32..40), 0..40)) {
            let mut index = MoveAreaIndex::new();
            for (xs, spread, y) in rows {
                index.insert(area(xs, xs + spread, y));
            }
            prop_assert!(is_sorted(&index));
        }

        /// `query_containing` returns Some iff some inserted area collides
        /// with the probe
        #[test]
        fn prop_query_matches_linear_scan(
            rows in proptest::collection::vec((0i32..15, 0i32..5, 0i32..25), 1..30),
            px in 0.0f32..300.0,
            py in 0.0f32..300.0,
        ) {
            let mut index = MoveAreaIndex::new();
            for (xs, spread, y) in rows {
                index.insert(area(xs, xs + spread, y));
            }
            let probe = Aabb::from_rect(px, py, 25.0, 15.0);

            let expected = index.iter().any(|a| a.aabb.colliding(&probe));
            prop_assert_eq!(index.query_containing(&probe).is_some(), expected);
        }
    }
}
