//! Directional qualification and weighted distance scoring.
//!
//! A candidate qualifies for a direction when its leading edge lies beyond the
//! current node's trailing edge along that axis (within a small tolerance for
//! adjoining or slightly overlapping elements) *and* its extent on the
//! perpendicular axis overlaps the current node's — "down" means directly
//! below, not anywhere in the lower half-plane.
//!
//! Qualified candidates rank by a weighted sum of the primary-axis gap and the
//! perpendicular center offset; the off-axis penalty weighs heavier so a
//! nearby-but-misaligned element loses to a slightly farther aligned one. The
//! caller breaks exact ties by registration order.

use crate::geometry::Region;
use crate::input::Direction;

/// Default overlap tolerance, in cells/pixels.
pub const DEFAULT_OVERLAP_TOLERANCE: i32 = 1;

/// Tunable scoring coefficients.
///
/// The exact ratio is a product decision, not a law of nature; these defaults
/// penalize perpendicular misalignment at twice the rate of primary-axis
/// distance and behave well on grid layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    /// Weight of the gap along the direction of travel.
    pub gap: i64,
    /// Weight of the perpendicular center offset.
    pub alignment: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { gap: 1, alignment: 2 }
    }
}

/// Whether `candidate` lies in `direction` from `current`, within `tolerance`.
pub fn qualifies(current: Region, candidate: Region, direction: Direction, tolerance: i32) -> bool {
    let beyond = match direction {
        Direction::Left => candidate.right() <= current.left() + tolerance,
        Direction::Right => candidate.left() >= current.right() - tolerance,
        Direction::Up => candidate.bottom() <= current.top() + tolerance,
        Direction::Down => candidate.top() >= current.bottom() - tolerance,
    };
    if !beyond {
        return false;
    }
    // Perpendicular extents must overlap (within tolerance): ranges [a1, a2)
    // and [b1, b2) overlap when each start is before the other's end.
    let (a1, a2, b1, b2) = if direction.is_horizontal() {
        (current.top(), current.bottom(), candidate.top(), candidate.bottom())
    } else {
        (current.left(), current.right(), candidate.left(), candidate.right())
    };
    a1 < b2 + tolerance && b1 < a2 + tolerance
}

/// Weighted distance from `current` to a qualified `candidate`. Lower is better.
pub fn score(
    current: Region,
    candidate: Region,
    direction: Direction,
    weights: ScoreWeights,
) -> i64 {
    let gap = match direction {
        Direction::Left => current.left() - candidate.right(),
        Direction::Right => candidate.left() - current.right(),
        Direction::Up => current.top() - candidate.bottom(),
        Direction::Down => candidate.top() - current.bottom(),
    };
    // A tolerated overlap yields a slightly negative gap; clamp so overlap
    // never scores better than adjacency.
    let gap = i64::from(gap.max(0));

    let offset = if direction.is_horizontal() {
        (candidate.center_y() - current.center_y()).abs()
    } else {
        (candidate.center_x() - current.center_x()).abs()
    };

    weights.gap * gap + weights.alignment * i64::from(offset)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: i32 = DEFAULT_OVERLAP_TOLERANCE;

    fn region(x: i32, y: i32) -> Region {
        Region::new(x, y, 10, 10)
    }

    // ── Qualification ────────────────────────────────────────────────

    #[test]
    fn right_neighbor_qualifies() {
        let a = region(0, 0);
        let b = region(20, 0);
        assert!(qualifies(a, b, Direction::Right, TOL));
        assert!(!qualifies(a, b, Direction::Left, TOL));
        assert!(!qualifies(a, b, Direction::Up, TOL));
        assert!(!qualifies(a, b, Direction::Down, TOL));
    }

    #[test]
    fn all_four_directions() {
        let center = region(20, 20);
        assert!(qualifies(center, region(0, 20), Direction::Left, TOL));
        assert!(qualifies(center, region(40, 20), Direction::Right, TOL));
        assert!(qualifies(center, region(20, 0), Direction::Up, TOL));
        assert!(qualifies(center, region(20, 40), Direction::Down, TOL));
    }

    #[test]
    fn adjoining_edges_qualify() {
        // b starts exactly where a ends.
        let a = region(0, 0);
        let b = region(10, 0);
        assert!(qualifies(a, b, Direction::Right, TOL));
    }

    #[test]
    fn slight_overlap_within_tolerance_qualifies() {
        let a = region(0, 0);
        let b = region(9, 0); // overlaps a by 1
        assert!(qualifies(a, b, Direction::Right, 1));
        assert!(!qualifies(a, b, Direction::Right, 0));
    }

    #[test]
    fn diagonal_does_not_qualify() {
        // b is below and fully to the right of a: not "directly below".
        let a = region(20, 0);
        let b = region(0, 20);
        assert!(!qualifies(a, b, Direction::Down, TOL));
        assert!(!qualifies(a, b, Direction::Left, TOL));
    }

    #[test]
    fn partial_perpendicular_overlap_qualifies() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(20, 5, 10, 10); // overlaps a's rows 5..10
        assert!(qualifies(a, b, Direction::Right, TOL));
    }

    #[test]
    fn behind_does_not_qualify() {
        let a = region(20, 0);
        let b = region(0, 0);
        assert!(!qualifies(a, b, Direction::Right, TOL));
        assert!(qualifies(a, b, Direction::Left, TOL));
    }

    // ── Scoring ──────────────────────────────────────────────────────

    #[test]
    fn nearer_candidate_scores_lower() {
        let current = region(0, 0);
        let near = region(15, 0);
        let far = region(40, 0);
        let w = ScoreWeights::default();
        assert!(
            score(current, near, Direction::Right, w) < score(current, far, Direction::Right, w)
        );
    }

    #[test]
    fn aligned_candidate_beats_offset_one() {
        let current = Region::new(0, 0, 10, 10);
        let aligned = Region::new(20, 0, 10, 10);
        let offset = Region::new(18, 6, 10, 10); // nearer but misaligned
        let w = ScoreWeights::default();
        assert!(
            score(current, aligned, Direction::Right, w)
                < score(current, offset, Direction::Right, w)
        );
    }

    #[test]
    fn overlap_clamps_to_adjacency() {
        let current = region(0, 0);
        let overlapping = region(9, 0);
        let adjoining = region(10, 0);
        let w = ScoreWeights::default();
        assert_eq!(
            score(current, overlapping, Direction::Right, w),
            score(current, adjoining, Direction::Right, w)
        );
    }

    #[test]
    fn score_is_symmetric_per_axis() {
        let current = region(20, 20);
        let w = ScoreWeights::default();
        let left = score(current, region(0, 20), Direction::Left, w);
        let right = score(current, region(40, 20), Direction::Right, w);
        assert_eq!(left, right);
    }

    #[test]
    fn weights_are_tunable() {
        let current = Region::new(0, 0, 10, 10);
        let candidate = Region::new(20, 4, 10, 10);
        let gap_only = ScoreWeights { gap: 1, alignment: 0 };
        let align_only = ScoreWeights { gap: 0, alignment: 1 };
        assert_eq!(score(current, candidate, Direction::Right, gap_only), 10);
        assert_eq!(score(current, candidate, Direction::Right, align_only), 4);
    }

    #[test]
    fn deterministic_rescoring() {
        let current = region(0, 0);
        let candidate = region(25, 0);
        let w = ScoreWeights::default();
        let first = score(current, candidate, Direction::Right, w);
        for _ in 0..10 {
            assert_eq!(score(current, candidate, Direction::Right, w), first);
        }
    }
}
